use crate::DriverOp;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tableql_core::stmt::Select;

/// Read side of a [`LoggingDriver`](crate::LoggingDriver)'s record.
///
/// Clones share the same record.
#[derive(Debug, Clone)]
pub struct ExecLog {
    ops: Arc<Mutex<Vec<DriverOp>>>,
}

impl ExecLog {
    pub(crate) fn new(ops: Arc<Mutex<Vec<DriverOp>>>) -> ExecLog {
        ExecLog { ops }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of selects against `table`.
    pub fn selects_from(&self, table: &str) -> usize {
        self.lock()
            .iter()
            .filter_map(|op| op.operation.as_select())
            .filter(|select| select.table == table)
            .count()
    }

    /// Every select, in the order the driver ran them.
    pub fn selects(&self) -> Vec<Select> {
        self.lock()
            .iter()
            .filter_map(|op| op.operation.as_select().cloned())
            .collect()
    }

    /// Number of raw SQL queries, which only introspection issues.
    pub fn sql_queries(&self) -> usize {
        self.lock()
            .iter()
            .filter(|op| op.operation.is_query_sql())
            .count()
    }

    /// Runs `f` over the full record, responses included.
    pub fn with_ops<R>(&self, f: impl FnOnce(&[DriverOp]) -> R) -> R {
        f(&self.lock())
    }

    pub fn clear(&mut self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DriverOp>> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
