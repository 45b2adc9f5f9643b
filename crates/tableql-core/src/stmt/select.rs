use super::{Expr, Filter, Row, Value};
use crate::Result;

/// Select every column of a table's rows matching an optional condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Schema qualifying `table`. Unqualified names resolve through the
    /// connection's search path.
    pub schema: Option<String>,

    pub table: String,
    pub filter: Option<Expr>,
}

impl Select {
    pub fn new(table: impl Into<String>, filter: Option<Expr>) -> Select {
        Select {
            schema: None,
            table: table.into(),
            filter,
        }
    }

    /// Rows of `table` equal to every argument in `filter`.
    pub fn filtered(table: impl Into<String>, filter: &Filter) -> Select {
        Select::new(table, Expr::and_from_vec(filter.to_exprs()))
    }

    /// Rows of `table` whose `column` is one of `keys` and that satisfy
    /// `filter`. This is the statement a loader dispatches for one batch.
    pub fn batch(
        table: impl Into<String>,
        column: impl Into<String>,
        keys: Vec<Value>,
        filter: &Filter,
    ) -> Select {
        let mut operands = vec![Expr::in_list(column, keys)];
        operands.extend(filter.to_exprs());
        Select::new(table, Expr::and_from_vec(operands))
    }

    /// Qualifies the table with `schema`.
    pub fn in_schema(mut self, schema: impl Into<String>) -> Select {
        self.schema = Some(schema.into());
        self
    }

    /// Returns `true` if `row` satisfies the statement's condition.
    pub fn matches(&self, row: &Row) -> Result<bool> {
        match &self.filter {
            Some(filter) => filter.eval(row),
            None => Ok(true),
        }
    }
}
