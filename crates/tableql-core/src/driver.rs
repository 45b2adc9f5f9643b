pub mod operation;
pub use operation::Operation;

use crate::{async_trait, stmt::Row};

use std::fmt::Debug;

/// A database the schema can be derived from and queried through.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Execute a database operation, returning every row it produced.
    async fn exec(&self, op: Operation) -> crate::Result<Vec<Row>>;
}
