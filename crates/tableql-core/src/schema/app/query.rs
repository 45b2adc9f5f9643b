use super::{Arg, ObjectId};

use indexmap::IndexMap;

/// The root query type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub fields: IndexMap<String, QueryField>,
}

/// A root field listing the rows of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryField {
    pub name: String,

    /// Object type of the listed rows
    pub target: ObjectId,

    /// Table queried directly, without batching
    pub table: String,

    pub args: Vec<Arg>,
}

impl Query {
    /// Name of the root query type.
    pub const NAME: &'static str = "Query";

    pub fn field(&self, name: &str) -> Option<&QueryField> {
        self.fields.get(name)
    }
}
