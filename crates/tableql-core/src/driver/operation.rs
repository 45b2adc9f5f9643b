use crate::stmt::{Select, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Run raw SQL with positional parameters. Used for catalog introspection.
    QuerySql(QuerySql),

    /// Select rows of a table matching a condition.
    Select(Select),
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuerySql {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Operation {
    pub fn query_sql(sql: impl Into<String>, params: Vec<Value>) -> Operation {
        Operation::QuerySql(QuerySql {
            sql: sql.into(),
            params,
        })
    }

    pub fn is_query_sql(&self) -> bool {
        matches!(self, Self::QuerySql(_))
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select(_))
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Self::Select(select) => Some(select),
            _ => None,
        }
    }
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}

impl From<Select> for Operation {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
