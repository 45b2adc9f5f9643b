use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ExprEq {
    pub column: String,
    pub value: Value,
}

impl Expr {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        ExprEq {
            column: column.into(),
            value: value.into(),
        }
        .into()
    }
}

impl From<ExprEq> for Expr {
    fn from(value: ExprEq) -> Self {
        Self::Eq(value)
    }
}
