use super::*;

/// A boolean condition over the columns of a single row.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All operands hold
    And(ExprAnd),

    /// A column equals a value
    Eq(ExprEq),

    /// A column equals any value in a list
    InList(ExprInList),
}

impl Expr {
    pub fn is_and(&self) -> bool {
        matches!(self, Self::And(_))
    }

    /// Returns the column names the expression reads, in order of appearance.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = vec![];
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, dst: &mut Vec<&'a str>) {
        match self {
            Self::And(expr) => {
                for operand in expr {
                    operand.collect_columns(dst);
                }
            }
            Self::Eq(expr) => dst.push(&expr.column),
            Self::InList(expr) => dst.push(&expr.column),
        }
    }
}
