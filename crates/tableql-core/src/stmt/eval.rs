use super::{Expr, Row, Value};
use crate::{Error, Result};

impl Expr {
    /// Evaluates the condition against a single row.
    ///
    /// Null never matches, like SQL. A string operand compared to a
    /// non-string column matches on the column value's text form.
    pub fn eval(&self, row: &Row) -> Result<bool> {
        match self {
            Expr::And(expr) => {
                for operand in expr {
                    if !operand.eval(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Expr::Eq(expr) => Ok(eq(column(row, &expr.column)?, &expr.value)),
            Expr::InList(expr) => {
                let lhs = column(row, &expr.column)?;
                Ok(expr.list.iter().any(|rhs| eq(lhs, rhs)))
            }
        }
    }
}

fn column<'a>(row: &'a Row, name: &str) -> Result<&'a Value> {
    row.get(name)
        .ok_or_else(|| Error::invalid_result(format!("row has no column `{name}`")))
}

fn eq(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Null, _) | (_, Value::Null) => false,
        (lhs, Value::String(rhs)) => lhs.matches_text(rhs),
        (lhs, rhs) => lhs == rhs,
    }
}
