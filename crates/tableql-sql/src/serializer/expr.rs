use super::{Delimited, Formatter, Ident, Params, ToSql};

use tableql_core::stmt::{Expr, ExprAnd, ExprEq, ExprInList, Value};

impl ToSql for &Expr {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        match self {
            Expr::And(expr) => expr.to_sql(f),
            Expr::Eq(expr) => expr.to_sql(f),
            Expr::InList(expr) => expr.to_sql(f),
        }
    }
}

impl ToSql for &ExprAnd {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, Delimited(self.operands.iter().map(Operand), " AND "));
    }
}

/// An `AND` operand. Nested conjunctions are parenthesized.
struct Operand<'a>(&'a Expr);

impl ToSql for Operand<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if self.0.is_and() {
            fmt!(f, "(" self.0 ")");
        } else {
            fmt!(f, self.0);
        }
    }
}

impl ToSql for &ExprEq {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        if self.value.is_null() {
            fmt!(f, Ident(&self.column) " IS NULL");
        } else {
            let placeholder = f.params.push(&self.value);
            fmt!(f, Ident(&self.column) " = " placeholder);
        }
    }
}

impl ToSql for &ExprInList {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        // `IN ()` is not valid SQL
        if self.list.is_empty() {
            fmt!(f, "FALSE");
            return;
        }

        fmt!(f, Ident(&self.column) " IN (" Delimited(self.list.iter().map(Param), ", ") ")");
    }
}

/// A value bound as a parameter.
struct Param<'a>(&'a Value);

impl ToSql for Param<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let placeholder = f.params.push(self.0);
        fmt!(f, placeholder);
    }
}
