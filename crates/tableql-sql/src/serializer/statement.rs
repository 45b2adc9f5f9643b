use super::{Formatter, Ident, Params, ToSql};

use tableql_core::stmt::Select;

impl ToSql for &Select {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        fmt!(f, "SELECT * FROM ");

        if let Some(schema) = &self.schema {
            fmt!(f, Ident(schema) ".");
        }

        fmt!(f, Ident(&self.table));

        if let Some(filter) = &self.filter {
            fmt!(f, " WHERE " filter);
        }
    }
}
