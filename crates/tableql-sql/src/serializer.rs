#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::Delimited;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;

use tableql_core::stmt::Select;

/// Serialize a statement to a PostgreSQL string
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn postgresql() -> Serializer {
        Serializer::default()
    }

    /// Serializes `stmt`, pushing every value it compares against onto
    /// `params` and referencing it by a numbered placeholder.
    pub fn serialize(&self, stmt: &Select, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }
}
