use super::Expr;

use std::collections::BTreeMap;

/// Column equality arguments supplied to a list field.
///
/// Every argument is a string, whatever the column's own type. Filters are
/// ordered by column name so two filters with the same arguments compare and
/// hash equal no matter the order the arguments were given in.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Filter {
    args: BTreeMap<String, String>,
}

impl Filter {
    pub fn new() -> Filter {
        Filter::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.args.insert(column.into(), value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.args.get(column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.args
            .iter()
            .map(|(column, value)| (column.as_str(), value.as_str()))
    }

    /// One equality condition per argument, in column name order.
    pub fn to_exprs(&self) -> Vec<Expr> {
        self.iter()
            .map(|(column, value)| Expr::eq(column, value))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Filter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Filter {
            args: iter
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        }
    }
}

impl core::fmt::Display for Filter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("{")?;
        let mut s = "";
        for (column, value) in self.iter() {
            write!(f, "{s}{column}: {value:?}")?;
            s = ", ";
        }
        f.write_str("}")
    }
}
