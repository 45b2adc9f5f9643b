use super::Value;

use indexmap::IndexMap;

/// A single row returned by the database, keyed by column name.
///
/// Columns keep the order the database returned them in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Row {
    columns: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn with_capacity(capacity: usize) -> Row {
        Row {
            columns: IndexMap::with_capacity(capacity),
        }
    }

    /// Sets the value of `column`, returning the previous value if any.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) -> Option<Value> {
        self.columns.insert(column.into(), value)
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Returns the value of `column`, treating a missing column as null.
    pub fn value(&self, column: &str) -> &Value {
        static NULL: Value = Value::Null;
        self.columns.get(column).unwrap_or(&NULL)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(column, value)| (column.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Row {
            columns: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}
