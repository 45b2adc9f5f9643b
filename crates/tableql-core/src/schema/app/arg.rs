/// An optional equality filter argument on a list field.
///
/// Named after a column of the listed table and always typed as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    pub name: String,
}

impl Arg {
    /// One argument per column of `table`.
    pub fn for_columns(table: &crate::schema::db::Table) -> Vec<Arg> {
        table
            .columns
            .iter()
            .map(|column| Arg {
                name: column.name.clone(),
            })
            .collect()
    }
}
