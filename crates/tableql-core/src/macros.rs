/// Builds a [`Row`](crate::stmt::Row) from `column => value` pairs.
///
/// ```
/// let row = tableql_core::row! { "id" => 1, "name" => "Ada" };
/// assert_eq!(row.len(), 2);
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::stmt::Row::new()
    };
    ( $( $column:expr => $value:expr ),+ $(,)? ) => {{
        let mut row = $crate::stmt::Row::new();
        $( row.insert($column, $crate::stmt::Value::from($value)); )+
        row
    }};
}
