mod catalog;
pub use catalog::Catalog;

mod column;
pub use column::{Column, ColumnInfo};

mod column_ref;
pub use column_ref::ColumnRef;

mod foreign_key;
pub use foreign_key::ForeignKey;

mod pk;
pub use pk::PrimaryKeyInfo;

mod table;
pub use table::{Table, TableId};
