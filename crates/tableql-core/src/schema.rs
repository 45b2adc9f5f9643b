pub mod app;

mod builder;
pub use builder::Builder;

pub mod db;

mod name;
pub use name::Name;

mod scalar;
pub use scalar::Scalar;

mod verify;

use app::{Object, ObjectId};
use db::Table;
use std::sync::Arc;

/// The object graph derived from a database catalog.
#[derive(Debug)]
pub struct Schema {
    /// API-level schema: object types, their fields and the root query
    pub app: app::Schema,

    /// Database-level catalog the API schema was derived from
    pub db: Arc<db::Catalog>,
}

impl Schema {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn object(&self, id: impl Into<ObjectId>) -> &Object {
        self.app.object(id)
    }

    /// Returns the object type derived from the named table.
    pub fn object_for_table(&self, table: &str) -> Option<&Object> {
        let table = self.db.table_by_name(table)?;
        self.app.objects().find(|object| object.table == table.id)
    }

    pub fn table_for(&self, id: impl Into<ObjectId>) -> &Table {
        self.db.table(self.app.object(id).table)
    }
}
