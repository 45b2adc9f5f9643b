use super::Field;
use crate::schema::db::TableId;

use indexmap::IndexMap;

/// An object type: one per table.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    /// Uniquely identifies the object type within the schema
    pub id: ObjectId,

    /// Type name in the API schema
    pub name: String,

    /// Table the object's rows come from
    pub table: TableId,

    /// Fields keyed by name: scalars, then to-one, then to-many relations
    pub fields: IndexMap<String, Field>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ObjectId(pub usize);

impl Object {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn scalar_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().filter(|field| field.ty.is_scalar())
    }

    pub fn relation_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values().filter(|field| field.ty.is_relation())
    }
}

impl From<&Object> for ObjectId {
    fn from(value: &Object) -> Self {
        value.id
    }
}

impl core::fmt::Debug for ObjectId {
    fn fmt(&self, fmt: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(fmt, "ObjectId({})", self.0)
    }
}
