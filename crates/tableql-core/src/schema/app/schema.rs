use super::{Object, ObjectId, Query};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    /// Object types, indexed by [`ObjectId`]
    pub objects: Vec<Object>,

    pub query: Query,
}

impl Schema {
    pub fn object(&self, id: impl Into<ObjectId>) -> &Object {
        &self.objects[id.into().0]
    }

    pub fn objects(&self) -> impl ExactSizeIterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn object_by_name(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|object| object.name == name)
    }
}
