use super::{Arg, ObjectId};
use crate::schema::{
    db::{ColumnRef, ForeignKey},
    Scalar,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Name of the field in the API schema
    pub name: String,

    pub ty: FieldTy,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldTy {
    /// A column of the object's own table
    Scalar(ScalarField),

    /// The single row a foreign key held by this table points at
    BelongsTo(BelongsTo),

    /// The rows of another table whose foreign key points at this row
    HasMany(HasMany),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub column: String,
    pub ty: Scalar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BelongsTo {
    /// Object type of the referenced table
    pub target: ObjectId,
    pub foreign_key: ForeignKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HasMany {
    /// Object type of the owning table
    pub target: ObjectId,
    pub foreign_key: ForeignKey,

    /// Equality filters over the owning table's columns
    pub args: Vec<Arg>,
}

impl BelongsTo {
    /// Loader for the referenced side of the foreign key.
    pub fn loader(&self) -> ColumnRef {
        self.foreign_key.referenced()
    }

    /// Column of the parent row holding the key to load.
    pub fn key_column(&self) -> &str {
        &self.foreign_key.column
    }
}

impl HasMany {
    /// Loader for the owning side of the foreign key.
    pub fn loader(&self) -> ColumnRef {
        self.foreign_key.owning()
    }

    /// Column of the parent row the owning rows point at.
    pub fn key_column(&self) -> &str {
        &self.foreign_key.foreign_column
    }
}

impl FieldTy {
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    pub fn is_relation(&self) -> bool {
        !self.is_scalar()
    }

    pub fn as_scalar(&self) -> Option<&ScalarField> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_belongs_to(&self) -> Option<&BelongsTo> {
        match self {
            Self::BelongsTo(belongs_to) => Some(belongs_to),
            _ => None,
        }
    }

    pub fn as_has_many(&self) -> Option<&HasMany> {
        match self {
            Self::HasMany(has_many) => Some(has_many),
            _ => None,
        }
    }
}

impl From<ScalarField> for FieldTy {
    fn from(value: ScalarField) -> Self {
        Self::Scalar(value)
    }
}

impl From<BelongsTo> for FieldTy {
    fn from(value: BelongsTo) -> Self {
        Self::BelongsTo(value)
    }
}

impl From<HasMany> for FieldTy {
    fn from(value: HasMany) -> Self {
        Self::HasMany(value)
    }
}
