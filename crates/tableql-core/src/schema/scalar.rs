/// A leaf type of the derived API schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// Opaque identifier. Every primary key column has this type.
    Id,
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    /// A JSON document passed through as-is
    Json,
}

/// Database type names with an API scalar. Anything missing here is rejected
/// when the schema is built.
const TYPE_MAP: &[(&str, Scalar)] = &[
    ("boolean", Scalar::Boolean),
    ("character varying", Scalar::String),
    ("date", Scalar::DateTime),
    ("double precision", Scalar::Float),
    ("integer", Scalar::Int),
    ("jsonb", Scalar::Json),
    ("numeric", Scalar::Float),
    ("text", Scalar::String),
    ("timestamp with time zone", Scalar::DateTime),
];

impl Scalar {
    /// Returns the scalar for a column.
    ///
    /// Primary key columns are always [`Scalar::Id`]. Other columns are looked
    /// up by their database type name; `None` means the type is unmapped.
    pub fn for_column(is_primary_key: bool, data_type: &str) -> Option<Scalar> {
        if is_primary_key {
            Some(Scalar::Id)
        } else {
            Scalar::from_data_type(data_type)
        }
    }

    pub fn from_data_type(data_type: &str) -> Option<Scalar> {
        TYPE_MAP
            .iter()
            .find(|(name, _)| *name == data_type)
            .map(|(_, scalar)| *scalar)
    }

    /// The type name as it appears in the API schema.
    pub const fn name(self) -> &'static str {
        match self {
            Scalar::Id => "ID",
            Scalar::String => "String",
            Scalar::Int => "Int",
            Scalar::Float => "Float",
            Scalar::Boolean => "Boolean",
            Scalar::DateTime => "DateTime",
            Scalar::Json => "JSON",
        }
    }

    /// Returns `true` for the scalars every GraphQL schema has built in.
    pub fn is_builtin(self) -> bool {
        !matches!(self, Scalar::DateTime | Scalar::Json)
    }
}

impl core::fmt::Display for Scalar {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
