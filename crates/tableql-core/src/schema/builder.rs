use super::{
    app::{self, Arg, BelongsTo, Field, FieldTy, HasMany, Object, ObjectId, QueryField, ScalarField},
    db::{Catalog, Table},
    Name, Scalar, Schema,
};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

#[derive(Debug, Default, Clone)]
pub struct Builder {
    /// Name root query fields with the plural form of the table name
    plural_root_fields: bool,
}

/// Used to track state during the build process
struct BuildSchema<'a> {
    /// Build options
    builder: &'a Builder,

    catalog: &'a Catalog,

    /// Maps table names to object identifiers. The identifiers are reserved
    /// before any object is built, so relation fields can point at objects
    /// that do not exist yet, including their own.
    object_lookup: IndexMap<String, ObjectId>,

    /// Objects as they are built
    objects: Vec<Object>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name root query fields `authors` instead of `author` for a table named
    /// `author`.
    pub fn plural_root_fields(&mut self, enabled: bool) -> &mut Self {
        self.plural_root_fields = enabled;
        self
    }

    pub fn build(&self, catalog: Catalog) -> Result<Schema> {
        let mut builder = BuildSchema {
            builder: self,
            catalog: &catalog,
            object_lookup: IndexMap::new(),
            objects: Vec::with_capacity(catalog.tables.len()),
        };

        for (index, table) in catalog.tables().enumerate() {
            builder
                .object_lookup
                .insert(table.name.clone(), ObjectId(index));
        }

        for table in catalog.tables() {
            let object = builder.build_object(table)?;
            builder.objects.push(object);
        }

        let query = builder.build_query();

        let schema = Schema {
            app: app::Schema {
                objects: builder.objects,
                query,
            },
            db: Arc::new(catalog),
        };

        // Verify the schema structure
        schema.verify()?;

        Ok(schema)
    }
}

impl BuildSchema<'_> {
    fn build_object(&self, table: &Table) -> Result<Object> {
        let id = self.object_id(&table.name)?;
        let mut object = Object {
            id,
            name: Name::new(&table.name).camel_case(),
            table: table.id,
            fields: IndexMap::new(),
        };

        for column in &table.columns {
            let ty = Scalar::for_column(table.is_primary_key(&column.name), &column.data_type)
                .ok_or_else(|| Error::unmapped_type(&table.name, &column.name, &column.data_type))?;

            insert_field(
                &mut object,
                column.name.clone(),
                ScalarField {
                    column: column.name.clone(),
                    ty,
                },
            );
        }

        for fk in self.catalog.foreign_keys_owned_by(&table.name) {
            insert_field(
                &mut object,
                Name::new(&fk.foreign_table).singular(),
                BelongsTo {
                    target: self.object_id(&fk.foreign_table)?,
                    foreign_key: fk.clone(),
                },
            );
        }

        for fk in self.catalog.foreign_keys_referencing(&table.name) {
            let owning = self.table(&fk.table)?;

            insert_field(
                &mut object,
                Name::new(&fk.table).plural(),
                HasMany {
                    target: self.object_id(&fk.table)?,
                    foreign_key: fk.clone(),
                    args: Arg::for_columns(owning),
                },
            );
        }

        Ok(object)
    }

    fn build_query(&self) -> app::Query {
        let mut query = app::Query::default();

        for object in &self.objects {
            let table = self.catalog.table(object.table);
            let name = Name::new(&table.name);
            let name = if self.builder.plural_root_fields {
                name.plural()
            } else {
                name.singular()
            };

            if let Some(prev) = query.fields.get(&name) {
                tracing::warn!(
                    field = %name,
                    replaced = %prev.table,
                    table = %table.name,
                    "root query field name collision; later table wins"
                );
            }

            query.fields.insert(
                name.clone(),
                QueryField {
                    name,
                    target: object.id,
                    table: table.name.clone(),
                    args: Arg::for_columns(table),
                },
            );
        }

        query
    }

    fn object_id(&self, table: &str) -> Result<ObjectId> {
        self.object_lookup
            .get(table)
            .copied()
            .ok_or_else(|| Error::invalid_schema(format!("no object type for table `{table}`")))
    }

    fn table(&self, name: &str) -> Result<&Table> {
        self.catalog
            .table_by_name(name)
            .ok_or_else(|| Error::invalid_schema(format!("unknown table `{name}`")))
    }
}

/// Adds a field, replacing any earlier field of the same name.
fn insert_field(object: &mut Object, name: String, ty: impl Into<FieldTy>) {
    let field = Field {
        name: name.clone(),
        ty: ty.into(),
    };

    if let Some(prev) = object.fields.insert(name, field) {
        tracing::warn!(
            object = %object.name,
            field = %prev.name,
            "field name collision; later field wins"
        );
    }
}
