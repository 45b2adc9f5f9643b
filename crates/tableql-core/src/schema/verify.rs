use super::{app::Query, Scalar, Schema};
use crate::{Error, Result};

use std::collections::HashMap;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        debug_assert!(self.verify_ids_match_positions());

        self.verify_has_objects()?;
        self.verify_object_names_are_unique()?;
        self.verify_names_are_valid()?;
        Ok(())
    }

    fn verify_ids_match_positions(&self) -> bool {
        for (index, object) in self.schema.app.objects().enumerate() {
            assert_eq!(object.id.0, index);
            assert_eq!(object.table.0, index);
        }
        true
    }

    fn verify_has_objects(&self) -> Result<()> {
        if self.schema.app.objects.is_empty() {
            return Err(Error::invalid_schema("no tables found"));
        }
        Ok(())
    }

    fn verify_object_names_are_unique(&self) -> Result<()> {
        let mut seen = HashMap::new();

        for object in self.schema.app.objects() {
            let table = &self.schema.table_for(object).name;

            if object.name == Query::NAME {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` maps to the reserved type name `{}`",
                    Query::NAME
                )));
            }

            if RESERVED_SCALARS.contains(&object.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` maps to the scalar type name `{}`",
                    object.name
                )));
            }

            if let Some(prev) = seen.insert(&object.name, table) {
                return Err(Error::invalid_schema(format!(
                    "tables `{prev}` and `{table}` both map to type `{}`",
                    object.name
                )));
            }
        }

        Ok(())
    }

    fn verify_names_are_valid(&self) -> Result<()> {
        for object in self.schema.app.objects() {
            verify_name("type", &object.name)?;

            for field in object.fields.values() {
                verify_name("field", &field.name)?;

                if let Some(has_many) = field.ty.as_has_many() {
                    for arg in &has_many.args {
                        verify_name("argument", &arg.name)?;
                    }
                }
            }
        }

        for field in self.schema.app.query.fields.values() {
            verify_name("field", &field.name)?;

            for arg in &field.args {
                verify_name("argument", &arg.name)?;
            }
        }

        Ok(())
    }
}

const RESERVED_SCALARS: &[&str] = &[
    Scalar::Id.name(),
    Scalar::String.name(),
    Scalar::Int.name(),
    Scalar::Float.name(),
    Scalar::Boolean.name(),
    Scalar::DateTime.name(),
    Scalar::Json.name(),
];

/// Names must match `[_A-Za-z][_0-9A-Za-z]*` and must not start with `__`.
fn verify_name(kind: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();

    let valid = match chars.next() {
        Some(first) => {
            (first == '_' || first.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        None => false,
    };

    if !valid {
        return Err(Error::invalid_schema(format!(
            "{kind} name `{name}` is not a valid identifier"
        )));
    }

    if name.starts_with("__") {
        return Err(Error::invalid_schema(format!(
            "{kind} name `{name}` uses the reserved `__` prefix"
        )));
    }

    Ok(())
}
