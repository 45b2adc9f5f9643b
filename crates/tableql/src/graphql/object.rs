use super::{args, value::to_graphql};
use crate::LoaderRegistry;

use tableql_core::{
    schema::app::{BelongsTo, Field, FieldTy, HasMany, Object, ScalarField},
    stmt::{Filter, Row},
    Schema,
};

use async_graphql::{
    dynamic::{self, FieldFuture, FieldValue, TypeRef},
    Value as GqlValue,
};

/// The object type of one table.
pub(super) fn lower(schema: &Schema, object: &Object) -> dynamic::Object {
    let mut ty = dynamic::Object::new(&object.name)
        .description(format!("Generated from table `{}`", schema.table_for(object).name));

    for field in object.fields.values() {
        ty = ty.field(lower_field(schema, field));
    }

    ty
}

fn lower_field(schema: &Schema, field: &Field) -> dynamic::Field {
    match &field.ty {
        FieldTy::Scalar(scalar) => scalar_field(&field.name, scalar),
        FieldTy::BelongsTo(belongs_to) => {
            let target = &schema.object(belongs_to.target).name;
            belongs_to_field(&field.name, target, belongs_to)
        }
        FieldTy::HasMany(has_many) => {
            let target = &schema.object(has_many.target).name;
            has_many_field(&field.name, target, has_many)
        }
    }
}

fn scalar_field(name: &str, field: &ScalarField) -> dynamic::Field {
    let column = field.column.clone();
    let scalar = field.ty;

    dynamic::Field::new(name, TypeRef::named(scalar.name()), move |ctx| {
        let column = column.clone();
        FieldFuture::new(async move {
            let row = ctx.parent_value.try_downcast_ref::<Row>()?;
            Ok(match to_graphql(row.value(&column), scalar)? {
                GqlValue::Null => None,
                value => Some(FieldValue::value(value)),
            })
        })
    })
}

/// Resolves to the referenced row, or null when the foreign key is null or
/// dangling.
fn belongs_to_field(name: &str, target: &str, belongs_to: &BelongsTo) -> dynamic::Field {
    let loader = belongs_to.loader();
    let key_column = belongs_to.key_column().to_string();

    dynamic::Field::new(name, TypeRef::named(target), move |ctx| {
        let loader = loader.clone();
        let key_column = key_column.clone();
        FieldFuture::new(async move {
            let row = ctx.parent_value.try_downcast_ref::<Row>()?;
            let key = row.value(&key_column);

            if key.is_null() {
                return Ok(None);
            }

            let rows = ctx
                .data::<LoaderRegistry>()?
                .get(&loader)?
                .load(key.clone(), Filter::new())
                .await?;

            Ok(rows.into_iter().next().map(FieldValue::owned_any))
        })
    })
}

/// Resolves to every row of the owning table pointing at the parent row.
fn has_many_field(name: &str, target: &str, has_many: &HasMany) -> dynamic::Field {
    let loader = has_many.loader();
    let key_column = has_many.key_column().to_string();

    let field = dynamic::Field::new(name, TypeRef::named_list(target), move |ctx| {
        let loader = loader.clone();
        let key_column = key_column.clone();
        FieldFuture::new(async move {
            let row = ctx.parent_value.try_downcast_ref::<Row>()?;
            let key = row.value(&key_column).clone();
            let filter = args::filter(&ctx)?;

            let rows = ctx
                .data::<LoaderRegistry>()?
                .get(&loader)?
                .load(key, filter)
                .await?;

            Ok(Some(FieldValue::list(
                rows.into_iter().map(FieldValue::owned_any),
            )))
        })
    });

    args::declare(field, &has_many.args)
}
