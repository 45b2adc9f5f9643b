//! Lowers the derived object graph into an executable async-graphql schema.

mod args;

mod object;

mod query;

mod value;
pub use value::to_graphql;

use tableql_core::{
    schema::{app::Query, Scalar, Schema},
    Driver, Error, Result,
};

use async_graphql::dynamic;
use indexmap::IndexSet;
use std::sync::Arc;

/// Builds the executable schema: one object type per table plus the root
/// query type.
///
/// Relationship resolvers read their loaders from the request data, so every
/// request run against the returned schema must carry a
/// [`LoaderRegistry`](crate::LoaderRegistry).
pub fn build(schema: &Schema, driver: Arc<dyn Driver>) -> Result<dynamic::Schema> {
    let mut builder = dynamic::Schema::build(Query::NAME, None, None);

    for scalar in custom_scalars(schema) {
        builder = builder.register(value::scalar_type(scalar));
    }

    for object in schema.app.objects() {
        tracing::trace!(object = %object.name, "adding type");
        builder = builder.register(object::lower(schema, object));
    }

    builder = builder.register(query::lower(schema, driver));

    builder
        .finish()
        .map_err(|e| Error::invalid_schema(format!("failed to generate GraphQL schema: {e}")))
}

/// Non-builtin scalars referenced by any field, in first-use order.
fn custom_scalars(schema: &Schema) -> IndexSet<Scalar> {
    schema
        .app
        .objects()
        .flat_map(|object| object.scalar_fields())
        .filter_map(|field| field.ty.as_scalar())
        .map(|field| field.ty)
        .filter(|scalar| !scalar.is_builtin())
        .collect()
}
