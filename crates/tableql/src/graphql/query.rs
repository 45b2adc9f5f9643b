use super::args;

use tableql_core::{
    schema::app::{Query, QueryField},
    stmt::Select,
    Driver, Schema,
};

use async_graphql::dynamic::{self, FieldFuture, FieldValue, TypeRef};
use std::sync::Arc;

/// The root query type: one list field per table.
pub(super) fn lower(schema: &Schema, driver: Arc<dyn Driver>) -> dynamic::Object {
    let mut ty = dynamic::Object::new(Query::NAME);

    for field in schema.app.query.fields.values() {
        let target = &schema.object(field.target).name;
        ty = ty.field(root_field(
            field,
            target,
            schema.db.schema.clone(),
            driver.clone(),
        ));
    }

    ty
}

/// Lists the rows of a table matching the given arguments. Root fields query
/// the driver directly; there is nothing to batch at the top level.
fn root_field(
    field: &QueryField,
    target: &str,
    db_schema: Option<String>,
    driver: Arc<dyn Driver>,
) -> dynamic::Field {
    let table = field.table.clone();

    let ret = dynamic::Field::new(&field.name, TypeRef::named_list(target), move |ctx| {
        let table = table.clone();
        let db_schema = db_schema.clone();
        let driver = driver.clone();
        FieldFuture::new(async move {
            let filter = args::filter(&ctx)?;

            let mut select = Select::filtered(table, &filter);
            select.schema = db_schema;

            let rows = driver.exec(select.into()).await?;

            Ok(Some(FieldValue::list(
                rows.into_iter().map(FieldValue::owned_any),
            )))
        })
    });

    args::declare(ret, &field.args)
}
