use tableql_core::{schema::app::Arg, stmt::Filter};

use async_graphql::{
    dynamic::{Field, InputValue, ResolverContext, TypeRef},
    Value as GqlValue,
};

/// Adds one optional `String` argument per filterable column.
pub(super) fn declare(mut field: Field, args: &[Arg]) -> Field {
    for arg in args {
        field = field.argument(InputValue::new(&arg.name, TypeRef::named(TypeRef::STRING)));
    }
    field
}

/// Collects the arguments given to a list field. Arguments passed as `null`
/// do not filter.
pub(super) fn filter(ctx: &ResolverContext<'_>) -> async_graphql::Result<Filter> {
    let mut filter = Filter::new();

    for (name, value) in ctx.args.as_index_map() {
        match value {
            GqlValue::Null => {}
            GqlValue::String(value) => {
                filter.insert(name.as_str(), value.as_str());
            }
            value => return Err(format!("argument `{name}` must be a string, got {value}").into()),
        }
    }

    Ok(filter)
}
