use tableql_core::{schema::Scalar, stmt::Value, Result};

use async_graphql::{dynamic, Value as GqlValue};
use chrono::NaiveTime;

/// Converts a column value to its API representation under `scalar`.
///
/// `ID` is always a string. `DateTime` is RFC 3339 in UTC with millisecond
/// precision; a `date` column is rendered as midnight UTC.
pub fn to_graphql(value: &Value, scalar: Scalar) -> Result<GqlValue> {
    Ok(match (scalar, value) {
        (_, Value::Null) => GqlValue::Null,
        (Scalar::Id | Scalar::String, value) => GqlValue::String(text(value)),
        (Scalar::DateTime, Value::Date(date)) => {
            let midnight = date.and_time(NaiveTime::MIN).and_utc();
            GqlValue::String(Value::from(midnight).to_string())
        }
        (_, Value::Bool(value)) => GqlValue::Boolean(*value),
        (_, Value::I64(value)) => GqlValue::from(*value),
        (_, Value::F64(value)) => GqlValue::from(*value),
        (_, Value::Json(value)) => GqlValue::from_json(value.clone())?,
        (_, value) => GqlValue::String(value.to_string()),
    })
}

fn text(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        value => value.to_string(),
    }
}

pub(super) fn scalar_type(scalar: Scalar) -> dynamic::Scalar {
    let ty = dynamic::Scalar::new(scalar.name());

    match scalar {
        Scalar::DateTime => ty
            .description("A date-time string in RFC 3339 format, in UTC")
            .specified_by_url("https://datatracker.ietf.org/doc/html/rfc3339"),
        Scalar::Json => ty.description("An arbitrary JSON document"),
        _ => ty,
    }
}
