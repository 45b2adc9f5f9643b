use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use postgres_types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};
use rust_decimal::Decimal;
use tableql_core::stmt::Value as CoreValue;
use uuid::Uuid;

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// A statement parameter, encoded according to the type the server inferred
/// for its placeholder.
#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> std::result::Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match &self.0 {
            CoreValue::Null => Ok(IsNull::Yes),
            CoreValue::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                _ => encode_text(&value.to_string(), ty, out),
            },
            CoreValue::I64(value) => match *ty {
                Type::INT2 => i16::try_from(*value)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*value)?.to_sql(ty, out),
                Type::INT8 => value.to_sql(ty, out),
                Type::FLOAT8 => (*value as f64).to_sql(ty, out),
                Type::NUMERIC => Decimal::from(*value).to_sql(ty, out),
                _ => encode_text(&value.to_string(), ty, out),
            },
            CoreValue::F64(value) => match *ty {
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::NUMERIC => Decimal::try_from(*value)?.to_sql(ty, out),
                _ => encode_text(&value.to_string(), ty, out),
            },
            CoreValue::String(value) => encode_text(value, ty, out),
            CoreValue::Uuid(value) => match *ty {
                Type::UUID => value.to_sql(ty, out),
                _ => encode_text(&value.to_string(), ty, out),
            },
            CoreValue::Date(value) => match *ty {
                Type::DATE => value.to_sql(ty, out),
                Type::TIMESTAMP => value.and_time(NaiveTime::MIN).to_sql(ty, out),
                Type::TIMESTAMPTZ => value.and_time(NaiveTime::MIN).and_utc().to_sql(ty, out),
                _ => encode_text(&self.0.to_string(), ty, out),
            },
            CoreValue::DateTime(value) => match *ty {
                Type::TIMESTAMPTZ => value.to_sql(ty, out),
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                _ => encode_text(&self.0.to_string(), ty, out),
            },
            CoreValue::Json(value) => match *ty {
                Type::JSON | Type::JSONB => value.to_sql(ty, out),
                _ => encode_text(&value.to_string(), ty, out),
            },
        }
    }

    accepts!(
        BOOL,
        INT2,
        INT4,
        INT8,
        FLOAT4,
        FLOAT8,
        NUMERIC,
        TEXT,
        VARCHAR,
        BPCHAR,
        NAME,
        UNKNOWN,
        UUID,
        DATE,
        TIMESTAMP,
        TIMESTAMPTZ,
        JSON,
        JSONB
    );
    to_sql_checked!();
}

/// Encodes a textual value as `ty`.
///
/// Filter arguments are always strings, so a filter on an integer or date
/// column arrives here and is parsed into the column's type.
fn encode_text(value: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            value.to_sql(ty, out)
        }
        Type::BOOL => parse_bool(value)?.to_sql(ty, out),
        Type::INT2 => value.trim().parse::<i16>()?.to_sql(ty, out),
        Type::INT4 => value.trim().parse::<i32>()?.to_sql(ty, out),
        Type::INT8 => value.trim().parse::<i64>()?.to_sql(ty, out),
        Type::FLOAT4 => value.trim().parse::<f32>()?.to_sql(ty, out),
        Type::FLOAT8 => value.trim().parse::<f64>()?.to_sql(ty, out),
        Type::NUMERIC => value.trim().parse::<Decimal>()?.to_sql(ty, out),
        Type::UUID => value.trim().parse::<Uuid>()?.to_sql(ty, out),
        Type::DATE => value.trim().parse::<NaiveDate>()?.to_sql(ty, out),
        Type::TIMESTAMPTZ => DateTime::parse_from_rfc3339(value.trim())?
            .with_timezone(&Utc)
            .to_sql(ty, out),
        Type::TIMESTAMP => parse_timestamp(value.trim())?.to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::from_str::<serde_json::Value>(value)?.to_sql(ty, out),
        _ => Err(format!("cannot encode `{value}` as {ty}").into()),
    }
}

fn parse_bool(value: &str) -> Result<bool, BoxError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "t" | "true" | "y" | "yes" | "on" | "1" => Ok(true),
        "f" | "false" | "n" | "no" | "off" | "0" => Ok(false),
        _ => Err(format!("invalid boolean `{value}`").into()),
    }
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime, BoxError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(Into::into)
}
