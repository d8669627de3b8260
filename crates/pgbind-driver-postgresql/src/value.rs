use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use crate::numeric;

use pgbind_core::stmt;
use tokio_postgres::types::{accepts, private::BytesMut, to_sql_checked, IsNull, ToSql, Type};

type BoxError = Box<dyn std::error::Error + Sync + Send>;

/// Binds a [`stmt::Value`] to a parameter whose type the server inferred.
///
/// Integers are widened or narrowed to the column width, and strings are
/// parsed into numeric, boolean, UUID, JSON and date/time parameters, so a
/// filter such as `id = :id` accepts `"1"` as well as `1`. `numeric`
/// parameters take integers, finite floats and decimal strings.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a stmt::Value);

impl ToSql for Value<'_> {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError>
    where
        Self: Sized,
    {
        match self.0 {
            stmt::Value::Null => Ok(IsNull::Yes),
            stmt::Value::Bool(value) => match *ty {
                Type::BOOL => value.to_sql(ty, out),
                _ => text(&value.to_string(), ty, out),
            },
            stmt::Value::I32(value) => integer(*value as i64, ty, out),
            stmt::Value::I64(value) => integer(*value, ty, out),
            stmt::Value::F64(value) => match *ty {
                Type::FLOAT8 => value.to_sql(ty, out),
                Type::FLOAT4 => (*value as f32).to_sql(ty, out),
                Type::NUMERIC if value.is_nan() => numeric::encode("NaN", out),
                _ => text(&value.to_string(), ty, out),
            },
            stmt::Value::String(value) => text(value, ty, out),
            stmt::Value::Bytes(value) => value.to_sql(ty, out),
            stmt::Value::Uuid(value) => match *ty {
                Type::UUID => value.to_sql(ty, out),
                _ => text(&value.to_string(), ty, out),
            },
            stmt::Value::Json(value) => match *ty {
                Type::JSON | Type::JSONB => value.to_sql(ty, out),
                _ => text(&value.to_string(), ty, out),
            },
            stmt::Value::Timestamp(value) => match *ty {
                Type::TIMESTAMPTZ => value.to_sql(ty, out),
                Type::TIMESTAMP => value.naive_utc().to_sql(ty, out),
                Type::DATE => value.date_naive().to_sql(ty, out),
                _ => text(&value.to_rfc3339(), ty, out),
            },
            stmt::Value::Date(value) => match *ty {
                Type::DATE => value.to_sql(ty, out),
                Type::TIMESTAMP => NaiveDateTime::from(*value).to_sql(ty, out),
                Type::TIMESTAMPTZ => NaiveDateTime::from(*value).and_utc().to_sql(ty, out),
                _ => text(&value.to_string(), ty, out),
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
        BYTEA,
        UUID,
        JSON,
        JSONB,
        TIMESTAMP,
        TIMESTAMPTZ,
        DATE
    );
    to_sql_checked!();
}

fn integer(value: i64, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::INT2 => i16::try_from(value)?.to_sql(ty, out),
        Type::INT4 => i32::try_from(value)?.to_sql(ty, out),
        Type::INT8 => value.to_sql(ty, out),
        Type::FLOAT4 => (value as f32).to_sql(ty, out),
        Type::FLOAT8 => (value as f64).to_sql(ty, out),
        Type::NUMERIC => numeric::encode(&value.to_string(), out),
        _ => text(&value.to_string(), ty, out),
    }
}

/// Binds text, parsing it when the parameter is not a string type.
fn text(value: &str, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
    match *ty {
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            value.to_sql(ty, out)
        }
        Type::BOOL => value.parse::<bool>()?.to_sql(ty, out),
        Type::INT2 => value.parse::<i16>()?.to_sql(ty, out),
        Type::INT4 => value.parse::<i32>()?.to_sql(ty, out),
        Type::INT8 => value.parse::<i64>()?.to_sql(ty, out),
        Type::FLOAT4 => value.parse::<f32>()?.to_sql(ty, out),
        Type::FLOAT8 => value.parse::<f64>()?.to_sql(ty, out),
        Type::NUMERIC => numeric::encode(value, out),
        Type::UUID => value.parse::<uuid::Uuid>()?.to_sql(ty, out),
        Type::JSON | Type::JSONB => serde_json::from_str::<serde_json::Value>(value)?.to_sql(ty, out),
        Type::TIMESTAMPTZ => value.parse::<DateTime<Utc>>()?.to_sql(ty, out),
        Type::TIMESTAMP => value.parse::<NaiveDateTime>()?.to_sql(ty, out),
        Type::DATE => value.parse::<NaiveDate>()?.to_sql(ty, out),
        Type::BYTEA => value.as_bytes().to_sql(ty, out),
        _ => Err(format!("cannot bind `{value}` to a parameter of type `{ty}`").into()),
    }
}
