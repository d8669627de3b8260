use crate::numeric::Numeric;

use pgbind_core::{driver::Row, stmt::Value, Error, Result};
use tokio_postgres::types::{FromSql, Type};

/// Converts a PostgreSQL row into a [`Row`], keeping column order.
pub(crate) fn from_postgres(row: &tokio_postgres::Row) -> Result<Row> {
    let mut values = Row::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        values.insert(column.name(), to_value(row, index, column)?);
    }

    Ok(values)
}

fn to_value(row: &tokio_postgres::Row, index: usize, column: &tokio_postgres::Column) -> Result<Value> {
    // NOTE: the inner representation of the PostgreSQL type enum is not
    // accessible, so each type is matched by hand.
    let value = match *column.type_() {
        Type::BOOL => get::<bool>(row, index)?.map(Value::Bool),
        Type::INT2 => get::<i16>(row, index)?.map(|v| Value::I32(v as i32)),
        Type::INT4 => get::<i32>(row, index)?.map(Value::I32),
        Type::INT8 => get::<i64>(row, index)?.map(Value::I64),
        Type::OID => get::<u32>(row, index)?.map(|v| Value::I64(v as i64)),
        Type::FLOAT4 => get::<f32>(row, index)?.map(|v| Value::F64(v as f64)),
        Type::FLOAT8 => get::<f64>(row, index)?.map(Value::F64),
        // Kept as text so no precision is lost
        Type::NUMERIC => get::<Numeric>(row, index)?.map(|n| Value::String(n.0)),
        Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME | Type::UNKNOWN => {
            get::<String>(row, index)?.map(Value::String)
        }
        Type::BYTEA => get::<Vec<u8>>(row, index)?.map(Value::Bytes),
        Type::UUID => get::<uuid::Uuid>(row, index)?.map(Value::Uuid),
        Type::JSON | Type::JSONB => get::<serde_json::Value>(row, index)?.map(Value::Json),
        Type::TIMESTAMPTZ => get::<chrono::DateTime<chrono::Utc>>(row, index)?.map(Value::Timestamp),
        Type::TIMESTAMP => get::<chrono::NaiveDateTime>(row, index)?.map(Value::from),
        Type::DATE => get::<chrono::NaiveDate>(row, index)?.map(Value::Date),
        ref ty => {
            return Err(Error::unsupported_type(
                ty.name(),
                format!("column \"{}\"", column.name()),
            ))
        }
    };

    Ok(value.unwrap_or_default())
}

fn get<'a, T: FromSql<'a>>(row: &'a tokio_postgres::Row, index: usize) -> Result<Option<T>> {
    row.try_get::<_, Option<T>>(index)
        .map_err(Error::driver_operation_failed)
}
