//! Result rows.

use crate::error::{DbError, DbResult};
use crate::fields::Fields;
use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::Write;
use tokio_postgres::types::{FromSql, Type};

/// One fetched record: an ordered, read-only mapping from column name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Fields,
}

impl Row {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    /// Value of `column`, or `None` if the row has no such column.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields.get(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.columns()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the row as a [`Fields`] mapping, e.g. to reuse it as a predicate set.
    pub fn as_fields(&self) -> &Fields {
        &self.fields
    }
}

impl From<Fields> for Row {
    fn from(fields: Fields) -> Self {
        Self::new(fields)
    }
}

fn get_column<'a, T>(row: &'a tokio_postgres::Row, idx: usize, name: &str) -> DbResult<Option<T>>
where
    T: FromSql<'a>,
{
    row.try_get::<_, Option<T>>(idx)
        .map_err(|e| DbError::decode(name, e.to_string()))
}

/// Decode through `T` and keep its textual form.
fn text_column<'a, T>(row: &'a tokio_postgres::Row, idx: usize, name: &str) -> DbResult<Value>
where
    T: FromSql<'a> + ToString,
{
    Ok(get_column::<T>(row, idx, name)?.map(|v| v.to_string()).into())
}

/// Fallback for column types without a dedicated decoder.
///
/// Text-like wire values (enums, domains over text, `citext`, ...) are kept as
/// UTF-8; anything else, and `bytea` always, renders as `\x`-prefixed hex.
struct RawText(String);

impl<'a> FromSql<'a> for RawText {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
        match std::str::from_utf8(raw) {
            Ok(text) if *ty != Type::BYTEA => Ok(RawText(text.to_string())),
            _ => {
                let mut hex = String::with_capacity(2 + raw.len() * 2);
                hex.push_str("\\x");
                for byte in raw {
                    write!(hex, "{byte:02x}")?;
                }
                Ok(RawText(hex))
            }
        }
    }

    fn accepts(_: &Type) -> bool {
        true
    }
}

impl TryFrom<&tokio_postgres::Row> for Row {
    type Error = DbError;

    /// Every column decodes: scalars map to their [`Value`] variant, temporal,
    /// numeric, uuid and json columns to their canonical text, and anything
    /// else through a raw-text fallback.
    fn try_from(row: &tokio_postgres::Row) -> DbResult<Self> {
        let mut fields = Fields::new();
        for (idx, col) in row.columns().iter().enumerate() {
            let name = col.name();
            let value: Value = match *col.type_() {
                Type::BOOL => get_column::<bool>(row, idx, name)?.into(),
                Type::INT2 => get_column::<i16>(row, idx, name)?.into(),
                Type::INT4 => get_column::<i32>(row, idx, name)?.into(),
                Type::INT8 => get_column::<i64>(row, idx, name)?.into(),
                Type::OID => get_column::<u32>(row, idx, name)?.into(),
                Type::FLOAT4 => get_column::<f32>(row, idx, name)?.into(),
                Type::FLOAT8 => get_column::<f64>(row, idx, name)?.into(),
                Type::TEXT | Type::VARCHAR | Type::BPCHAR | Type::NAME => {
                    get_column::<String>(row, idx, name)?.into()
                }
                Type::NUMERIC => text_column::<Decimal>(row, idx, name)?,
                Type::TIMESTAMP => text_column::<NaiveDateTime>(row, idx, name)?,
                Type::TIMESTAMPTZ => get_column::<DateTime<Utc>>(row, idx, name)?
                    .map(|v| v.to_rfc3339())
                    .into(),
                Type::DATE => text_column::<NaiveDate>(row, idx, name)?,
                Type::TIME => text_column::<NaiveTime>(row, idx, name)?,
                Type::UUID => text_column::<uuid::Uuid>(row, idx, name)?,
                Type::JSON | Type::JSONB => text_column::<serde_json::Value>(row, idx, name)?,
                _ => get_column::<RawText>(row, idx, name)?.map(|t| t.0).into(),
            };
            fields.set(name, value);
        }
        Ok(Row::new(fields))
    }
}
