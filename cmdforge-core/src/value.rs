use crate::{DbType, Result, duration_in_days};
use anyhow::Context;
use rust_decimal::Decimal;
use std::time::Duration;
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time};
use uuid::Uuid;

/// Runtime value bound to a parameter.
///
/// Every typed variant wraps an `Option`: `None` is the absent value of that type, while
/// [`Value::Null`] is an untyped absent value.
#[derive(Default, Debug, Clone)]
pub enum Value {
    #[default]
    Null,
    Boolean(Option<bool>),
    Int8(Option<i8>),
    Int16(Option<i16>),
    Int32(Option<i32>),
    Int64(Option<i64>),
    UInt8(Option<u8>),
    UInt16(Option<u16>),
    UInt32(Option<u32>),
    UInt64(Option<u64>),
    Float32(Option<f32>),
    Float64(Option<f64>),
    Decimal(Option<Decimal>),
    Char(Option<char>),
    Varchar(Option<String>),
    Blob(Option<Box<[u8]>>),
    Date(Option<Date>),
    Time(Option<Time>),
    Timestamp(Option<PrimitiveDateTime>),
    TimestampWithTimezone(Option<OffsetDateTime>),
    Interval(Option<Duration>),
    Uuid(Option<Uuid>),
    /// Opaque structured value, never handed to a driver as is.
    Object(Option<serde_json::Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::Int8(l), Self::Int8(r)) => l == r,
            (Self::Int16(l), Self::Int16(r)) => l == r,
            (Self::Int32(l), Self::Int32(r)) => l == r,
            (Self::Int64(l), Self::Int64(r)) => l == r,
            (Self::UInt8(l), Self::UInt8(r)) => l == r,
            (Self::UInt16(l), Self::UInt16(r)) => l == r,
            (Self::UInt32(l), Self::UInt32(r)) => l == r,
            (Self::UInt64(l), Self::UInt64(r)) => l == r,
            (Self::Float32(l), Self::Float32(r)) => l == r,
            (Self::Float64(l), Self::Float64(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => l == r,
            (Self::Char(l), Self::Char(r)) => l == r,
            (Self::Varchar(l), Self::Varchar(r)) => l == r,
            (Self::Blob(l), Self::Blob(r)) => l == r,
            (Self::Date(l), Self::Date(r)) => l == r,
            (Self::Time(l), Self::Time(r)) => l == r,
            (Self::Timestamp(l), Self::Timestamp(r)) => l == r,
            (Self::TimestampWithTimezone(l), Self::TimestampWithTimezone(r)) => l == r,
            (Self::Interval(l), Self::Interval(r)) => l == r,
            (Self::Uuid(l), Self::Uuid(r)) => l == r,
            (Self::Object(l), Self::Object(r)) => l == r,
            _ => core::mem::discriminant(self) == core::mem::discriminant(other),
        }
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Char(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Interval(None)
            | Value::Uuid(None)
            | Value::Object(None) => true,
            _ => false,
        }
    }

    /// The abstract type a parameter holding this value gets when none is declared.
    pub fn db_type(&self) -> DbType {
        match self {
            Value::Null => DbType::Object,
            Value::Boolean(..) => DbType::Boolean,
            Value::Int8(..) => DbType::SByte,
            Value::Int16(..) => DbType::Int16,
            Value::Int32(..) => DbType::Int32,
            Value::Int64(..) => DbType::Int64,
            Value::UInt8(..) => DbType::Byte,
            Value::UInt16(..) => DbType::UInt16,
            Value::UInt32(..) => DbType::UInt32,
            Value::UInt64(..) => DbType::UInt64,
            Value::Float32(..) => DbType::Single,
            Value::Float64(..) => DbType::Double,
            Value::Decimal(..) => DbType::Decimal,
            Value::Char(..) => DbType::StringFixedLength,
            Value::Varchar(..) => DbType::String,
            Value::Blob(..) => DbType::Binary,
            Value::Date(..) => DbType::Date,
            Value::Time(..) => DbType::Time,
            Value::Timestamp(..) => DbType::DateTime,
            Value::TimestampWithTimezone(..) => DbType::DateTimeOffset,
            Value::Interval(..) => DbType::Time,
            Value::Uuid(..) => DbType::Guid,
            Value::Object(..) => DbType::Object,
        }
    }

    /// Structured form of the value, used to serialize `Object` typed parameters.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        use serde_json::Value as Json;
        Ok(match self {
            Value::Null
            | Value::Boolean(None)
            | Value::Int8(None)
            | Value::Int16(None)
            | Value::Int32(None)
            | Value::Int64(None)
            | Value::UInt8(None)
            | Value::UInt16(None)
            | Value::UInt32(None)
            | Value::UInt64(None)
            | Value::Float32(None)
            | Value::Float64(None)
            | Value::Decimal(None)
            | Value::Char(None)
            | Value::Varchar(None)
            | Value::Blob(None)
            | Value::Date(None)
            | Value::Time(None)
            | Value::Timestamp(None)
            | Value::TimestampWithTimezone(None)
            | Value::Interval(None)
            | Value::Uuid(None)
            | Value::Object(None) => Json::Null,
            Value::Boolean(Some(v)) => Json::Bool(*v),
            Value::Int8(Some(v)) => (*v).into(),
            Value::Int16(Some(v)) => (*v).into(),
            Value::Int32(Some(v)) => (*v).into(),
            Value::Int64(Some(v)) => (*v).into(),
            Value::UInt8(Some(v)) => (*v).into(),
            Value::UInt16(Some(v)) => (*v).into(),
            Value::UInt32(Some(v)) => (*v).into(),
            Value::UInt64(Some(v)) => (*v).into(),
            Value::Float32(Some(v)) => float_to_json(*v as f64)?,
            Value::Float64(Some(v)) => float_to_json(*v)?,
            Value::Decimal(Some(v)) => Json::String(v.to_string()),
            Value::Char(Some(v)) => Json::String(v.to_string()),
            Value::Varchar(Some(v)) => Json::String(v.clone()),
            Value::Blob(Some(v)) => Json::String(hex::encode(v)),
            Value::Date(Some(v)) => Json::String(v.to_string()),
            Value::Time(Some(v)) => Json::String(v.to_string()),
            Value::Timestamp(Some(v)) => Json::String(v.to_string()),
            Value::TimestampWithTimezone(Some(v)) => Json::String(v.to_string()),
            Value::Interval(Some(v)) => float_to_json(duration_in_days(v))?,
            Value::Uuid(Some(v)) => Json::String(v.to_string()),
            Value::Object(Some(v)) => v.clone(),
        })
    }

    /// Binary-to-text form of the serialized value.
    pub fn serialize_hex(&self) -> Result<String> {
        let json = self.to_json()?;
        let bytes = serde_json::to_vec(&json).context("Could not serialize the object value")?;
        Ok(hex::encode(bytes))
    }
}

fn float_to_json(value: f64) -> Result<serde_json::Value> {
    serde_json::Number::from_f64(value)
        .map(serde_json::Value::Number)
        .ok_or_else(|| {
            crate::CommandError::NotSupported(format!(
                "Cannot serialize the non finite number {}",
                value
            ))
            .into()
        })
}

pub trait AsValue {
    fn as_empty_value() -> Value;
    fn as_value(self) -> Value;
}

macro_rules! impl_as_value {
    ($source:ty, $into:path) => {
        impl AsValue for $source {
            fn as_empty_value() -> Value {
                $into(None)
            }
            fn as_value(self) -> Value {
                $into(Some(self.into()))
            }
        }
    };
}

impl_as_value!(bool, Value::Boolean);
impl_as_value!(i8, Value::Int8);
impl_as_value!(i16, Value::Int16);
impl_as_value!(i32, Value::Int32);
impl_as_value!(i64, Value::Int64);
impl_as_value!(u8, Value::UInt8);
impl_as_value!(u16, Value::UInt16);
impl_as_value!(u32, Value::UInt32);
impl_as_value!(u64, Value::UInt64);
impl_as_value!(f32, Value::Float32);
impl_as_value!(f64, Value::Float64);
impl_as_value!(Decimal, Value::Decimal);
impl_as_value!(char, Value::Char);
impl_as_value!(String, Value::Varchar);
impl_as_value!(&str, Value::Varchar);
impl_as_value!(Box<[u8]>, Value::Blob);
impl_as_value!(Vec<u8>, Value::Blob);
impl_as_value!(Date, Value::Date);
impl_as_value!(Time, Value::Time);
impl_as_value!(PrimitiveDateTime, Value::Timestamp);
impl_as_value!(OffsetDateTime, Value::TimestampWithTimezone);
impl_as_value!(Duration, Value::Interval);
impl_as_value!(Uuid, Value::Uuid);
impl_as_value!(serde_json::Value, Value::Object);

impl<T: AsValue> AsValue for Option<T> {
    fn as_empty_value() -> Value {
        T::as_empty_value()
    }

    fn as_value(self) -> Value {
        match self {
            Some(v) => v.as_value(),
            None => T::as_empty_value(),
        }
    }
}

impl<T: AsValue> From<T> for Value {
    fn from(value: T) -> Self {
        value.as_value()
    }
}
