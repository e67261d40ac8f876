use crate::{DbType, ParameterDirection, Value};

/// A named, typed placeholder of a [`Command`](crate::Command).
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub direction: ParameterDirection,
    pub db_type: DbType,
    /// Dialect specific storage type, overrides `db_type` when binding.
    pub native_type: Option<&'static str>,
    pub size: Option<u32>,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, db_type: DbType, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            db_type,
            value: value.into(),
            ..Default::default()
        }
    }

    /// Whether the prepare hook must leave this parameter untouched.
    pub fn is_inert(&self) -> bool {
        !self.direction.is_outbound() || self.value.is_null()
    }
}

/// Stored procedure argument declaration: name, type, size and (for inbound ones) value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureArgument {
    pub name: String,
    pub db_type: DbType,
    pub size: Option<u32>,
    pub value: Value,
}

impl ProcedureArgument {
    pub fn new(
        name: impl Into<String>,
        db_type: DbType,
        size: Option<u32>,
        value: impl Into<Value>,
    ) -> Self {
        Self {
            name: name.into(),
            db_type,
            size,
            value: value.into(),
        }
    }

    /// Declaration without a value, for output and return value arguments.
    pub fn declare(name: impl Into<String>, db_type: DbType, size: Option<u32>) -> Self {
        Self {
            name: name.into(),
            db_type,
            size,
            value: Value::Null,
        }
    }
}
