use crate::{DbType, Parameter, ParameterDirection, Value};
use std::fmt::Debug;

/// Connection provider a command is bound to.
///
/// It instantiates the parameter objects, drivers can override the constructor to attach
/// backend specific defaults.
pub trait Driver: Send + Sync + Debug {
    fn name(&self) -> &'static str;

    fn create_parameter(
        &self,
        name: String,
        direction: ParameterDirection,
        db_type: DbType,
        size: Option<u32>,
        value: Value,
    ) -> Parameter {
        Parameter {
            name,
            direction,
            db_type,
            native_type: None,
            size,
            value,
        }
    }
}
