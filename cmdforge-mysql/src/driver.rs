use crate::MySQLDialect;
use cmdforge_core::{CommandFactory, Driver};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default)]
pub struct MySQLDriver;

impl MySQLDriver {
    pub const fn new() -> Self {
        Self
    }

    /// Factory producing MySQL commands bound to this driver.
    pub fn command_factory(&self) -> CommandFactory {
        CommandFactory::new(MySQLDialect::new(), Arc::new(*self))
    }
}

impl Driver for MySQLDriver {
    fn name(&self) -> &'static str {
        "mysql"
    }
}
