use crate::{Driver, Parameter, truncate_long};
use std::{
    fmt::{self, Display},
    sync::Arc,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Insert,
    Update,
    Delete,
    Select,
    SelectRange,
    CustomSql,
    StoredProcedure,
}

/// Executable command produced by a [`CommandFactory`](crate::CommandFactory).
///
/// The caller owns it, nothing inside the factory keeps a reference.
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    pub text: String,
    pub parameters: Vec<Parameter>,
    pub driver: Arc<dyn Driver>,
}

impl Command {
    pub fn new(kind: CommandKind, text: String, driver: Arc<dyn Driver>) -> Self {
        Self {
            kind,
            text,
            parameters: Vec::new(),
            driver,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (text, truncated) = truncate_long(&self.text, 497);
        write!(f, "{}{}", text, if truncated { "..." } else { "" })
    }
}
