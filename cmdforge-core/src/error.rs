use std::fmt::{self, Display};

/// Root cause of every error raised while building a command.
///
/// Errors travel as [`crate::Error`], use `downcast_ref::<CommandError>()` to inspect the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A required argument is missing or inconsistent.
    Precondition(String),
    /// The dialect cannot express the requested construct.
    NotSupported(String),
    /// The command text cannot be rewritten safely.
    Malformed(String),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::Precondition(v) => write!(f, "Precondition failed: {}", v),
            CommandError::NotSupported(v) => write!(f, "Not supported: {}", v),
            CommandError::Malformed(v) => write!(f, "Malformed command text: {}", v),
        }
    }
}

impl std::error::Error for CommandError {}

/// Returns early with a [`CommandError::Precondition`] unless the condition holds.
#[macro_export]
macro_rules! ensure_precondition {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::CommandError::Precondition(format!($($arg)+)).into());
        }
    };
}
