use crate::{Command, CommandError, Result};

/// `top_count` value meaning "no upper bound".
pub const TOP_UNBOUNDED: u64 = u64::MAX;

/// Storage types a dialect promotes parameters to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTypes {
    pub fixed_string: &'static str,
    pub large_binary: &'static str,
    pub large_text: &'static str,
    pub datetime: &'static str,
    /// Numeric representation of a point in time, expressed in days.
    pub numeric_datetime: &'static str,
}

/// Everything that varies between dialects and is not code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialectConfig {
    pub name: &'static str,
    pub identifier_quote: (char, char),
    pub parameter_prefix: char,
    pub wildcard_single: char,
    pub wildcard_many: char,
    /// Escapes wildcards found in the text of a pattern condition, written in `LIKE .. ESCAPE`.
    pub like_escape: char,
    /// Literal replacements applied to the command text, in order.
    pub function_translations: &'static [(&'static str, &'static str)],
    /// Two argument functions whose target takes the arguments in reverse order.
    pub swapped_functions: &'static [(&'static str, &'static str)],
    /// Binary values longer than this (in bytes) use `native_types.large_binary`.
    pub binary_threshold: usize,
    /// Text values longer than this (in characters) use `native_types.large_text`.
    pub text_threshold: usize,
    pub guid_length: u32,
    pub native_types: NativeTypes,
}

pub const GENERIC_CONFIG: DialectConfig = DialectConfig {
    name: "generic",
    identifier_quote: ('"', '"'),
    parameter_prefix: '@',
    wildcard_single: '_',
    wildcard_many: '%',
    like_escape: '\\',
    function_translations: &[],
    swapped_functions: &[],
    binary_threshold: usize::MAX,
    text_threshold: usize::MAX,
    guid_length: 36,
    native_types: NativeTypes {
        fixed_string: "CHAR",
        large_binary: "BLOB",
        large_text: "CLOB",
        datetime: "TIMESTAMP",
        numeric_datetime: "DOUBLE PRECISION",
    },
};

/// Paging request handed to [`Dialect::write_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<'a> {
    pub top: u64,
    pub skip: u64,
    pub identity_column: Option<&'a str>,
    pub identity_column_is_number: bool,
}

/// Capabilities of a SQL dialect, the factory only ever talks to this trait.
pub trait Dialect: Send + Sync {
    fn config(&self) -> &DialectConfig;

    /// Escape occurrences of `search` char with `replace` while copying into buffer.
    fn write_escaped(&self, out: &mut String, value: &str, search: char, replace: &str) {
        let mut position = 0;
        for (i, c) in value.char_indices() {
            if c == search {
                out.push_str(&value[position..i]);
                out.push_str(replace);
                position = i + c.len_utf8();
            }
        }
        out.push_str(&value[position..]);
    }

    /// Quote an identifier, each dot separated segment on its own.
    fn write_identifier_quoted(&self, out: &mut String, value: &str) {
        let (open, close) = self.config().identifier_quote;
        let doubled = String::from_iter([close, close]);
        for (i, segment) in value.split('.').enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push(open);
            self.write_escaped(out, segment, close, &doubled);
            out.push(close);
        }
    }

    fn write_parameter_marker(&self, out: &mut String, name: &str) {
        out.push(self.config().parameter_prefix);
        out.push_str(name);
    }

    /// Turn a select into a bounded one, by appending to its text.
    fn write_range(&self, _command: &mut Command, _range: &Range) -> Result<()> {
        Err(CommandError::NotSupported(format!(
            "paging is not available in the {} dialect",
            self.config().name
        ))
        .into())
    }

    /// Last step of every command creation: coerce parameters and translate the text.
    fn prepare(&self, _command: &mut Command) -> Result<()> {
        Ok(())
    }
}

/// Dialect using the default behavior of every method.
#[derive(Default, Debug, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn config(&self) -> &DialectConfig {
        &GENERIC_CONFIG
    }
}
