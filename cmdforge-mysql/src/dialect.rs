use crate::{coerce_parameter, translate_text};
use cmdforge_core::{Command, Dialect, DialectConfig, NativeTypes, Range, Result};
use std::fmt::Write;

pub const MYSQL_CONFIG: DialectConfig = DialectConfig {
    name: "mysql",
    identifier_quote: ('`', '`'),
    parameter_prefix: '?',
    wildcard_single: '_',
    wildcard_many: '%',
    like_escape: '!',
    function_translations: &[
        ("LEN(", "LENGTH("),
        ("GETDATE()", "NOW()"),
        ("GETUTCDATE()", "UTC_TIMESTAMP()"),
        ("ISNULL(", "IFNULL("),
        ("DATEPART(YEAR,", "YEAR("),
        ("DATEPART(MONTH,", "MONTH("),
        ("DATEPART(DAY,", "DAY("),
        ("DATEPART(HOUR,", "HOUR("),
        ("DATEPART(MINUTE,", "MINUTE("),
        ("DATEPART(SECOND,", "SECOND("),
    ],
    swapped_functions: &[("CHARINDEX", "INSTR")],
    binary_threshold: 2000,
    text_threshold: 65535,
    guid_length: 32,
    native_types: NativeTypes {
        fixed_string: "CHAR",
        large_binary: "LONGBLOB",
        large_text: "LONGTEXT",
        datetime: "DATETIME",
        numeric_datetime: "DOUBLE",
    },
};

#[derive(Default, Debug, Clone, Copy)]
pub struct MySQLDialect {}

impl MySQLDialect {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Dialect for MySQLDialect {
    fn config(&self) -> &DialectConfig {
        &MYSQL_CONFIG
    }

    /// `LIMIT count` or `LIMIT skip,count`.
    fn write_range(&self, command: &mut Command, range: &Range) -> Result<()> {
        let out = &mut command.text;
        if range.skip == 0 {
            let _ = write!(out, "\nLIMIT {}", range.top);
        } else {
            let _ = write!(out, "\nLIMIT {},{}", range.skip, range.top);
        }
        Ok(())
    }

    fn prepare(&self, command: &mut Command) -> Result<()> {
        let config = self.config();
        for parameter in &mut command.parameters {
            coerce_parameter(config, parameter)?;
        }
        if let Some(text) = translate_text(config, &command.text)? {
            command.text = text;
        }
        Ok(())
    }
}
