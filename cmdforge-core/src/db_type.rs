/// Declared, database agnostic type of a parameter.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    AnsiString,
    AnsiStringFixedLength,
    #[default]
    String,
    StringFixedLength,
    Binary,
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    UInt16,
    UInt32,
    UInt64,
    Single,
    Double,
    Decimal,
    Currency,
    Date,
    Time,
    DateTime,
    DateTime2,
    DateTimeOffset,
    Guid,
    Object,
    Xml,
}

impl DbType {
    /// ANSI or Unicode character data.
    pub const fn is_text(&self) -> bool {
        matches!(
            self,
            DbType::AnsiString
                | DbType::AnsiStringFixedLength
                | DbType::String
                | DbType::StringFixedLength
        )
    }

    /// Carries a time of day component.
    pub const fn is_time_like(&self) -> bool {
        matches!(
            self,
            DbType::Time | DbType::DateTime | DbType::DateTime2 | DbType::DateTimeOffset
        )
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterDirection {
    #[default]
    Input,
    Output,
    InputOutput,
    ReturnValue,
}

impl ParameterDirection {
    /// Whether a value travels from the caller to the database.
    pub const fn is_outbound(&self) -> bool {
        matches!(
            self,
            ParameterDirection::Input | ParameterDirection::InputOutput
        )
    }
}
