use crate::{CommandError, DbType, Dialect, Parameter, Result, Value, separated_by};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    ASC,
    DESC,
}

/// Ordering entry: a column and its direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordered {
    pub column: String,
    pub order: Order,
}

impl Ordered {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: Order::ASC,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            order: Order::DESC,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    StartsWith,
    EndsWith,
    Contains,
    IsNull,
    IsNotNull,
}

impl Comparison {
    fn is_pattern(&self) -> bool {
        matches!(
            self,
            Comparison::StartsWith | Comparison::EndsWith | Comparison::Contains
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub comparison: Comparison,
    pub db_type: DbType,
    pub value: Value,
}

#[derive(Default, Debug, Clone, PartialEq)]
enum Filter {
    #[default]
    All,
    Conditions(Vec<Condition>),
    Raw {
        sql: String,
        parameters: Vec<Parameter>,
    },
}

/// Predicate descriptor: the data set to read from, a filter and an optional ordering.
///
/// Conditions are joined with `AND`. Anything more complex is rendered by the caller and passed
/// through [`Where::raw`] together with its parameters.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Where {
    from: Option<String>,
    filter: Filter,
    ordering: Vec<Ordered>,
}

impl Where {
    /// Predicate without a From target, used by update and delete.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row of `from`.
    pub fn all(from: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            ..Default::default()
        }
    }

    pub fn and(
        mut self,
        column: impl Into<String>,
        comparison: Comparison,
        db_type: DbType,
        value: impl Into<Value>,
    ) -> Self {
        let condition = Condition {
            column: column.into(),
            comparison,
            db_type,
            value: value.into(),
        };
        match &mut self.filter {
            Filter::Conditions(conditions) => conditions.push(condition),
            _ => self.filter = Filter::Conditions(vec![condition]),
        }
        self
    }

    /// Equality condition, the type is inferred from the value.
    pub fn equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let db_type = value.db_type();
        self.and(column, Comparison::Equal, db_type, value)
    }

    /// Fragment already written in the target dialect, it replaces any condition.
    pub fn raw(mut self, sql: impl Into<String>, parameters: Vec<Parameter>) -> Self {
        self.filter = Filter::Raw {
            sql: sql.into(),
            parameters,
        };
        self
    }

    pub fn order_by(mut self, ordered: Ordered) -> Self {
        self.ordering.push(ordered);
        self
    }

    pub fn from_target(&self) -> Option<&str> {
        self.from.as_deref().filter(|v| !v.is_empty())
    }

    pub fn is_all(&self) -> bool {
        match &self.filter {
            Filter::All => true,
            Filter::Conditions(v) => v.is_empty(),
            Filter::Raw { sql, .. } => sql.trim().is_empty(),
        }
    }

    pub fn ordering(&self) -> &[Ordered] {
        &self.ordering
    }

    /// Writes the filter fragment (without the `WHERE` keyword) and returns its parameters.
    pub fn write_sql(&self, dialect: &dyn Dialect, out: &mut String) -> Result<Vec<Parameter>> {
        match &self.filter {
            Filter::All => Ok(Vec::new()),
            Filter::Raw { sql, parameters } => {
                out.push_str(sql);
                Ok(parameters.clone())
            }
            Filter::Conditions(conditions) => {
                let mut parameters = Vec::with_capacity(conditions.len());
                let mut result = Ok(());
                separated_by(
                    out,
                    conditions,
                    |out, condition| {
                        if result.is_ok() {
                            result = self.write_condition(dialect, out, condition, &mut parameters);
                        }
                    },
                    " AND ",
                );
                result.map(|_| parameters)
            }
        }
    }

    fn write_condition(
        &self,
        dialect: &dyn Dialect,
        out: &mut String,
        condition: &Condition,
        parameters: &mut Vec<Parameter>,
    ) -> Result<()> {
        dialect.write_identifier_quoted(out, &condition.column);
        let operator = match condition.comparison {
            Comparison::IsNull => {
                out.push_str(" IS NULL");
                return Ok(());
            }
            Comparison::IsNotNull => {
                out.push_str(" IS NOT NULL");
                return Ok(());
            }
            Comparison::Equal => "=",
            Comparison::NotEqual => "<>",
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::StartsWith | Comparison::EndsWith | Comparison::Contains => "LIKE",
        };
        let name = format!("w_{}", parameters.len());
        let _ = write!(out, " {} ", operator);
        dialect.write_parameter_marker(out, &name);
        let value = if condition.comparison.is_pattern() {
            let _ = write!(out, " ESCAPE '{}'", dialect.config().like_escape);
            self.pattern(dialect, condition)?
        } else {
            condition.value.clone()
        };
        parameters.push(Parameter::new(name, condition.db_type, value));
        Ok(())
    }

    fn pattern(&self, dialect: &dyn Dialect, condition: &Condition) -> Result<Value> {
        let Value::Varchar(Some(text)) = &condition.value else {
            return Err(CommandError::Precondition(format!(
                "pattern condition on `{}` requires a text value, found {:?}",
                condition.column, condition.value
            ))
            .into());
        };
        let config = dialect.config();
        let many = config.wildcard_many;
        let mut pattern = String::with_capacity(text.len() + 4);
        if matches!(
            condition.comparison,
            Comparison::EndsWith | Comparison::Contains
        ) {
            pattern.push(many);
        }
        for c in text.chars() {
            if c == config.wildcard_single || c == many || c == config.like_escape {
                pattern.push(config.like_escape);
            }
            pattern.push(c);
        }
        if matches!(
            condition.comparison,
            Comparison::StartsWith | Comparison::Contains
        ) {
            pattern.push(many);
        }
        Ok(Value::Varchar(Some(pattern)))
    }
}
