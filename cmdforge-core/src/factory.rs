use crate::{
    Command, CommandError, CommandKind, DbType, Dialect, Driver, Order, Ordered, Parameter,
    ParameterDirection, ProcedureArgument, Range, Result, TOP_UNBOUNDED, Value, Where,
    ensure_precondition, parameter_name, separated_by,
};
use std::{borrow::Cow, collections::HashSet, sync::Arc};

/// Builds executable commands for every kind of operation.
///
/// Stateless: each `create_*` call only reads its arguments, a single factory can be shared
/// across threads. Every command goes through [`Dialect::prepare`] before being returned.
#[derive(Clone)]
pub struct CommandFactory {
    dialect: Arc<dyn Dialect>,
    driver: Arc<dyn Driver>,
}

impl CommandFactory {
    pub fn new(dialect: impl Dialect + 'static, driver: Arc<dyn Driver>) -> Self {
        Self {
            dialect: Arc::new(dialect),
            driver,
        }
    }

    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    pub fn driver(&self) -> &Arc<dyn Driver> {
        &self.driver
    }

    pub fn create_insert_command(
        &self,
        table: &str,
        columns: &[&str],
        types: &[DbType],
        values: Vec<Value>,
    ) -> Result<Command> {
        ensure_precondition!(!table.is_empty(), "insert requires a table name");
        check_columns(columns, types, &values, false)?;
        let mut out = String::with_capacity(64);
        out.push_str("INSERT INTO ");
        self.dialect.write_identifier_quoted(&mut out, table);
        out.push_str(" (");
        separated_by(
            &mut out,
            columns,
            |out, v| self.dialect.write_identifier_quoted(out, v),
            ", ",
        );
        out.push_str(")\nVALUES (");
        separated_by(
            &mut out,
            columns,
            |out, v| {
                self.dialect
                    .write_parameter_marker(out, &parameter_name(v))
            },
            ", ",
        );
        out.push(')');
        let mut command = self.command(CommandKind::Insert, out);
        command.parameters = self.input_parameters(columns, types, values);
        self.finish(command)
    }

    pub fn create_update_command(
        &self,
        table: &str,
        predicate: &Where,
        columns: &[&str],
        types: &[DbType],
        values: Vec<Value>,
    ) -> Result<Command> {
        ensure_precondition!(!table.is_empty(), "update requires a table name");
        check_columns(columns, types, &values, false)?;
        let mut out = String::with_capacity(64);
        out.push_str("UPDATE ");
        self.dialect.write_identifier_quoted(&mut out, table);
        out.push_str("\nSET ");
        separated_by(
            &mut out,
            columns,
            |out, v| {
                self.dialect.write_identifier_quoted(out, v);
                out.push_str(" = ");
                self.dialect
                    .write_parameter_marker(out, &parameter_name(v));
            },
            ", ",
        );
        let mut parameters = self.input_parameters(columns, types, values);
        parameters.extend(self.write_where(&mut out, predicate)?);
        let mut command = self.command(CommandKind::Update, out);
        command.parameters = parameters;
        self.finish(command)
    }

    pub fn create_delete_command(&self, table: &str, predicate: &Where) -> Result<Command> {
        ensure_precondition!(!table.is_empty(), "delete requires a table name");
        let mut out = String::with_capacity(64);
        out.push_str("DELETE FROM ");
        self.dialect.write_identifier_quoted(&mut out, table);
        let parameters = self.write_where(&mut out, predicate)?;
        let mut command = self.command(CommandKind::Delete, out);
        command.parameters = parameters;
        self.finish(command)
    }

    pub fn create_select_command(&self, predicate: &Where, columns: &[&str]) -> Result<Command> {
        let (text, parameters) = self.write_select(predicate, columns)?;
        let mut command = self.command(CommandKind::Select, text);
        command.parameters = parameters;
        self.finish(command)
    }

    /// Select at most `top_count` rows after skipping `skip_count` of them.
    ///
    /// Without an ordering the rows are sorted ascending by `identity_column` (when given), so
    /// that consecutive pages do not overlap.
    pub fn create_select_range_command(
        &self,
        predicate: &Where,
        columns: &[&str],
        top_count: u64,
        skip_count: u64,
        identity_column: Option<&str>,
        identity_column_is_number: bool,
    ) -> Result<Command> {
        ensure_precondition!(
            predicate.from_target().is_some(),
            "the predicate of a select must name the data set to read from"
        );
        ensure_precondition!(!columns.is_empty(), "select range requires columns");
        ensure_precondition!(top_count > 0, "top count must be positive");
        let predicate = match identity_column {
            Some(identity) if predicate.ordering().is_empty() && !identity.is_empty() => {
                Cow::Owned(predicate.clone().order_by(Ordered::asc(identity)))
            }
            _ => Cow::Borrowed(predicate),
        };
        if top_count == TOP_UNBOUNDED && skip_count == 0 {
            return self.create_select_command(&predicate, columns);
        }
        let (text, parameters) = self.write_select(&predicate, columns)?;
        let mut command = self.command(CommandKind::SelectRange, text);
        command.parameters = parameters;
        self.dialect.write_range(
            &mut command,
            &Range {
                top: top_count,
                skip: skip_count,
                identity_column,
                identity_column_is_number,
            },
        )?;
        self.finish(command)
    }

    /// Literal SQL template with its parameters.
    pub fn create_custom_sql_command(
        &self,
        sql: &str,
        names: &[&str],
        types: &[DbType],
        values: Vec<Value>,
    ) -> Result<Command> {
        ensure_precondition!(!sql.trim().is_empty(), "custom sql cannot be empty");
        check_columns(names, types, &values, true)?;
        let mut command = self.command(CommandKind::CustomSql, sql.to_owned());
        command.parameters = names
            .iter()
            .zip(types)
            .zip(values)
            .map(|((name, db_type), value)| {
                self.driver.create_parameter(
                    (*name).to_owned(),
                    ParameterDirection::Input,
                    *db_type,
                    None,
                    value,
                )
            })
            .collect();
        self.finish(command)
    }

    pub fn create_stored_procedure_command(
        &self,
        name: &str,
        inputs: Vec<ProcedureArgument>,
    ) -> Result<Command> {
        self.create_stored_procedure_command_full(name, inputs, Vec::new(), Vec::new(), None)
    }

    pub fn create_stored_procedure_command_with_outputs(
        &self,
        name: &str,
        inputs: Vec<ProcedureArgument>,
        outputs: Vec<ProcedureArgument>,
    ) -> Result<Command> {
        self.create_stored_procedure_command_full(name, inputs, outputs, Vec::new(), None)
    }

    pub fn create_stored_procedure_command_full(
        &self,
        name: &str,
        inputs: Vec<ProcedureArgument>,
        outputs: Vec<ProcedureArgument>,
        input_outputs: Vec<ProcedureArgument>,
        return_value: Option<ProcedureArgument>,
    ) -> Result<Command> {
        ensure_precondition!(!name.is_empty(), "stored procedure requires a name");
        let groups = [
            (ParameterDirection::Input, inputs),
            (ParameterDirection::Output, outputs),
            (ParameterDirection::InputOutput, input_outputs),
            (
                ParameterDirection::ReturnValue,
                return_value.into_iter().collect(),
            ),
        ];
        let mut out = String::with_capacity(name.len() + 2);
        self.dialect.write_identifier_quoted(&mut out, name);
        let mut command = self.command(CommandKind::StoredProcedure, out);
        for (direction, arguments) in groups {
            for argument in arguments {
                ensure_precondition!(
                    !argument.name.is_empty(),
                    "stored procedure `{}` has an unnamed argument",
                    name
                );
                let value = if direction.is_outbound() {
                    argument.value
                } else {
                    Value::Null
                };
                command.parameters.push(self.driver.create_parameter(
                    argument.name,
                    direction,
                    argument.db_type,
                    argument.size,
                    value,
                ));
            }
        }
        self.finish(command)
    }

    fn command(&self, kind: CommandKind, text: String) -> Command {
        Command::new(kind, text, self.driver.clone())
    }

    fn input_parameters(
        &self,
        columns: &[&str],
        types: &[DbType],
        values: Vec<Value>,
    ) -> Vec<Parameter> {
        columns
            .iter()
            .zip(types)
            .zip(values)
            .map(|((column, db_type), value)| {
                self.driver.create_parameter(
                    parameter_name(column),
                    ParameterDirection::Input,
                    *db_type,
                    None,
                    value,
                )
            })
            .collect()
    }

    fn write_where(&self, out: &mut String, predicate: &Where) -> Result<Vec<Parameter>> {
        if predicate.is_all() {
            return Ok(Vec::new());
        }
        out.push_str("\nWHERE ");
        predicate.write_sql(self.dialect.as_ref(), out)
    }

    fn write_select(&self, predicate: &Where, columns: &[&str]) -> Result<(String, Vec<Parameter>)> {
        let Some(from) = predicate.from_target() else {
            return Err(CommandError::Precondition(
                "the predicate of a select must name the data set to read from".into(),
            )
            .into());
        };
        let mut out = String::with_capacity(128);
        out.push_str("SELECT ");
        if columns.is_empty() {
            out.push('*');
        }
        separated_by(
            &mut out,
            columns,
            |out, v| {
                if *v == "*" {
                    out.push('*');
                } else {
                    self.dialect.write_identifier_quoted(out, v);
                }
            },
            ", ",
        );
        out.push_str("\nFROM ");
        self.dialect.write_identifier_quoted(&mut out, from);
        let parameters = self.write_where(&mut out, predicate)?;
        if !predicate.ordering().is_empty() {
            out.push_str("\nORDER BY ");
            separated_by(
                &mut out,
                predicate.ordering(),
                |out, v| {
                    self.dialect.write_identifier_quoted(out, &v.column);
                    out.push_str(match v.order {
                        Order::ASC => " ASC",
                        Order::DESC => " DESC",
                    });
                },
                ", ",
            );
        }
        Ok((out, parameters))
    }

    fn finish(&self, mut command: Command) -> Result<Command> {
        let mut names = HashSet::with_capacity(command.parameters.len());
        for parameter in &command.parameters {
            ensure_precondition!(
                names.insert(parameter.name.as_str()),
                "parameter `{}` appears more than once",
                parameter.name
            );
        }
        self.dialect.prepare(&mut command)?;
        log::trace!("Prepared {:?} command:\n{}", command.kind, command);
        Ok(command)
    }
}

fn check_columns(
    columns: &[&str],
    types: &[DbType],
    values: &[Value],
    allow_empty: bool,
) -> Result<()> {
    ensure_precondition!(
        allow_empty || !columns.is_empty(),
        "at least one column is required"
    );
    ensure_precondition!(
        columns.len() == types.len() && columns.len() == values.len(),
        "columns ({}), types ({}) and values ({}) must have the same length",
        columns.len(),
        types.len(),
        values.len()
    );
    ensure_precondition!(
        columns.iter().all(|v| !v.is_empty()),
        "column names cannot be empty"
    );
    Ok(())
}
