#[cfg(test)]
mod tests {
    use cmdforge_core::{
        Command, CommandError, CommandFactory, CommandKind, Comparison, DbType, Dialect,
        DialectConfig, Driver, GENERIC_CONFIG, GenericDialect, Ordered, Parameter,
        ParameterDirection, ProcedureArgument, Range, Result, TOP_UNBOUNDED, Value, Where,
    };
    use indoc::indoc;
    use std::{fmt::Write, sync::Arc};

    #[derive(Debug)]
    struct TestDriver;
    impl Driver for TestDriver {
        fn name(&self) -> &'static str {
            "test"
        }
    }

    /// Marks every prepared command and pages with `OFFSET .. FETCH`.
    struct MarkingDialect;
    impl Dialect for MarkingDialect {
        fn config(&self) -> &DialectConfig {
            &GENERIC_CONFIG
        }

        fn write_range(&self, command: &mut Command, range: &Range) -> Result<()> {
            let _ = write!(
                command.text,
                "\nOFFSET {} ROWS FETCH NEXT {} ROWS ONLY",
                range.skip, range.top
            );
            Ok(())
        }

        fn prepare(&self, command: &mut Command) -> Result<()> {
            command.text.push_str(" /* prepared */");
            Ok(())
        }
    }

    fn generic() -> CommandFactory {
        CommandFactory::new(GenericDialect::new(), Arc::new(TestDriver))
    }

    fn marking() -> CommandFactory {
        CommandFactory::new(MarkingDialect, Arc::new(TestDriver))
    }

    fn precondition<T: std::fmt::Debug>(result: Result<T>) -> bool {
        matches!(
            result.unwrap_err().downcast_ref::<CommandError>(),
            Some(CommandError::Precondition(..))
        )
    }

    #[test]
    fn insert() {
        let command = generic()
            .create_insert_command(
                "shop.users",
                &["id", "first name"],
                &[DbType::Int32, DbType::String],
                vec![Value::from(1i32), Value::from("Alice")],
            )
            .expect("Could not create the insert");
        assert_eq!(command.kind, CommandKind::Insert);
        assert_eq!(
            command.text,
            indoc! {r#"
                INSERT INTO "shop"."users" ("id", "first name")
                VALUES (@id, @first_name)
            "#}
            .trim()
        );
        assert_eq!(command.parameters.len(), 2);
        assert_eq!(
            command.parameters[1],
            Parameter::new("first_name", DbType::String, "Alice")
        );
        assert_eq!(command.driver.name(), "test");
    }

    #[test]
    fn insert_preconditions() {
        let factory = generic();
        assert!(precondition(factory.create_insert_command(
            "users",
            &[],
            &[],
            vec![]
        )));
        assert!(precondition(factory.create_insert_command(
            "users",
            &["id", "name"],
            &[DbType::Int32],
            vec![Value::from(1i32), Value::from("Alice")],
        )));
        assert!(precondition(factory.create_insert_command(
            "users",
            &["id"],
            &[DbType::Int32],
            vec![],
        )));
        assert!(precondition(factory.create_insert_command(
            "",
            &["id"],
            &[DbType::Int32],
            vec![Value::from(1i32)],
        )));
    }

    #[test]
    fn update() {
        let factory = generic();
        let command = factory
            .create_update_command(
                "users",
                &Where::new()
                    .equals("id", 5i64)
                    .and("name", Comparison::StartsWith, DbType::AnsiString, "Al"),
                &["name", "age"],
                &[DbType::String, DbType::Int16],
                vec![Value::from("Bob"), Value::Int16(None)],
            )
            .unwrap();
        assert_eq!(
            command.text,
            indoc! {r#"
                UPDATE "users"
                SET "name" = @name, "age" = @age
                WHERE "id" = @w_0 AND "name" LIKE @w_1 ESCAPE '\'
            "#}
            .trim()
        );
        assert_eq!(command.parameters.len(), 4);
        assert_eq!(command.parameters[2].value, Value::Int64(Some(5)));
        assert_eq!(command.parameters[2].db_type, DbType::Int64);
        assert_eq!(
            command.parameters[3].value,
            Value::Varchar(Some("Al%".into()))
        );

        let command = factory
            .create_update_command(
                "users",
                &Where::new(),
                &["active"],
                &[DbType::Boolean],
                vec![Value::from(false)],
            )
            .unwrap();
        assert_eq!(command.text, "UPDATE \"users\"\nSET \"active\" = @active");
        assert_eq!(command.parameters.len(), 1);
    }

    #[test]
    fn update_duplicate_parameter() {
        let result = generic().create_update_command(
            "users",
            &Where::new().raw("\"id\" = @name", vec![Parameter::new("name", DbType::Int32, 1i32)]),
            &["name"],
            &[DbType::String],
            vec![Value::from("Bob")],
        );
        assert!(precondition(result));
    }

    #[test]
    fn delete() {
        let factory = generic();
        let command = factory
            .create_delete_command("users", &Where::all("ignored"))
            .unwrap();
        assert_eq!(command.text, "DELETE FROM \"users\"");
        assert!(command.parameters.is_empty());

        let command = factory
            .create_delete_command(
                "users",
                &Where::new()
                    .and("deleted_at", Comparison::IsNotNull, DbType::DateTime, Value::Null)
                    .and("email", Comparison::Contains, DbType::String, "spam"),
            )
            .unwrap();
        assert_eq!(
            command.text,
            "DELETE FROM \"users\"\nWHERE \"deleted_at\" IS NOT NULL AND \"email\" LIKE @w_0 ESCAPE '\\'"
        );
        assert_eq!(
            command.parameters,
            [Parameter::new("w_0", DbType::String, "%spam%")]
        );
    }

    #[test]
    fn pattern_requires_text() {
        let result = generic().create_delete_command(
            "users",
            &Where::new().and("id", Comparison::EndsWith, DbType::Int32, 3i32),
        );
        assert!(precondition(result));
    }

    #[test]
    fn pattern_escapes_wildcards() {
        let command = generic()
            .create_select_command(
                &Where::all("codes")
                    .and("code", Comparison::StartsWith, DbType::String, "a_b%")
                    .and("path", Comparison::EndsWith, DbType::String, r"c:\tmp")
                    .and("note", Comparison::Contains, DbType::String, "100%"),
                &["code"],
            )
            .unwrap();
        assert_eq!(
            command.text,
            indoc! {r#"
                SELECT "code"
                FROM "codes"
                WHERE "code" LIKE @w_0 ESCAPE '\' AND "path" LIKE @w_1 ESCAPE '\' AND "note" LIKE @w_2 ESCAPE '\'
            "#}
            .trim()
        );
        let values: Vec<_> = command.parameters.iter().map(|p| &p.value).collect();
        assert_eq!(
            values,
            [
                &Value::Varchar(Some(r"a\_b\%%".into())),
                &Value::Varchar(Some(r"%c:\\tmp".into())),
                &Value::Varchar(Some(r"%100\%%".into())),
            ]
        );
    }

    #[test]
    fn select() {
        let factory = generic();
        let command = factory
            .create_select_command(
                &Where::all("orders")
                    .order_by(Ordered::desc("created_at"))
                    .order_by(Ordered::asc("id")),
                &["id", "total"],
            )
            .unwrap();
        assert_eq!(command.kind, CommandKind::Select);
        assert_eq!(
            command.text,
            indoc! {r#"
                SELECT "id", "total"
                FROM "orders"
                ORDER BY "created_at" DESC, "id" ASC
            "#}
            .trim()
        );
        let command = factory
            .create_select_command(&Where::all("orders"), &["*"])
            .unwrap();
        assert_eq!(command.text, "SELECT *\nFROM \"orders\"");
        assert!(precondition(
            factory.create_select_command(&Where::new().equals("id", 1i32), &["id"])
        ));
    }

    #[test]
    fn select_range_degenerates() {
        let factory = generic();
        let predicate = Where::all("orders").equals("status", "open");
        let select = factory
            .create_select_command(&predicate, &["id", "status"])
            .unwrap();
        let range = factory
            .create_select_range_command(
                &predicate,
                &["id", "status"],
                TOP_UNBOUNDED,
                0,
                None,
                false,
            )
            .unwrap();
        assert_eq!(select.text, range.text);
        assert_eq!(select.parameters, range.parameters);
        assert_eq!(range.kind, CommandKind::Select);
    }

    #[test]
    fn select_range_not_supported() {
        let result = generic().create_select_range_command(
            &Where::all("orders"),
            &["id"],
            10,
            0,
            None,
            false,
        );
        assert!(matches!(
            result.unwrap_err().downcast_ref::<CommandError>(),
            Some(CommandError::NotSupported(..))
        ));
    }

    #[test]
    fn select_range_identity_ordering() {
        let factory = marking();
        let command = factory
            .create_select_range_command(
                &Where::all("orders"),
                &["id", "total"],
                10,
                20,
                Some("id"),
                true,
            )
            .unwrap();
        assert_eq!(command.kind, CommandKind::SelectRange);
        assert_eq!(
            command.text,
            indoc! {r#"
                SELECT "id", "total"
                FROM "orders"
                ORDER BY "id" ASC
                OFFSET 20 ROWS FETCH NEXT 10 ROWS ONLY /* prepared */
            "#}
            .trim()
        );

        // An explicit ordering wins over the identity column
        let command = factory
            .create_select_range_command(
                &Where::all("orders").order_by(Ordered::desc("total")),
                &["id", "total"],
                10,
                20,
                Some("id"),
                true,
            )
            .unwrap();
        assert!(command.text.contains("ORDER BY \"total\" DESC\n"));
        assert!(!command.text.contains("\"id\" ASC"));
    }

    #[test]
    fn select_range_preconditions() {
        let factory = marking();
        assert!(precondition(factory.create_select_range_command(
            &Where::all("orders"),
            &["id"],
            0,
            0,
            None,
            false,
        )));
        assert!(precondition(factory.create_select_range_command(
            &Where::all("orders"),
            &[],
            10,
            0,
            None,
            false,
        )));
        assert!(precondition(factory.create_select_range_command(
            &Where::new(),
            &["id"],
            10,
            0,
            None,
            false,
        )));
    }

    #[test]
    fn custom_sql() {
        let command = marking()
            .create_custom_sql_command(
                "SELECT * FROM logs WHERE level >= @level",
                &["level"],
                &[DbType::Int32],
                vec![Value::from(3i32)],
            )
            .unwrap();
        assert_eq!(command.kind, CommandKind::CustomSql);
        assert_eq!(
            command.text,
            "SELECT * FROM logs WHERE level >= @level /* prepared */"
        );
        assert_eq!(command.parameter("level").unwrap().value, Value::Int32(Some(3)));
        assert!(precondition(marking().create_custom_sql_command(
            " ",
            &[],
            &[],
            vec![]
        )));
    }

    #[test]
    fn stored_procedures() {
        let factory = marking();
        let command = factory
            .create_stored_procedure_command(
                "refresh_totals",
                vec![ProcedureArgument::new("customer", DbType::Int32, None, 7i32)],
            )
            .unwrap();
        assert_eq!(command.kind, CommandKind::StoredProcedure);
        assert_eq!(command.text, "\"refresh_totals\" /* prepared */");
        assert_eq!(command.parameters.len(), 1);

        let command = factory
            .create_stored_procedure_command_with_outputs(
                "count_orders",
                vec![ProcedureArgument::new("customer", DbType::Int32, None, 7i32)],
                vec![ProcedureArgument::new("total", DbType::Int64, None, 99i64)],
            )
            .unwrap();
        let total = command.parameter("total").unwrap();
        assert_eq!(total.direction, ParameterDirection::Output);
        assert!(total.value.is_null());

        let command = factory
            .create_stored_procedure_command_full(
                "transfer",
                vec![ProcedureArgument::new("amount", DbType::Decimal, None, 10.5f64)],
                vec![ProcedureArgument::declare("receipt", DbType::String, Some(64))],
                vec![ProcedureArgument::new("balance", DbType::Double, None, 100f64)],
                Some(ProcedureArgument::declare("status", DbType::Int32, None)),
            )
            .unwrap();
        let directions: Vec<_> = command
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.direction))
            .collect();
        assert_eq!(
            directions,
            [
                ("amount", ParameterDirection::Input),
                ("receipt", ParameterDirection::Output),
                ("balance", ParameterDirection::InputOutput),
                ("status", ParameterDirection::ReturnValue),
            ]
        );
        assert_eq!(command.parameter("receipt").unwrap().size, Some(64));
        assert_eq!(
            command.parameter("balance").unwrap().value,
            Value::Float64(Some(100.0))
        );
        assert!(command.parameter("status").unwrap().value.is_null());
        assert!(precondition(
            factory.create_stored_procedure_command("", vec![])
        ));
    }

    #[test]
    fn every_command_is_prepared() {
        let factory = marking();
        let commands = [
            factory.create_insert_command("t", &["a"], &[DbType::Int32], vec![Value::from(1i32)]),
            factory.create_update_command(
                "t",
                &Where::new(),
                &["a"],
                &[DbType::Int32],
                vec![Value::from(1i32)],
            ),
            factory.create_delete_command("t", &Where::new()),
            factory.create_select_command(&Where::all("t"), &["a"]),
            factory.create_select_range_command(&Where::all("t"), &["a"], 5, 5, None, false),
            factory.create_custom_sql_command("SELECT 1", &[], &[], vec![]),
            factory.create_stored_procedure_command("p", vec![]),
        ];
        for command in commands {
            assert!(command.unwrap().text.ends_with(" /* prepared */"));
        }
    }

    #[test]
    fn shared_between_threads() {
        let factory = marking();
        let predicate = Where::all("events").equals("kind", "click");
        let expected = factory
            .create_select_range_command(&predicate, &["id"], 50, 100, Some("id"), true)
            .unwrap();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        factory
                            .create_select_range_command(
                                &predicate,
                                &["id"],
                                50,
                                100,
                                Some("id"),
                                true,
                            )
                            .unwrap()
                    })
                })
                .collect();
            for handle in handles {
                let command = handle.join().unwrap();
                assert_eq!(command.text, expected.text);
                assert_eq!(command.parameters, expected.parameters);
            }
        });
    }
}
