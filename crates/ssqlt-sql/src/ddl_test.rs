use super::*;
use ssqlt_core::{CoreError, Table};

fn parse(sql: &str) -> TableDefinition {
    parse_create_table(&SqlParser::postgres(), sql).unwrap()
}

#[test]
fn test_table_level_keys() {
    let def = parse(
        "CREATE TABLE transducer._EmpDep (
            SSN VARCHAR(100) NOT NULL,
            dep_name VARCHAR(100),
            PRIMARY KEY (SSN, dep_name),
            FOREIGN KEY (SSN) REFERENCES transducer._person (ssn)
        );",
    );
    assert_eq!(def.name, "transducer._EmpDep");
    assert_eq!(def.columns.len(), 2);
    assert_eq!(def.columns[0].name, "SSN");
    assert!(!def.columns[0].nullable);
    assert!(def.columns[1].nullable);
    assert_eq!(
        def.constraints[0],
        ConstraintDefinition::PrimaryKey {
            columns: vec!["SSN".to_string(), "dep_name".to_string()]
        }
    );
    assert_eq!(
        def.constraints[1],
        ConstraintDefinition::ForeignKey {
            columns: vec!["SSN".to_string()],
            references: "transducer._person".to_string(),
            referred_columns: vec!["ssn".to_string()],
        }
    );
}

#[test]
fn test_parameterized_type_rendering() {
    let def = parse("CREATE TABLE s.t (name varchar(100), price numeric(10, 2), id int)");
    let table = Table::from_definition(&def).unwrap();
    let types: Vec<&str> = table
        .attributes
        .iter()
        .map(|a| a.data_type.as_str())
        .collect();
    assert_eq!(types, vec!["VARCHAR(100)", "NUMERIC(10,2)", "INT"]);
}

#[test]
fn test_inline_primary_key_and_reference() {
    let def = parse(
        "CREATE TABLE s.child (id INT PRIMARY KEY, parent_id INT REFERENCES s.parent (id))",
    );
    assert!(!def.columns[0].nullable);
    assert!(def.constraints.contains(&ConstraintDefinition::PrimaryKey {
        columns: vec!["id".to_string()]
    }));
    assert!(def.constraints.contains(&ConstraintDefinition::ForeignKey {
        columns: vec!["parent_id".to_string()],
        references: "s.parent".to_string(),
        referred_columns: vec!["id".to_string()],
    }));
}

#[test]
fn test_references_inside_default_literal_is_not_a_key() {
    let def = parse("CREATE TABLE s.t (id INT PRIMARY KEY, note TEXT DEFAULT 'see REFERENCES s.other')");
    assert_eq!(
        def.constraints,
        vec![ConstraintDefinition::PrimaryKey {
            columns: vec!["id".to_string()]
        }]
    );
    assert!(def.columns[1].nullable);

    let table = Table::from_definition(&def).unwrap();
    assert!(table.foreign_keys.is_empty());
    assert!(!table.create_sql().contains("FOREIGN KEY"));
}

#[test]
fn test_inline_unique_and_check_rejected() {
    for sql in [
        "CREATE TABLE s.t (id INT PRIMARY KEY, email TEXT UNIQUE)",
        "CREATE TABLE s.t (id INT PRIMARY KEY, age INT CHECK (age > 0))",
    ] {
        let def = parse(sql);
        assert!(
            def.constraints
                .iter()
                .any(|c| matches!(c, ConstraintDefinition::Other { .. })),
            "{sql}"
        );
        let err = Table::from_definition(&def).unwrap_err();
        assert!(matches!(err, CoreError::MalformedSchema { .. }), "{sql}: {err}");
    }
}

#[test]
fn test_normalized_through_schema_model() {
    let def = parse("CREATE TABLE Transducer.Person (SSN INT, PRIMARY KEY (SSN))");
    let table = Table::from_definition(&def).unwrap();
    assert_eq!(table.schema, "transducer");
    assert_eq!(table.name, "person");
    assert_eq!(table.primary_key_columns(), ["ssn".to_string()]);
}

#[test]
fn test_other_constraint_kept_as_text() {
    let def = parse("CREATE TABLE s.t (a INT, UNIQUE (a))");
    assert!(matches!(
        &def.constraints[0],
        ConstraintDefinition::Other { definition } if definition.contains("UNIQUE")
    ));
}

#[test]
fn test_not_a_create_table() {
    let result = parse_create_table(&SqlParser::postgres(), "SELECT 1");
    assert!(matches!(result, Err(SqlError::UnsupportedStatement(_))));
}

#[test]
fn test_multiple_statements_rejected() {
    let result = parse_create_table(
        &SqlParser::postgres(),
        "CREATE TABLE s.a (id INT); CREATE TABLE s.b (id INT);",
    );
    assert!(matches!(result, Err(SqlError::MultipleStatements(2))));
}
