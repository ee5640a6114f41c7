use super::*;
use crate::test_fixtures::{file, sample_context, source_files, target_files, universal_files};
use ssqlt_jinja::JinjaError;

fn build(source: &SideFiles, target: &SideFiles, universal: &UniversalFiles) -> CodegenResult<CompilationContext> {
    CompilationContext::from_files("transducer", source, target, universal)
}

#[test]
fn test_from_files() {
    let ctx = sample_context();
    assert_eq!(ctx.source.dependency_order, vec!["_person", "_empdep"]);
    assert_eq!(ctx.target.dependency_order, vec!["person"]);
    assert_eq!(ctx.universal.source_order, ctx.source.dependency_order);
    assert_eq!(ctx.side(Side::Target).schema, "transducer");
    assert_eq!(ctx.source.constraints_for("_person").len(), 1);
}

#[test]
fn test_schemas_deduplicated_loop_schema_first() {
    let ctx = sample_context();
    assert_eq!(ctx.schemas(), vec!["transducer"]);

    let mut ctx = ctx;
    ctx.schema = "sync".to_string();
    assert_eq!(ctx.schemas(), vec!["sync", "transducer"]);
}

#[test]
fn test_ordering_file_overrides_foreign_keys() {
    let mut source = source_files();
    source.ordering = Some("-- fan-out order\n_empdep\n_person\n".to_string());
    let ctx = build(&source, &target_files(), &universal_files()).unwrap();
    assert_eq!(ctx.source.dependency_order, vec!["_empdep", "_person"]);
}

#[test]
fn test_table_on_both_sides() {
    let mut target = target_files();
    target.creates.push(file(
        "transducer._person.sql",
        "CREATE TABLE transducer._person (ssn INT NOT NULL, PRIMARY KEY (ssn));",
    ));
    let err = build(&source_files(), &target, &universal_files()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::DuplicateTable { name }) if name == "_person"
    ));
}

#[test]
fn test_file_name_must_match_table() {
    let mut source = source_files();
    source.creates[1] = file(
        "transducer._person.sql",
        "CREATE TABLE transducer.someone (ssn INT NOT NULL);",
    );
    let err = build(&source, &target_files(), &universal_files()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::MalformedFileName { .. })
    ));
}

#[test]
fn test_unparseable_create_reports_path() {
    let mut source = source_files();
    source.creates[1] = file("transducer._person.sql", "CREATE TABLE transducer._person (");
    let err = build(&source, &target_files(), &universal_files()).unwrap_err();
    match err {
        CodegenError::SqlWithPath { path, .. } => assert_eq!(path, "transducer._person.sql"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_side() {
    let mut target = target_files();
    target.creates.clear();
    let err = build(&source_files(), &target, &universal_files()).unwrap_err();
    assert!(matches!(err, CodegenError::EmptySide { side: Side::Target }));
}

#[test]
fn test_missing_mapping() {
    let mut universal = universal_files();
    universal.to_files.retain(|f| f.name != "transducer.person.sql");
    universal.from_files.retain(|f| f.name != "transducer.person.sql");
    let err = build(&source_files(), &target_files(), &universal).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Jinja(JinjaError::MissingMapping { table, .. }) if table == "person"
    ));
}

#[test]
fn test_mapping_schema_must_match_side() {
    let mut universal = universal_files();
    for f in universal.to_files.iter_mut().chain(universal.from_files.iter_mut()) {
        if f.name == "transducer.person.sql" {
            f.name = "other.person.sql".to_string();
        }
    }
    let err = build(&source_files(), &target_files(), &universal).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::SchemaMismatch { expected, found })
            if expected == "transducer" && found == "other"
    ));
}

#[test]
fn test_circular_dependency() {
    let mut source = source_files();
    source.creates[1] = file(
        "transducer._person.sql",
        "CREATE TABLE transducer._person (ssn INT NOT NULL, name VARCHAR(100), \
         PRIMARY KEY (ssn), FOREIGN KEY (ssn) REFERENCES transducer._empdep (ssn));",
    );
    let err = build(&source, &target_files(), &universal_files()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Core(CoreError::CircularDependency { .. })
    ));
}
