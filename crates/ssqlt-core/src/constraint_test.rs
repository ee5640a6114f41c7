use super::*;

const CFD_BODY: &str = "IF NEW.name IS NULL THEN\n    RAISE EXCEPTION 'name required';\nEND IF;\nRETURN NEW;";

#[test]
fn test_parse_constraint_file_name() {
    let constraint = Constraint::parse("transducer._person.cfd.1.insert.sql", CFD_BODY).unwrap();
    assert_eq!(constraint.schema, "transducer");
    assert_eq!(constraint.table, "_person");
    assert_eq!(constraint.kind, "cfd");
    assert_eq!(constraint.index, 1);
    assert_eq!(constraint.phase, Phase::Insert);
    assert_eq!(constraint.body, CFD_BODY);
}

#[test]
fn test_parse_delete_phase_case_insensitive() {
    let constraint = Constraint::parse("transducer._empdep.fd.2.DELETE.sql", "RETURN OLD;").unwrap();
    assert_eq!(constraint.phase, Phase::Delete);
}

#[test]
fn test_unknown_phase() {
    let err = Constraint::parse("transducer._person.cfd.1.update.sql", "").unwrap_err();
    match err {
        CoreError::UnknownPhase { file, phase } => {
            assert_eq!(file, "transducer._person.cfd.1.update.sql");
            assert_eq!(phase, "update");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_wrong_part_count() {
    assert!(matches!(
        Constraint::parse("transducer._person.cfd.insert.sql", ""),
        Err(CoreError::MalformedFileName { .. })
    ));
}

#[test]
fn test_non_numeric_index() {
    assert!(matches!(
        Constraint::parse("transducer._person.cfd.first.insert.sql", ""),
        Err(CoreError::MalformedFileName { .. })
    ));
}

#[test]
fn test_names_sort_by_sequence_index() {
    let second = Constraint::parse("s.t.zz.2.insert.sql", "").unwrap();
    let tenth = Constraint::parse("s.t.aa.10.insert.sql", "").unwrap();
    assert!(second.trigger_name() < tenth.trigger_name());
    assert_eq!(tenth.name(), "t_insert_010_aa");
}

#[test]
fn test_index_beyond_three_digits_rejected() {
    let last = Constraint::parse("s.t.fd.999.insert.sql", "").unwrap();
    assert_eq!(last.name(), "t_insert_999_fd");

    let err = Constraint::parse("s.t.fd.1000.insert.sql", "").unwrap_err();
    match err {
        CoreError::MalformedFileName { file, reason } => {
            assert_eq!(file, "s.t.fd.1000.insert.sql");
            assert!(reason.contains("1000"), "{reason}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_generate_function() {
    let constraint = Constraint::parse("transducer._person.cfd.1.insert.sql", "RETURN NEW;").unwrap();
    assert_eq!(
        constraint.generate_function(),
        "CREATE OR REPLACE FUNCTION transducer._person_insert_001_cfd_fn()\n   RETURNS TRIGGER LANGUAGE PLPGSQL AS $$\nBEGIN\nRETURN NEW;\nEND;  $$;"
    );
}

#[test]
fn test_generate_trigger_fires_before_phase() {
    let constraint = Constraint::parse("transducer._person.cfd.1.delete.sql", "RETURN OLD;").unwrap();
    let trigger = constraint.generate_trigger();
    assert!(trigger.starts_with("CREATE TRIGGER _person_delete_001_cfd_trigger\n"));
    assert!(trigger.contains("BEFORE DELETE ON transducer._person"));
    assert!(trigger.ends_with("EXECUTE FUNCTION transducer._person_delete_001_cfd_fn();"));
}
