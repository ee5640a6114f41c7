//! In-memory sample project shared by the unit tests: two source tables
//! (`_person`, `_empdep`) mapped onto one target table (`person`).

use crate::context::CompilationContext;
use ssqlt_core::{Side, SideFiles, SqlFile, UniversalFiles};
use std::path::PathBuf;

pub(crate) fn file(name: &str, content: &str) -> SqlFile {
    SqlFile {
        path: PathBuf::from(name),
        name: name.to_string(),
        content: content.to_string(),
    }
}

pub(crate) fn source_files() -> SideFiles {
    SideFiles {
        side: Side::Source,
        root: PathBuf::from("source"),
        creates: vec![
            file(
                "transducer._empdep.sql",
                "CREATE TABLE transducer._empdep (\n  ssn INT NOT NULL,\n  dep_name VARCHAR(100) NOT NULL,\n  PRIMARY KEY (ssn),\n  FOREIGN KEY (ssn) REFERENCES transducer._person (ssn)\n);",
            ),
            file(
                "transducer._person.sql",
                "CREATE TABLE transducer._person (\n  ssn INT NOT NULL,\n  name VARCHAR(100) NOT NULL,\n  PRIMARY KEY (ssn)\n);",
            ),
        ],
        constraints: vec![file(
            "transducer._person.fd.1.insert.sql",
            "IF NEW.name IS NULL THEN\n   RAISE EXCEPTION 'name required';\nEND IF;\nRETURN NEW;",
        )],
        ordering: None,
    }
}

pub(crate) fn target_files() -> SideFiles {
    SideFiles {
        side: Side::Target,
        root: PathBuf::from("target"),
        creates: vec![file(
            "transducer.person.sql",
            "CREATE TABLE transducer.person (\n  ssn INT NOT NULL,\n  name VARCHAR(100) NOT NULL,\n  dep_name VARCHAR(100) NOT NULL,\n  PRIMARY KEY (ssn)\n);",
        )],
        constraints: vec![],
        ordering: None,
    }
}

pub(crate) fn universal_files() -> UniversalFiles {
    UniversalFiles {
        root: PathBuf::from("universal"),
        attributes: "ssn,INT\nname,VARCHAR(100)\ndep_name,VARCHAR(100)\n".to_string(),
        to_files: vec![
            file(
                "transducer._empdep._person.sql",
                "{{ select_preamble }} ssn, name, dep_name FROM {{ schema }}._person{{ primary_suffix }} \
                 JOIN {{ schema }}._empdep{{ secondary_suffix }} USING (ssn)",
            ),
            file(
                "transducer._person._empdep.sql",
                "{{ select_preamble }} ssn, name, dep_name FROM {{ schema }}._empdep{{ primary_suffix }} \
                 JOIN {{ schema }}._person{{ secondary_suffix }} USING (ssn)",
            ),
            file(
                "transducer.person.sql",
                "{{ select_preamble }} ssn, name, dep_name FROM {{ schema }}.person{{ primary_suffix }}",
            ),
        ],
        from_files: vec![
            file(
                "transducer._person.sql",
                "SELECT ssn, name FROM {{ universal_tablename }}",
            ),
            file(
                "transducer._empdep.sql",
                "SELECT ssn, dep_name FROM {{ universal_tablename }}",
            ),
            file(
                "transducer.person.sql",
                "SELECT ssn, name, dep_name FROM {{ universal_tablename }}",
            ),
        ],
    }
}

pub(crate) fn sample_context() -> CompilationContext {
    CompilationContext::from_files(
        "transducer",
        &source_files(),
        &target_files(),
        &universal_files(),
    )
    .unwrap()
}
