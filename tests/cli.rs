//! End-to-end tests of the `schema-porter` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SETTINGS: &str = r#"
[debug]
timing = false
console = false
commit = false
comment = false

[[targets]]
operation = "drop"
folder = "out/drop"
aggregate_file = "out/drop_all.sql"

[[targets]]
operation = "make"
folder = "out/make"
aggregate_file = "out/make_all.sql"

[[tasks]]
label = "table"
operation = "drop"
role = "destination"
transform = "drop_table"
query = "SELECT table_name FROM user_tables"

[[tasks]]
label = "insert"
operation = "make"
role = "source"
transform = "copy_rows"
query = "SELECT table_name FROM user_tables"
"#;

fn porter(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("schema-porter").unwrap();
    cmd.current_dir(dir.path()).env_remove("PORTER_SETTINGS");
    cmd
}

fn write_snapshot(path: &Path, principal: &str, tables: &[&str]) {
    let rows: Vec<Vec<&str>> = tables.iter().map(|t| vec![*t]).collect();
    let json = serde_json::json!({
        "principal": principal,
        "queries": [
            { "query": "SELECT table_name FROM user_tables", "rows": rows }
        ],
    });
    std::fs::write(path, serde_json::to_string_pretty(&json).unwrap()).unwrap();
}

fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("porter.toml"), SETTINGS).unwrap();
    write_snapshot(&dir.path().join("source.json"), "HR", &["EMPLOYEES", "DEPARTMENTS"]);
    write_snapshot(&dir.path().join("dest.json"), "HR_COPY", &["EMPLOYEES"]);
    dir
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    porter(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("produce"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_produce_writes_scripts_and_run_files() {
    let dir = setup();

    porter(&dir)
        .args([
            "produce",
            "--settings",
            "porter.toml",
            "--source",
            "source.json",
            "--destination",
            "dest.json",
            "--commit",
            "--quiet",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Script Generation Complete"));

    let drop = std::fs::read_to_string(dir.path().join("out/drop/table.sql")).unwrap();
    assert_eq!(drop, "DROP TABLE HR_COPY.EMPLOYEES;\nCOMMIT;\n");

    let insert = std::fs::read_to_string(dir.path().join("out/make/insert.sql")).unwrap();
    assert_eq!(
        insert,
        "INSERT INTO HR_COPY.EMPLOYEES \nSELECT * FROM HR.EMPLOYEES;\n\n\
         INSERT INTO HR_COPY.DEPARTMENTS \nSELECT * FROM HR.DEPARTMENTS;\n\nCOMMIT;\n"
    );

    let run_file = std::fs::read_to_string(dir.path().join("out/make_all.sql")).unwrap();
    assert_eq!(run_file, "@out/make/insert.sql\n");
}

#[test]
fn test_produce_with_header_comments() {
    let dir = setup();
    let settings = SETTINGS.replace("comment = false", "comment = true");
    std::fs::write(dir.path().join("porter.toml"), settings).unwrap();

    porter(&dir)
        .args(["produce", "-s", "porter.toml", "--source", "source.json"])
        .args(["--destination", "dest.json", "-q"])
        .assert()
        .success();

    let drop = std::fs::read_to_string(dir.path().join("out/drop/table.sql")).unwrap();
    assert!(drop.starts_with("-- table script produced at "));

    let run_file = std::fs::read_to_string(dir.path().join("out/drop_all.sql")).unwrap();
    let lines: Vec<&str> = run_file.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("-- script cleaned at "));
    assert_eq!(lines[1], "@out/drop/table.sql");
}

#[test]
fn test_validate_without_destination_fails() {
    let dir = setup();

    porter(&dir)
        .args(["validate", "--settings", "porter.toml", "--source", "source.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no connection bound to role 'destination'"));

    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_validate_reports_entries() {
    let dir = setup();

    porter(&dir)
        .args(["validate", "--settings", "porter.toml"])
        .args(["--source", "source.json", "--destination", "dest.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 entries valid"));
}

#[test]
fn test_unknown_query_aborts_run() {
    let dir = setup();
    let settings = SETTINGS.replacen(
        "query = \"SELECT table_name FROM user_tables\"",
        "query = \"SELECT index_name FROM user_indexes\"",
        1,
    );
    std::fs::write(dir.path().join("porter.toml"), settings).unwrap();

    porter(&dir)
        .args(["produce", "--settings", "porter.toml"])
        .args(["--source", "source.json", "--destination", "dest.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Query failed for 'table'"));

    assert!(!dir.path().join("out/make/insert.sql").exists());
}

#[test]
fn test_init_then_tasks() {
    let dir = TempDir::new().unwrap();

    porter(&dir)
        .args(["init", "settings.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.toml"));

    porter(&dir)
        .args(["init", "settings.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    porter(&dir)
        .args(["tasks", "--settings", "settings.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create_table"))
        .stdout(predicate::str::contains("copy_sequence_ddl"));
}
