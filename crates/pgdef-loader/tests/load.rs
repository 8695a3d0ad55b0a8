//! Loading definitions from files on disk.

use std::fs;
use std::path::Path;

use pgdef_core::ViolationKind;
use pgdef_loader::{load_dir, load_model, load_value, LoadError, YamlError};
use pgdef_models::{Domain, Role, Sequence};
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn yaml_and_json_give_the_same_value() {
    let dir = TempDir::new().unwrap();
    let yaml = write(
        dir.path(),
        "orders_id_seq.yaml",
        "schema: public\nname: orders_id_seq\nincrement_by: 10\n",
    );
    let json = write(
        dir.path(),
        "orders_id_seq.json",
        r#"{"schema": "public", "name": "orders_id_seq", "increment_by": 10}"#,
    );
    let expected = json!({"schema": "public", "name": "orders_id_seq", "increment_by": 10});
    assert_eq!(load_value(&yaml).unwrap(), expected);
    assert_eq!(load_value(&json).unwrap(), expected);
}

#[test]
fn model_from_yaml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "positive_int.yml",
        "schema: public\nname: positive_int\nsql: CREATE DOMAIN public.positive_int AS integer\n",
    );
    let domain: Domain = load_model(&path).unwrap();
    assert_eq!(domain.name, "positive_int");
}

#[test]
fn invalid_definition_keeps_violations() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "app.yaml",
        "name: app\nenvironments: [PRODUCTION, PRODUCTION]\n",
    );
    let err = load_model::<Role>(&path).unwrap_err();
    assert_eq!(err.path(), path);
    let validation = err.validation().unwrap();
    assert!(validation.has_kind(ViolationKind::Duplicate));
    assert!(err.to_string().contains("app.yaml"));
}

#[test]
fn parse_failures_name_the_file() {
    let dir = TempDir::new().unwrap();
    let yaml = write(dir.path(), "broken.yaml", "name: [unclosed\n");
    let json = write(dir.path(), "broken.json", "{\"name\": ");
    let collection_key = write(dir.path(), "keys.yaml", "? [a, b]\n: value\n");

    assert!(matches!(load_value(&yaml), Err(LoadError::Yaml { .. })));
    assert!(matches!(load_value(&json), Err(LoadError::Json { .. })));
    assert!(matches!(
        load_value(&collection_key),
        Err(LoadError::Yaml {
            source: YamlError::Key { .. },
            ..
        })
    ));

    let missing = dir.path().join("missing.yaml");
    let err = load_value(&missing).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert_eq!(err.path(), missing);
}

#[test]
fn repeated_json_keys_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "orders.json",
        r#"{"schema": "public", "name": "orders_id_seq", "increment_by": 5, "increment_by": 10}"#,
    );

    let err = load_value(&path).unwrap_err();
    assert_eq!(err.path(), path);
    let validation = err.validation().unwrap();
    let paths: Vec<String> = validation
        .violations()
        .unwrap()
        .iter()
        .map(|v| v.path.to_string())
        .collect();
    assert_eq!(paths, vec!["increment_by"]);
    assert!(validation.has_kind(ViolationKind::Duplicate));

    let err = load_model::<Sequence>(&path).unwrap_err();
    assert!(err.validation().unwrap().has_kind(ViolationKind::Duplicate));
}

#[test]
fn repeated_json_keys_join_model_violations() {
    let dir = TempDir::new().unwrap();
    let path = write(
        dir.path(),
        "orders.json",
        r#"{"schema": "public", "schema": "sales", "name": "orders_id_seq", "owned_by": "orders.id"}"#,
    );
    let err = load_model::<Sequence>(&path).unwrap_err();
    let paths: Vec<String> = err
        .validation()
        .unwrap()
        .violations()
        .unwrap()
        .iter()
        .map(|v| v.path.to_string())
        .collect();
    assert_eq!(paths, vec!["schema", "owned_by"]);
}

#[test]
fn directory_results_are_independent_and_sorted() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "b_invoices.yaml", "schema: public\nname: invoices_id_seq\n");
    write(
        dir.path(),
        "a_orders.yaml",
        "schema: public\nname: orders_id_seq\nincrement_by: 5\n",
    );
    write(
        dir.path(),
        "c_raw.json",
        r#"{"sql": "CREATE SEQUENCE public.c", "increment_by": 2}"#,
    );
    write(dir.path(), "notes.txt", "not a definition");
    fs::create_dir(dir.path().join("nested.yaml")).unwrap();

    let results = load_dir::<Sequence>(dir.path(), &["yaml", "yml", "json"]).unwrap();
    let names: Vec<String> = results
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_orders.yaml", "b_invoices.yaml", "c_raw.json"]);

    assert_eq!(results[0].1.as_ref().unwrap().increment_by, 5);
    let neither = results[1].1.as_ref().unwrap_err().validation().unwrap();
    assert!(neither.has_kind(ViolationKind::Completeness));
    let both = results[2].1.as_ref().unwrap_err().validation().unwrap();
    assert!(both.has_kind(ViolationKind::MutualExclusion));
}

#[test]
fn unreadable_directory_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent");
    let err = load_dir::<Sequence>(&missing, &["yaml"]).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
