//! Schema files loaded from disk and resolved end to end.

use std::fs;
use std::path::{Path, PathBuf};

use configence::source::{ChainedSource, DotenvSource, MapSource};
use configence::{Error, Schema, SchemaFile, ValueType};
use tempfile::TempDir;

/// Helper to get path to test fixtures.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("schemas")
        .join(name)
}

fn write_schema(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("schema.yaml");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_heroes_defaults() {
    let schema = Schema::from_file(&fixture_path("heroes.yaml")).unwrap();
    let config = schema.load(&MapSource::new()).unwrap();

    assert_eq!(config.name(), "HeroConfig");
    assert_eq!(config.prefix(), Some("DBZ_"));
    assert_eq!(config.get::<String>("MY_HERO").unwrap(), "Son Goku");
    assert_eq!(config.get::<i64>("POWER_LEVEL").unwrap(), 9001);
    assert!(!config.get::<bool>("IS_STRONG").unwrap());
    assert_eq!(
        config.get::<Vec<String>>("EVENTS").unwrap(),
        vec!["event1", "event2"]
    );
    assert_eq!(config.get::<Vec<i64>>("PORTS").unwrap(), vec![8000, 8001]);
    assert_eq!(config.get::<String>("SAGA").unwrap(), "saiyan");
    assert_eq!(config.get::<String>("GREETING").unwrap(), "Hello Son Goku");
    assert_eq!(
        config.get::<String>("SHOUT").unwrap(),
        "Son Goku is over 9001"
    );
}

#[test]
fn test_heroes_overrides_use_schema_prefix() {
    let schema = Schema::from_file(&fixture_path("heroes.yaml")).unwrap();
    let source = MapSource::from_pairs([
        ("DBZ_MY_HERO", "Vegeta"),
        ("DBZ_PORTS", "9000; 9001 ;9002"),
        ("DBZ_SAGA", "cell"),
        ("POWER_LEVEL", "1"),
    ]);
    let config = schema.load(&source).unwrap();

    assert_eq!(config.get::<String>("MY_HERO").unwrap(), "Vegeta");
    assert_eq!(config.get::<i64>("POWER_LEVEL").unwrap(), 9001);
    assert_eq!(
        config.get::<Vec<i64>>("PORTS").unwrap(),
        vec![9000, 9001, 9002]
    );
    assert_eq!(config.get::<String>("SAGA").unwrap(), "cell");
    assert_eq!(config.get::<String>("GREETING").unwrap(), "Hello Vegeta");
    assert_eq!(config.get::<String>("SHOUT").unwrap(), "Vegeta is over 9001");
}

#[test]
fn test_heroes_invalid_choice() {
    let schema = Schema::from_file(&fixture_path("heroes.yaml")).unwrap();
    let source = MapSource::from_pairs([("DBZ_SAGA", "buu")]);
    let err = schema.load(&source).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("DBZ_SAGA"));
}

#[test]
fn test_heroes_entry_metadata() {
    let schema = Schema::from_file(&fixture_path("heroes.yaml")).unwrap();
    let config = schema.load(&MapSource::new()).unwrap();

    let hero = config.entry("MY_HERO").unwrap();
    assert_eq!(hero.description(), Some("The main character"));
    assert_eq!(hero.flags(), ["--hero"]);
    assert_eq!(config.entry("PORTS").unwrap().value_type(), ValueType::List);
    assert_eq!(config.delayed_count(), 1);
    assert_eq!(config.delayed_default_count(), 1);
}

#[test]
fn test_forward_reference_degrades_to_literal() {
    let schema = Schema::from_file(&fixture_path("forward.yaml")).unwrap();

    let unresolved = schema.unresolved_references();
    assert_eq!(unresolved.len(), 2);
    assert!(unresolved.iter().any(|u| u.reference == "LATE" && u.declared_later));
    assert!(unresolved
        .iter()
        .any(|u| u.reference == "NONEXISTENT_VALUE" && !u.declared_later));

    let config = schema.load(&MapSource::new()).unwrap();
    assert_eq!(config.get::<String>("EARLY").unwrap(), "{LATE} first");
    assert_eq!(
        config.get::<String>("GHOST_SHOUT").unwrap(),
        "{NONEXISTENT_VALUE}"
    );
}

#[test]
fn test_schema_file_with_dotenv_chain() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".env"),
        "# local overrides\nDBZ_MY_HERO=Piccolo\nexport DBZ_IS_STRONG=1\n",
    )
    .unwrap();

    let schema = Schema::from_file(&fixture_path("heroes.yaml")).unwrap();
    let dotenv = DotenvSource::discover(temp.path()).unwrap().unwrap();
    let env = MapSource::from_pairs([("DBZ_MY_HERO", "Krillin")]);
    let chain = ChainedSource::new().with(env).with(dotenv);

    let config = schema.load(&chain).unwrap();
    assert_eq!(config.get::<String>("MY_HERO").unwrap(), "Krillin");
    assert!(config.get::<bool>("IS_STRONG").unwrap());
}

#[test]
fn test_missing_schema_file() {
    let temp = TempDir::new().unwrap();
    let err = Schema::from_file(&temp.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_malformed_schema_file() {
    let temp = TempDir::new().unwrap();
    let path = write_schema(temp.path(), "entries: [name: A\n");
    let err = Schema::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = SchemaFile::parse("entries:\n  - name: A\n    colour: red\n").unwrap_err();
    assert!(matches!(err, Error::Schema(_)));
}

#[test]
fn test_duplicate_names_rejected() {
    let temp = TempDir::new().unwrap();
    let path = write_schema(
        temp.path(),
        "entries:\n  - name: A\n    default: x\n  - name: A\n    default: y\n",
    );
    let err = Schema::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::DuplicateEntry { .. }));
}

#[test]
fn test_required_entry_without_source_value() {
    let temp = TempDir::new().unwrap();
    let path = write_schema(temp.path(), "entries:\n  - name: API_TOKEN\n");
    let schema = Schema::from_file(&path).unwrap();

    let err = schema.load(&MapSource::new()).unwrap_err();
    assert!(err.is_not_found());

    let config = schema
        .load(&MapSource::from_pairs([("API_TOKEN", "s3cret")]))
        .unwrap();
    assert_eq!(config.get::<String>("API_TOKEN").unwrap(), "s3cret");
    assert_eq!(config.name(), "Configence");
}
