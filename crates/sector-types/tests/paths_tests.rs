//! Property and example tests for base directory resolution.

use std::collections::HashMap;
use std::path::MAIN_SEPARATOR;

use proptest::prelude::*;

use sector_types::paths::{resolve_directory, resolve_file, resolve_path, DEFAULT_ROOT};
use sector_types::{DirectoryKind, PathConfig, ResolvedDirectory};

fn lookup_from(map: HashMap<String, String>) -> impl Fn(&str) -> Option<String> {
    move |name| map.get(name).cloned()
}

fn arb_kind() -> impl Strategy<Value = DirectoryKind> {
    prop_oneof![
        Just(DirectoryKind::Designs),
        Just(DirectoryKind::Export),
        Just(DirectoryKind::Images),
    ]
}

/// Override values: absent, blank, relative or absolute.
fn arb_override() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        "[ \t]{0,3}".prop_map(Some),
        "[a-z]{1,8}(/[a-z]{1,8}){0,3}/?".prop_map(Some),
        "/[a-z]{1,8}(/[a-z0-9_]{1,8}){0,3}/?".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn resolved_directory_is_absolute_and_separator_terminated(
        kind in arb_kind(),
        value in arb_override(),
    ) {
        let mut vars = HashMap::new();
        if let Some(v) = value {
            vars.insert(kind.env_var().to_string(), v);
        }
        let dir = resolve_directory(kind, lookup_from(vars));
        let shown = dir.to_string();

        prop_assert!(!shown.trim().is_empty());
        prop_assert!(shown.ends_with(MAIN_SEPARATOR) || shown.ends_with('/'));
        prop_assert!(dir.path().is_absolute());
    }

    #[test]
    fn non_blank_override_wins(
        kind in arb_kind(),
        value in "/[a-z]{1,8}(/[a-z]{1,8}){0,3}",
    ) {
        let mut vars = HashMap::new();
        vars.insert(kind.env_var().to_string(), format!("  {value}  "));
        let dir = resolve_directory(kind, lookup_from(vars));

        prop_assert_eq!(dir.path().to_string_lossy().to_string(), value.clone());
        prop_assert_ne!(dir.to_string(), DEFAULT_ROOT.to_string());
    }

    #[test]
    fn resolve_path_is_idempotent(
        base in "/[a-z]{1,6}(/[a-z.]{1,6}){0,4}",
        file in "[A-Z][0-9]{1,2}\\.x_b",
    ) {
        let once = resolve_path(&base, &[file.as_str()]);
        let twice = resolve_path(&once, &[] as &[&str]);
        prop_assert_eq!(&once, &resolve_path(&base, &[file.as_str()]));
        prop_assert_eq!(once, twice);
    }
}

#[test]
fn blank_override_falls_back_to_default() {
    let mut vars = HashMap::new();
    vars.insert("STAR_AUTOMATION_IMAGES_DIR".to_string(), "   ".to_string());
    let dir = resolve_directory(DirectoryKind::Images, lookup_from(vars));
    assert_eq!(dir.to_string(), DEFAULT_ROOT);
}

#[test]
fn missing_override_falls_back_to_default() {
    let config = PathConfig::from_lookup(|_| None);
    for kind in DirectoryKind::ALL {
        assert_eq!(config.get(kind).to_string(), DEFAULT_ROOT);
    }
}

#[test]
fn each_kind_reads_its_own_variable() {
    let mut vars = HashMap::new();
    vars.insert("STAR_AUTOMATION_DESIGNS_DIR".to_string(), "/data/designs".to_string());
    vars.insert("STAR_AUTOMATION_EXPORT_DIR".to_string(), "/data/export/".to_string());
    let config = PathConfig::from_lookup(lookup_from(vars));

    assert_eq!(config.designs.to_string(), format!("/data/designs{MAIN_SEPARATOR}"));
    assert_eq!(config.export.to_string(), "/data/export/");
    assert_eq!(config.images.to_string(), DEFAULT_ROOT);
}

#[test]
fn resolve_path_normalizes_dot_segments() {
    let p = resolve_path("/data/designs/", &["..", "export", ".", "run.sim"]);
    assert_eq!(p, "/data/export/run.sim");
}

#[test]
fn resolve_file_does_not_touch_the_filesystem() {
    let p = resolve_file("/definitely/not/here", &["P3.x_b"]);
    assert_eq!(p.to_string_lossy(), "/definitely/not/here/P3.x_b");
    assert!(!p.exists());
}

#[test]
fn directory_file_appends_bare_name() {
    let config = PathConfig::new("/data/designs", "/data/export", "/data/images");
    assert_eq!(
        config.designs.file("P1.x_b").to_string_lossy(),
        "/data/designs/P1.x_b"
    );
}

#[test]
fn deserialized_directories_are_normalized() {
    let dir: ResolvedDirectory = serde_json::from_str(r#""/data/./designs/../export""#).unwrap();
    assert_eq!(dir.path().to_string_lossy(), "/data/export");

    let json = r#"{ "designs": "/d/x/..", "export": "/e/.", "images": "/i" }"#;
    let config: PathConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config, PathConfig::new("/d", "/e", "/i"));
    assert_eq!(serde_json::to_string(&config.images).unwrap(), r#""/i""#);
}
