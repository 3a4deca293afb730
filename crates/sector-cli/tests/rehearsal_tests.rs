use std::fs;

use batch_engine::{Automation, AutomationSettings, ItemStatus};
use sector_cli::{load_host, load_settings, register_design_files, save_world};
use sector_types::{DesignRange, PathConfig};
use star_host::MockHost;

fn touch(dir: &std::path::Path, name: &str) {
    fs::write(dir.join(name), b"").unwrap();
}

#[test]
fn registers_only_geometry_files() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "P2.x_b");
    touch(dir.path(), "P1.x_b");
    touch(dir.path(), "notes.txt");
    fs::create_dir(dir.path().join("P3.x_b")).unwrap();

    let paths = PathConfig::new(dir.path(), "/export", "/images");
    let mut host = MockHost::new();
    let registered =
        register_design_files(&mut host, &paths.designs, &AutomationSettings::default()).unwrap();

    let names: Vec<String> = registered
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["P1.x_b", "P2.x_b"]);
    assert!(host.has_geometry_file(paths.designs.file("P1.x_b")));
}

#[test]
fn registered_files_are_importable() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "P1.x_b");
    touch(dir.path(), "P2.x_b");

    let mut settings = AutomationSettings::default();
    settings.comparison.designs = DesignRange::new("P", 1, 2);
    let mut host = MockHost::new()
        .with_cad_model(&settings.lookups.comparison_model)
        .with_scene(&settings.lookups.geometry_scene);
    let mut automation = Automation::new(settings, PathConfig::new(dir.path(), "/export", "/images"));

    register_design_files(&mut host, &automation.paths.designs, &automation.settings).unwrap();
    automation.run_comparison(&mut host).unwrap();
    assert_eq!(
        automation.last_report().unwrap().names_with(ItemStatus::Succeeded),
        vec!["P1", "P2"]
    );
}

#[test]
fn snapshot_descriptions_are_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "P1.x_b");
    let paths = PathConfig::new(dir.path(), "/export", "/images");
    let mut host = MockHost::new().with_geometry_file(paths.designs.file("P1.x_b"), &["A", "B"]);

    let registered =
        register_design_files(&mut host, &paths.designs, &AutomationSettings::default()).unwrap();
    assert!(registered.is_empty());
    let key = paths.designs.file("P1.x_b").to_string_lossy().replace('\\', "/");
    assert_eq!(host.world().geometry_files[&key], vec!["A", "B"]);
}

#[test]
fn missing_designs_directory_registers_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let paths = PathConfig::new(dir.path().join("absent"), "/export", "/images");
    let mut host = MockHost::new();
    let registered =
        register_design_files(&mut host, &paths.designs, &AutomationSettings::default()).unwrap();
    assert!(registered.is_empty());
}

#[test]
fn world_snapshot_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    let host = MockHost::new()
        .with_parameter("Start Angle", 720.0, Some("degCA"))
        .with_session_path("/runs/demo.sim");
    save_world(&host, &path).unwrap();

    let loaded = load_host(Some(&path)).unwrap();
    assert_eq!(loaded.world().session_path.as_deref(), Some("/runs/demo.sim"));
    assert_eq!(loaded.world().parameters.len(), 1);
}

#[test]
fn missing_inputs_fall_back_to_defaults() {
    assert!(load_host(None).unwrap().world().parts.is_empty());
    assert_eq!(load_settings(None).unwrap(), AutomationSettings::default());
}

#[test]
fn unreadable_world_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("world.json");
    fs::write(&path, "{ broken").unwrap();
    let err = load_host(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("parsing world snapshot"));
}
