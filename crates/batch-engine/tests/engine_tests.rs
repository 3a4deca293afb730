use batch_engine::{
    Automation, AutomationSettings, FailurePolicy, Flow, FlowError, ItemStatus, Step,
};
use design_ops::OpError;
use sector_types::{DesignName, DesignRange, PathConfig};
use star_host::world::Artifact;
use star_host::{HostOp, MockHost};

const BODY: &str = "Cylinder Sector: Sector Cylinder";

fn paths() -> PathConfig {
    PathConfig::new("/designs", "/export", "/images")
}

fn name(s: &str) -> DesignName {
    s.parse().unwrap()
}

/// Helper: environment ready for a comparison run over `count` designs.
fn comparison_host(count: u32) -> MockHost {
    let settings = AutomationSettings::default();
    let mut host = MockHost::new()
        .with_cad_model(&settings.lookups.comparison_model)
        .with_scene(&settings.lookups.geometry_scene);
    for i in 1..=count {
        host = host.with_geometry_file(format!("/designs/P{i}.x_b"), &[BODY]);
    }
    host
}

fn automation(settings: AutomationSettings) -> Automation {
    Automation::new(settings, paths())
}

// ── Settings Tests ─────────────────────────────────────────────────────────

#[test]
fn default_settings_match_sector_setup() {
    let settings = AutomationSettings::default();
    assert_eq!(settings.comparison.designs, DesignRange::new("P", 1, 8));
    assert_eq!(settings.comparison.policy, FailurePolicy::Abort);
    assert_eq!(settings.pictures.policy, FailurePolicy::Continue);
    assert_eq!(settings.pictures.designs.len(), 10);
    assert_eq!(settings.pictures.designs[0], name("P0"));
    assert_eq!(settings.pictures.designs[9], name("P9"));
    assert_eq!(settings.extraction.fallback_prefix, "sector");
    assert_eq!(settings.extraction.start_value, 720.0);
    assert_eq!(settings.lookups.physics_module, "StarIce");
}

#[test]
fn pictures_outside_range_are_identified() {
    let settings = AutomationSettings::default();
    let outside: Vec<&str> = settings
        .pictures_outside_range()
        .into_iter()
        .map(DesignName::as_str)
        .collect();
    assert_eq!(outside, vec!["P0", "P9"]);
}

#[test]
fn partial_settings_fill_in_defaults() {
    let json = r#"{ "comparison": { "designs": { "prefix": "P", "first": 1, "count": 3 } } }"#;
    let settings: AutomationSettings = serde_json::from_str(json).unwrap();
    assert_eq!(settings.comparison.designs.count, 3);
    assert_eq!(settings.comparison.geometry_extension, "x_b");
    assert_eq!(settings.lookups.geometry_scene, "Geometry Scene 1");
}

// ── Comparison Tests ───────────────────────────────────────────────────────

#[test]
fn comparison_processes_range_in_order() {
    let mut host = comparison_host(3);
    let mut settings = AutomationSettings::default();
    settings.comparison.designs = DesignRange::new("P", 1, 3);
    let mut automation = automation(settings);

    automation.run_comparison(&mut host).unwrap();

    let report = automation.last_report().unwrap();
    assert_eq!(report.flow, Flow::Comparison);
    assert!(report.is_success());
    assert_eq!(report.names_with(ItemStatus::Succeeded), vec!["P1", "P2", "P3"]);
    assert!(report.finished_at.is_some());

    let renames: Vec<&str> = host
        .calls_of(HostOp::RenameBody)
        .into_iter()
        .map(|c| c.detail.as_str())
        .collect();
    assert_eq!(renames, vec!["P1", "P2", "P3"]);
    assert_eq!(host.world().parts.len(), 3);
    assert_eq!(host.world().sections.len(), 3);
}

#[test]
fn comparison_aborts_and_skips_rest() {
    let mut host = comparison_host(3).fail_on_matching(HostOp::ImportCadFile, "P2");
    let mut settings = AutomationSettings::default();
    settings.comparison.designs = DesignRange::new("P", 1, 3);
    let mut automation = automation(settings);

    let err = automation.run_comparison(&mut host).unwrap_err();
    match &err {
        FlowError::Design {
            design,
            index,
            step,
            ..
        } => {
            assert_eq!(design.as_str(), "P2");
            assert_eq!(*index, 2);
            assert_eq!(*step, Step::Import);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let report = automation.last_report().unwrap();
    assert_eq!(report.names_with(ItemStatus::Succeeded), vec!["P1"]);
    assert_eq!(report.names_with(ItemStatus::Failed), vec!["P2"]);
    assert_eq!(report.names_with(ItemStatus::Skipped), vec!["P3"]);
    assert!(report.error.is_some());
    assert_eq!(host.world().part_names(), vec!["P1"]);
    assert_eq!(host.open_sessions(), 0);
}

#[test]
fn comparison_continue_policy_collects_failures() {
    let mut host = comparison_host(3).fail_on_matching(HostOp::CreatePart, "P2");
    let mut settings = AutomationSettings::default();
    settings.comparison.designs = DesignRange::new("P", 1, 3);
    settings.comparison.policy = FailurePolicy::Continue;
    let mut automation = automation(settings);

    let err = automation.run_comparison(&mut host).unwrap_err();
    assert_eq!(
        err,
        FlowError::BatchFailed {
            failed: vec![name("P2")],
            total: 3
        }
    );
    let report = automation.last_report().unwrap();
    assert_eq!(report.names_with(ItemStatus::Succeeded), vec!["P1", "P3"]);
    assert_eq!(report.items[1].step, Some(Step::Materialize));
}

#[test]
fn comparison_rerun_reports_existing_part() {
    let mut host = comparison_host(1);
    let mut settings = AutomationSettings::default();
    settings.comparison.designs = DesignRange::new("P", 1, 1);
    let mut automation = automation(settings);
    automation.run_comparison(&mut host).unwrap();

    // A second run finds the body already renamed.
    let err = automation.run_comparison(&mut host).unwrap_err();
    assert!(matches!(
        err.op_error(),
        Some(OpError::DuplicateBody { .. })
    ));
    assert_eq!(automation.reports.len(), 2);
}

// ── Pictures Tests ─────────────────────────────────────────────────────────

fn picture_host(designs: &[&str]) -> MockHost {
    let scene = AutomationSettings::default().lookups.geometry_scene;
    designs
        .iter()
        .fold(MockHost::new().with_scene(&scene), |host, d| {
            host.with_part_displayer(&scene, d)
        })
}

#[test]
fn pictures_capture_each_listed_design() {
    let mut host = picture_host(&["P1", "P2"]);
    let mut settings = AutomationSettings::default();
    settings.pictures.designs = vec![name("P1"), name("P2")];
    let mut automation = automation(settings);

    automation.run_pictures(&mut host).unwrap();

    let paths: Vec<&str> = host.captures().iter().map(|c| c.path.as_str()).collect();
    assert_eq!(paths, vec!["/images/P1.png", "/images/P2.png"]);
    let report = automation.last_report().unwrap();
    let artifacts: Vec<&str> = report.artifacts().collect();
    assert_eq!(artifacts.len(), 2);
}

#[test]
fn pictures_continue_past_missing_displayers() {
    let mut host = picture_host(&["P1", "P2"]);
    let mut settings = AutomationSettings::default();
    settings.pictures.designs = vec![name("P0"), name("P1"), name("P2"), name("P9")];
    let mut automation = automation(settings);

    let err = automation.run_pictures(&mut host).unwrap_err();
    assert_eq!(
        err,
        FlowError::BatchFailed {
            failed: vec![name("P0"), name("P9")],
            total: 4
        }
    );
    assert_eq!(host.captures().len(), 2);
    let report = automation.last_report().unwrap();
    assert_eq!(report.names_with(ItemStatus::Failed), vec!["P0", "P9"]);
    assert!(report.items[0]
        .error
        .as_deref()
        .unwrap()
        .contains("displayer not found: P0"));
}

#[test]
fn pictures_abort_policy_stops_at_first_failure() {
    let mut host = picture_host(&["P1", "P2"]);
    let mut settings = AutomationSettings::default();
    settings.pictures.designs = vec![name("P1"), name("P7"), name("P2")];
    settings.pictures.policy = FailurePolicy::Abort;
    let mut automation = automation(settings);

    let err = automation.run_pictures(&mut host).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Design {
            index: 2,
            step: Step::Capture,
            ..
        }
    ));
    assert_eq!(host.captures().len(), 1);
    let report = automation.last_report().unwrap();
    assert_eq!(report.names_with(ItemStatus::Skipped), vec!["P2"]);
}

#[test]
fn pictures_without_scene_fail_up_front() {
    let mut host = MockHost::new();
    let mut automation = automation(AutomationSettings::default());
    let err = automation.run_pictures(&mut host).unwrap_err();
    assert!(matches!(
        err,
        FlowError::Step {
            step: Step::Capture,
            source: OpError::SceneNotFound { .. }
        }
    ));
    assert!(host.captures().is_empty());
}

// ── Extraction Tests ───────────────────────────────────────────────────────

fn extraction_host(session: Option<&str>) -> MockHost {
    let lookups = AutomationSettings::default().lookups;
    let host = MockHost::new()
        .with_body(&lookups.extraction_model, &lookups.imported_body)
        .with_scene(&lookups.extraction_scene)
        .with_parameter(&lookups.start_parameter, 0.0, Some(lookups.start_units.as_str()))
        .with_units(&lookups.start_units)
        .with_solution(4);
    match session {
        Some(path) => host.with_session_path(path),
        None => host,
    }
}

#[test]
fn extraction_writes_sim_and_geometry() {
    let mut host = extraction_host(Some("/runs/engine_v2_final.sim"));
    let mut automation = automation(AutomationSettings::default());
    automation.run_extraction(&mut host).unwrap();

    let world = host.world();
    assert_eq!(world.artifacts.get("/export/engine.sim"), Some(&Artifact::Simulation));
    assert!(matches!(
        world.artifacts.get("/export/engine.x_b"),
        Some(Artifact::CadExport { .. })
    ));
    assert_eq!(world.solution.history_entries, 0);
    assert!(world.physics.started);

    let report = automation.last_report().unwrap();
    assert_eq!(report.items[0].name, "engine");
    assert_eq!(
        report.items[0].artifacts,
        vec!["/export/engine.sim".to_string(), "/export/engine.x_b".to_string()]
    );
}

#[test]
fn extraction_without_session_uses_fallback() {
    let mut host = extraction_host(None);
    let mut automation = automation(AutomationSettings::default());
    automation.run_extraction(&mut host).unwrap();
    assert!(host.world().artifacts.contains_key("/export/sector.sim"));
}

#[test]
fn extraction_aborts_on_first_failed_step() {
    let mut host = extraction_host(Some("demo.sim")).fail_on(HostOp::StartPhysicsEngine);
    let mut automation = automation(AutomationSettings::default());

    let err = automation.run_extraction(&mut host).unwrap_err();
    assert_eq!(err.step(), Some(Step::ReinitializeEngine));
    assert!(host.calls_of(HostOp::ExportBodies).is_empty());
    let report = automation.last_report().unwrap();
    assert_eq!(report.names_with(ItemStatus::Failed), vec!["demo"]);
}

// ── Parameters Tests ───────────────────────────────────────────────────────

#[test]
fn parameters_run_lists_every_scalar() {
    let host = MockHost::new()
        .with_parameter("Start Angle", 720.0, Some("degCA"))
        .with_parameter("Bore", 0.08, Some("m"));
    let mut automation = automation(AutomationSettings::default());
    let params = automation.run_parameters(&host);
    assert_eq!(params.len(), 2);
    let report = automation.last_report().unwrap();
    assert_eq!(report.flow, Flow::Parameters);
    assert_eq!(report.names_with(ItemStatus::Succeeded), vec!["Start Angle", "Bore"]);
}
