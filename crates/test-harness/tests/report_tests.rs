//! Tests for the text environment report.

use test_harness::{HarnessError, ScenarioBuilder, WorldReport};

#[test]
fn report_before_any_flow_is_an_error() {
    let s = ScenarioBuilder::new();
    assert!(matches!(s.report(), Err(HarnessError::NoReport)));
}

#[test]
fn report_lists_parts_sections_and_outcome() {
    let mut s = ScenarioBuilder::new().with_designs(1, 2);
    s.run_comparison().unwrap();

    let report = s.report().unwrap();
    assert_eq!(report.parts.len(), 2);
    assert!(report.parts.iter().all(|p| p.has_section && p.surface_count > 0));

    let text = report.to_text();
    assert!(text.contains("Parts (2, 2 sectioned)"), "{text}");
    assert!(text.contains("\"P1\""));
    assert!(text.contains("Sections: P1, P2"));
    assert!(text.contains("Last flow: comparison | 2 succeeded, 0 failed, 0 skipped"));
    assert_eq!(format!("{report}"), text);
}

#[test]
fn report_shows_failures_with_their_errors() {
    let mut s = ScenarioBuilder::new()
        .with_designs(1, 1)
        .with_pictures(&["P1", "P5"])
        .unwrap();
    s.run_comparison().unwrap();
    s.run_pictures().unwrap_err();

    let text = s.report().unwrap().to_text();
    assert!(text.contains("Last flow: pictures | 1 succeeded, 1 failed"), "{text}");
    assert!(text.contains("P5: "));
    assert!(text.contains("/scenario/images/P1.png: image 1920x1080"));
}

#[test]
fn report_marks_hidden_displayers_after_capture() {
    let mut s = ScenarioBuilder::new()
        .with_designs(1, 2)
        .with_pictures(&["P2"])
        .unwrap();
    s.run_comparison().unwrap();
    s.run_pictures().unwrap();

    let report = WorldReport::from_world(s.host.world(), None);
    let scene = report
        .scenes
        .iter()
        .find(|sc| sc.name == "Geometry Scene 1")
        .unwrap();
    assert_eq!(
        scene.displayers,
        vec![("P1".to_string(), false), ("P2".to_string(), true)]
    );
    assert!(report.to_text().contains("Last flow: none"));
}

#[test]
fn extraction_report_lists_written_files() {
    let mut s = ScenarioBuilder::new().with_extraction_setup(Some("demo.sim"));
    s.run_extraction().unwrap();
    let text = s.report().unwrap().to_text();
    assert!(text.contains("/scenario/export/demo.sim: simulation"), "{text}");
    assert!(text.contains("/scenario/export/demo.x_b: geometry (1 bodies)"));
}
