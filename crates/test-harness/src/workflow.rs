//! ScenarioBuilder: fluent API for scripting automation runs in tests.
//!
//! Drives the real flows through `batch_engine::Automation` against a
//! `MockHost`. Designs are referred to by name throughout.

use batch_engine::{Automation, AutomationSettings, FlowError, FlowReport};
use sector_types::{DesignName, DesignRange, PathConfig};
use star_host::{MockHost, ScalarParameter};

use crate::assertions;
use crate::helpers::HarnessError;

/// Directories every scenario resolves against.
pub const DESIGNS_DIR: &str = "/scenario/designs";
pub const EXPORT_DIR: &str = "/scenario/export";
pub const IMAGES_DIR: &str = "/scenario/images";

/// A fluent builder for seeding an environment and running flows on it.
pub struct ScenarioBuilder {
    pub host: MockHost,
    pub automation: Automation,
}

impl ScenarioBuilder {
    /// An environment with the comparison model and geometry scene, default
    /// settings and the scenario directories.
    pub fn new() -> Self {
        let settings = AutomationSettings::default();
        let host = MockHost::new()
            .with_cad_model(&settings.lookups.comparison_model)
            .with_scene(&settings.lookups.geometry_scene);
        Self {
            host,
            automation: Automation::new(
                settings,
                PathConfig::new(DESIGNS_DIR, EXPORT_DIR, IMAGES_DIR),
            ),
        }
    }

    pub fn settings(&self) -> &AutomationSettings {
        &self.automation.settings
    }

    pub fn settings_mut(&mut self) -> &mut AutomationSettings {
        &mut self.automation.settings
    }

    // ── Seeding ─────────────────────────────────────────────────────────

    /// Provide geometry for designs `first..first+count` and make that the
    /// comparison range.
    pub fn with_designs(mut self, first: u32, count: u32) -> Self {
        let range = DesignRange::new(
            self.settings().comparison.designs.prefix.clone(),
            first,
            count,
        );
        for (_, design) in range.designs() {
            self = self.with_geometry_for(&design);
        }
        self.settings_mut().comparison.designs = range;
        self
    }

    /// Provide a geometry file for `design` that yields the expected body.
    pub fn with_geometry_for(self, design: &DesignName) -> Self {
        let body = self.settings().lookups.imported_body.clone();
        self.with_geometry_bodies(design, &[&body])
    }

    /// Provide a geometry file for `design` that yields `bodies`.
    pub fn with_geometry_bodies(mut self, design: &DesignName, bodies: &[&str]) -> Self {
        let comparison = &self.automation.settings.comparison;
        let file = design.file_name(&comparison.geometry_extension);
        let path = self.automation.paths.designs.file(&file);
        self.host = self.host.with_geometry_file(path, bodies);
        self
    }

    /// Capture these designs, in this order.
    pub fn with_pictures(mut self, names: &[&str]) -> Result<Self, HarnessError> {
        let designs = names
            .iter()
            .map(|n| {
                n.parse::<DesignName>()
                    .map_err(|_| HarnessError::InvalidName {
                        name: n.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.settings_mut().pictures.designs = designs;
        Ok(self)
    }

    /// Add what the extraction flow needs: the extraction model with the
    /// sector body, its scene, the start parameter and its units.
    pub fn with_extraction_setup(mut self, session_path: Option<&str>) -> Self {
        let lookups = self.settings().lookups.clone();
        let mut host = self
            .host
            .with_body(&lookups.extraction_model, &lookups.imported_body)
            .with_scene(&lookups.extraction_scene)
            .with_parameter(&lookups.start_parameter, 0.0, Some(lookups.start_units.as_str()))
            .with_units(&lookups.start_units)
            .with_solution(1);
        if let Some(path) = session_path {
            host = host.with_session_path(path);
        }
        self.host = host;
        self
    }

    /// Adjust the environment directly, e.g. to inject failures.
    pub fn with_host(mut self, adjust: impl FnOnce(MockHost) -> MockHost) -> Self {
        self.host = adjust(self.host);
        self
    }

    // ── Flows ───────────────────────────────────────────────────────────

    pub fn run_comparison(&mut self) -> Result<(), FlowError> {
        self.automation.run_comparison(&mut self.host)
    }

    pub fn run_pictures(&mut self) -> Result<(), FlowError> {
        self.automation.run_pictures(&mut self.host)
    }

    pub fn run_extraction(&mut self) -> Result<(), FlowError> {
        self.automation.run_extraction(&mut self.host)
    }

    pub fn run_parameters(&mut self) -> Vec<ScalarParameter> {
        self.automation.run_parameters(&self.host)
    }

    /// Report of the most recent flow.
    pub fn last_report(&self) -> Result<&FlowReport, HarnessError> {
        self.automation.last_report().ok_or(HarnessError::NoReport)
    }

    // ── Assertions ──────────────────────────────────────────────────────

    /// Assert the comparison range was fully materialized and sectioned,
    /// in order, under a disciplined session pattern.
    pub fn assert_comparison_complete(&self, ctx: &str) -> Result<(), HarnessError> {
        let settings = self.settings();
        let names: Vec<String> = settings
            .comparison
            .designs
            .designs()
            .map(|(_, d)| d.to_string())
            .collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        assertions::assert_parts_exactly(&self.host, &expected, ctx)?;
        assertions::assert_ascending_designs(self.host.journal(), ctx)?;
        assertions::assert_session_discipline(self.host.journal(), ctx)?;
        assertions::assert_no_transient_scene(&self.host, &settings.lookups.import_scene, ctx)?;
        assertions::assert_sections_on_plane(
            &self.host,
            &settings.comparison.section_plane,
            ctx,
        )
    }

    /// Assert every capture isolated one displayer under the configured camera.
    pub fn assert_captures_isolated(&self, ctx: &str) -> Result<(), HarnessError> {
        let captures = self.host.captures();
        assertions::assert_single_visible(captures, ctx)?;
        assertions::assert_camera_identical(captures, &self.settings().pictures.camera, ctx)
    }
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
