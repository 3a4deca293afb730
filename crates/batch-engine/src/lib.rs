pub mod comparison;
pub mod extraction;
pub mod parameters;
pub mod pictures;
pub mod settings;
pub mod types;

use sector_types::PathConfig;
use star_host::{Host, ScalarParameter};
use tracing::{info, warn};

pub use settings::*;
pub use types::{Flow, FlowError, FlowReport, ItemOutcome, ItemStatus, Step};

/// Runs the automation flows against an environment.
///
/// Holds the settings and resolved paths for the whole process and keeps
/// a report for every run, including failed ones.
pub struct Automation {
    pub settings: AutomationSettings,
    pub paths: PathConfig,
    /// Reports of all runs so far, oldest first.
    pub reports: Vec<FlowReport>,
}

impl Automation {
    pub fn new(settings: AutomationSettings, paths: PathConfig) -> Self {
        Self {
            settings,
            paths,
            reports: Vec::new(),
        }
    }

    /// Import, materialize and section every design in the comparison range.
    pub fn run_comparison(&mut self, host: &mut dyn Host) -> Result<(), FlowError> {
        self.run(Flow::Comparison, |settings, paths, report| {
            comparison::run_comparison(host, settings, paths, report)
        })
    }

    /// Capture one isolated picture per design in the picture list.
    pub fn run_pictures(&mut self, host: &mut dyn Host) -> Result<(), FlowError> {
        self.run(Flow::Pictures, |settings, paths, report| {
            pictures::run_pictures(host, settings, paths, report)
        })
    }

    /// Save, reset and export the current simulation.
    pub fn run_extraction(&mut self, host: &mut dyn Host) -> Result<(), FlowError> {
        self.run(Flow::Extraction, |settings, paths, report| {
            extraction::run_extraction(host, settings, paths, report)
        })
    }

    pub fn run_parameters(&mut self, host: &dyn Host) -> Vec<ScalarParameter> {
        let mut report = FlowReport::start(Flow::Parameters);
        let parameters = parameters::run_parameters(host, &mut report);
        report.finish(None);
        self.reports.push(report);
        parameters
    }

    /// Report of the most recent run.
    pub fn last_report(&self) -> Option<&FlowReport> {
        self.reports.last()
    }

    fn run<T>(
        &mut self,
        flow: Flow,
        body: impl FnOnce(&AutomationSettings, &PathConfig, &mut FlowReport) -> Result<T, FlowError>,
    ) -> Result<T, FlowError> {
        info!(%flow, "flow started");
        let mut report = FlowReport::start(flow);
        let result = body(&self.settings, &self.paths, &mut report);
        report.finish(result.as_ref().err());
        match &result {
            Ok(_) => info!(%flow, run_id = %report.run_id, items = report.items.len(), "flow finished"),
            Err(err) => warn!(%flow, run_id = %report.run_id, error = %err, "flow failed"),
        }
        self.reports.push(report);
        result
    }
}
