//! Structured text reports of an environment after a run.
//!
//! Plain text rather than JSON, so a failing scenario can print what the
//! environment looked like next to the flow outcome.

use std::fmt;

use batch_engine::{FlowReport, ItemStatus};
use sector_types::VisibilityMode;
use star_host::world::{Artifact, HostWorld};

use crate::helpers::HarnessError;
use crate::workflow::ScenarioBuilder;

/// A summary of environment state and the latest flow outcome.
pub struct WorldReport {
    pub parts: Vec<PartEntry>,
    pub sections: Vec<String>,
    pub scenes: Vec<SceneEntry>,
    pub artifacts: Vec<(String, String)>,
    pub outcome: Option<OutcomeSummary>,
}

pub struct PartEntry {
    pub name: String,
    pub surface_count: usize,
    pub has_section: bool,
}

pub struct SceneEntry {
    pub name: String,
    /// Displayer names, with whether each inherits part visibility.
    pub displayers: Vec<(String, bool)>,
}

pub struct OutcomeSummary {
    pub flow: String,
    pub succeeded: usize,
    pub failed: Vec<(String, String)>,
    pub skipped: usize,
}

impl WorldReport {
    pub fn from_world(world: &HostWorld, last: Option<&FlowReport>) -> Self {
        let parts = world
            .parts
            .values()
            .map(|p| PartEntry {
                name: p.name.clone(),
                surface_count: p.surfaces.len(),
                has_section: world.section_by_name(&p.name).is_some(),
            })
            .collect();

        let sections = world.sections.values().map(|s| s.name.clone()).collect();

        let scenes = world
            .scenes
            .iter()
            .map(|(id, scene)| SceneEntry {
                name: scene.name.clone(),
                displayers: world
                    .displayers_in(*id)
                    .map(|(_, d)| {
                        (d.name.clone(), d.visibility == VisibilityMode::UsePartProperty)
                    })
                    .collect(),
            })
            .collect();

        let artifacts = world
            .artifacts
            .iter()
            .map(|(path, artifact)| {
                let kind = match artifact {
                    Artifact::Simulation => "simulation".to_string(),
                    Artifact::CadExport { bodies } => format!("geometry ({} bodies)", bodies.len()),
                    Artifact::Image { image } => format!("image {}x{}", image.width, image.height),
                };
                (path.clone(), kind)
            })
            .collect();

        let outcome = last.map(|report| OutcomeSummary {
            flow: report.flow.to_string(),
            succeeded: report.names_with(ItemStatus::Succeeded).len(),
            failed: report
                .items
                .iter()
                .filter(|i| i.status == ItemStatus::Failed)
                .map(|i| (i.name.clone(), i.error.clone().unwrap_or_default()))
                .collect(),
            skipped: report.names_with(ItemStatus::Skipped).len(),
        });

        Self {
            parts,
            sections,
            scenes,
            artifacts,
            outcome,
        }
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Sector Environment Report ===\n\n");

        out.push_str(&format!(
            "Parts ({}, {} sectioned):\n",
            self.parts.len(),
            self.parts.iter().filter(|p| p.has_section).count(),
        ));
        for part in &self.parts {
            let sectioned = if part.has_section { "" } else { " [NO SECTION]" };
            out.push_str(&format!(
                "  \"{}\": {} surfaces{}\n",
                part.name, part.surface_count, sectioned,
            ));
        }

        if !self.sections.is_empty() {
            out.push_str(&format!("\nSections: {}\n", self.sections.join(", ")));
        }

        for scene in &self.scenes {
            out.push_str(&format!("\nScene \"{}\":\n", scene.name));
            for (name, visible) in &scene.displayers {
                let mark = if *visible { "shown" } else { "hidden" };
                out.push_str(&format!("  {name} ({mark})\n"));
            }
        }

        if !self.artifacts.is_empty() {
            out.push_str(&format!("\nArtifacts ({}):\n", self.artifacts.len()));
            for (path, kind) in &self.artifacts {
                out.push_str(&format!("  {path}: {kind}\n"));
            }
        }

        match &self.outcome {
            None => out.push_str("\nLast flow: none\n"),
            Some(o) => {
                out.push_str(&format!(
                    "\nLast flow: {} | {} succeeded, {} failed, {} skipped\n",
                    o.flow,
                    o.succeeded,
                    o.failed.len(),
                    o.skipped,
                ));
                for (name, error) in &o.failed {
                    out.push_str(&format!("  {name}: {error}\n"));
                }
            }
        }

        out
    }
}

impl fmt::Display for WorldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl ScenarioBuilder {
    /// Report on the environment and the most recent flow.
    pub fn report(&self) -> Result<WorldReport, HarnessError> {
        let last = self.last_report()?;
        Ok(WorldReport::from_world(self.host.world(), Some(last)))
    }
}
