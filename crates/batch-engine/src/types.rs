use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use design_ops::OpError;
use sector_types::DesignName;

/// The automation flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flow {
    Comparison,
    Pictures,
    Extraction,
    Parameters,
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Flow::Comparison => "comparison",
            Flow::Pictures => "pictures",
            Flow::Extraction => "extraction",
            Flow::Parameters => "parameters",
        };
        f.write_str(s)
    }
}

/// Pipeline step an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Import,
    Materialize,
    Section,
    Capture,
    SaveState,
    ClearSolution,
    ReinitializeEngine,
    ExportBody,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Step::Import => "import",
            Step::Materialize => "materialize",
            Step::Section => "section",
            Step::Capture => "capture",
            Step::SaveState => "save state",
            Step::ClearSolution => "clear solution",
            Step::ReinitializeEngine => "reinitialize engine",
            Step::ExportBody => "export body",
        };
        f.write_str(s)
    }
}

/// Errors from running a flow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    /// A per-design step failed.
    #[error("design {design} (#{index}) failed at {step}: {source}")]
    Design {
        design: DesignName,
        /// Design index for comparison runs, 1-based list position for pictures.
        index: u32,
        step: Step,
        source: OpError,
    },

    /// A step outside any design failed.
    #[error("{step} failed: {source}")]
    Step { step: Step, source: OpError },

    /// Some items of a batch run under `FailurePolicy::Continue` failed.
    #[error("{} of {total} items failed: {}", .failed.len(), join_names(.failed))]
    BatchFailed {
        failed: Vec<DesignName>,
        total: usize,
    },
}

impl FlowError {
    pub fn step(&self) -> Option<Step> {
        match self {
            FlowError::Design { step, .. } | FlowError::Step { step, .. } => Some(*step),
            FlowError::BatchFailed { .. } => None,
        }
    }

    /// The underlying step error, if this wraps one.
    pub fn op_error(&self) -> Option<&OpError> {
        match self {
            FlowError::Design { source, .. } | FlowError::Step { source, .. } => Some(source),
            FlowError::BatchFailed { .. } => None,
        }
    }
}

fn join_names(names: &[DesignName]) -> String {
    names
        .iter()
        .map(DesignName::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attach design context to a step error.
pub(crate) fn at_design(
    design: &DesignName,
    index: u32,
    step: Step,
) -> impl FnOnce(OpError) -> FlowError {
    let design = design.clone();
    move |source| FlowError::Design {
        design,
        index,
        step,
        source,
    }
}

pub(crate) fn at_step(step: Step) -> impl FnOnce(OpError) -> FlowError {
    move |source| FlowError::Step { step, source }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Succeeded,
    Failed,
    /// Not attempted because an earlier item aborted the run.
    Skipped,
}

/// What happened to one item of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub name: String,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<Step>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Files produced for this item.
    #[serde(default)]
    pub artifacts: Vec<String>,
}

/// Record of one flow run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowReport {
    pub run_id: Uuid,
    pub flow: Flow,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub items: Vec<ItemOutcome>,
    /// Error the run as a whole ended with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FlowReport {
    pub fn start(flow: Flow) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            flow,
            started_at: Utc::now(),
            finished_at: None,
            items: Vec::new(),
            error: None,
        }
    }

    pub fn record_success(&mut self, name: impl Into<String>, artifacts: Vec<String>) {
        self.items.push(ItemOutcome {
            name: name.into(),
            status: ItemStatus::Succeeded,
            step: None,
            error: None,
            artifacts,
        });
    }

    pub fn record_failure(&mut self, name: impl Into<String>, error: &FlowError) {
        self.items.push(ItemOutcome {
            name: name.into(),
            status: ItemStatus::Failed,
            step: error.step(),
            error: Some(error.to_string()),
            artifacts: Vec::new(),
        });
    }

    pub fn record_skipped(&mut self, name: impl Into<String>) {
        self.items.push(ItemOutcome {
            name: name.into(),
            status: ItemStatus::Skipped,
            step: None,
            error: None,
            artifacts: Vec::new(),
        });
    }

    pub fn finish(&mut self, error: Option<&FlowError>) {
        self.finished_at = Some(Utc::now());
        self.error = error.map(ToString::to_string);
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.items.iter().all(|i| i.status == ItemStatus::Succeeded)
    }

    pub fn names_with(&self, status: ItemStatus) -> Vec<&str> {
        self.items
            .iter()
            .filter(|i| i.status == status)
            .map(|i| i.name.as_str())
            .collect()
    }

    /// Every artifact produced during the run, in order.
    pub fn artifacts(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .flat_map(|i| i.artifacts.iter().map(String::as_str))
    }
}
