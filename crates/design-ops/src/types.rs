use std::path::PathBuf;

use sector_types::{DesignName, Plane};
use star_host::{BodyId, DisplayerId, EntityKind, HostError, PartId, SectionId, SurfaceId};

/// A design whose geometry has been imported and renamed.
#[derive(Debug, Clone)]
pub struct ImportedDesign {
    pub design: DesignName,
    /// The body, now carrying the design's name.
    pub body: BodyId,
    /// Geometry file the body came from.
    pub source: PathBuf,
    /// How many bodies the import produced in total.
    pub imported_bodies: usize,
}

/// A persisted, tessellated part.
#[derive(Debug, Clone)]
pub struct MaterializedPart {
    pub name: String,
    pub part: PartId,
    pub surfaces: Vec<SurfaceId>,
}

/// A comparison section and the displayer that shows it.
#[derive(Debug, Clone)]
pub struct SectionOutput {
    pub name: String,
    pub section: SectionId,
    pub displayer: DisplayerId,
    pub plane: Plane,
}

/// Result of one visibility-isolated capture.
#[derive(Debug, Clone)]
pub struct CaptureOutput {
    pub design: DesignName,
    pub path: PathBuf,
    /// Number of part displayers hidden before the capture.
    pub hidden: usize,
}

/// Errors from individual pipeline steps.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpError {
    #[error("CAD model not found: {name}")]
    CadModelNotFound { name: String },

    /// `model` is empty when the environment reported the miss without one.
    #[error("body {body:?} not found{}", in_model(.model))]
    BodyNotFound { model: String, body: String },

    #[error("{count} bodies named {body:?} in CAD model {model:?}, expected exactly one")]
    AmbiguousBody {
        model: String,
        body: String,
        count: usize,
    },

    #[error("a body named {name:?} already exists in CAD model {model:?}")]
    DuplicateBody { model: String, name: String },

    #[error("part already exists: {name}")]
    PartAlreadyExists { name: String },

    #[error("part not found: {name}")]
    PartNotFound { name: String },

    #[error("section not found: {name}")]
    SectionNotFound { name: String },

    #[error("scene not found: {name}")]
    SceneNotFound { name: String },

    #[error("displayer not found: {name}")]
    DisplayerNotFound { name: String },

    #[error("parameter not found: {name}")]
    ParameterNotFound { name: String },

    #[error("units not found: {name}")]
    UnitsNotFound { name: String },

    #[error("invariant violated: {detail}")]
    InvariantViolation { detail: String },

    #[error("environment error: {0}")]
    Host(HostError),
}

impl OpError {
    pub fn invariant(detail: impl Into<String>) -> Self {
        OpError::InvariantViolation {
            detail: detail.into(),
        }
    }

    /// True for errors caused by a named entity that does not exist.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            OpError::CadModelNotFound { .. }
                | OpError::BodyNotFound { .. }
                | OpError::PartNotFound { .. }
                | OpError::SectionNotFound { .. }
                | OpError::SceneNotFound { .. }
                | OpError::DisplayerNotFound { .. }
                | OpError::ParameterNotFound { .. }
                | OpError::UnitsNotFound { .. }
        )
    }
}

/// Lookup failures become typed variants; everything else is wrapped.
impl From<HostError> for OpError {
    fn from(err: HostError) -> Self {
        match err {
            HostError::NotFound { kind, name } => match kind {
                EntityKind::CadModel => OpError::CadModelNotFound { name },
                EntityKind::Body => OpError::BodyNotFound {
                    model: String::new(),
                    body: name,
                },
                EntityKind::Part => OpError::PartNotFound { name },
                EntityKind::Section => OpError::SectionNotFound { name },
                EntityKind::Scene => OpError::SceneNotFound { name },
                EntityKind::Displayer => OpError::DisplayerNotFound { name },
                EntityKind::Parameter => OpError::ParameterNotFound { name },
                EntityKind::Units => OpError::UnitsNotFound { name },
                other => OpError::Host(HostError::NotFound { kind: other, name }),
            },
            other => OpError::Host(other),
        }
    }
}

fn in_model(model: &str) -> String {
    if model.is_empty() {
        String::new()
    } else {
        format!(" in CAD model {model:?}")
    }
}
