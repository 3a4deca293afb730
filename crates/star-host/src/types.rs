use std::fmt;

use serde::{Deserialize, Serialize};

pub use sector_types::{CameraPose, ImageRequest, VisibilityMode};

macro_rules! host_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

host_id!(
    /// Handle to a CAD model (a 3D-CAD modeling document).
    CadModelId
);
host_id!(
    /// Handle to a body inside a CAD model.
    BodyId
);
host_id!(
    /// Handle to a tessellated solid part.
    PartId
);
host_id!(
    /// Handle to one surface of a part.
    SurfaceId
);
host_id!(
    /// Handle to a derived section part.
    SectionId
);
host_id!(SceneId);
host_id!(DisplayerId);
host_id!(ParameterId);
host_id!(UnitsId);

/// Kinds of named entities that can be looked up in the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    CadModel,
    Body,
    Part,
    Section,
    Scene,
    Displayer,
    Parameter,
    Units,
    GeometryFile,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::CadModel => "CAD model",
            EntityKind::Body => "body",
            EntityKind::Part => "part",
            EntityKind::Section => "section",
            EntityKind::Scene => "scene",
            EntityKind::Displayer => "displayer",
            EntityKind::Parameter => "parameter",
            EntityKind::Units => "units",
            EntityKind::GeometryFile => "geometry file",
        };
        f.write_str(s)
    }
}

/// Every call the environment accepts. Used for journaling and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostOp {
    BeginEdit,
    CommitEdit,
    RollbackEdit,
    ImportCadFile,
    RenameBody,
    CreatePart,
    ExportBodies,
    CreateScene,
    RemoveScene,
    OpenInteractive,
    SetAdvancedRendering,
    ResetCamera,
    CreatePartDisplayer,
    RenameDisplayer,
    SetDisplayerColor,
    AddDisplayerPart,
    SetVisibilityOverride,
    SetCamera,
    PrintAndWait,
    SaveState,
    ClearSolutionHistory,
    ClearSolution,
    CreatePlaneSection,
    SetSectionCoordinateSystem,
    SetSectionInputs,
    RenameSection,
    LoadPhysicsModule,
    StartPhysicsEngine,
    UpdatePhysicsEngine,
    SetEngineParameter,
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Errors reported by the modeling environment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: EntityKind, name: String },

    #[error("{kind} already exists: {name}")]
    AlreadyExists { kind: EntityKind, name: String },

    #[error("CAD model {model} already has an open edit session")]
    SessionAlreadyOpen { model: String },

    #[error("CAD model {model} has no open edit session")]
    NoOpenSession { model: String },

    #[error("{operation} failed for {path}: {reason}")]
    Io {
        operation: HostOp,
        path: String,
        reason: String,
    },

    #[error("{operation} rejected: {reason}")]
    Rejected { operation: HostOp, reason: String },

    #[error("stale {kind} handle {id}")]
    StaleHandle { kind: EntityKind, id: u64 },
}

impl HostError {
    pub fn not_found(kind: EntityKind, name: impl Into<String>) -> Self {
        HostError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::NotFound { .. })
    }
}

/// A scalar global parameter with its current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarParameter {
    pub name: String,
    pub value: f64,
    /// Unit name, or `None` for dimensionless parameters.
    pub units: Option<String>,
}

/// One journaled environment call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostCall {
    pub op: HostOp,
    /// Human-readable target of the call (entity name or path).
    pub detail: String,
}

/// What the renderer saw when an image was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRecord {
    pub scene: String,
    pub path: String,
    pub image: ImageRequest,
    /// Camera in effect at capture time, if one was ever set.
    pub camera: Option<CameraPose>,
    /// Every part displayer in the scene with its visibility override.
    pub displayers: Vec<(String, VisibilityMode)>,
}

impl CaptureRecord {
    /// Names of displayers that follow their parts' visibility.
    pub fn visible_displayers(&self) -> Vec<&str> {
        self.displayers
            .iter()
            .filter(|(_, mode)| *mode == VisibilityMode::UsePartProperty)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
