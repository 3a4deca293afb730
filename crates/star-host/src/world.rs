//! Serializable snapshot of an environment's state.
//!
//! `MockHost` operates on a `HostWorld`; the CLI loads one from JSON,
//! rehearses a flow against it and writes the resulting state back out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use sector_types::{
    CameraPose, Color, ColorMode, CoordinateSystem, FacetingParams, ImageRequest, Plane,
    VisibilityMode,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CadModelRecord {
    pub name: String,
    /// Scene the model is being edited in, while an edit is open.
    #[serde(default)]
    pub editing_scene: Option<u64>,
    /// Bodies that existed when the edit began, with their names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_checkpoint: Option<BTreeMap<u64, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyRecord {
    pub name: String,
    pub model: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartRecord {
    pub name: String,
    pub surfaces: Vec<u64>,
    pub faceting: FacetingParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRecord {
    pub name: String,
    pub plane: Plane,
    pub coordinate_system: Option<CoordinateSystem>,
    pub inputs: Vec<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneRecord {
    pub name: String,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default = "default_true")]
    pub advanced_rendering: bool,
    #[serde(default)]
    pub camera: Option<CameraPose>,
    #[serde(default)]
    pub camera_resets: u32,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayerKind {
    #[default]
    Part,
    Scalar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayerRecord {
    pub scene: u64,
    pub name: String,
    #[serde(default)]
    pub kind: DisplayerKind,
    #[serde(default)]
    pub color_mode: ColorMode,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub visibility: VisibilityMode,
    #[serde(default)]
    pub visible_sections: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsState {
    /// Module resources loaded so far, in load order.
    pub loaded_modules: Vec<String>,
    pub started: bool,
    pub updates: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionState {
    pub history_entries: u32,
    pub has_solution: bool,
}

/// A file the environment wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Artifact {
    Simulation,
    CadExport { bodies: Vec<String> },
    Image { image: ImageRequest },
}

/// Complete environment state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostWorld {
    #[serde(default)]
    pub session_path: Option<String>,
    #[serde(default)]
    pub cad_models: BTreeMap<u64, CadModelRecord>,
    #[serde(default)]
    pub bodies: BTreeMap<u64, BodyRecord>,
    #[serde(default)]
    pub parts: BTreeMap<u64, PartRecord>,
    #[serde(default)]
    pub sections: BTreeMap<u64, SectionRecord>,
    #[serde(default)]
    pub scenes: BTreeMap<u64, SceneRecord>,
    #[serde(default)]
    pub displayers: BTreeMap<u64, DisplayerRecord>,
    #[serde(default)]
    pub parameters: BTreeMap<u64, ParameterRecord>,
    #[serde(default)]
    pub units: BTreeMap<u64, String>,
    /// Geometry files that can be imported, with the body names each produces.
    #[serde(default)]
    pub geometry_files: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub physics: PhysicsState,
    #[serde(default)]
    pub solution: SolutionState,
    /// Files written by the environment, keyed by path.
    #[serde(default)]
    pub artifacts: BTreeMap<String, Artifact>,
    #[serde(default)]
    pub next_id: u64,
}

impl HostWorld {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut world: HostWorld = serde_json::from_str(json)?;
        world.repair_next_id();
        Ok(world)
    }

    /// Allocate a fresh entity id.
    pub fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Make sure new ids never collide with ids already present.
    fn repair_next_id(&mut self) {
        let max_used = [
            self.cad_models.keys().max(),
            self.bodies.keys().max(),
            self.parts.keys().max(),
            self.sections.keys().max(),
            self.scenes.keys().max(),
            self.displayers.keys().max(),
            self.parameters.keys().max(),
            self.units.keys().max(),
        ]
        .into_iter()
        .flatten()
        .copied()
        .chain(self.parts.values().flat_map(|p| p.surfaces.iter().copied()))
        .max()
        .unwrap_or(0);
        self.next_id = self.next_id.max(max_used);
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.values().map(|p| p.name.as_str()).collect()
    }

    pub fn section_by_name(&self, name: &str) -> Option<&SectionRecord> {
        self.sections.values().find(|s| s.name == name)
    }

    pub fn scene_by_name(&self, name: &str) -> Option<(u64, &SceneRecord)> {
        self.scenes
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, s)| (*id, s))
    }

    /// Displayers of a scene, in id order.
    pub fn displayers_in(&self, scene: u64) -> impl Iterator<Item = (u64, &DisplayerRecord)> {
        self.displayers
            .iter()
            .filter(move |(_, d)| d.scene == scene)
            .map(|(id, d)| (*id, d))
    }

    pub fn body_names_in(&self, model: u64) -> Vec<&str> {
        self.bodies
            .values()
            .filter(|b| b.model == model)
            .map(|b| b.name.as_str())
            .collect()
    }
}
