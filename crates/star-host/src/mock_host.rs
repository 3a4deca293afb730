//! MockHost — deterministic in-memory double implementing the full `Host`.
//!
//! Models just enough of the environment to check ordering and naming:
//! edit sessions per CAD model, bodies produced by registered geometry
//! files, parts with synthetic surfaces, sections, scenes, displayers and
//! the files the environment would write. Every mutating call is journaled,
//! and every render snapshots displayer visibility and camera state.

use std::collections::BTreeMap;
use std::path::Path;

use sector_types::{
    CadFormat, CameraPose, Color, ColorMode, CoordinateSystem, ExportOptions, FacetingParams,
    ImageRequest, ImportOptions, Plane, VisibilityMode,
};

use crate::traits::{CadHost, SceneHost, SimulationHost};
use crate::types::*;
use crate::world::*;

/// Surfaces generated for every new part.
const DEFAULT_SURFACES_PER_PART: usize = 3;

/// A failure to raise the next time a matching call is made.
#[derive(Debug, Clone)]
struct InjectedFailure {
    op: HostOp,
    /// Only fail when the call detail contains this text.
    matching: Option<String>,
}

/// Deterministic test double for the modeling environment.
#[derive(Debug, Clone)]
pub struct MockHost {
    world: HostWorld,
    journal: Vec<HostCall>,
    captures: Vec<CaptureRecord>,
    failures: Vec<InjectedFailure>,
    open_sessions: usize,
    peak_open_sessions: usize,
    surfaces_per_part: usize,
}

impl MockHost {
    pub fn new() -> Self {
        Self::from_world(HostWorld::default())
    }

    /// Wrap an existing world, e.g. one loaded from JSON.
    pub fn from_world(world: HostWorld) -> Self {
        let open_sessions = world
            .cad_models
            .values()
            .filter(|m| m.editing_scene.is_some())
            .count();
        Self {
            world,
            journal: Vec::new(),
            captures: Vec::new(),
            failures: Vec::new(),
            open_sessions,
            peak_open_sessions: open_sessions,
            surfaces_per_part: DEFAULT_SURFACES_PER_PART,
        }
    }

    // ── Seeding ─────────────────────────────────────────────────────────

    pub fn with_cad_model(mut self, name: &str) -> Self {
        self.add_cad_model(name);
        self
    }

    pub fn add_cad_model(&mut self, name: &str) -> CadModelId {
        let id = self.world.alloc_id();
        self.world.cad_models.insert(
            id,
            CadModelRecord {
                name: name.to_string(),
                editing_scene: None,
                edit_checkpoint: None,
            },
        );
        CadModelId(id)
    }

    /// Add a body to a model, creating the model if needed.
    pub fn with_body(mut self, model: &str, name: &str) -> Self {
        let model_id = match self.model_id_by_name(model) {
            Some(id) => id,
            None => self.add_cad_model(model).0,
        };
        let id = self.world.alloc_id();
        self.world.bodies.insert(
            id,
            BodyRecord {
                name: name.to_string(),
                model: model_id,
            },
        );
        self
    }

    pub fn with_scene(mut self, name: &str) -> Self {
        self.add_scene(name);
        self
    }

    fn add_scene(&mut self, name: &str) -> SceneId {
        let id = self.world.alloc_id();
        self.world.scenes.insert(
            id,
            SceneRecord {
                name: name.to_string(),
                advanced_rendering: true,
                ..SceneRecord::default()
            },
        );
        SceneId(id)
    }

    /// Add a displayer to a scene, creating the scene if needed.
    pub fn with_displayer(mut self, scene: &str, name: &str, kind: DisplayerKind) -> Self {
        let existing = self.world.scene_by_name(scene).map(|(id, _)| id);
        let scene_id = match existing {
            Some(id) => id,
            None => self.add_scene(scene).0,
        };
        let id = self.world.alloc_id();
        self.world.displayers.insert(
            id,
            DisplayerRecord {
                scene: scene_id,
                name: name.to_string(),
                kind,
                color_mode: ColorMode::Default,
                color: None,
                visibility: VisibilityMode::UsePartProperty,
                visible_sections: Vec::new(),
            },
        );
        self
    }

    pub fn with_part_displayer(self, scene: &str, name: &str) -> Self {
        self.with_displayer(scene, name, DisplayerKind::Part)
    }

    /// Register a geometry file and the bodies importing it produces.
    pub fn with_geometry_file(mut self, path: impl AsRef<Path>, bodies: &[&str]) -> Self {
        self.register_geometry_file(path, bodies.iter().map(|b| b.to_string()).collect());
        self
    }

    pub fn register_geometry_file(&mut self, path: impl AsRef<Path>, bodies: Vec<String>) {
        self.world
            .geometry_files
            .insert(path_key(path.as_ref()), bodies);
    }

    pub fn has_geometry_file(&self, path: impl AsRef<Path>) -> bool {
        self.world
            .geometry_files
            .contains_key(&path_key(path.as_ref()))
    }

    pub fn with_parameter(mut self, name: &str, value: f64, units: Option<&str>) -> Self {
        let id = self.world.alloc_id();
        self.world.parameters.insert(
            id,
            ParameterRecord {
                name: name.to_string(),
                value,
                units: units.map(str::to_string),
            },
        );
        self
    }

    pub fn with_units(mut self, name: &str) -> Self {
        let id = self.world.alloc_id();
        self.world.units.insert(id, name.to_string());
        self
    }

    pub fn with_session_path(mut self, path: &str) -> Self {
        self.world.session_path = Some(path.to_string());
        self
    }

    /// Mark the simulation as holding a solution and some history.
    pub fn with_solution(mut self, history_entries: u32) -> Self {
        self.world.solution = SolutionState {
            history_entries,
            has_solution: true,
        };
        self
    }

    pub fn with_surfaces_per_part(mut self, count: usize) -> Self {
        self.surfaces_per_part = count;
        self
    }

    /// Fail every call of `op`.
    pub fn fail_on(mut self, op: HostOp) -> Self {
        self.failures.push(InjectedFailure { op, matching: None });
        self
    }

    /// Fail calls of `op` whose target contains `matching`.
    pub fn fail_on_matching(mut self, op: HostOp, matching: &str) -> Self {
        self.failures.push(InjectedFailure {
            op,
            matching: Some(matching.to_string()),
        });
        self
    }

    // ── Inspection ──────────────────────────────────────────────────────

    pub fn world(&self) -> &HostWorld {
        &self.world
    }

    pub fn into_world(self) -> HostWorld {
        self.world
    }

    /// Every mutating call made so far, in order.
    pub fn journal(&self) -> &[HostCall] {
        &self.journal
    }

    pub fn calls_of(&self, op: HostOp) -> Vec<&HostCall> {
        self.journal.iter().filter(|c| c.op == op).collect()
    }

    pub fn captures(&self) -> &[CaptureRecord] {
        &self.captures
    }

    /// Edit sessions currently open across all models.
    pub fn open_sessions(&self) -> usize {
        self.open_sessions
    }

    /// Highest number of simultaneously open edit sessions seen.
    pub fn peak_open_sessions(&self) -> usize {
        self.peak_open_sessions
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn record(&mut self, op: HostOp, detail: impl Into<String>) -> Result<(), HostError> {
        let detail = detail.into();
        let injected = self.failures.iter().any(|f| {
            f.op == op
                && f
                    .matching
                    .as_deref()
                    .map_or(true, |needle| detail.contains(needle))
        });
        self.journal.push(HostCall {
            op,
            detail: detail.clone(),
        });
        if !injected {
            return Ok(());
        }
        match op {
            HostOp::ImportCadFile | HostOp::ExportBodies | HostOp::SaveState | HostOp::PrintAndWait => {
                Err(HostError::Io {
                    operation: op,
                    path: detail,
                    reason: "injected failure".to_string(),
                })
            }
            _ => Err(HostError::Rejected {
                operation: op,
                reason: format!("injected failure for {detail}"),
            }),
        }
    }

    fn model_id_by_name(&self, name: &str) -> Option<u64> {
        self.world
            .cad_models
            .iter()
            .find(|(_, m)| m.name == name)
            .map(|(id, _)| *id)
    }

    fn model(&self, id: CadModelId) -> Result<&CadModelRecord, HostError> {
        self.world
            .cad_models
            .get(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::CadModel,
                id: id.0,
            })
    }

    fn model_mut(&mut self, id: CadModelId) -> Result<&mut CadModelRecord, HostError> {
        self.world
            .cad_models
            .get_mut(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::CadModel,
                id: id.0,
            })
    }

    fn body_mut(&mut self, id: BodyId) -> Result<&mut BodyRecord, HostError> {
        self.world.bodies.get_mut(&id.0).ok_or(HostError::StaleHandle {
            kind: EntityKind::Body,
            id: id.0,
        })
    }

    fn scene(&self, id: SceneId) -> Result<&SceneRecord, HostError> {
        self.world.scenes.get(&id.0).ok_or(HostError::StaleHandle {
            kind: EntityKind::Scene,
            id: id.0,
        })
    }

    fn scene_mut(&mut self, id: SceneId) -> Result<&mut SceneRecord, HostError> {
        self.world
            .scenes
            .get_mut(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Scene,
                id: id.0,
            })
    }

    fn displayer(&self, id: DisplayerId) -> Result<&DisplayerRecord, HostError> {
        self.world
            .displayers
            .get(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Displayer,
                id: id.0,
            })
    }

    fn displayer_mut(&mut self, id: DisplayerId) -> Result<&mut DisplayerRecord, HostError> {
        self.world
            .displayers
            .get_mut(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Displayer,
                id: id.0,
            })
    }

    fn section_mut(&mut self, id: SectionId) -> Result<&mut SectionRecord, HostError> {
        self.world
            .sections
            .get_mut(&id.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Section,
                id: id.0,
            })
    }

    fn require_editing(&self, model: CadModelId) -> Result<(), HostError> {
        let record = self.model(model)?;
        if record.editing_scene.is_none() {
            return Err(HostError::NoOpenSession {
                model: record.name.clone(),
            });
        }
        Ok(())
    }

    fn close_session(&mut self, model: CadModelId) -> Result<(), HostError> {
        let record = self.model_mut(model)?;
        if record.editing_scene.take().is_none() {
            return Err(HostError::NoOpenSession {
                model: record.name.clone(),
            });
        }
        record.edit_checkpoint = None;
        self.open_sessions = self.open_sessions.saturating_sub(1);
        Ok(())
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

fn path_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl CadHost for MockHost {
    fn find_cad_model(&self, name: &str) -> Result<CadModelId, HostError> {
        self.model_id_by_name(name)
            .map(CadModelId)
            .ok_or_else(|| HostError::not_found(EntityKind::CadModel, name))
    }

    fn begin_edit(&mut self, model: CadModelId, scene: SceneId) -> Result<(), HostError> {
        let name = self.model(model)?.name.clone();
        self.record(HostOp::BeginEdit, &name)?;
        self.scene(scene)?;
        let checkpoint: BTreeMap<u64, String> = self
            .world
            .bodies
            .iter()
            .filter(|(_, b)| b.model == model.0)
            .map(|(id, b)| (*id, b.name.clone()))
            .collect();
        let record = self.model_mut(model)?;
        if record.editing_scene.is_some() {
            return Err(HostError::SessionAlreadyOpen { model: name });
        }
        record.editing_scene = Some(scene.0);
        record.edit_checkpoint = Some(checkpoint);
        self.open_sessions += 1;
        self.peak_open_sessions = self.peak_open_sessions.max(self.open_sessions);
        Ok(())
    }

    fn commit_edit(&mut self, model: CadModelId) -> Result<(), HostError> {
        let name = self.model(model)?.name.clone();
        self.record(HostOp::CommitEdit, name)?;
        self.close_session(model)
    }

    fn rollback_edit(&mut self, model: CadModelId) -> Result<(), HostError> {
        let name = self.model(model)?.name.clone();
        self.record(HostOp::RollbackEdit, name)?;
        let checkpoint = self.model(model)?.edit_checkpoint.clone().unwrap_or_default();
        // Drop bodies created during the edit and restore original names.
        self.world
            .bodies
            .retain(|id, b| b.model != model.0 || checkpoint.contains_key(id));
        for (id, original) in &checkpoint {
            if let Some(body) = self.world.bodies.get_mut(id) {
                body.name = original.clone();
            }
        }
        self.close_session(model)
    }

    fn import_cad_file(
        &mut self,
        model: CadModelId,
        path: &Path,
        options: &ImportOptions,
    ) -> Result<Vec<BodyId>, HostError> {
        let key = path_key(path);
        self.record(HostOp::ImportCadFile, &key)?;
        self.require_editing(model)?;

        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(CadFormat::from_extension);
        match format {
            Some(f) if options.accepts(f) => {}
            _ => {
                return Err(HostError::Rejected {
                    operation: HostOp::ImportCadFile,
                    reason: format!("unsupported or disabled format: {key}"),
                })
            }
        }

        let body_names = self
            .world
            .geometry_files
            .get(&key)
            .cloned()
            .ok_or_else(|| HostError::Io {
                operation: HostOp::ImportCadFile,
                path: key.clone(),
                reason: "file not found".to_string(),
            })?;

        let mut created = Vec::with_capacity(body_names.len());
        for name in body_names {
            let id = self.world.alloc_id();
            self.world.bodies.insert(
                id,
                BodyRecord {
                    name,
                    model: model.0,
                },
            );
            created.push(BodyId(id));
        }
        Ok(created)
    }

    fn find_bodies(&self, model: CadModelId, name: &str) -> Result<Vec<BodyId>, HostError> {
        self.model(model)?;
        Ok(self
            .world
            .bodies
            .iter()
            .filter(|(_, b)| b.model == model.0 && b.name == name)
            .map(|(id, _)| BodyId(*id))
            .collect())
    }

    fn body_name(&self, body: BodyId) -> Result<String, HostError> {
        self.world
            .bodies
            .get(&body.0)
            .map(|b| b.name.clone())
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Body,
                id: body.0,
            })
    }

    fn rename_body(&mut self, body: BodyId, name: &str) -> Result<(), HostError> {
        self.record(HostOp::RenameBody, name)?;
        self.body_mut(body)?.name = name.to_string();
        Ok(())
    }

    fn create_part(
        &mut self,
        model: CadModelId,
        body: BodyId,
        faceting: &FacetingParams,
    ) -> Result<PartId, HostError> {
        let name = self.body_name(body)?;
        self.record(HostOp::CreatePart, &name)?;
        self.model(model)?;
        if self.world.parts.values().any(|p| p.name == name) {
            return Err(HostError::AlreadyExists {
                kind: EntityKind::Part,
                name,
            });
        }
        let surfaces = (0..self.surfaces_per_part)
            .map(|_| self.world.alloc_id())
            .collect();
        let id = self.world.alloc_id();
        self.world.parts.insert(
            id,
            PartRecord {
                name,
                surfaces,
                faceting: *faceting,
            },
        );
        Ok(PartId(id))
    }

    fn find_part(&self, name: &str) -> Result<PartId, HostError> {
        self.world
            .parts
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(id, _)| PartId(*id))
            .ok_or_else(|| HostError::not_found(EntityKind::Part, name))
    }

    fn part_surfaces(&self, part: PartId) -> Result<Vec<SurfaceId>, HostError> {
        self.world
            .parts
            .get(&part.0)
            .map(|p| p.surfaces.iter().copied().map(SurfaceId).collect())
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Part,
                id: part.0,
            })
    }

    fn export_bodies(
        &mut self,
        model: CadModelId,
        bodies: &[BodyId],
        path: &Path,
        _options: &ExportOptions,
    ) -> Result<(), HostError> {
        let key = path_key(path);
        self.record(HostOp::ExportBodies, &key)?;
        self.model(model)?;
        let names = bodies
            .iter()
            .map(|b| self.body_name(*b))
            .collect::<Result<Vec<_>, _>>()?;
        self.world
            .artifacts
            .insert(key, Artifact::CadExport { bodies: names });
        Ok(())
    }
}

impl SceneHost for MockHost {
    fn create_scene(&mut self, name: &str) -> Result<SceneId, HostError> {
        self.record(HostOp::CreateScene, name)?;
        Ok(self.add_scene(name))
    }

    fn find_scene(&self, name: &str) -> Result<SceneId, HostError> {
        self.world
            .scene_by_name(name)
            .map(|(id, _)| SceneId(id))
            .ok_or_else(|| HostError::not_found(EntityKind::Scene, name))
    }

    fn remove_scene(&mut self, scene: SceneId) -> Result<(), HostError> {
        let name = self.scene(scene)?.name.clone();
        self.record(HostOp::RemoveScene, name)?;
        self.world.scenes.remove(&scene.0);
        self.world.displayers.retain(|_, d| d.scene != scene.0);
        Ok(())
    }

    fn open_interactive(&mut self, scene: SceneId) -> Result<(), HostError> {
        let name = self.scene(scene)?.name.clone();
        self.record(HostOp::OpenInteractive, name)?;
        self.scene_mut(scene)?.interactive = true;
        Ok(())
    }

    fn set_advanced_rendering(&mut self, scene: SceneId, enabled: bool) -> Result<(), HostError> {
        let name = self.scene(scene)?.name.clone();
        self.record(HostOp::SetAdvancedRendering, name)?;
        self.scene_mut(scene)?.advanced_rendering = enabled;
        Ok(())
    }

    fn reset_camera(&mut self, scene: SceneId) -> Result<(), HostError> {
        let name = self.scene(scene)?.name.clone();
        self.record(HostOp::ResetCamera, name)?;
        let record = self.scene_mut(scene)?;
        record.camera = None;
        record.camera_resets += 1;
        Ok(())
    }

    fn create_part_displayer(
        &mut self,
        scene: SceneId,
        name: &str,
    ) -> Result<DisplayerId, HostError> {
        self.record(HostOp::CreatePartDisplayer, name)?;
        self.scene(scene)?;
        let id = self.world.alloc_id();
        self.world.displayers.insert(
            id,
            DisplayerRecord {
                scene: scene.0,
                name: name.to_string(),
                kind: DisplayerKind::Part,
                color_mode: ColorMode::Default,
                color: None,
                visibility: VisibilityMode::UsePartProperty,
                visible_sections: Vec::new(),
            },
        );
        Ok(DisplayerId(id))
    }

    fn rename_displayer(&mut self, displayer: DisplayerId, name: &str) -> Result<(), HostError> {
        self.record(HostOp::RenameDisplayer, name)?;
        let scene = self.displayer(displayer)?.scene;
        let taken = self
            .world
            .displayers_in(scene)
            .any(|(id, d)| id != displayer.0 && d.name == name);
        if taken {
            return Err(HostError::AlreadyExists {
                kind: EntityKind::Displayer,
                name: name.to_string(),
            });
        }
        self.displayer_mut(displayer)?.name = name.to_string();
        Ok(())
    }

    fn part_displayers(&self, scene: SceneId) -> Result<Vec<DisplayerId>, HostError> {
        self.scene(scene)?;
        Ok(self
            .world
            .displayers_in(scene.0)
            .filter(|(_, d)| d.kind == DisplayerKind::Part)
            .map(|(id, _)| DisplayerId(id))
            .collect())
    }

    fn find_displayer(&self, scene: SceneId, name: &str) -> Result<DisplayerId, HostError> {
        self.scene(scene)?;
        self.world
            .displayers_in(scene.0)
            .find(|(_, d)| d.name == name)
            .map(|(id, _)| DisplayerId(id))
            .ok_or_else(|| HostError::not_found(EntityKind::Displayer, name))
    }

    fn displayer_name(&self, displayer: DisplayerId) -> Result<String, HostError> {
        Ok(self.displayer(displayer)?.name.clone())
    }

    fn set_displayer_color(
        &mut self,
        displayer: DisplayerId,
        mode: ColorMode,
        color: Color,
    ) -> Result<(), HostError> {
        let name = self.displayer(displayer)?.name.clone();
        self.record(HostOp::SetDisplayerColor, name)?;
        let record = self.displayer_mut(displayer)?;
        record.color_mode = mode;
        record.color = Some(color);
        Ok(())
    }

    fn add_displayer_part(
        &mut self,
        displayer: DisplayerId,
        section: SectionId,
    ) -> Result<(), HostError> {
        let name = self.displayer(displayer)?.name.clone();
        self.record(HostOp::AddDisplayerPart, name)?;
        if !self.world.sections.contains_key(&section.0) {
            return Err(HostError::StaleHandle {
                kind: EntityKind::Section,
                id: section.0,
            });
        }
        let record = self.displayer_mut(displayer)?;
        if !record.visible_sections.contains(&section.0) {
            record.visible_sections.push(section.0);
        }
        Ok(())
    }

    fn set_visibility_override(
        &mut self,
        displayer: DisplayerId,
        mode: VisibilityMode,
    ) -> Result<(), HostError> {
        let name = self.displayer(displayer)?.name.clone();
        self.record(HostOp::SetVisibilityOverride, format!("{name}={mode:?}"))?;
        self.displayer_mut(displayer)?.visibility = mode;
        Ok(())
    }

    fn visibility_override(&self, displayer: DisplayerId) -> Result<VisibilityMode, HostError> {
        Ok(self.displayer(displayer)?.visibility)
    }

    fn set_camera(&mut self, scene: SceneId, pose: &CameraPose) -> Result<(), HostError> {
        let name = self.scene(scene)?.name.clone();
        self.record(HostOp::SetCamera, name)?;
        self.scene_mut(scene)?.camera = Some(*pose);
        Ok(())
    }

    fn print_and_wait(
        &mut self,
        scene: SceneId,
        path: &Path,
        image: &ImageRequest,
    ) -> Result<(), HostError> {
        let key = path_key(path);
        self.record(HostOp::PrintAndWait, &key)?;
        let record = self.scene(scene)?;
        let capture = CaptureRecord {
            scene: record.name.clone(),
            path: key.clone(),
            image: *image,
            camera: record.camera,
            displayers: self
                .world
                .displayers_in(scene.0)
                .filter(|(_, d)| d.kind == DisplayerKind::Part)
                .map(|(_, d)| (d.name.clone(), d.visibility))
                .collect(),
        };
        self.captures.push(capture);
        self.world
            .artifacts
            .insert(key, Artifact::Image { image: *image });
        Ok(())
    }
}

impl SimulationHost for MockHost {
    fn session_path(&self) -> Option<String> {
        self.world.session_path.clone()
    }

    fn save_state(&mut self, path: &Path) -> Result<(), HostError> {
        let key = path_key(path);
        self.record(HostOp::SaveState, &key)?;
        self.world.artifacts.insert(key.clone(), Artifact::Simulation);
        self.world.session_path = Some(key);
        Ok(())
    }

    fn clear_solution_history(&mut self) -> Result<(), HostError> {
        self.record(HostOp::ClearSolutionHistory, "solution history")?;
        self.world.solution.history_entries = 0;
        Ok(())
    }

    fn clear_solution(&mut self) -> Result<(), HostError> {
        self.record(HostOp::ClearSolution, "solution")?;
        self.world.solution.has_solution = false;
        Ok(())
    }

    fn create_plane_section(&mut self, plane: &Plane) -> Result<SectionId, HostError> {
        self.record(
            HostOp::CreatePlaneSection,
            format!("normal={:?} origin={:?}", plane.normal, plane.origin),
        )?;
        let id = self.world.alloc_id();
        self.world.sections.insert(
            id,
            SectionRecord {
                name: format!("Plane Section {id}"),
                plane: *plane,
                coordinate_system: None,
                inputs: Vec::new(),
            },
        );
        Ok(SectionId(id))
    }

    fn set_section_coordinate_system(
        &mut self,
        section: SectionId,
        system: CoordinateSystem,
    ) -> Result<(), HostError> {
        self.record(HostOp::SetSectionCoordinateSystem, format!("{section}"))?;
        self.section_mut(section)?.coordinate_system = Some(system);
        Ok(())
    }

    fn set_section_inputs(
        &mut self,
        section: SectionId,
        surfaces: &[SurfaceId],
    ) -> Result<(), HostError> {
        self.record(HostOp::SetSectionInputs, format!("{section}"))?;
        let known = |s: &SurfaceId| self.world.parts.values().any(|p| p.surfaces.contains(&s.0));
        if let Some(unknown) = surfaces.iter().find(|s| !known(s)) {
            return Err(HostError::StaleHandle {
                kind: EntityKind::Part,
                id: unknown.0,
            });
        }
        self.section_mut(section)?.inputs = surfaces.iter().map(|s| s.0).collect();
        Ok(())
    }

    fn rename_section(&mut self, section: SectionId, name: &str) -> Result<(), HostError> {
        self.record(HostOp::RenameSection, name)?;
        self.section_mut(section)?.name = name.to_string();
        Ok(())
    }

    fn find_section(&self, name: &str) -> Result<SectionId, HostError> {
        self.world
            .sections
            .iter()
            .find(|(_, s)| s.name == name)
            .map(|(id, _)| SectionId(*id))
            .ok_or_else(|| HostError::not_found(EntityKind::Section, name))
    }

    fn load_physics_module(&mut self, resource: &str) -> Result<(), HostError> {
        self.record(HostOp::LoadPhysicsModule, resource)?;
        self.world.physics.loaded_modules.push(resource.to_string());
        Ok(())
    }

    fn start_physics_engine(&mut self) -> Result<(), HostError> {
        self.record(HostOp::StartPhysicsEngine, "engine")?;
        if self.world.physics.loaded_modules.is_empty() {
            return Err(HostError::Rejected {
                operation: HostOp::StartPhysicsEngine,
                reason: "no physics module loaded".to_string(),
            });
        }
        self.world.physics.started = true;
        Ok(())
    }

    fn update_physics_engine(&mut self) -> Result<(), HostError> {
        self.record(HostOp::UpdatePhysicsEngine, "engine")?;
        if !self.world.physics.started {
            return Err(HostError::Rejected {
                operation: HostOp::UpdatePhysicsEngine,
                reason: "engine not started".to_string(),
            });
        }
        self.world.physics.updates += 1;
        Ok(())
    }

    fn find_parameter(&self, name: &str) -> Result<ParameterId, HostError> {
        self.world
            .parameters
            .iter()
            .find(|(_, p)| p.name == name)
            .map(|(id, _)| ParameterId(*id))
            .ok_or_else(|| HostError::not_found(EntityKind::Parameter, name))
    }

    fn find_units(&self, name: &str) -> Result<UnitsId, HostError> {
        self.world
            .units
            .iter()
            .find(|(_, u)| u.as_str() == name)
            .map(|(id, _)| UnitsId(*id))
            .ok_or_else(|| HostError::not_found(EntityKind::Units, name))
    }

    fn set_engine_parameter(
        &mut self,
        parameter: ParameterId,
        value: f64,
        units: UnitsId,
    ) -> Result<(), HostError> {
        let units_name = self
            .world
            .units
            .get(&units.0)
            .cloned()
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Units,
                id: units.0,
            })?;
        let record = self
            .world
            .parameters
            .get(&parameter.0)
            .ok_or(HostError::StaleHandle {
                kind: EntityKind::Parameter,
                id: parameter.0,
            })?;
        let detail = format!("{}={} {}", record.name, value, units_name);
        self.record(HostOp::SetEngineParameter, detail)?;
        if !self.world.physics.started {
            return Err(HostError::Rejected {
                operation: HostOp::SetEngineParameter,
                reason: "engine not started".to_string(),
            });
        }
        if let Some(record) = self.world.parameters.get_mut(&parameter.0) {
            record.value = value;
            record.units = Some(units_name);
        }
        Ok(())
    }

    fn scalar_parameters(&self) -> Vec<ScalarParameter> {
        self.world
            .parameters
            .values()
            .map(|p| ScalarParameter {
                name: p.name.clone(),
                value: p.value,
                units: p.units.clone(),
            })
            .collect()
    }
}
