use std::path::Path;

use sector_types::{
    CameraPose, Color, ColorMode, CoordinateSystem, ExportOptions, FacetingParams, ImageRequest,
    ImportOptions, Plane, VisibilityMode,
};

use crate::types::*;

/// CAD modeling side of the environment: models, edit sessions, bodies and parts.
pub trait CadHost {
    /// Look up a CAD model by name.
    fn find_cad_model(&self, name: &str) -> Result<CadModelId, HostError>;

    /// Enter edit mode on a model, bound to a scene. Only one edit per model.
    fn begin_edit(&mut self, model: CadModelId, scene: SceneId) -> Result<(), HostError>;

    /// Update the model and leave edit mode, keeping the changes.
    fn commit_edit(&mut self, model: CadModelId) -> Result<(), HostError>;

    /// Leave edit mode, discarding changes made since `begin_edit`.
    fn rollback_edit(&mut self, model: CadModelId) -> Result<(), HostError>;

    /// Import a CAD file into a model that is being edited.
    /// Returns the bodies the import created.
    fn import_cad_file(
        &mut self,
        model: CadModelId,
        path: &Path,
        options: &ImportOptions,
    ) -> Result<Vec<BodyId>, HostError>;

    /// All bodies in a model with exactly this name.
    fn find_bodies(&self, model: CadModelId, name: &str) -> Result<Vec<BodyId>, HostError>;

    fn body_name(&self, body: BodyId) -> Result<String, HostError>;

    fn rename_body(&mut self, body: BodyId, name: &str) -> Result<(), HostError>;

    /// Turn a body into a persisted, tessellated part named after the body.
    fn create_part(
        &mut self,
        model: CadModelId,
        body: BodyId,
        faceting: &FacetingParams,
    ) -> Result<PartId, HostError>;

    fn find_part(&self, name: &str) -> Result<PartId, HostError>;

    /// Surfaces owned by a part.
    fn part_surfaces(&self, part: PartId) -> Result<Vec<SurfaceId>, HostError>;

    /// Write bodies to a neutral CAD file.
    fn export_bodies(
        &mut self,
        model: CadModelId,
        bodies: &[BodyId],
        path: &Path,
        options: &ExportOptions,
    ) -> Result<(), HostError>;
}

/// Visualization side of the environment: scenes, displayers, camera, rendering.
pub trait SceneHost {
    fn create_scene(&mut self, name: &str) -> Result<SceneId, HostError>;

    fn find_scene(&self, name: &str) -> Result<SceneId, HostError>;

    fn remove_scene(&mut self, scene: SceneId) -> Result<(), HostError>;

    fn open_interactive(&mut self, scene: SceneId) -> Result<(), HostError>;

    fn set_advanced_rendering(&mut self, scene: SceneId, enabled: bool) -> Result<(), HostError>;

    fn reset_camera(&mut self, scene: SceneId) -> Result<(), HostError>;

    fn create_part_displayer(&mut self, scene: SceneId, name: &str)
        -> Result<DisplayerId, HostError>;

    fn rename_displayer(&mut self, displayer: DisplayerId, name: &str) -> Result<(), HostError>;

    /// Part displayers of a scene, in creation order.
    fn part_displayers(&self, scene: SceneId) -> Result<Vec<DisplayerId>, HostError>;

    fn find_displayer(&self, scene: SceneId, name: &str) -> Result<DisplayerId, HostError>;

    fn displayer_name(&self, displayer: DisplayerId) -> Result<String, HostError>;

    fn set_displayer_color(
        &mut self,
        displayer: DisplayerId,
        mode: ColorMode,
        color: Color,
    ) -> Result<(), HostError>;

    /// Add a section to the set of objects a displayer shows.
    fn add_displayer_part(
        &mut self,
        displayer: DisplayerId,
        section: SectionId,
    ) -> Result<(), HostError>;

    fn set_visibility_override(
        &mut self,
        displayer: DisplayerId,
        mode: VisibilityMode,
    ) -> Result<(), HostError>;

    fn visibility_override(&self, displayer: DisplayerId) -> Result<VisibilityMode, HostError>;

    fn set_camera(&mut self, scene: SceneId, pose: &CameraPose) -> Result<(), HostError>;

    /// Render the scene to an image file, overwriting it, and block until done.
    fn print_and_wait(
        &mut self,
        scene: SceneId,
        path: &Path,
        image: &ImageRequest,
    ) -> Result<(), HostError>;
}

/// Simulation side of the environment: state, solution, derived parts, physics.
pub trait SimulationHost {
    /// Path the simulation was loaded from or last saved to.
    fn session_path(&self) -> Option<String>;

    fn save_state(&mut self, path: &Path) -> Result<(), HostError>;

    fn clear_solution_history(&mut self) -> Result<(), HostError>;

    fn clear_solution(&mut self) -> Result<(), HostError>;

    /// Create an implicit plane section with no input parts.
    fn create_plane_section(&mut self, plane: &Plane) -> Result<SectionId, HostError>;

    fn set_section_coordinate_system(
        &mut self,
        section: SectionId,
        system: CoordinateSystem,
    ) -> Result<(), HostError>;

    fn set_section_inputs(
        &mut self,
        section: SectionId,
        surfaces: &[SurfaceId],
    ) -> Result<(), HostError>;

    fn rename_section(&mut self, section: SectionId, name: &str) -> Result<(), HostError>;

    fn find_section(&self, name: &str) -> Result<SectionId, HostError>;

    fn load_physics_module(&mut self, resource: &str) -> Result<(), HostError>;

    fn start_physics_engine(&mut self) -> Result<(), HostError>;

    fn update_physics_engine(&mut self) -> Result<(), HostError>;

    fn find_parameter(&self, name: &str) -> Result<ParameterId, HostError>;

    fn find_units(&self, name: &str) -> Result<UnitsId, HostError>;

    /// Set an engine operating parameter in explicit units.
    fn set_engine_parameter(
        &mut self,
        parameter: ParameterId,
        value: f64,
        units: UnitsId,
    ) -> Result<(), HostError>;

    /// All scalar global parameters with their current values.
    fn scalar_parameters(&self) -> Vec<ScalarParameter>;
}

/// The full environment: every step receives one of these.
///
/// Blanket-implemented for anything that implements all three sides.
pub trait Host: CadHost + SceneHost + SimulationHost {}

impl<T: CadHost + SceneHost + SimulationHost> Host for T {}
