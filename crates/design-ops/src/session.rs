//! Scoped edit sessions on a CAD model.
//!
//! An `EditSession` owns the environment for its lifetime: it creates a
//! transient scene, enters edit mode on the model, and on every exit path
//! leaves edit mode and removes the scene again. `commit` keeps the changes;
//! `rollback` or dropping the session discards them.

use star_host::{CadModelId, Host, SceneId};
use tracing::{debug, instrument, warn};

use crate::types::OpError;

/// Lifecycle of an edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Committed,
    RolledBack,
}

pub struct EditSession<'h> {
    host: &'h mut dyn Host,
    model: CadModelId,
    model_name: String,
    scene: SceneId,
    state: SessionState,
    scene_removed: bool,
}

impl<'h> EditSession<'h> {
    /// Open an edit on `model_name` bound to a new transient scene.
    ///
    /// The scene is opened interactively with advanced rendering off and a
    /// reset camera, ready for an import.
    #[instrument(skip(host))]
    pub fn open(
        host: &'h mut dyn Host,
        model_name: &str,
        scene_name: &str,
    ) -> Result<Self, OpError> {
        let model = host.find_cad_model(model_name)?;
        let scene = host.create_scene(scene_name)?;
        if let Err(err) = host.begin_edit(model, scene) {
            if let Err(cleanup) = host.remove_scene(scene) {
                warn!(scene = scene_name, error = %cleanup, "failed to remove transient scene");
            }
            return Err(err.into());
        }
        debug!(model = model_name, scene = scene_name, "edit session opened");

        let mut session = Self {
            host,
            model,
            model_name: model_name.to_string(),
            scene,
            state: SessionState::Open,
            scene_removed: false,
        };
        session.prepare_view()?;
        Ok(session)
    }

    fn prepare_view(&mut self) -> Result<(), OpError> {
        self.host.open_interactive(self.scene)?;
        self.host.set_advanced_rendering(self.scene, false)?;
        self.host.reset_camera(self.scene)?;
        Ok(())
    }

    /// The environment, for calls made inside the session.
    pub fn host(&mut self) -> &mut dyn Host {
        &mut *self.host
    }

    pub fn model(&self) -> CadModelId {
        self.model
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Keep the changes, leave edit mode and remove the transient scene.
    pub fn commit(mut self) -> Result<(), OpError> {
        self.host.commit_edit(self.model)?;
        self.state = SessionState::Committed;
        debug!(model = %self.model_name, "edit session committed");
        self.remove_scene()
    }

    /// Discard the changes, leave edit mode and remove the transient scene.
    pub fn rollback(mut self) -> Result<(), OpError> {
        self.host.rollback_edit(self.model)?;
        self.state = SessionState::RolledBack;
        debug!(model = %self.model_name, "edit session rolled back");
        self.remove_scene()
    }

    fn remove_scene(&mut self) -> Result<(), OpError> {
        self.host.remove_scene(self.scene)?;
        self.scene_removed = true;
        Ok(())
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        if self.state == SessionState::Open {
            match self.host.rollback_edit(self.model) {
                Ok(()) => {
                    self.state = SessionState::RolledBack;
                    debug!(model = %self.model_name, "edit session rolled back on drop");
                }
                Err(err) => {
                    warn!(model = %self.model_name, error = %err, "rollback on drop failed");
                }
            }
        }
        if !self.scene_removed {
            if let Err(err) = self.host.remove_scene(self.scene) {
                warn!(model = %self.model_name, error = %err, "failed to remove transient scene");
            }
        }
    }
}
