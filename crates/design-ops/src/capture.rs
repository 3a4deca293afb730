//! Visibility-isolated captures of a single displayer.
//!
//! Each capture walks `AllHidden -> OneVisible -> Captured`. Calling a step
//! out of order is an invariant violation, so a render can never happen with
//! more than one displayer showing.

use sector_types::{CameraPose, DesignName, ImageRequest, ResolvedDirectory, VisibilityMode};
use star_host::{DisplayerId, Host, SceneId};
use tracing::{debug, info, instrument};

use crate::types::{CaptureOutput, OpError};

/// Where the controller is in the current capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureState {
    /// No capture started yet, or the previous one finished.
    Ready,
    AllHidden {
        hidden: usize,
    },
    OneVisible {
        design: DesignName,
        displayer: DisplayerId,
        hidden: usize,
    },
    Captured {
        design: DesignName,
    },
}

pub struct CaptureController<'h> {
    host: &'h mut dyn Host,
    scene: SceneId,
    scene_name: String,
    camera: CameraPose,
    image: ImageRequest,
    state: CaptureState,
}

impl<'h> CaptureController<'h> {
    /// Bind to the scene named `scene_name`.
    pub fn new(
        host: &'h mut dyn Host,
        scene_name: &str,
        camera: CameraPose,
        image: ImageRequest,
    ) -> Result<Self, OpError> {
        let scene = host.find_scene(scene_name)?;
        Ok(Self {
            host,
            scene,
            scene_name: scene_name.to_string(),
            camera,
            image,
            state: CaptureState::Ready,
        })
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    pub fn scene(&self) -> SceneId {
        self.scene
    }

    /// Force every part displayer in the scene hidden.
    pub fn hide_all(&mut self) -> Result<usize, OpError> {
        match self.state {
            CaptureState::Ready | CaptureState::Captured { .. } => {}
            ref other => {
                return Err(OpError::invariant(format!(
                    "hide_all called while {other:?}"
                )))
            }
        }
        let displayers = self.host.part_displayers(self.scene)?;
        for displayer in &displayers {
            self.host
                .set_visibility_override(*displayer, VisibilityMode::HideAllParts)?;
        }
        debug!(scene = %self.scene_name, hidden = displayers.len(), "all displayers hidden");
        self.state = CaptureState::AllHidden {
            hidden: displayers.len(),
        };
        Ok(displayers.len())
    }

    /// Let the displayer named after `design` inherit its parts' visibility.
    pub fn show(&mut self, design: &DesignName) -> Result<DisplayerId, OpError> {
        let hidden = match self.state {
            CaptureState::AllHidden { hidden } => hidden,
            ref other => {
                return Err(OpError::invariant(format!(
                    "show({design}) called while {other:?}"
                )))
            }
        };
        let displayer = self
            .host
            .find_displayer(self.scene, design.as_str())
            .map_err(|err| {
                if err.is_not_found() {
                    OpError::DisplayerNotFound {
                        name: design.to_string(),
                    }
                } else {
                    err.into()
                }
            })?;
        self.host
            .set_visibility_override(displayer, VisibilityMode::UsePartProperty)?;
        self.state = CaptureState::OneVisible {
            design: design.clone(),
            displayer,
            hidden,
        };
        Ok(displayer)
    }

    /// Apply the camera and render the visible design to `images`.
    pub fn capture(&mut self, images: &ResolvedDirectory) -> Result<CaptureOutput, OpError> {
        let (design, hidden) = match &self.state {
            CaptureState::OneVisible { design, hidden, .. } => (design.clone(), *hidden),
            other => {
                return Err(OpError::invariant(format!(
                    "capture called while {other:?}"
                )))
            }
        };
        let path = images.file(&design.file_name("png"));
        self.host.set_camera(self.scene, &self.camera)?;
        self.host.print_and_wait(self.scene, &path, &self.image)?;
        self.state = CaptureState::Captured {
            design: design.clone(),
        };
        Ok(CaptureOutput {
            design,
            path,
            hidden,
        })
    }

    /// Hide everything, show `design`, capture it.
    ///
    /// A failed attempt leaves the controller ready for the next design.
    #[instrument(skip(self, images), fields(scene = %self.scene_name))]
    pub fn capture_design(
        &mut self,
        design: &DesignName,
        images: &ResolvedDirectory,
    ) -> Result<CaptureOutput, OpError> {
        let result = self
            .hide_all()
            .and_then(|_| self.show(design))
            .and_then(|_| self.capture(images));
        match result {
            Ok(output) => {
                info!(design = %design, path = %output.path.display(), "picture captured");
                Ok(output)
            }
            Err(err) => {
                self.state = CaptureState::Ready;
                Err(err)
            }
        }
    }
}
