use serde::{Deserialize, Serialize};

use sector_types::{Color, ColorMode, CoordinateSystem, Plane};
use star_host::{Host, HostError};
use tracing::{debug, info, instrument};

use crate::types::{MaterializedPart, OpError, SectionOutput};

/// How a comparison section is presented in the geometry scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionStyle {
    /// Name the displayer is created with before it takes the design name.
    pub seed_displayer: String,
    pub color_mode: ColorMode,
    pub color: Color,
    #[serde(default)]
    pub coordinate_system: CoordinateSystem,
}

impl Default for SectionStyle {
    fn default() -> Self {
        Self {
            seed_displayer: "Section Surface".to_string(),
            color_mode: ColorMode::Constant,
            color: Color::GREEN,
            coordinate_system: CoordinateSystem::Lab,
        }
    }
}

/// Cut `part` with `plane` and show the cut in `scene_name` under `name`.
///
/// The part must already be materialized and own at least one surface.
#[instrument(skip(host, part, plane, style), fields(part = %part.name))]
pub fn build_section(
    host: &mut dyn Host,
    scene_name: &str,
    part: &MaterializedPart,
    plane: &Plane,
    name: &str,
    style: &SectionStyle,
) -> Result<SectionOutput, OpError> {
    let scene = host.find_scene(scene_name)?;

    let surfaces = match host.part_surfaces(part.part) {
        Ok(surfaces) => surfaces,
        Err(HostError::StaleHandle { .. }) => {
            return Err(OpError::invariant(format!(
                "section {name:?} needs a materialized part, {} is unknown",
                part.name
            )))
        }
        Err(err) => return Err(err.into()),
    };
    if surfaces.is_empty() {
        return Err(OpError::invariant(format!(
            "section {name:?} needs input surfaces, part {} has none",
            part.name
        )));
    }

    let section = host.create_plane_section(plane)?;
    host.set_section_coordinate_system(section, style.coordinate_system)?;
    host.set_section_inputs(section, &surfaces)?;
    host.rename_section(section, name)?;
    if host.find_section(name)? != section {
        return Err(OpError::invariant(format!(
            "section name {name:?} resolves to a different section"
        )));
    }
    debug!(section = %section, inputs = surfaces.len(), "section created");

    let displayer = host.create_part_displayer(scene, &style.seed_displayer)?;
    host.rename_displayer(displayer, name)?;
    let shown_as = host.displayer_name(displayer)?;
    if shown_as != name {
        return Err(OpError::invariant(format!(
            "displayer {displayer} is named {shown_as:?}, expected {name:?}"
        )));
    }
    host.set_displayer_color(displayer, style.color_mode, style.color)?;
    host.add_displayer_part(displayer, section)?;

    info!(section = name, scene = scene_name, "section displayed");
    Ok(SectionOutput {
        name: name.to_string(),
        section,
        displayer,
        plane: *plane,
    })
}
