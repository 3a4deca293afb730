use serde::{Deserialize, Serialize};

use design_ops::{ImportTarget, SectionStyle, FALLBACK_PREFIX};
use sector_types::{
    design_list, CameraPose, DesignName, DesignRange, ExportOptions, FacetingParams, ImageRequest,
    ImportOptions, Plane, DEFAULT_DESIGN_PREFIX,
};

/// Fixed names of the environment entities the flows work with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamedLookups {
    /// CAD model designs are imported into.
    pub comparison_model: String,
    /// Transient scene each import session is bound to.
    pub import_scene: String,
    /// Scene holding the comparison displayers.
    pub geometry_scene: String,
    /// Name a freshly imported body carries.
    pub imported_body: String,
    /// CAD model the extraction flow exports from.
    pub extraction_model: String,
    /// Scene prepared while the physics engine restarts.
    pub extraction_scene: String,
    pub physics_module: String,
    pub start_parameter: String,
    pub start_units: String,
}

impl Default for NamedLookups {
    fn default() -> Self {
        Self {
            comparison_model: "3D-CAD Model 1".into(),
            import_scene: "3D-CAD View".into(),
            geometry_scene: "Geometry Scene 1".into(),
            imported_body: "Cylinder Sector: Sector Cylinder".into(),
            extraction_model: "In-Cylinder 3D-CAD 1".into(),
            extraction_scene: "In-Cylinder".into(),
            physics_module: "StarIce".into(),
            start_parameter: "Start Angle".into(),
            start_units: "degCA".into(),
        }
    }
}

impl NamedLookups {
    pub fn import_target(&self) -> ImportTarget<'_> {
        ImportTarget {
            model: &self.comparison_model,
            scene: &self.import_scene,
            body: &self.imported_body,
        }
    }
}

/// What happens to the rest of a batch when one item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailurePolicy {
    /// Stop at the first failure and skip the remaining items.
    Abort,
    /// Record the failure and carry on with the next item.
    Continue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonSettings {
    pub designs: DesignRange,
    /// Extension of the geometry file each design is imported from.
    pub geometry_extension: String,
    pub import: ImportOptions,
    pub faceting: FacetingParams,
    pub section_plane: Plane,
    pub section_style: SectionStyle,
    pub policy: FailurePolicy,
}

impl Default for ComparisonSettings {
    fn default() -> Self {
        Self {
            designs: DesignRange::default(),
            geometry_extension: "x_b".into(),
            import: ImportOptions::default(),
            faceting: FacetingParams::default(),
            section_plane: Plane::XY,
            section_style: SectionStyle::default(),
            policy: FailurePolicy::Abort,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PictureSettings {
    /// Designs to capture, in order. Independent of the comparison range.
    pub designs: Vec<DesignName>,
    pub camera: CameraPose,
    pub image: ImageRequest,
    pub policy: FailurePolicy,
}

impl Default for PictureSettings {
    fn default() -> Self {
        Self {
            designs: design_list(DEFAULT_DESIGN_PREFIX, 0, 9),
            camera: CameraPose::SECTOR_SIDE_VIEW,
            image: ImageRequest::default(),
            policy: FailurePolicy::Continue,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Prefix used when the session path does not yield one.
    pub fallback_prefix: String,
    /// Value the start parameter is set to after the engine restarts.
    pub start_value: f64,
    pub export: ExportOptions,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            fallback_prefix: FALLBACK_PREFIX.into(),
            start_value: 720.0,
            export: ExportOptions::default(),
        }
    }
}

/// Everything the flows need besides paths and the environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationSettings {
    pub lookups: NamedLookups,
    pub comparison: ComparisonSettings,
    pub pictures: PictureSettings,
    pub extraction: ExtractionSettings,
}

impl AutomationSettings {
    /// Picture names the comparison flow never creates.
    pub fn pictures_outside_range(&self) -> Vec<&DesignName> {
        self.pictures
            .designs
            .iter()
            .filter(|d| !self.comparison.designs.contains(d))
            .collect()
    }
}
