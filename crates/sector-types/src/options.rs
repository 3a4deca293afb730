use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// CAD interchange formats the importer can be told to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CadFormat {
    Nx,
    Step,
    SolidEdge,
    Cgr,
    SolidWorks,
    Rhino,
    Ifc,
    Acis,
    Jt,
    Iges,
    CatiaV5,
    CatiaV4,
    ThreeDXml,
    Creo,
    Inventor,
    Parasolid,
}

impl CadFormat {
    pub const ALL: [CadFormat; 16] = [
        CadFormat::Nx,
        CadFormat::Step,
        CadFormat::SolidEdge,
        CadFormat::Cgr,
        CadFormat::SolidWorks,
        CadFormat::Rhino,
        CadFormat::Ifc,
        CadFormat::Acis,
        CadFormat::Jt,
        CadFormat::Iges,
        CadFormat::CatiaV5,
        CadFormat::CatiaV4,
        CadFormat::ThreeDXml,
        CadFormat::Creo,
        CadFormat::Inventor,
        CadFormat::Parasolid,
    ];

    /// Format that handles a file extension, if any.
    pub fn from_extension(ext: &str) -> Option<CadFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "x_t" | "x_b" => Some(CadFormat::Parasolid),
            "step" | "stp" => Some(CadFormat::Step),
            "igs" | "iges" => Some(CadFormat::Iges),
            "prt" => Some(CadFormat::Nx),
            "par" | "psm" => Some(CadFormat::SolidEdge),
            "sldprt" | "sldasm" => Some(CadFormat::SolidWorks),
            "3dm" => Some(CadFormat::Rhino),
            "ifc" => Some(CadFormat::Ifc),
            "sat" | "sab" => Some(CadFormat::Acis),
            "jt" => Some(CadFormat::Jt),
            "catpart" | "catproduct" => Some(CadFormat::CatiaV5),
            "model" => Some(CadFormat::CatiaV4),
            "3dxml" => Some(CadFormat::ThreeDXml),
            "cgr" => Some(CadFormat::Cgr),
            "ipt" | "iam" => Some(CadFormat::Inventor),
            _ => None,
        }
    }
}

/// Tessellation density requested at import time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TessellationDensity {
    VeryCoarse,
    Coarse,
    Medium,
    Fine,
    VeryFine,
}

/// Options for importing a CAD file into a CAD model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub formats: BTreeSet<CadFormat>,
    pub density: TessellationDensity,
}

impl ImportOptions {
    pub fn accepts(&self, format: CadFormat) -> bool {
        self.formats.contains(&format)
    }
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            formats: CadFormat::ALL.into_iter().collect(),
            density: TessellationDensity::Coarse,
        }
    }
}

/// Faceting parameters for turning a body into a tessellated part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacetingParams {
    /// Edges with a dihedral angle above this are kept sharp.
    pub sharp_edge_angle_deg: f64,
    pub tessellation_density: u32,
    pub curvature_refinement: u32,
    pub chord_deviation: f64,
}

impl Default for FacetingParams {
    fn default() -> Self {
        Self {
            sharp_edge_angle_deg: 30.0,
            tessellation_density: 3,
            curvature_refinement: 2,
            chord_deviation: 1.0e-5,
        }
    }
}

/// Options for exporting bodies to a neutral CAD file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub include_sheet_bodies: bool,
    pub simplify_geometry: bool,
    pub simplify_topology: bool,
    pub merge_bodies: bool,
    /// Writer precision setting, passed through verbatim.
    pub precision: String,
}

impl ExportOptions {
    /// True when no simplification is applied.
    pub fn is_full_fidelity(&self) -> bool {
        !self.simplify_geometry && !self.simplify_topology && !self.merge_bodies
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_sheet_bodies: true,
            simplify_geometry: false,
            simplify_topology: false,
            merge_bodies: false,
            precision: "0".to_string(),
        }
    }
}

/// Displayer visibility override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VisibilityMode {
    /// Follow each part's own visibility flag.
    #[default]
    UsePartProperty,
    /// Hide every part in the displayer.
    HideAllParts,
}

/// How a part displayer colors its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    Default,
    Constant,
}
