pub mod capture;
pub mod import;
pub mod materialize;
pub mod parameters;
pub mod section;
pub mod session;
pub mod snapshot;
pub mod types;

pub use capture::{CaptureController, CaptureState};
pub use import::{import_design, single_body, ImportTarget};
pub use materialize::materialize;
pub use parameters::{format_parameter, list_parameters};
pub use section::{build_section, SectionStyle};
pub use session::{EditSession, SessionState};
pub use snapshot::{
    clear_solution, derive_prefix, export_body, reinitialize_engine, save_simulation,
    EngineReset, FALLBACK_PREFIX,
};
pub use types::*;
