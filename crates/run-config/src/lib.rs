pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use errors::{LoadError, SaveError};
pub use load::{load_reports, load_reports_file, load_settings, load_settings_file};
pub use metadata::ConfigMetadata;
pub use save::{
    save_reports, save_reports_file, save_settings, save_settings_file, FORMAT_ID, FORMAT_VERSION,
    REPORT_FORMAT_ID,
};
