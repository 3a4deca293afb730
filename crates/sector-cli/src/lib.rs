//! Rehearsal support for the `sector-automation` binary.
//!
//! Loads an environment snapshot into a `MockHost`, registers the geometry
//! files that exist on disk and writes the resulting state back out.

use std::ffi::OsStr;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use batch_engine::AutomationSettings;
use sector_types::ResolvedDirectory;
use star_host::{HostWorld, MockHost};
use tracing::{debug, info, warn};

/// Load the environment snapshot at `path`, or start from an empty one.
pub fn load_host(path: Option<&Path>) -> Result<MockHost> {
    let Some(path) = path else {
        info!("no world snapshot given, rehearsing against an empty environment");
        return Ok(MockHost::new());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading world snapshot {}", path.display()))?;
    let world = HostWorld::from_json(&json)
        .with_context(|| format!("parsing world snapshot {}", path.display()))?;
    Ok(MockHost::from_world(world))
}

pub fn save_world(host: &MockHost, path: &Path) -> Result<()> {
    let json = host.world().to_json().context("serializing world snapshot")?;
    fs::write(path, json).with_context(|| format!("writing world snapshot {}", path.display()))
}

/// Settings from a config file, or the defaults.
pub fn load_settings(path: Option<&Path>) -> Result<AutomationSettings> {
    match path {
        Some(path) => {
            let (settings, metadata) = run_config::load_settings_file(path)
                .with_context(|| format!("loading settings {}", path.display()))?;
            info!(name = %metadata.name, modified = %metadata.modified, "loaded settings");
            Ok(settings)
        }
        None => Ok(AutomationSettings::default()),
    }
}

/// Register every geometry file in the designs directory that the snapshot
/// does not already describe. Each yields the expected imported body.
///
/// Returns the newly registered paths, sorted. A missing directory is not
/// an error here; the import step reports the missing files.
pub fn register_design_files(
    host: &mut MockHost,
    designs: &ResolvedDirectory,
    settings: &AutomationSettings,
) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(designs.path()) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(dir = %designs, "designs directory does not exist");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("listing {designs}"));
        }
    };

    let extension = OsStr::new(&settings.comparison.geometry_extension);
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("listing {designs}"))?.path();
        if !path.is_file() || path.extension() != Some(extension) {
            continue;
        }
        if let Some(name) = path.file_name().and_then(OsStr::to_str) {
            files.push(designs.file(name));
        }
    }
    files.sort();

    let body = &settings.lookups.imported_body;
    files.retain(|path| !host.has_geometry_file(path));
    for path in &files {
        debug!(path = %path.display(), "registering geometry file");
        host.register_geometry_file(path, vec![body.clone()]);
    }
    info!(count = files.len(), dir = %designs, "registered geometry files");
    Ok(files)
}
