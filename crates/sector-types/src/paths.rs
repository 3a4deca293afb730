//! Base directory resolution for design, export and image files.
//!
//! Each directory can be overridden by an environment variable; blank or
//! missing overrides fall back to one shared default root. Nothing here
//! touches the filesystem: existence checks and directory creation belong to
//! whoever reads or writes the files.

use std::fmt;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use serde::{Deserialize, Serialize};

/// Shared default root for every directory kind.
pub const DEFAULT_ROOT: &str = "/nfs/nnwork011/106300/03_Simulations/Sector/V2410/Designs/";

/// Which configurable directory is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirectoryKind {
    /// Source geometry for imported designs.
    Designs,
    /// Saved simulations and exported CAD.
    Export,
    /// Rendered images.
    Images,
}

impl DirectoryKind {
    pub const ALL: [DirectoryKind; 3] = [
        DirectoryKind::Designs,
        DirectoryKind::Export,
        DirectoryKind::Images,
    ];

    /// Environment variable that overrides this directory.
    pub fn env_var(self) -> &'static str {
        match self {
            DirectoryKind::Designs => "STAR_AUTOMATION_DESIGNS_DIR",
            DirectoryKind::Export => "STAR_AUTOMATION_EXPORT_DIR",
            DirectoryKind::Images => "STAR_AUTOMATION_IMAGES_DIR",
        }
    }

    pub fn default_root(self) -> &'static str {
        DEFAULT_ROOT
    }
}

impl fmt::Display for DirectoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DirectoryKind::Designs => "designs",
            DirectoryKind::Export => "export",
            DirectoryKind::Images => "images",
        };
        f.write_str(s)
    }
}

/// An absolute, normalized directory.
///
/// Displays with a trailing separator so a bare file name can be appended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PathBuf", into = "PathBuf")]
pub struct ResolvedDirectory {
    path: PathBuf,
}

impl From<PathBuf> for ResolvedDirectory {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<ResolvedDirectory> for PathBuf {
    fn from(dir: ResolvedDirectory) -> Self {
        dir.path
    }
}

impl ResolvedDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: absolute_normalized(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Absolute path of `file_name` inside this directory.
    pub fn file(&self, file_name: &str) -> PathBuf {
        resolve_file(&self.path, &[file_name])
    }
}

impl fmt::Display for ResolvedDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.path.to_string_lossy();
        if s.ends_with('/') || s.ends_with('\\') {
            f.write_str(&s)
        } else {
            write!(f, "{s}{MAIN_SEPARATOR}")
        }
    }
}

/// Resolve the directory for `kind`, reading its override through `lookup`.
pub fn resolve_directory<F>(kind: DirectoryKind, lookup: F) -> ResolvedDirectory
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(kind.env_var())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| kind.default_root().to_string());
    ResolvedDirectory::new(raw)
}

/// Join `segments` onto `base` and normalize, using `/` separators.
pub fn resolve_path<S: AsRef<str>>(base: impl AsRef<Path>, segments: &[S]) -> String {
    resolve_file(base, segments)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Join `segments` onto `base`, make the result absolute and normalize it.
pub fn resolve_file<S: AsRef<str>>(base: impl AsRef<Path>, segments: &[S]) -> PathBuf {
    let mut joined = base.as_ref().to_path_buf();
    for segment in segments {
        joined.push(segment.as_ref());
    }
    absolute_normalized(&joined)
}

fn absolute_normalized(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };
    normalize_lexically(&absolute)
}

/// Remove `.` components and fold `..` into its parent, without I/O.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir) | Some(Component::CurDir) | None => out.push(".."),
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Resolved base directories for one run.
///
/// Built once at start-up and passed by reference to every step that
/// produces or consumes files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    pub designs: ResolvedDirectory,
    pub export: ResolvedDirectory,
    pub images: ResolvedDirectory,
}

impl PathConfig {
    pub fn new(
        designs: impl AsRef<Path>,
        export: impl AsRef<Path>,
        images: impl AsRef<Path>,
    ) -> Self {
        Self {
            designs: ResolvedDirectory::new(designs),
            export: ResolvedDirectory::new(export),
            images: ResolvedDirectory::new(images),
        }
    }

    /// Resolve all three directories from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve all three directories through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            designs: resolve_directory(DirectoryKind::Designs, &lookup),
            export: resolve_directory(DirectoryKind::Export, &lookup),
            images: resolve_directory(DirectoryKind::Images, &lookup),
        }
    }

    pub fn get(&self, kind: DirectoryKind) -> &ResolvedDirectory {
        match kind {
            DirectoryKind::Designs => &self.designs,
            DirectoryKind::Export => &self.export,
            DirectoryKind::Images => &self.images,
        }
    }
}
