//! In-memory directory trees for the static map builder.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::GeneratorError;

/// A directory, its files and its subdirectories.
///
/// Files and children keep the order in which they were added; adding a
/// name that is already present is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDirInfo {
    /// Path segment of this directory (empty for the root).
    pub name: String,
    pub files: Vec<String>,
    pub children: Vec<ResourceDirInfo>,
    /// Whether this directory's own files become members.
    pub has_files: bool,
}

impl ResourceDirInfo {
    /// A new, empty directory whose files will be exposed.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            children: Vec::new(),
            has_files: true,
        }
    }

    /// Sets whether this directory's own files become members.
    pub fn with_files_exposed(mut self, exposed: bool) -> Self {
        self.has_files = exposed;
        self
    }

    pub fn add_file(&mut self, file: impl Into<String>) {
        let file = file.into();
        if !self.files.contains(&file) {
            self.files.push(file);
        }
    }

    pub fn add_sub_directory(&mut self, child: ResourceDirInfo) {
        if !self.children.iter().any(|c| c.name == child.name) {
            self.children.push(child);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.children.is_empty()
    }

    /// Reads a directory tree from disk.
    ///
    /// The root gets an empty name. Entries are added in name order so that
    /// scanning the same tree twice gives the same result. Symlinked
    /// directories are skipped; symlinked files are listed.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::Read` if a directory cannot be listed.
    #[instrument(skip(root), fields(root = %root.display()))]
    pub fn scan(root: &Path) -> Result<Self, GeneratorError> {
        scan_dir(root, String::new())
    }
}

fn scan_dir(dir: &Path, name: String) -> Result<ResourceDirInfo, GeneratorError> {
    let read_error = |source| GeneratorError::Read {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(read_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_error)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut info = ResourceDirInfo::new(name);
    for entry in entries {
        let path = entry.path();
        let entry_name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().map_err(read_error)?;

        if file_type.is_symlink() && path.is_dir() {
            debug!(path = %path.display(), "Skipping symlinked directory");
        } else if file_type.is_dir() {
            info.add_sub_directory(scan_dir(&path, entry_name)?);
        } else {
            info.add_file(entry_name);
        }
    }

    debug!(
        dir = %dir.display(),
        files = info.files.len(),
        children = info.children.len(),
        "Scanned directory"
    );

    Ok(info)
}
