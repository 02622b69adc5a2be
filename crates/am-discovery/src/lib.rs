//! Finds the projects inside an extracted archive.
//!
//! Projects are assumed to live in their own directories: a directory is a
//! project when it holds a well-known marker or any regular file, otherwise
//! its subdirectories are searched.

pub mod constants;
pub mod error;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use am_git::GitRepo;
use am_types::ProjectFiles;
use ignore::WalkBuilder;
use tracing::{debug, info, instrument};

pub use constants::*;
pub use error::{DiscoveryError, DiscoveryResult};

/// Discover every project below `root`.
///
/// Loose files at the top level are ignored, as is the `__MACOSX` folder.
#[instrument]
pub fn discover_projects(root: &Path) -> DiscoveryResult<Vec<ProjectFiles>> {
    if !root.is_dir() {
        return Err(DiscoveryError::NotFound(root.display().to_string()));
    }

    let mut projects = Vec::new();
    for dir in subdirectories(root)? {
        if dir.file_name().is_some_and(|n| n == MACOSX_DIR) {
            continue;
        }
        process_directory(&dir, &mut projects)?;
    }

    info!("Discovered {} projects in {}", projects.len(), root.display());
    Ok(projects)
}

fn process_directory(dir: &Path, projects: &mut Vec<ProjectFiles>) -> DiscoveryResult<()> {
    if !dir_is_project(dir)? {
        for sub_dir in subdirectories(dir)? {
            process_directory(&sub_dir, projects)?;
        }
        return Ok(());
    }

    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    let mut project = ProjectFiles::new(name, dir).with_files(filter_files(dir)?);

    match GitRepo::open(dir) {
        Ok(_) => project = project.with_repo(dir),
        Err(e) => debug!(path = %dir.display(), error = %e, "No git repository"),
    }

    debug!(
        project = %project.name,
        files = project.file_paths.len(),
        git = project.repo_path.is_some(),
        "Found project"
    );
    projects.push(project);
    Ok(())
}

/// A directory is a project when it holds an instant marker or at least
/// one regular file that is not junk
pub fn dir_is_project(dir: &Path) -> DiscoveryResult<bool> {
    if INSTANT_PROJECT_MARKERS
        .iter()
        .any(|marker| dir.join(marker).exists())
    {
        return Ok(true);
    }

    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file && !name_in(JUNK_FILES, &entry.file_name()) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Files of a project worth analyzing, relative to `project_root`,
/// `/`-separated and sorted
pub fn filter_files(project_root: &Path) -> DiscoveryResult<Vec<String>> {
    let walker = WalkBuilder::new(project_root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
            !(is_dir && entry.depth() > 0 && name_in(IGNORE_DIRS, entry.file_name()))
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if name_in(IGNORE_FILES, entry.file_name())
            || IGNORE_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext))
        {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(project_root)
            .unwrap_or(entry.path());
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    files.sort();
    Ok(files)
}

fn name_in(list: &[&str], name: &OsStr) -> bool {
    let name = name.to_string_lossy();
    list.iter().any(|candidate| name == *candidate)
}

fn subdirectories(dir: &Path) -> DiscoveryResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))? {
        let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}
