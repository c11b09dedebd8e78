use crate::error::{ChefAnalyzeError, Result};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

pub const DEFAULT_CHEF_DIRECTORY: &str = ".chef";
pub const DEFAULT_CHEF_WORKSTATION_DIRECTORY: &str = ".chef-workstation";
pub const DEFAULT_FILE_NAME: &str = "config.toml";

/// Finds the Chef Workstation configuration file (`config.toml`) in the
/// current directory or, failing that, in the user's home directory.
pub fn find_chef_workstation_config_file() -> Result<PathBuf> {
    find_config_file(DEFAULT_FILE_NAME)
}

/// Finds `name` inside `.chef/` or `.chef-workstation/` of the current
/// directory, then of the user's home directory.
pub fn find_config_file(name: &str) -> Result<PathBuf> {
    find_config_file_from(name, std::env::current_dir, dirs::home_dir)
}

/// Same search as [`find_config_file`] with caller-supplied roots.
///
/// `home` is only called when no candidate under `cwd` exists, so a
/// missing home directory never masks a hit in the working directory.
pub fn find_config_file_from<C, H>(name: &str, cwd: C, home: H) -> Result<PathBuf>
where
    C: FnOnce() -> io::Result<PathBuf>,
    H: FnOnce() -> Option<PathBuf>,
{
    if !is_plain_relative(name) {
        return Err(ChefAnalyzeError::InvalidFileName(name.to_string()));
    }

    let mut searched = Vec::with_capacity(4);

    let cwd = cwd().map_err(ChefAnalyzeError::CurrentDirectory)?;
    if let Some(found) = first_existing(&cwd, name, &mut searched) {
        return Ok(found);
    }

    let home = home().ok_or(ChefAnalyzeError::HomeDirectory)?;
    if let Some(found) = first_existing(&home, name, &mut searched) {
        return Ok(found);
    }

    debug!(name = %name, searched = ?searched, "Config file not found");
    Err(ChefAnalyzeError::ConfigNotFound {
        name: name.to_string(),
        searched,
    })
}

/// Candidate paths for `name` under `dir`, highest priority first.
pub fn candidates(dir: &Path, name: &str) -> [PathBuf; 2] {
    [
        dir.join(DEFAULT_CHEF_DIRECTORY).join(name),
        dir.join(DEFAULT_CHEF_WORKSTATION_DIRECTORY).join(name),
    ]
}

// Only `Normal` components, so a joined candidate stays under its root.
fn is_plain_relative(name: &str) -> bool {
    let path = Path::new(name);
    path.components().next().is_some()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

fn first_existing(dir: &Path, name: &str, searched: &mut Vec<PathBuf>) -> Option<PathBuf> {
    for candidate in candidates(dir, name) {
        if fs::metadata(&candidate).is_ok() {
            debug!(path = %candidate.display(), "Found config file");
            return Some(candidate);
        }
        searched.push(candidate);
    }
    None
}
