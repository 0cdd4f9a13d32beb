use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the map inside the platform data directory.
const MAP_FILENAME: &str = "roadnet.json";

/// Environment variable overriding the map location.
pub const MAP_PATH_ENV: &str = "ROADNET_MAP";

/// Resolve the default map location using platform-specific project directories.
pub fn default_map_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "roadnet", "roadnet").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(MAP_FILENAME))
}

/// Resolve which map file to use.
///
/// The resolution order is:
/// 1. Explicit `target` argument when provided.
/// 2. `ROADNET_MAP` environment variable.
/// 3. Platform data directory (see [`default_map_path`]).
pub fn resolve_map_path(target: Option<&Path>) -> Result<PathBuf> {
    if let Some(explicit) = target {
        return Ok(explicit.to_path_buf());
    }

    if let Some(env_path) = env::var_os(MAP_PATH_ENV).filter(|value| !value.is_empty()) {
        let path = PathBuf::from(env_path);
        debug!(path = %path.display(), "using map path from {MAP_PATH_ENV}");
        return Ok(path);
    }

    default_map_path()
}
