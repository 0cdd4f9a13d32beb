//! Load-modify-save wrapper around the map file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use roadnet_lib::{resolve_map_path, RoadNetwork};

/// A network loaded from disk for the duration of one command.
///
/// Mutable access marks the session dirty; [`MapSession::commit`] writes the
/// map back only in that case.
#[derive(Debug)]
pub struct MapSession {
    path: PathBuf,
    network: RoadNetwork,
    dirty: bool,
}

impl MapSession {
    /// Open the map at `target` (or the resolved default location).
    ///
    /// A missing file yields an empty network; it is created on the first
    /// commit that changes something.
    pub fn open(target: Option<&Path>) -> Result<Self> {
        let path = resolve_map_path(target).context("failed to resolve the map location")?;
        let network = if path.exists() {
            RoadNetwork::load(&path)
                .with_context(|| format!("failed to load map from {}", path.display()))?
        } else {
            info!(path = %path.display(), "map file not found; starting with an empty network");
            RoadNetwork::new()
        };
        Ok(Self {
            path,
            network,
            dirty: false,
        })
    }

    /// Wrap an in-memory network without touching the filesystem until commit.
    pub fn from_network(path: PathBuf, network: RoadNetwork) -> Self {
        Self {
            path,
            network,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn network_mut(&mut self) -> &mut RoadNetwork {
        self.dirty = true;
        &mut self.network
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist the network if any command mutated it.
    pub fn commit(self) -> Result<()> {
        if !self.dirty {
            debug!(path = %self.path.display(), "map unchanged; skipping save");
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        self.network
            .save(&self.path)
            .with_context(|| format!("failed to save map to {}", self.path.display()))
    }
}
