//! Town command handlers: add, remove and rename.

use anyhow::{bail, Result};

use roadnet_lib::TownId;

use crate::output::{emit, Notice, OutputFormat};
use crate::session::MapSession;

pub fn handle_town_add(
    session: &mut MapSession,
    format: OutputFormat,
    id: TownId,
    name: &str,
) -> Result<()> {
    session.network_mut().add_town(id, name)?;
    emit(
        format,
        &Notice::new("town_added", id.into(), format!("Added town {id} '{name}'")),
    )?;
    Ok(())
}

/// Remove a town and all its places. Roads from other towns into it are kept
/// and simply stop resolving.
pub fn handle_town_remove(session: &mut MapSession, format: OutputFormat, town: &str) -> Result<()> {
    let id = session.network().resolve_town(town)?;
    let name = match session.network().town(id) {
        Some(existing) => existing.name().to_string(),
        None => bail!(roadnet_lib::Error::UnknownTown { id }),
    };
    session.network_mut().remove_town(id);
    emit(
        format,
        &Notice::new("town_removed", id.into(), format!("Removed town {id} '{name}'")),
    )?;
    Ok(())
}

pub fn handle_town_rename(
    session: &mut MapSession,
    format: OutputFormat,
    town: &str,
    name: &str,
) -> Result<()> {
    let id = session.network().resolve_town(town)?;
    if !session.network_mut().rename_town(id, name) {
        bail!(roadnet_lib::Error::UnknownTown { id });
    }
    emit(
        format,
        &Notice::new("town_renamed", id.into(), format!("Renamed town {id} to '{name}'")),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_network;
    use std::path::PathBuf;

    fn session() -> MapSession {
        MapSession::from_network(PathBuf::from("unused.json"), sample_network())
    }

    #[test]
    fn remove_by_name_drops_places() {
        let mut session = session();
        handle_town_remove(&mut session, OutputFormat::Text, "ridge").expect("remove");
        assert!(!session.network().has_town(2));
        assert!(session.is_dirty());
    }

    #[test]
    fn unknown_town_leaves_session_clean() {
        let mut session = session();
        let err = handle_town_remove(&mut session, OutputFormat::Text, "7").unwrap_err();
        assert!(err.to_string().contains("unknown town 7"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn duplicate_town_is_rejected() {
        let mut session = session();
        let err = handle_town_add(&mut session, OutputFormat::Text, 1, "Again").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
