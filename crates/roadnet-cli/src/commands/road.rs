//! Road command handlers.

use anyhow::{bail, Result};

use roadnet_lib::format_distance;

use crate::output::{emit, Notice, OutputFormat};
use crate::session::MapSession;

pub fn handle_road_add(
    session: &mut MapSession,
    format: OutputFormat,
    from: &str,
    to: &str,
    bidirectional: bool,
) -> Result<()> {
    let network = session.network();
    let from_id = network.resolve_place(from)?;
    let to_id = network.resolve_place(to)?;

    let network = session.network_mut();
    let length = if bidirectional {
        network.add_bidirectional_road(from_id, to_id)?
    } else {
        network.add_road(from_id, to_id)?
    };
    let arrow = if bidirectional { "<->" } else { "->" };
    emit(
        format,
        &Notice::new(
            "road_added",
            from_id,
            format!(
                "Added road {from_id} {arrow} {to_id} ({})",
                format_distance(length)
            ),
        ),
    )?;
    Ok(())
}

pub fn handle_road_remove(
    session: &mut MapSession,
    format: OutputFormat,
    from: &str,
    to: &str,
    bidirectional: bool,
) -> Result<()> {
    let network = session.network();
    let from_id = network.resolve_place(from)?;
    let to_id = network.resolve_place(to)?;
    let exists = network.has_road(from_id, to_id)
        || (bidirectional && network.has_road(to_id, from_id));
    if !exists {
        bail!("no road from {from_id} to {to_id}");
    }

    let network = session.network_mut();
    if bidirectional {
        network.remove_bidirectional_road(from_id, to_id)?;
    } else {
        network.remove_road(from_id, to_id)?;
    }
    let arrow = if bidirectional { "<->" } else { "->" };
    emit(
        format,
        &Notice::new(
            "road_removed",
            from_id,
            format!("Removed road {from_id} {arrow} {to_id}"),
        ),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_network;
    use roadnet_lib::place_id;
    use std::path::PathBuf;

    fn session() -> MapSession {
        MapSession::from_network(PathBuf::from("unused.json"), sample_network())
    }

    #[test]
    fn add_by_name_across_towns() {
        let mut session = session();
        handle_road_add(&mut session, OutputFormat::Text, "Tower", "Gate", false).expect("add");
        assert!(session.network().has_road(place_id(2, 1), place_id(1, 1)));
    }

    #[test]
    fn remove_missing_road_is_an_error() {
        let mut session = session();
        let err =
            handle_road_remove(&mut session, OutputFormat::Text, "Keep", "Gate", false).unwrap_err();
        assert!(err.to_string().contains("no road"));
        assert!(!session.is_dirty());
    }

    #[test]
    fn remove_bidirectional_drops_both_directions() {
        let mut session = session();
        handle_road_remove(&mut session, OutputFormat::Text, "Gate", "Well", true).expect("remove");
        assert!(!session.network().has_road(place_id(1, 1), place_id(1, 2)));
        assert!(!session.network().has_road(place_id(1, 2), place_id(1, 1)));
    }
}
