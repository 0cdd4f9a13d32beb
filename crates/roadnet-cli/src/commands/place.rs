//! Place command handlers: add, remove and rename within a town.

use anyhow::{anyhow, bail, Result};

use roadnet_lib::{place_id, Error as LibError, GeoPoint, TownId};

use crate::output::{emit, Notice, OutputFormat};
use crate::session::MapSession;

/// Arguments for `place add`.
#[derive(Debug, Clone)]
pub struct AddPlaceArgs {
    pub town: String,
    pub serial: u32,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

pub fn handle_place_add(
    session: &mut MapSession,
    format: OutputFormat,
    args: &AddPlaceArgs,
) -> Result<()> {
    let town_id = session.network().resolve_town(&args.town)?;
    let town = session
        .network_mut()
        .town_mut(town_id)
        .ok_or(LibError::UnknownTown { id: town_id })?;
    let geo = GeoPoint::new(args.longitude, args.latitude);
    let id = town.add_local_place(args.serial, args.name.as_str(), geo)?.id();
    emit(
        format,
        &Notice::new(
            "place_added",
            id,
            format!("Added place {id} '{}' to {}", args.name, town.name()),
        ),
    )?;
    Ok(())
}

/// Remove a place and the roads of its town leading to it.
pub fn handle_place_remove(
    session: &mut MapSession,
    format: OutputFormat,
    town: &str,
    place: &str,
) -> Result<()> {
    let (town_id, serial) = resolve(session, town, place)?;
    let id = place_id(town_id, serial);
    let removed = session
        .network_mut()
        .town_mut(town_id)
        .map(|town| town.remove_local_place(serial))
        .unwrap_or(false);
    if !removed {
        bail!(LibError::UnknownPlace { id });
    }
    emit(
        format,
        &Notice::new("place_removed", id, format!("Removed place {id}")),
    )?;
    Ok(())
}

pub fn handle_place_rename(
    session: &mut MapSession,
    format: OutputFormat,
    town: &str,
    place: &str,
    name: &str,
) -> Result<()> {
    let (town_id, serial) = resolve(session, town, place)?;
    let id = place_id(town_id, serial);
    if !session.network_mut().rename_place(id, name) {
        bail!(LibError::UnknownPlace { id });
    }
    emit(
        format,
        &Notice::new("place_renamed", id, format!("Renamed place {id} to '{name}'")),
    )?;
    Ok(())
}

fn resolve(session: &MapSession, town: &str, place: &str) -> Result<(TownId, u32)> {
    let network = session.network();
    let town_id = network.resolve_town(town)?;
    if !network.has_town(town_id) {
        return Err(anyhow!(LibError::UnknownTown { id: town_id }));
    }
    let serial = network.resolve_local_place(town_id, place)?;
    Ok((town_id, serial))
}
