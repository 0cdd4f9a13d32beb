//! Listing handlers for towns, places and roads.

use anyhow::{anyhow, ensure, Result};

use roadnet_lib::{Error as LibError, Road};

use crate::output::{emit, OutputFormat, PlaceRow, RoadRow, TownRoads, TownRow};
use crate::session::MapSession;

/// Which roads `show roads` lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoadFilter {
    /// Every road whose source lies in the town.
    OfTown(String),
    /// Roads leaving the place.
    From(String),
    /// Roads arriving at the place, from any town.
    To(String),
    /// Every road, grouped by the town it starts in.
    All,
}

pub fn handle_show_towns(session: &MapSession, format: OutputFormat) -> Result<()> {
    let rows: Vec<TownRow> = session.network().towns().map(TownRow::from).collect();
    emit(format, rows.as_slice())?;
    Ok(())
}

/// List the places of one town, or of every town when `town` is `None`.
pub fn handle_show_places(
    session: &MapSession,
    format: OutputFormat,
    town: Option<&str>,
) -> Result<()> {
    let network = session.network();
    let rows: Vec<PlaceRow> = match town {
        Some(input) => {
            let id = network.resolve_town(input)?;
            let town = network
                .town(id)
                .ok_or_else(|| anyhow!(LibError::UnknownTown { id }))?;
            town.places().map(PlaceRow::from).collect()
        }
        None => network
            .towns()
            .flat_map(|town| town.places())
            .map(PlaceRow::from)
            .collect(),
    };
    emit(format, rows.as_slice())?;
    Ok(())
}

pub fn handle_show_roads(
    session: &MapSession,
    format: OutputFormat,
    filter: &RoadFilter,
) -> Result<()> {
    let network = session.network();
    if *filter == RoadFilter::All {
        let groups = roads_by_town(session)?;
        emit(format, groups.as_slice())?;
        return Ok(());
    }
    let roads = select_roads(session, filter)?;
    let rows: Vec<RoadRow> = roads.iter().map(|road| RoadRow::new(network, road)).collect();
    emit(format, rows.as_slice())?;
    Ok(())
}

fn roads_by_town(session: &MapSession) -> Result<Vec<TownRoads>> {
    let network = session.network();
    network
        .towns()
        .map(|town| {
            let roads = network
                .roads_of_town(town.id())?
                .iter()
                .map(|road| RoadRow::new(network, road))
                .collect();
            Ok(TownRoads {
                town: town.id(),
                name: town.name().to_string(),
                roads,
            })
        })
        .collect()
}

fn select_roads(session: &MapSession, filter: &RoadFilter) -> Result<Vec<Road>> {
    let network = session.network();
    let roads = match filter {
        RoadFilter::OfTown(input) => network.roads_of_town(network.resolve_town(input)?)?,
        RoadFilter::From(input) => {
            let id = network.resolve_place(input)?;
            ensure!(network.place(id).is_some(), LibError::UnknownPlace { id });
            network.roads_from(id)
        }
        RoadFilter::To(input) => {
            let id = network.resolve_place(input)?;
            ensure!(network.place(id).is_some(), LibError::UnknownPlace { id });
            network.roads_into(id)
        }
        RoadFilter::All => network
            .town_ids()
            .into_iter()
            .map(|town| network.roads_of_town(town))
            .collect::<roadnet_lib::Result<Vec<_>>>()?
            .concat(),
    };
    Ok(roads)
}
