use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::place::{town_of, Place, PlaceId, TownId};
use crate::town::Town;

/// A directed road as listed by the `roads_*` queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Road {
    pub from: PlaceId,
    pub to: PlaceId,
    pub length: f64,
}

/// All towns of a map, keyed by town id.
///
/// Places are resolved by the town encoded in the high half of their id,
/// so lookups cost one map probe per level regardless of network size.
/// Roads that cross towns are stored as plain target ids on the source
/// place; removing a town leaves such roads dangling and unreachable.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    towns: BTreeMap<TownId, Town>,
}

impl RoadNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Towns in ascending id order.
    pub fn towns(&self) -> impl Iterator<Item = &Town> {
        self.towns.values()
    }

    pub fn town_ids(&self) -> Vec<TownId> {
        self.towns.keys().copied().collect()
    }

    pub fn town(&self, id: TownId) -> Option<&Town> {
        self.towns.get(&id)
    }

    pub fn town_mut(&mut self, id: TownId) -> Option<&mut Town> {
        self.towns.get_mut(&id)
    }

    pub fn has_town(&self, id: TownId) -> bool {
        self.towns.contains_key(&id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.towns.get(&town_of(id))?.place(id)
    }

    pub fn place_count(&self) -> usize {
        self.towns.values().map(Town::len).sum()
    }

    pub fn add_town(&mut self, id: TownId, name: impl Into<String>) -> Result<&mut Town> {
        if self.towns.contains_key(&id) {
            return Err(Error::DuplicateTown { id });
        }
        let town = Town::new(id, name)?;
        debug!(town = id, name = town.name(), "added town");
        Ok(self.towns.entry(id).or_insert(town))
    }

    pub fn remove_town(&mut self, id: TownId) -> bool {
        let removed = self.towns.remove(&id).is_some();
        if removed {
            debug!(town = id, "removed town");
        }
        removed
    }

    pub fn rename_town(&mut self, id: TownId, name: impl Into<String>) -> bool {
        match self.towns.get_mut(&id) {
            Some(town) => {
                town.rename(name);
                true
            }
            None => false,
        }
    }

    pub fn rename_place(&mut self, id: PlaceId, name: impl Into<String>) -> bool {
        self.towns
            .get_mut(&town_of(id))
            .map(|town| town.rename_place(id, name))
            .unwrap_or(false)
    }

    /// Add the road `from -> to`, which may leave the source town.
    pub fn add_road(&mut self, from: PlaceId, to: PlaceId) -> Result<f64> {
        let from_town = town_of(from);
        if from_town == town_of(to) {
            return self
                .towns
                .get_mut(&from_town)
                .ok_or(Error::UnknownTown { id: from_town })?
                .add_road(from, to);
        }
        if !self.towns.contains_key(&from_town) {
            return Err(Error::UnknownTown { id: from_town });
        }
        let target = self
            .place(to)
            .map(Place::plane)
            .ok_or(Error::UnknownPlace { id: to })?;
        self.towns
            .get_mut(&from_town)
            .ok_or(Error::UnknownTown { id: from_town })?
            .add_intercity_road(from, to, target)
    }

    /// Add roads in both directions and return their common length.
    pub fn add_bidirectional_road(&mut self, from: PlaceId, to: PlaceId) -> Result<f64> {
        let from_town = town_of(from);
        if from_town == town_of(to) {
            return self
                .towns
                .get_mut(&from_town)
                .ok_or(Error::UnknownTown { id: from_town })?
                .add_bidirectional_road(from, to);
        }
        let there = self.add_road(from, to)?;
        let back = self.add_road(to, from)?;
        Ok(there.max(back))
    }

    /// Remove the road `from -> to`. Fails only when the source town is
    /// unknown; a missing road yields `false`.
    pub fn remove_road(&mut self, from: PlaceId, to: PlaceId) -> Result<bool> {
        let from_town = town_of(from);
        let town = self
            .towns
            .get_mut(&from_town)
            .ok_or(Error::UnknownTown { id: from_town })?;
        Ok(town.remove_road(from, to))
    }

    /// Remove both directions; `true` when at least one road existed.
    pub fn remove_bidirectional_road(&mut self, from: PlaceId, to: PlaceId) -> Result<bool> {
        let there = self.remove_road(from, to)?;
        let back = self.remove_road(to, from)?;
        Ok(there || back)
    }

    pub fn has_road(&self, from: PlaceId, to: PlaceId) -> bool {
        self.place(from)
            .map(|place| place.has_road_to(to))
            .unwrap_or(false)
    }

    /// Length of `from -> to`, `0.0` when absent.
    pub fn road_length(&self, from: PlaceId, to: PlaceId) -> f64 {
        self.place(from)
            .map(|place| place.road_length_to(to))
            .unwrap_or(0.0)
    }

    /// Outgoing roads of `id`, sorted by target.
    pub fn roads_from(&self, id: PlaceId) -> Vec<Road> {
        self.place(id)
            .map(|place| {
                place
                    .sorted_roads()
                    .into_iter()
                    .map(|(to, length)| Road {
                        from: id,
                        to,
                        length,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every road in the network that ends at `id`, sorted by source.
    pub fn roads_into(&self, id: PlaceId) -> Vec<Road> {
        self.towns
            .values()
            .flat_map(Town::places)
            .filter_map(|place| {
                place.roads().get(&id).map(|&length| Road {
                    from: place.id(),
                    to: id,
                    length,
                })
            })
            .collect()
    }

    /// Every road starting in `town`, including those that leave it.
    pub fn roads_of_town(&self, town: TownId) -> Result<Vec<Road>> {
        let town = self.town(town).ok_or(Error::UnknownTown { id: town })?;
        Ok(town
            .places()
            .flat_map(|place| {
                place.sorted_roads().into_iter().map(move |(to, length)| Road {
                    from: place.id(),
                    to,
                    length,
                })
            })
            .collect())
    }
}
