//! Name lookup over towns and places.
//!
//! Fuzzy search here means case-insensitive substring matching. Results are
//! sorted by display name with a stable sort, so entries sharing a name keep
//! the network's traversal order (ascending town id, then place id).
//! Similarity ranking with `strsim` is only used to suggest alternatives
//! when a name matches nothing.

use std::cmp::Ordering;

use strsim::jaro_winkler;

use crate::error::{Error, Result};
use crate::network::RoadNetwork;
use crate::place::{PlaceId, TownId};

/// Minimum Jaro-Winkler similarity for a name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

pub(crate) fn contains_ignore_case(haystack: &str, keyword: &str) -> bool {
    haystack.to_lowercase().contains(&keyword.to_lowercase())
}

pub(crate) fn sort_by_name<I>(hits: &mut [(I, String)]) {
    hits.sort_by(|a, b| a.1.cmp(&b.1));
}

impl RoadNetwork {
    /// Places whose town name followed by place name contains `keyword`,
    /// ignoring case. Display names are `"<town> <place>"`.
    pub fn fuzzy_find_places(&self, keyword: &str) -> Vec<(PlaceId, String)> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let keyword = keyword.to_lowercase();
        let mut hits = Vec::new();
        for town in self.towns() {
            for place in town.places() {
                let haystack = format!("{}{}", town.name(), place.name()).to_lowercase();
                if haystack.contains(&keyword) {
                    hits.push((place.id(), format!("{} {}", town.name(), place.name())));
                }
            }
        }
        sort_by_name(&mut hits);
        hits
    }

    /// Towns whose name contains `keyword`, ignoring case.
    pub fn fuzzy_find_towns(&self, keyword: &str) -> Vec<(TownId, String)> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(TownId, String)> = self
            .towns()
            .filter(|town| contains_ignore_case(town.name(), keyword))
            .map(|town| (town.id(), town.name().to_string()))
            .collect();
        sort_by_name(&mut hits);
        hits
    }

    /// Up to `limit` place names similar to `name`, most similar first.
    pub fn suggest_place_names(&self, name: &str, limit: usize) -> Vec<String> {
        let candidates = self
            .towns()
            .flat_map(|town| town.places().map(|place| place.name().to_string()));
        rank_similar(name, candidates, limit)
    }

    /// Up to `limit` town names similar to `name`, most similar first.
    pub fn suggest_town_names(&self, name: &str, limit: usize) -> Vec<String> {
        let candidates = self.towns().map(|town| town.name().to_string());
        rank_similar(name, candidates, limit)
    }

    /// Resolve user input to a town id: a number is taken as the id,
    /// anything else must match exactly one town by name.
    pub fn resolve_town(&self, input: &str) -> Result<TownId> {
        if let Ok(id) = input.trim().parse::<TownId>() {
            return Ok(id);
        }
        let hits = self.fuzzy_find_towns(input);
        match hits.len() {
            0 => Err(Error::UnknownName {
                kind: "town",
                name: input.to_string(),
                suggestions: self.suggest_town_names(input, 3),
            }),
            1 => Ok(hits[0].0),
            _ => Err(Error::AmbiguousName {
                kind: "town",
                name: input.to_string(),
                candidates: hits
                    .into_iter()
                    .map(|(id, name)| (u64::from(id), name))
                    .collect(),
            }),
        }
    }

    /// Resolve user input to a place id: a number is taken as the composite
    /// id, anything else must match exactly one place by name.
    pub fn resolve_place(&self, input: &str) -> Result<PlaceId> {
        if let Ok(id) = input.trim().parse::<PlaceId>() {
            return Ok(id);
        }
        let hits = self.fuzzy_find_places(input);
        match hits.len() {
            0 => Err(Error::UnknownName {
                kind: "place",
                name: input.to_string(),
                suggestions: self.suggest_place_names(input, 3),
            }),
            1 => Ok(hits[0].0),
            _ => Err(Error::AmbiguousName {
                kind: "place",
                name: input.to_string(),
                candidates: hits,
            }),
        }
    }

    /// Resolve a serial number or place name inside one town.
    pub fn resolve_local_place(&self, town: TownId, input: &str) -> Result<u32> {
        if let Ok(serial) = input.trim().parse::<u32>() {
            return Ok(serial);
        }
        let town = self.town(town).ok_or(Error::UnknownTown { id: town })?;
        let hits = town.find_places(input);
        match hits.len() {
            0 => Err(Error::UnknownName {
                kind: "place",
                name: input.to_string(),
                suggestions: rank_similar(
                    input,
                    town.places().map(|place| place.name().to_string()),
                    3,
                ),
            }),
            1 => Ok(hits[0].0),
            _ => Err(Error::AmbiguousName {
                kind: "place",
                name: input.to_string(),
                candidates: hits
                    .into_iter()
                    .map(|(serial, name)| (u64::from(serial), name))
                    .collect(),
            }),
        }
    }
}

fn rank_similar(name: &str, candidates: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut scored: Vec<(f64, String)> = candidates
        .map(|candidate| (jaro_winkler(&needle, &candidate.to_lowercase()), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });
    scored.dedup_by(|a, b| a.1 == b.1);
    scored.truncate(limit);
    scored.into_iter().map(|(_, name)| name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::place::place_id;

    fn network() -> RoadNetwork {
        let mut network = RoadNetwork::new();
        let north = network.add_town(1, "Northport").unwrap();
        north
            .add_local_place(1, "Station", GeoPoint::new(10.0, 50.0))
            .unwrap();
        north
            .add_local_place(2, "Harbor", GeoPoint::new(10.01, 50.0))
            .unwrap();
        let south = network.add_town(2, "Southport").unwrap();
        south
            .add_local_place(1, "Station", GeoPoint::new(10.0, 49.9))
            .unwrap();
        network.add_town(3, "Inland").unwrap();
        network
    }

    #[test]
    fn empty_keyword_matches_nothing() {
        let network = network();
        assert!(network.fuzzy_find_places("").is_empty());
        assert!(network.fuzzy_find_towns("").is_empty());
    }

    #[test]
    fn town_search_sorts_by_name() {
        let network = network();
        assert_eq!(
            network.fuzzy_find_towns("PORT"),
            vec![(1, "Northport".to_string()), (2, "Southport".to_string())]
        );
    }

    #[test]
    fn place_search_spans_town_and_place_names() {
        let network = network();
        let hits = network.fuzzy_find_places("portstat");
        assert_eq!(
            hits,
            vec![
                (place_id(1, 1), "Northport Station".to_string()),
                (place_id(2, 1), "Southport Station".to_string()),
            ]
        );
        let hits = network.fuzzy_find_places("harb");
        assert_eq!(hits, vec![(place_id(1, 2), "Northport Harbor".to_string())]);
    }

    #[test]
    fn resolution_prefers_numbers_then_names() {
        let network = network();
        assert_eq!(network.resolve_town("42").unwrap(), 42);
        assert_eq!(network.resolve_town("inl").unwrap(), 3);
        assert!(matches!(
            network.resolve_town("port"),
            Err(Error::AmbiguousName { .. })
        ));
        assert_eq!(network.resolve_place("harbor").unwrap(), place_id(1, 2));
        assert_eq!(network.resolve_local_place(2, "stat").unwrap(), 1);
    }

    #[test]
    fn unknown_names_carry_suggestions() {
        let network = network();
        let err = network.resolve_town("Northprot").unwrap_err();
        match err {
            Error::UnknownName { suggestions, .. } => {
                assert_eq!(suggestions.first().map(String::as_str), Some("Northport"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(network.suggest_place_names("Stattion", 3).contains(&"Station".to_string()));
        assert_eq!(network.suggest_place_names("Stattion", 3).len(), 1);
    }
}
