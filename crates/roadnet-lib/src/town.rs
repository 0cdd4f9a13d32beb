use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{GeoPoint, Point2d};
use crate::place::{place_id, serial_of, Place, PlaceId, TownId};
use crate::search::{contains_ignore_case, sort_by_name};

/// A named group of places sharing a town id.
///
/// The town exclusively owns its places. Roads between two places of the
/// same town are added through the town so the target's planar coordinate
/// can be looked up locally; roads leaving the town need the caller to
/// supply the target coordinate (see [`Town::add_intercity_road`]).
#[derive(Debug, Clone)]
pub struct Town {
    id: TownId,
    name: String,
    places: BTreeMap<PlaceId, Place>,
}

impl Town {
    pub fn new(id: TownId, name: impl Into<String>) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidIdentifier { kind: "town" });
        }
        Ok(Self {
            id,
            name: name.into(),
            places: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> TownId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Places in ascending id order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn has_place(&self, id: PlaceId) -> bool {
        self.places.contains_key(&id)
    }

    pub fn has_local_place(&self, serial: u32) -> bool {
        self.has_place(self.local_id(serial))
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.places.get(&id)
    }

    pub fn local_place(&self, serial: u32) -> Option<&Place> {
        self.place(self.local_id(serial))
    }

    /// Insert a place under its full composite id.
    ///
    /// The town half of `id` is not checked against this town. Use
    /// [`Town::add_local_place`] to build a matching id; the map loader
    /// rejects places filed under the wrong town before calling this.
    pub fn add_place(
        &mut self,
        id: PlaceId,
        name: impl Into<String>,
        geo: GeoPoint,
    ) -> Result<&mut Place> {
        if self.places.contains_key(&id) {
            return Err(Error::DuplicatePlace { id });
        }
        let place = Place::new(id, name, geo)?;
        debug!(town = self.id, place = id, name = place.name(), "added place");
        Ok(self.places.entry(id).or_insert(place))
    }

    /// Insert a place by its serial number within this town.
    pub fn add_local_place(
        &mut self,
        serial: u32,
        name: impl Into<String>,
        geo: GeoPoint,
    ) -> Result<&mut Place> {
        self.add_place(self.local_id(serial), name, geo)
    }

    /// Remove a place and every road in this town that points at it.
    pub fn remove_place(&mut self, id: PlaceId) -> bool {
        if self.places.remove(&id).is_none() {
            return false;
        }
        for place in self.places.values_mut() {
            place.remove_road(id);
        }
        debug!(town = self.id, place = id, "removed place");
        true
    }

    pub fn remove_local_place(&mut self, serial: u32) -> bool {
        self.remove_place(self.local_id(serial))
    }

    pub fn rename_place(&mut self, id: PlaceId, name: impl Into<String>) -> bool {
        match self.places.get_mut(&id) {
            Some(place) => {
                place.rename(name);
                true
            }
            None => false,
        }
    }

    /// Add the road `from -> to` between two places of this town.
    pub fn add_road(&mut self, from: PlaceId, to: PlaceId) -> Result<f64> {
        if !self.places.contains_key(&from) {
            return Err(Error::UnknownPlace { id: from });
        }
        let target = self
            .places
            .get(&to)
            .map(Place::plane)
            .ok_or(Error::UnknownPlace { id: to })?;
        self.add_intercity_road(from, to, target)
    }

    pub fn add_local_road(&mut self, from_serial: u32, to_serial: u32) -> Result<f64> {
        self.add_road(self.local_id(from_serial), self.local_id(to_serial))
    }

    /// Add roads in both directions. Both lengths come from the same two
    /// planar coordinates, so they are equal.
    pub fn add_bidirectional_road(&mut self, from: PlaceId, to: PlaceId) -> Result<f64> {
        let there = self.add_road(from, to)?;
        let back = self.add_road(to, from)?;
        Ok(there.max(back))
    }

    pub fn add_local_bidirectional_road(&mut self, from_serial: u32, to_serial: u32) -> Result<f64> {
        self.add_bidirectional_road(self.local_id(from_serial), self.local_id(to_serial))
    }

    /// Add a road from a local place to a place owned elsewhere, whose
    /// planar coordinate the caller resolved.
    pub fn add_intercity_road(
        &mut self,
        from: PlaceId,
        to: PlaceId,
        target_plane: Point2d,
    ) -> Result<f64> {
        let place = self
            .places
            .get_mut(&from)
            .ok_or(Error::UnknownPlace { id: from })?;
        let length = place.add_road(to, target_plane);
        debug!(from, to, length, "added road");
        Ok(length)
    }

    /// Remove the road `from -> to`; `false` when either is absent.
    pub fn remove_road(&mut self, from: PlaceId, to: PlaceId) -> bool {
        self.places
            .get_mut(&from)
            .map(|place| place.remove_road(to))
            .unwrap_or(false)
    }

    pub fn has_road(&self, from: PlaceId, to: PlaceId) -> bool {
        self.place(from)
            .map(|place| place.has_road_to(to))
            .unwrap_or(false)
    }

    pub fn has_local_road(&self, from_serial: u32, to_serial: u32) -> bool {
        self.has_road(self.local_id(from_serial), self.local_id(to_serial))
    }

    /// Length of `from -> to`, `0.0` when the road or `from` is absent.
    pub fn road_length(&self, from: PlaceId, to: PlaceId) -> f64 {
        self.place(from)
            .map(|place| place.road_length_to(to))
            .unwrap_or(0.0)
    }

    pub fn local_road_length(&self, from_serial: u32, to_serial: u32) -> f64 {
        self.road_length(self.local_id(from_serial), self.local_id(to_serial))
    }

    /// Case-insensitive substring search over place names in this town,
    /// returning `(serial, name)` pairs sorted by name.
    pub fn find_places(&self, keyword: &str) -> Vec<(u32, String)> {
        if keyword.is_empty() {
            return Vec::new();
        }
        let mut hits: Vec<(u32, String)> = self
            .places
            .values()
            .filter(|place| contains_ignore_case(place.name(), keyword))
            .map(|place| (serial_of(place.id()), place.name().to_string()))
            .collect();
        sort_by_name(&mut hits);
        hits
    }

    fn local_id(&self, serial: u32) -> PlaceId {
        place_id(self.id, serial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn town() -> Town {
        let mut town = Town::new(3, "Harbor").unwrap();
        town.add_local_place(1, "Pier", GeoPoint::new(121.00, 31.00))
            .unwrap();
        town.add_local_place(2, "Market", GeoPoint::new(121.01, 31.00))
            .unwrap();
        town.add_local_place(3, "Lighthouse", GeoPoint::new(121.02, 31.01))
            .unwrap();
        town
    }

    #[test]
    fn zero_town_id_is_rejected() {
        assert!(matches!(
            Town::new(0, "Void"),
            Err(Error::InvalidIdentifier { kind: "town" })
        ));
    }

    #[test]
    fn duplicate_place_leaves_original() {
        let mut town = town();
        let err = town
            .add_local_place(1, "Other", GeoPoint::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePlace { id } if id == place_id(3, 1)));
        assert_eq!(town.local_place(1).unwrap().name(), "Pier");
        assert_eq!(town.len(), 3);
    }

    #[test]
    fn add_place_and_local_place_share_ids() {
        let mut town = town();
        let err = town
            .add_place(place_id(3, 2), "Again", GeoPoint::new(0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicatePlace { .. }));
        assert!(town.has_place(place_id(3, 2)));
        assert!(town.has_local_place(2));
    }

    #[test]
    fn road_to_unknown_place_fails() {
        let mut town = town();
        let err = town.add_local_road(1, 9).unwrap_err();
        assert!(matches!(err, Error::UnknownPlace { id } if id == place_id(3, 9)));
        let err = town.add_local_road(9, 1).unwrap_err();
        assert!(matches!(err, Error::UnknownPlace { id } if id == place_id(3, 9)));
    }

    #[test]
    fn bidirectional_roads_have_equal_lengths() {
        let mut town = town();
        let length = town.add_local_bidirectional_road(1, 3).unwrap();
        assert!(length > 0.0);
        assert_eq!(town.local_road_length(1, 3), town.local_road_length(3, 1));
        assert_eq!(town.local_road_length(1, 3), length);
    }

    #[test]
    fn removing_place_drops_incoming_roads() {
        let mut town = town();
        town.add_local_road(1, 2).unwrap();
        town.add_local_road(3, 2).unwrap();
        town.add_local_road(1, 3).unwrap();

        assert!(town.remove_local_place(2));
        assert!(!town.remove_local_place(2));
        for place in town.places() {
            assert!(!place.has_road_to(place_id(3, 2)));
        }
        assert!(town.has_local_road(1, 3));
    }

    #[test]
    fn intercity_road_uses_supplied_coordinate() {
        let mut town = town();
        let far = GeoPoint::new(121.5, 31.0).project();
        let length = town
            .add_intercity_road(place_id(3, 1), place_id(8, 1), far)
            .unwrap();
        let expected = town.local_place(1).unwrap().plane().distance_to(&far);
        assert_eq!(length, expected);
        assert!(town.has_road(place_id(3, 1), place_id(8, 1)));
    }

    #[test]
    fn rename_place_reports_absence() {
        let mut town = town();
        assert!(town.rename_place(place_id(3, 1), "Old Pier"));
        assert!(!town.rename_place(place_id(3, 99), "Ghost"));
        assert_eq!(town.local_place(1).unwrap().name(), "Old Pier");
    }

    #[test]
    fn find_places_matches_substring_case_insensitively() {
        let town = town();
        assert_eq!(
            town.find_places("LIGHT"),
            vec![(3, "Lighthouse".to_string())]
        );
        assert!(town.find_places("").is_empty());
        let hits = town.find_places("e");
        let names: Vec<_> = hits.iter().map(|(_, name)| name.as_str()).collect();
        assert_eq!(names, vec!["Lighthouse", "Market", "Pier"]);
    }
}
