use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geo::{GeoPoint, Point2d};

/// Numeric identifier for a town.
pub type TownId = u32;

/// Composite identifier for a place: the owning town id in the high 32 bits
/// and a per-town serial number in the low 32 bits.
pub type PlaceId = u64;

/// Build the composite id for `serial` inside `town`.
pub fn place_id(town: TownId, serial: u32) -> PlaceId {
    (u64::from(town) << 32) | u64::from(serial)
}

/// Town encoded in the high half of a place id.
pub fn town_of(id: PlaceId) -> TownId {
    (id >> 32) as TownId
}

/// Per-town serial encoded in the low half of a place id.
pub fn serial_of(id: PlaceId) -> u32 {
    (id & 0xFFFF_FFFF) as u32
}

/// A located, named point with outgoing directed roads.
///
/// The planar coordinate is derived once at construction. Road lengths are
/// the planar distance to the target at the moment the road was added.
#[derive(Debug, Clone)]
pub struct Place {
    id: PlaceId,
    name: String,
    geo: GeoPoint,
    plane: Point2d,
    roads: HashMap<PlaceId, f64>,
}

impl Place {
    /// Create a place, projecting `geo` onto the local plane.
    pub fn new(id: PlaceId, name: impl Into<String>, geo: GeoPoint) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidIdentifier { kind: "place" });
        }
        Ok(Self {
            id,
            name: name.into(),
            geo,
            plane: geo.project(),
            roads: HashMap::new(),
        })
    }

    pub fn id(&self) -> PlaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn geo(&self) -> GeoPoint {
        self.geo
    }

    pub fn longitude(&self) -> f64 {
        self.geo.longitude
    }

    pub fn latitude(&self) -> f64 {
        self.geo.latitude
    }

    pub fn plane(&self) -> Point2d {
        self.plane
    }

    /// Outgoing roads keyed by target id.
    pub fn roads(&self) -> &HashMap<PlaceId, f64> {
        &self.roads
    }

    /// Outgoing roads sorted by target id.
    pub fn sorted_roads(&self) -> Vec<(PlaceId, f64)> {
        let mut roads: Vec<_> = self.roads.iter().map(|(&to, &w)| (to, w)).collect();
        roads.sort_unstable_by_key(|&(to, _)| to);
        roads
    }

    /// Store (or overwrite) the road to `target`, returning its length.
    pub fn add_road(&mut self, target: PlaceId, target_plane: Point2d) -> f64 {
        let length = self.plane.distance_to(&target_plane);
        self.roads.insert(target, length);
        length
    }

    pub fn remove_road(&mut self, target: PlaceId) -> bool {
        self.roads.remove(&target).is_some()
    }

    pub fn has_road_to(&self, target: PlaceId) -> bool {
        self.roads.contains_key(&target)
    }

    /// Length of the road to `target`, or `0.0` when there is none.
    pub fn road_length_to(&self, target: PlaceId) -> f64 {
        self.roads.get(&target).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_ids_split_back() {
        let id = place_id(7, 42);
        assert_eq!(id, (7u64 << 32) + 42);
        assert_eq!(town_of(id), 7);
        assert_eq!(serial_of(id), 42);
    }

    #[test]
    fn zero_id_is_rejected() {
        let err = Place::new(0, "Nowhere", GeoPoint::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidIdentifier { kind: "place" }));
    }

    #[test]
    fn roads_are_directed_and_missing_length_is_zero() {
        let mut a = Place::new(place_id(1, 1), "A", GeoPoint::new(116.0, 39.0)).unwrap();
        let b = Place::new(place_id(1, 2), "B", GeoPoint::new(116.01, 39.0)).unwrap();

        let length = a.add_road(b.id(), b.plane());
        assert!(length > 0.0);
        assert!(a.has_road_to(b.id()));
        assert_eq!(a.road_length_to(b.id()), length);
        assert!(!b.has_road_to(a.id()));
        assert_eq!(b.road_length_to(a.id()), 0.0);

        assert!(a.remove_road(b.id()));
        assert!(!a.remove_road(b.id()));
        assert_eq!(a.road_length_to(b.id()), 0.0);
    }

    #[test]
    fn rename_keeps_coordinates() {
        let mut a = Place::new(place_id(1, 1), "A", GeoPoint::new(116.0, 39.0)).unwrap();
        let plane = a.plane();
        a.rename("Renamed");
        assert_eq!(a.name(), "Renamed");
        assert_eq!(a.plane(), plane);
        assert_eq!(a.longitude(), 116.0);
        assert_eq!(a.latitude(), 39.0);
    }
}
