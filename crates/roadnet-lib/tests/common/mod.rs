//! Shared fixtures for integration tests.
#![allow(dead_code)]

use roadnet_lib::{place_id, GeoPoint, PlaceId, RoadNetwork};

pub const RIVERSIDE: u32 = 1;
pub const HILLCREST: u32 = 2;
pub const LAKESIDE: u32 = 3;

pub fn riverside(serial: u32) -> PlaceId {
    place_id(RIVERSIDE, serial)
}

pub fn hillcrest(serial: u32) -> PlaceId {
    place_id(HILLCREST, serial)
}

pub fn lakeside(serial: u32) -> PlaceId {
    place_id(LAKESIDE, serial)
}

/// Three towns: Riverside and Hillcrest joined by one two-way road,
/// Lakeside with a single unconnected pier.
pub fn fixture_network() -> RoadNetwork {
    let mut network = RoadNetwork::new();

    let town = network.add_town(RIVERSIDE, "Riverside").expect("add town");
    town.add_local_place(1, "Station", GeoPoint::new(8.500, 47.300))
        .expect("add place");
    town.add_local_place(2, "Market", GeoPoint::new(8.505, 47.300))
        .expect("add place");
    town.add_local_place(3, "Library", GeoPoint::new(8.510, 47.302))
        .expect("add place");
    town.add_local_place(4, "Park", GeoPoint::new(8.520, 47.305))
        .expect("add place");
    town.add_local_bidirectional_road(1, 2).expect("add road");
    town.add_local_road(2, 3).expect("add road");
    town.add_local_road(3, 4).expect("add road");
    town.add_local_road(1, 4).expect("add road");

    let town = network.add_town(HILLCREST, "Hillcrest").expect("add town");
    town.add_local_place(1, "Station", GeoPoint::new(8.560, 47.320))
        .expect("add place");
    town.add_local_place(2, "Summit", GeoPoint::new(8.570, 47.330))
        .expect("add place");
    town.add_local_road(1, 2).expect("add road");

    let town = network.add_town(LAKESIDE, "Lakeside").expect("add town");
    town.add_local_place(1, "Pier", GeoPoint::new(8.600, 47.280))
        .expect("add place");

    network
        .add_bidirectional_road(riverside(4), hillcrest(1))
        .expect("add cross-town road");

    network
}
