// Test utilities used across `roadnet-cli` unit tests.
// Kept under `#[cfg(test)]` so it is not part of the public crate API.
use roadnet_lib::{place_id, GeoPoint, RoadNetwork};

/// Two towns: Vale with Gate, Well and Keep, and Ridge with a single Tower
/// reachable from Keep over a one-way road.
pub fn sample_network() -> RoadNetwork {
    let mut network = RoadNetwork::new();

    let vale = network.add_town(1, "Vale").expect("add town");
    vale.add_local_place(1, "Gate", GeoPoint::new(8.50, 47.30))
        .expect("add place");
    vale.add_local_place(2, "Well", GeoPoint::new(8.51, 47.30))
        .expect("add place");
    vale.add_local_place(3, "Keep", GeoPoint::new(8.52, 47.31))
        .expect("add place");
    vale.add_local_bidirectional_road(1, 2).expect("add road");
    vale.add_local_road(2, 3).expect("add road");

    network
        .add_town(2, "Ridge")
        .expect("add town")
        .add_local_place(1, "Tower", GeoPoint::new(8.55, 47.33))
        .expect("add place");
    network
        .add_road(place_id(1, 3), place_id(2, 1))
        .expect("add cross-town road");

    network
}
