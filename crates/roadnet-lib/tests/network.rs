mod common;

use common::{fixture_network, hillcrest, riverside, HILLCREST, RIVERSIDE};
use roadnet_lib::{place_id, Error, GeoPoint, RoadNetwork};

#[test]
fn roads_have_non_negative_lengths() {
    let network = fixture_network();
    for town in network.towns() {
        for place in town.places() {
            for (&to, &length) in place.roads() {
                assert!(length >= 0.0, "{} -> {to} has length {length}", place.id());
            }
        }
    }
}

#[test]
fn bidirectional_roads_are_symmetric() {
    let mut network = fixture_network();
    let length = network
        .add_bidirectional_road(riverside(2), riverside(4))
        .expect("same-town road");
    assert_eq!(network.road_length(riverside(2), riverside(4)), length);
    assert_eq!(network.road_length(riverside(4), riverside(2)), length);

    assert_eq!(
        network.road_length(riverside(4), hillcrest(1)),
        network.road_length(hillcrest(1), riverside(4))
    );
}

#[test]
fn duplicates_fail_without_touching_state() {
    let mut network = fixture_network();
    let before = network.town(RIVERSIDE).unwrap().len();

    let err = network.add_town(RIVERSIDE, "Shadow").unwrap_err();
    assert!(matches!(err, Error::DuplicateTown { id: RIVERSIDE }));
    assert_eq!(network.town(RIVERSIDE).unwrap().name(), "Riverside");

    let town = network.town_mut(RIVERSIDE).unwrap();
    let err = town
        .add_local_place(1, "Other Station", GeoPoint::new(0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, Error::DuplicatePlace { .. }));
    assert_eq!(town.len(), before);
    assert_eq!(town.local_place(1).unwrap().name(), "Station");
    assert!(town.has_local_road(1, 2));
}

#[test]
fn removing_place_drops_every_incoming_road_in_town() {
    let mut network = fixture_network();
    let target = riverside(4);
    let town = network.town_mut(RIVERSIDE).unwrap();
    assert!(town.has_road(riverside(1), target));
    assert!(town.remove_place(target));

    for place in town.places() {
        assert!(!town.has_road(place.id(), target));
    }
    assert!(town.place(target).is_none());
}

#[test]
fn cross_town_roads_dangle_after_removal() {
    let mut network = fixture_network();
    assert!(network.town_mut(RIVERSIDE).unwrap().remove_place(riverside(4)));

    // Roads from other towns are plain id references and are left in place.
    assert!(network.has_road(hillcrest(1), riverside(4)));
    assert!(network.find_path(hillcrest(1), riverside(1)).is_empty());
}

#[test]
fn road_removal() {
    let mut network = fixture_network();
    assert!(network.remove_road(riverside(1), riverside(2)).unwrap());
    assert!(!network.remove_road(riverside(1), riverside(2)).unwrap());
    assert!(network.has_road(riverside(2), riverside(1)));

    let err = network.remove_road(place_id(9, 1), riverside(1)).unwrap_err();
    assert!(matches!(err, Error::UnknownTown { id: 9 }));
}

#[test]
fn town_listing_is_ordered() {
    let mut network = RoadNetwork::new();
    network.add_town(5, "E").unwrap();
    network.add_town(2, "B").unwrap();
    network.add_town(9, "I").unwrap();
    assert_eq!(network.town_ids(), vec![2, 5, 9]);
    assert!(network.has_town(5));
    assert!(network.remove_town(5));
    assert!(!network.has_town(5));
}

#[test]
fn roads_into_spans_towns() {
    let network = fixture_network();
    let into: Vec<_> = network
        .roads_into(riverside(4))
        .into_iter()
        .map(|road| road.from)
        .collect();
    assert_eq!(into, vec![riverside(1), riverside(3), hillcrest(1)]);
    assert_eq!(network.roads_of_town(HILLCREST).unwrap().len(), 2);
}
