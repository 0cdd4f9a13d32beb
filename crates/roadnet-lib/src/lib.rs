//! Road network library entry points.
//!
//! This crate models places grouped into towns, directed roads between
//! them weighted by projected planar distance, A* path finding, name
//! search, and the map file format. Front ends (the CLI) should only depend
//! on the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod config;
pub mod error;
pub mod geo;
pub mod network;
pub mod output;
pub mod path;
pub mod place;
pub mod search;
pub mod store;
pub mod town;

pub use config::{default_map_path, resolve_map_path, MAP_PATH_ENV};
pub use error::{Error, Result};
pub use geo::{project, utm_zone, GeoPoint, Point2d};
pub use network::{Road, RoadNetwork};
pub use output::{format_distance, PathStep, PathSummary};
pub use place::{place_id, serial_of, town_of, Place, PlaceId, TownId};
pub use store::{
    load_network, read_network, save_network, write_network, LoadReport, MapParser, ParserState,
};
pub use town::Town;
