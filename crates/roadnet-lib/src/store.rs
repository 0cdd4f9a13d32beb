//! Map file persistence.
//!
//! The map is written as indented JSON-like text with exactly one key or
//! structural marker per line, and read back by a line-oriented state
//! machine ([`MapParser`]). Names use JSON string escaping; everything else
//! is hand-formatted so the file stays diff-friendly and can be streamed.
//!
//! Roads are listed under the town of their source place. A road whose
//! endpoints both belong to the town being read is added immediately. Any
//! other road is deferred until the whole file has been consumed, because
//! its target town may appear later in the file. Deferred roads that still
//! do not resolve are skipped with a warning rather than failing the load.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::network::RoadNetwork;
use crate::place::{town_of, PlaceId, TownId};

/// Outcome of reading a map file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub towns: usize,
    pub places: usize,
    /// Cross-town roads applied after the whole file was read.
    pub deferred_roads: usize,
    /// Deferred roads dropped because an endpoint did not resolve.
    pub skipped_roads: Vec<(PlaceId, PlaceId)>,
}

/// Write `network` to `path`, replacing any existing file.
///
/// The map is written to a temporary file next to `path` and moved into
/// place once complete, so a failed write never truncates the old map.
pub fn save_network(network: &RoadNetwork, path: &Path) -> Result<()> {
    let access = |source: io::Error| Error::MapFileAccess {
        path: path.to_path_buf(),
        source,
    };
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(parent).map_err(access)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_network(network, &mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|err| access(err.error))?;
    info!(
        towns = network.towns().count(),
        places = network.place_count(),
        "saved map to {}",
        path.display()
    );
    Ok(())
}

/// Read a map from `path`.
pub fn load_network(path: &Path) -> Result<RoadNetwork> {
    let file = File::open(path).map_err(|source| Error::MapFileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let (network, report) = read_network(BufReader::new(file))?;
    info!(
        towns = report.towns,
        places = report.places,
        deferred_roads = report.deferred_roads,
        skipped_roads = report.skipped_roads.len(),
        "loaded map from {}",
        path.display()
    );
    Ok(network)
}

/// Serialise `network` in the map file layout.
///
/// Towns, places and roads are written in ascending id order. A road whose
/// reverse also exists is written once, flagged bidirectional, at the first
/// of the two directions encountered.
pub fn write_network<W: Write>(network: &RoadNetwork, writer: &mut W) -> Result<()> {
    writeln!(writer, "{{")?;
    writeln!(writer, "  \"towns\": [")?;

    let mut emitted: HashSet<(PlaceId, PlaceId)> = HashSet::new();
    let towns: Vec<_> = network.towns().collect();
    for (town_index, town) in towns.iter().enumerate() {
        writeln!(writer, "    {{")?;
        writeln!(writer, "      \"id\": {},", town.id())?;
        writeln!(writer, "      \"name\": {},", serde_json::to_string(town.name())?)?;

        writeln!(writer, "      \"places\": [")?;
        let places: Vec<_> = town.places().collect();
        for (index, place) in places.iter().enumerate() {
            writeln!(writer, "        {{")?;
            writeln!(writer, "          \"id\": {},", place.id())?;
            writeln!(
                writer,
                "          \"name\": {},",
                serde_json::to_string(place.name())?
            )?;
            writeln!(writer, "          \"longitude\": {},", place.longitude())?;
            writeln!(writer, "          \"latitude\": {}", place.latitude())?;
            writeln!(writer, "        }}{}", separator(index, places.len()))?;
        }
        writeln!(writer, "      ],")?;

        let mut roads = Vec::new();
        for place in &places {
            for (to, _) in place.sorted_roads() {
                let from = place.id();
                if emitted.contains(&(to, from)) {
                    continue;
                }
                emitted.insert((from, to));
                roads.push((from, to, network.has_road(to, from)));
            }
        }

        writeln!(writer, "      \"roads\": [")?;
        for (index, (from, to, bidirectional)) in roads.iter().enumerate() {
            writeln!(writer, "        {{")?;
            writeln!(writer, "          \"from\": {from},")?;
            writeln!(writer, "          \"to\": {to},")?;
            writeln!(writer, "          \"bidirectional\": {bidirectional}")?;
            writeln!(writer, "        }}{}", separator(index, roads.len()))?;
        }
        writeln!(writer, "      ]")?;
        writeln!(writer, "    }}{}", separator(town_index, towns.len()))?;
    }

    writeln!(writer, "  ]")?;
    writeln!(writer, "}}")?;
    Ok(())
}

/// Read a map in the layout produced by [`write_network`].
pub fn read_network<R: BufRead>(reader: R) -> Result<(RoadNetwork, LoadReport)> {
    let mut parser = MapParser::new();
    for line in reader.lines() {
        parser.feed(&line?)?;
    }
    parser.finish()
}

fn separator(index: usize, len: usize) -> &'static str {
    if index + 1 < len {
        ","
    } else {
        ""
    }
}

/// Position of the parser within the nested map structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Outside,
    TownList,
    Town,
    PlaceList,
    Place,
    RoadList,
    Road,
}

#[derive(Debug, Default)]
struct PendingTown {
    id: Option<TownId>,
    name: Option<String>,
    created: bool,
}

#[derive(Debug, Default)]
struct PendingPlace {
    id: Option<PlaceId>,
    name: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
}

#[derive(Debug, Default)]
struct PendingRoad {
    from: Option<PlaceId>,
    to: Option<PlaceId>,
    bidirectional: bool,
}

#[derive(Debug, Clone, Copy)]
struct DeferredRoad {
    from: PlaceId,
    to: PlaceId,
    bidirectional: bool,
}

/// Streaming, line-at-a-time map reader.
#[derive(Debug)]
pub struct MapParser {
    network: RoadNetwork,
    state: ParserState,
    line: usize,
    town: PendingTown,
    place: PendingPlace,
    road: PendingRoad,
    deferred: Vec<DeferredRoad>,
    seen_towns: bool,
}

impl Default for MapParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MapParser {
    pub fn new() -> Self {
        Self {
            network: RoadNetwork::new(),
            state: ParserState::Outside,
            line: 0,
            town: PendingTown::default(),
            place: PendingPlace::default(),
            road: PendingRoad::default(),
            deferred: Vec::new(),
            seen_towns: false,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Consume one line of input.
    pub fn feed(&mut self, raw: &str) -> Result<()> {
        self.line += 1;
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }
        let closes_object = line == "}" || line == "},";
        let closes_list = line == "]" || line == "],";

        match self.state {
            ParserState::Outside => {
                if line == "{" || closes_object {
                    return Ok(());
                }
                match split_entry(line) {
                    Some(("towns", value)) if !self.seen_towns => {
                        self.seen_towns = true;
                        self.open_list(value, ParserState::TownList, ParserState::Outside)?;
                    }
                    _ => {
                        return Err(self.malformed(format!(
                            "unexpected line outside the town list: {line}"
                        )));
                    }
                }
            }
            ParserState::TownList => {
                if line == "{" {
                    self.town = PendingTown::default();
                    self.state = ParserState::Town;
                } else if closes_list {
                    self.state = ParserState::Outside;
                } else {
                    return Err(self.malformed(format!("unexpected line in town list: {line}")));
                }
            }
            ParserState::Town => {
                if closes_object {
                    if !self.town.created {
                        return Err(self.malformed("town block without both id and name"));
                    }
                    self.state = ParserState::TownList;
                } else {
                    self.town_entry(line)?;
                }
            }
            ParserState::PlaceList => {
                if line == "{" {
                    self.place = PendingPlace::default();
                    self.state = ParserState::Place;
                } else if closes_list {
                    self.state = ParserState::Town;
                } else {
                    return Err(self.malformed(format!("unexpected line in place list: {line}")));
                }
            }
            ParserState::Place => {
                if closes_object {
                    self.finish_place()?;
                    self.state = ParserState::PlaceList;
                } else {
                    self.place_entry(line)?;
                }
            }
            ParserState::RoadList => {
                if line == "{" {
                    self.road = PendingRoad::default();
                    self.state = ParserState::Road;
                } else if closes_list {
                    self.state = ParserState::Town;
                } else {
                    return Err(self.malformed(format!("unexpected line in road list: {line}")));
                }
            }
            ParserState::Road => {
                if closes_object {
                    self.finish_road()?;
                    self.state = ParserState::RoadList;
                } else {
                    self.road_entry(line)?;
                }
            }
        }
        Ok(())
    }

    /// Apply deferred cross-town roads and return the assembled network.
    pub fn finish(mut self) -> Result<(RoadNetwork, LoadReport)> {
        if self.state != ParserState::Outside {
            return Err(self.malformed(format!(
                "unexpected end of map data inside {:?}",
                self.state
            )));
        }
        if !self.seen_towns {
            return Err(self.malformed("map data has no towns list"));
        }

        let mut skipped_roads = Vec::new();
        for road in &self.deferred {
            let applied = if road.bidirectional {
                self.network.add_bidirectional_road(road.from, road.to)
            } else {
                self.network.add_road(road.from, road.to)
            };
            if let Err(error) = applied {
                warn!(
                    from = road.from,
                    to = road.to,
                    %error,
                    "skipping cross-town road"
                );
                skipped_roads.push((road.from, road.to));
            }
        }

        let report = LoadReport {
            towns: self.network.towns().count(),
            places: self.network.place_count(),
            deferred_roads: self.deferred.len(),
            skipped_roads,
        };
        Ok((self.network, report))
    }

    fn open_list(&mut self, value: &str, list: ParserState, parent: ParserState) -> Result<()> {
        match value {
            "[" => self.state = list,
            "[]" => self.state = parent,
            other => {
                return Err(self.malformed(format!("expected a list, found {other}")));
            }
        }
        Ok(())
    }

    fn town_entry(&mut self, line: &str) -> Result<()> {
        let Some((key, value)) = split_entry(line) else {
            return Err(self.malformed(format!("unexpected line in town: {line}")));
        };
        match key {
            "id" => self.town.id = Some(self.parse_number(key, value)?),
            "name" => self.town.name = Some(self.parse_string(value)?),
            "places" | "roads" => {
                if !self.town.created {
                    return Err(self.malformed(format!("{key} listed before town id and name")));
                }
                let list = if key == "places" {
                    ParserState::PlaceList
                } else {
                    ParserState::RoadList
                };
                return self.open_list(value, list, ParserState::Town);
            }
            other => debug!(line = self.line, key = other, "ignoring unknown town key"),
        }

        if !self.town.created {
            if let (Some(id), Some(name)) = (self.town.id, self.town.name.as_deref()) {
                self.network.add_town(id, name)?;
                self.town.created = true;
            }
        }
        Ok(())
    }

    fn place_entry(&mut self, line: &str) -> Result<()> {
        let Some((key, value)) = split_entry(line) else {
            return Err(self.malformed(format!("unexpected line in place: {line}")));
        };
        match key {
            "id" => self.place.id = Some(self.parse_number(key, value)?),
            "name" => self.place.name = Some(self.parse_string(value)?),
            "longitude" => self.place.longitude = Some(self.parse_number(key, value)?),
            "latitude" => self.place.latitude = Some(self.parse_number(key, value)?),
            other => debug!(line = self.line, key = other, "ignoring unknown place key"),
        }
        Ok(())
    }

    fn road_entry(&mut self, line: &str) -> Result<()> {
        let Some((key, value)) = split_entry(line) else {
            return Err(self.malformed(format!("unexpected line in road: {line}")));
        };
        match key {
            "from" => self.road.from = Some(self.parse_number(key, value)?),
            "to" => self.road.to = Some(self.parse_number(key, value)?),
            "bidirectional" => self.road.bidirectional = self.parse_bool(value)?,
            other => debug!(line = self.line, key = other, "ignoring unknown road key"),
        }
        Ok(())
    }

    fn finish_place(&mut self) -> Result<()> {
        let place = std::mem::take(&mut self.place);
        let (Some(id), Some(name), Some(longitude), Some(latitude)) =
            (place.id, place.name, place.longitude, place.latitude)
        else {
            return Err(self.malformed("place requires id, name, longitude and latitude"));
        };
        let town_id = self.current_town()?;
        if town_of(id) != town_id {
            return Err(self.malformed(format!(
                "place {id} belongs to town {} but is listed under town {town_id}",
                town_of(id)
            )));
        }
        let town = self
            .network
            .town_mut(town_id)
            .ok_or(Error::UnknownTown { id: town_id })?;
        town.add_place(id, name, GeoPoint::new(longitude, latitude))?;
        Ok(())
    }

    fn finish_road(&mut self) -> Result<()> {
        let road = std::mem::take(&mut self.road);
        let (Some(from), Some(to)) = (road.from, road.to) else {
            return Err(self.malformed("road requires from and to"));
        };
        let town_id = self.current_town()?;
        if town_of(from) != town_id || town_of(to) != town_id {
            self.deferred.push(DeferredRoad {
                from,
                to,
                bidirectional: road.bidirectional,
            });
            return Ok(());
        }

        let town = self
            .network
            .town_mut(town_id)
            .ok_or(Error::UnknownTown { id: town_id })?;
        if road.bidirectional {
            town.add_bidirectional_road(from, to)?;
        } else {
            town.add_road(from, to)?;
        }
        Ok(())
    }

    fn current_town(&self) -> Result<TownId> {
        self.town
            .id
            .filter(|_| self.town.created)
            .ok_or_else(|| self.malformed("entry outside of a town"))
    }

    fn parse_number<T: std::str::FromStr>(&self, key: &str, value: &str) -> Result<T> {
        value
            .parse()
            .map_err(|_| self.malformed(format!("invalid {key} value: {value}")))
    }

    fn parse_string(&self, value: &str) -> Result<String> {
        serde_json::from_str(value)
            .map_err(|err| self.malformed(format!("invalid string {value}: {err}")))
    }

    fn parse_bool(&self, value: &str) -> Result<bool> {
        match value {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(self.malformed(format!("invalid boolean: {other}"))),
        }
    }

    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::MalformedMapData {
            line: self.line,
            message: message.into(),
        }
    }
}

/// Split `"key": value,` into its key and value without the trailing comma.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('"')?;
    let end = rest.find('"')?;
    let key = &rest[..end];
    let value = rest[end + 1..].trim_start().strip_prefix(':')?.trim();
    let value = value.strip_suffix(',').unwrap_or(value).trim_end();
    Some((key, value))
}

impl RoadNetwork {
    /// Save the whole network to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_network(self, path)
    }

    /// Load a network from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        load_network(path)
    }
}
