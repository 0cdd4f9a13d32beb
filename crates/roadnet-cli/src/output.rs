//! Output formatting for command results.
//!
//! Every result type implements [`RenderText`] for the human-readable view
//! and `Serialize` for `--format json`. Commands hand their result to
//! [`emit`] and never print directly.

use std::fmt::Write as _;
use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use roadnet_lib::{
    format_distance, serial_of, town_of, PathSummary, Place, PlaceId, Road, RoadNetwork, Town,
    TownId,
};

const UNKNOWN_NAME: &str = "<unknown>";

/// Output mode selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Human-readable rendering of a command result.
pub trait RenderText {
    fn render_text(&self) -> String;
}

/// Write `value` to stdout in the requested format.
pub fn emit<T>(format: OutputFormat, value: &T) -> io::Result<()>
where
    T: Serialize + RenderText + ?Sized,
{
    let mut stdout = io::stdout().lock();
    write_output(&mut stdout, format, value)
}

/// Write `value` to `writer` in the requested format, followed by a newline.
pub fn write_output<W, T>(writer: &mut W, format: OutputFormat, value: &T) -> io::Result<()>
where
    W: Write,
    T: Serialize + RenderText + ?Sized,
{
    match format {
        OutputFormat::Text => writer.write_all(value.render_text().as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, value).map_err(io::Error::other)?
        }
    }
    writer.write_all(b"\n")
}

/// Confirmation printed after a mutating command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Notice {
    pub action: &'static str,
    pub id: u64,
    pub message: String,
}

impl Notice {
    pub fn new(action: &'static str, id: u64, message: impl Into<String>) -> Self {
        Self {
            action,
            id,
            message: message.into(),
        }
    }
}

impl RenderText for Notice {
    fn render_text(&self) -> String {
        self.message.clone()
    }
}

/// One search result.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub id: u64,
    pub name: String,
}

impl SearchHit {
    pub fn from_pairs<I: Into<u64>>(pairs: Vec<(I, String)>) -> Vec<Self> {
        pairs
            .into_iter()
            .map(|(id, name)| Self { id: id.into(), name })
            .collect()
    }
}

impl RenderText for [SearchHit] {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No matches.".to_string();
        }
        let width = id_width(self.iter().map(|hit| hit.id));
        self.iter()
            .map(|hit| format!("{:>width$}  {}", hit.id, hit.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TownRow {
    pub id: TownId,
    pub name: String,
    pub places: usize,
}

impl From<&Town> for TownRow {
    fn from(town: &Town) -> Self {
        Self {
            id: town.id(),
            name: town.name().to_string(),
            places: town.len(),
        }
    }
}

impl RenderText for [TownRow] {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No towns.".to_string();
        }
        let width = id_width(self.iter().map(|row| u64::from(row.id)));
        self.iter()
            .map(|row| {
                let noun = if row.places == 1 { "place" } else { "places" };
                format!("{:>width$}  {} ({} {noun})", row.id, row.name, row.places)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceRow {
    pub id: PlaceId,
    pub town: TownId,
    pub serial: u32,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl From<&Place> for PlaceRow {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id(),
            town: town_of(place.id()),
            serial: serial_of(place.id()),
            name: place.name().to_string(),
            longitude: place.longitude(),
            latitude: place.latitude(),
        }
    }
}

impl RenderText for [PlaceRow] {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No places.".to_string();
        }
        let width = id_width(self.iter().map(|row| row.id));
        self.iter()
            .map(|row| {
                format!(
                    "{:>width$}  {}/{}  {}  ({:.6}, {:.6})",
                    row.id, row.town, row.serial, row.name, row.longitude, row.latitude
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoadRow {
    pub from: PlaceId,
    pub from_name: String,
    pub to: PlaceId,
    pub to_name: String,
    pub length: f64,
    /// The target also has a road back to the source.
    pub bidirectional: bool,
    pub cross_town: bool,
}

impl RoadRow {
    pub fn new(network: &RoadNetwork, road: &Road) -> Self {
        Self {
            from: road.from,
            from_name: place_name(network, road.from),
            to: road.to,
            to_name: place_name(network, road.to),
            length: road.length,
            bidirectional: network.has_road(road.to, road.from),
            cross_town: town_of(road.from) != town_of(road.to),
        }
    }

    fn line(&self) -> String {
        let arrow = if self.bidirectional { "<->" } else { "->" };
        let mut line = format!(
            "{} ({}) {arrow} {} ({})  {}",
            self.from_name,
            self.from,
            self.to_name,
            self.to,
            format_distance(self.length)
        );
        if self.cross_town {
            line.push_str("  [cross-town]");
        }
        line
    }
}

impl RenderText for [RoadRow] {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No roads.".to_string();
        }
        self.iter().map(RoadRow::line).collect::<Vec<_>>().join("\n")
    }
}

/// Roads leaving the places of one town.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TownRoads {
    pub town: TownId,
    pub name: String,
    pub roads: Vec<RoadRow>,
}

impl RenderText for [TownRoads] {
    fn render_text(&self) -> String {
        if self.is_empty() {
            return "No towns.".to_string();
        }
        let mut buffer = String::new();
        for (index, group) in self.iter().enumerate() {
            if index > 0 {
                buffer.push('\n');
            }
            let _ = writeln!(buffer, "{} ({}):", group.name, group.town);
            if group.roads.is_empty() {
                buffer.push_str("  No roads.\n");
            }
            for row in &group.roads {
                let _ = writeln!(buffer, "  {}", row.line());
            }
        }
        buffer.truncate(buffer.trim_end().len());
        buffer
    }
}

impl RenderText for PathSummary {
    fn render_text(&self) -> String {
        self.render_plain()
    }
}

fn place_name(network: &RoadNetwork, id: PlaceId) -> String {
    network
        .place(id)
        .map(|place| place.name().to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

fn id_width(ids: impl Iterator<Item = u64>) -> usize {
    ids.map(|id| id.to_string().len()).max().unwrap_or(1)
}
