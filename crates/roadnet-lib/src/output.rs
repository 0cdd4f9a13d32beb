use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::network::RoadNetwork;
use crate::place::{town_of, PlaceId};

/// Render a length in metres with a readable unit.
pub fn format_distance(metres: f64) -> String {
    if metres <= 1_000.0 {
        format!("{metres:.2} m")
    } else {
        format!("{:.2} km", metres / 1_000.0)
    }
}

/// Place visited along a path.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathStep {
    pub index: usize,
    pub id: PlaceId,
    pub name: String,
    pub town: String,
    /// Length of the road from the previous step; zero for the first step.
    pub distance: f64,
    /// Whether the road back to the previous step exists as well.
    pub reciprocal: bool,
}

/// Structured representation of a found path that front ends can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PathSummary {
    pub hops: usize,
    pub total_distance: f64,
    pub steps: Vec<PathStep>,
}

impl PathSummary {
    /// Resolve every place on `path` and accumulate the segment lengths.
    pub fn from_path(network: &RoadNetwork, path: &[PlaceId]) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }

        let mut steps = Vec::with_capacity(path.len());
        let mut total_distance = 0.0;
        for (index, &id) in path.iter().enumerate() {
            let place = network.place(id).ok_or(Error::UnknownPlace { id })?;
            let town = network
                .town(town_of(id))
                .map(|town| town.name().to_string())
                .unwrap_or_default();
            let (distance, reciprocal) = match index.checked_sub(1).map(|prev| path[prev]) {
                Some(prev) => (
                    network.road_length(prev, id),
                    place.has_road_to(prev),
                ),
                None => (0.0, false),
            };
            total_distance += distance;
            steps.push(PathStep {
                index,
                id,
                name: place.name().to_string(),
                town,
                distance,
                reciprocal,
            });
        }

        Ok(Self {
            hops: steps.len() - 1,
            total_distance,
            steps,
        })
    }

    /// One-line description: `<-d->` marks a two-way road, `=-d->` a one-way.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::from("Via: ");
        for step in &self.steps {
            if step.index > 0 {
                let arrow = if step.reciprocal { "<-" } else { "=-" };
                let _ = write!(buffer, " {arrow}{}-> ", format_distance(step.distance));
            }
            buffer.push_str(&step.name);
        }
        let _ = write!(
            buffer,
            ", arrived, total {}",
            format_distance(self.total_distance)
        );
        buffer
    }
}
