use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::debug;

use crate::geo::Point2d;
use crate::network::RoadNetwork;
use crate::place::PlaceId;

/// Per-run bookkeeping for a place reached by the search.
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    cost: f64,
    parent: Option<PlaceId>,
}

impl RoadNetwork {
    /// Shortest path from `from` to `to` as a list of place ids.
    ///
    /// Returns an empty vector when either id does not resolve or the goal
    /// is unreachable. Roads whose target no longer resolves are ignored.
    pub fn find_path(&self, from: PlaceId, to: PlaceId) -> Vec<PlaceId> {
        let (Some(start), Some(goal)) = (self.place(from), self.place(to)) else {
            return Vec::new();
        };
        a_star(self, start.id(), goal.id(), goal.plane())
    }

    /// Sum of the road lengths along `path`, treating missing roads as zero.
    pub fn path_length(&self, path: &[PlaceId]) -> f64 {
        path.windows(2)
            .map(|pair| self.road_length(pair[0], pair[1]))
            .sum()
    }
}

/// A* over planar road lengths with the straight-line distance to the goal
/// as heuristic. Road lengths are themselves planar distances, so the
/// heuristic never overestimates.
fn a_star(network: &RoadNetwork, start: PlaceId, goal: PlaceId, goal_plane: Point2d) -> Vec<PlaceId> {
    let mut nodes: HashMap<PlaceId, SearchNode> = HashMap::new();
    let mut closed: HashSet<PlaceId> = HashSet::new();
    let mut frontier = BinaryHeap::new();

    let start_estimate = network
        .place(start)
        .map(|place| place.plane().distance_to(&goal_plane))
        .unwrap_or(0.0);
    nodes.insert(
        start,
        SearchNode {
            cost: 0.0,
            parent: None,
        },
    );
    frontier.push(FrontierEntry::new(start, start_estimate));

    while let Some(entry) = frontier.pop() {
        if entry.node == goal {
            debug!(start, goal, expanded = closed.len(), "path found");
            return reconstruct_path(&nodes, goal);
        }
        if !closed.insert(entry.node) {
            continue;
        }
        let Some(place) = network.place(entry.node) else {
            continue;
        };
        let current_cost = nodes.get(&entry.node).map(|node| node.cost).unwrap_or(0.0);

        for (&next, &length) in place.roads() {
            if closed.contains(&next) {
                continue;
            }
            let Some(neighbour) = network.place(next) else {
                continue;
            };
            let tentative = current_cost + length;
            let improves = nodes
                .get(&next)
                .map(|node| tentative < node.cost)
                .unwrap_or(true);
            if improves {
                nodes.insert(
                    next,
                    SearchNode {
                        cost: tentative,
                        parent: Some(entry.node),
                    },
                );
                let heuristic = neighbour.plane().distance_to(&goal_plane);
                frontier.push(FrontierEntry::new(next, tentative + heuristic));
            }
        }
    }

    debug!(start, goal, expanded = closed.len(), "no path");
    Vec::new()
}

fn reconstruct_path(nodes: &HashMap<PlaceId, SearchNode>, goal: PlaceId) -> Vec<PlaceId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        current = nodes.get(&node).and_then(|entry| entry.parent);
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry keyed by estimated total cost, ties broken by place id.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: PlaceId,
    estimate: FloatOrd,
}

impl FrontierEntry {
    fn new(node: PlaceId, estimate: f64) -> Self {
        Self {
            node,
            estimate: FloatOrd(estimate),
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by estimate.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
