//! Path command handler for finding routes between places.

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use roadnet_lib::PathSummary;

use crate::output::{emit, OutputFormat};
use crate::session::MapSession;

/// Handle the path subcommand.
///
/// Both endpoints accept a composite place id or a name that matches exactly
/// one place.
pub fn handle_path(session: &MapSession, format: OutputFormat, from: &str, to: &str) -> Result<()> {
    let summary = build_summary(session, from, to)?;
    emit(format, &summary)?;
    Ok(())
}

fn build_summary(session: &MapSession, from: &str, to: &str) -> Result<PathSummary> {
    let network = session.network();
    let start = network.resolve_place(from)?;
    let goal = network.resolve_place(to)?;

    let path = network.find_path(start, goal);
    if path.is_empty() {
        return Err(anyhow!("no route found from '{from}' to '{to}'"));
    }
    debug!(start, goal, hops = path.len() - 1, "path resolved");
    PathSummary::from_path(network, &path).context("failed to summarise path")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_network;
    use std::path::PathBuf;

    fn session() -> MapSession {
        MapSession::from_network(PathBuf::from("unused.json"), sample_network())
    }

    #[test]
    fn summary_crosses_towns() {
        let summary = build_summary(&session(), "Gate", "Tower").expect("route exists");
        let names: Vec<_> = summary.steps.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Gate", "Well", "Keep", "Tower"]);
        assert_eq!(summary.hops, 3);
    }

    #[test]
    fn one_way_road_blocks_return_trip() {
        let err = build_summary(&session(), "Tower", "Gate").unwrap_err();
        assert!(err.to_string().contains("no route found"));
    }
}
