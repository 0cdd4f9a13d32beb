//! Search command handlers.

use anyhow::Result;

use crate::output::{emit, OutputFormat, SearchHit};
use crate::session::MapSession;

/// List places whose town and place name contain `keyword`.
pub fn handle_search_places(session: &MapSession, format: OutputFormat, keyword: &str) -> Result<()> {
    let hits = SearchHit::from_pairs(session.network().fuzzy_find_places(keyword));
    emit(format, hits.as_slice())?;
    Ok(())
}

/// List towns whose name contains `keyword`.
pub fn handle_search_towns(session: &MapSession, format: OutputFormat, keyword: &str) -> Result<()> {
    let hits = SearchHit::from_pairs(session.network().fuzzy_find_towns(keyword));
    emit(format, hits.as_slice())?;
    Ok(())
}
