use std::path::PathBuf;

use thiserror::Error;

use crate::place::{PlaceId, TownId};

/// Convenient result alias for the road network library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A town or place was constructed with the reserved identifier `0`.
    #[error("{kind} id must not be zero")]
    InvalidIdentifier { kind: &'static str },

    /// Raised when inserting a town whose id is already taken.
    #[error("town {id} already exists")]
    DuplicateTown { id: TownId },

    /// Raised when inserting a place whose id is already taken in its town.
    #[error("place {id} already exists")]
    DuplicatePlace { id: PlaceId },

    /// An operation referenced a town that is not part of the network.
    #[error("unknown town {id}")]
    UnknownTown { id: TownId },

    /// An operation referenced a place that could not be resolved.
    #[error("unknown place {id}")]
    UnknownPlace { id: PlaceId },

    /// A name could not be matched against any town or place.
    #[error("unknown {kind} name: {name}{}", format_suggestions(.suggestions))]
    UnknownName {
        kind: &'static str,
        name: String,
        suggestions: Vec<String>,
    },

    /// A name matched more than one town or place.
    #[error("{kind} name '{name}' is ambiguous: {}", format_candidates(.candidates))]
    AmbiguousName {
        kind: &'static str,
        name: String,
        candidates: Vec<(u64, String)>,
    },

    /// Raised when a path summary is requested for an empty path.
    #[error("path was empty")]
    EmptyPath,

    /// The map file could not be opened or created.
    #[error("cannot access map file {path}: {source}")]
    MapFileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value inside the map file could not be parsed.
    #[error("malformed map data at line {line}: {message}")]
    MalformedMapData { line: usize, message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default map location")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON string encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

fn format_candidates(candidates: &[(u64, String)]) -> String {
    candidates
        .iter()
        .map(|(id, name)| format!("{name} ({id})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_lists_single_suggestion() {
        let err = Error::UnknownName {
            kind: "place",
            name: "Statoin".to_string(),
            suggestions: vec!["Station".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown place name: Statoin. Did you mean 'Station'?"
        );
    }

    #[test]
    fn unknown_name_without_suggestions_is_plain() {
        let err = Error::UnknownName {
            kind: "town",
            name: "Nowhere".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown town name: Nowhere");
    }

    #[test]
    fn ambiguous_name_lists_candidates() {
        let err = Error::AmbiguousName {
            kind: "town",
            name: "port".to_string(),
            candidates: vec![(1, "Northport".to_string()), (2, "Southport".to_string())],
        };
        assert_eq!(
            err.to_string(),
            "town name 'port' is ambiguous: Northport (1), Southport (2)"
        );
    }
}
