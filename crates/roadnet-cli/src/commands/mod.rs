// Module exports for CLI subcommands
//
// Each module handles one CLI subcommand. main.rs parses arguments, opens the
// map session, dispatches to these handlers and commits the session afterwards.

pub mod path;
pub mod place;
pub mod road;
pub mod search;
pub mod show;
pub mod town;
