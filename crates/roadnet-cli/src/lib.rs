//! Road network CLI library.
//!
//! This crate provides the command handlers, the load/save session around the
//! map file and output formatting used by the `roadnet` binary.

pub mod commands;
pub mod output;
pub mod session;

#[cfg(test)]
pub(crate) mod test_helpers;
