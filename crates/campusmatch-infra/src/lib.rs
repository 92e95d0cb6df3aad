//! Infrastructure layer for CampusMatch.
//!
//! Contains the reqwest client implementing the `MatchmakerApi` port
//! defined in `campusmatch-core`, plus the TOML configuration loader.

pub mod client;
pub mod config;
