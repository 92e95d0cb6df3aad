//! Client-side session and conversation state machines for CampusMatch.
//!
//! This crate defines the port (`MatchmakerApi`) that the infrastructure
//! layer implements, plus the components that own local client state:
//! the token store, the match browser, and the conversation controller.
//! It depends only on `campusmatch-types` -- never on reqwest or any
//! other IO crate.

pub mod api;
pub mod browser;
pub mod conversation;
pub mod event;
pub mod token;
