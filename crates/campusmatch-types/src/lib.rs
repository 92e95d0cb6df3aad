//! Shared wire types for CampusMatch.
//!
//! This crate contains the DTOs exchanged with the CampusMatch service
//! (auth, profiles, matches, messages, AI chat helper) and the error
//! types shared across the client.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod auth;
pub mod error;
pub mod event;
pub mod matching;
pub mod message;
pub mod profile;
pub mod user;
