//! Dating profile types.
//!
//! The service owns profiles; the client only reads them back and submits
//! the upsert form. `age` and `gender` are optional on read because older
//! accounts predate those fields.

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A user's dating profile as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub major: String,
    pub class_year: u32,
    pub campus: String,
    /// Display order is meaningful and preserved.
    #[serde(default)]
    pub interests: Vec<String>,
    pub bio: String,
}

/// Body of `POST /profile` (create-or-replace of the caller's profile).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileForm {
    pub age: u32,
    pub gender: String,
    pub major: String,
    pub class_year: u32,
    pub campus: String,
    pub interests: Vec<String>,
    pub bio: String,
}
