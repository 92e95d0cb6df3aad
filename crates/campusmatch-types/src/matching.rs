//! Ranked match candidates.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// One scored candidate from `GET /matches`.
///
/// The service returns candidates sorted by descending score; the client
/// trusts that order and never re-sorts. Candidates are immutable once
/// received -- each fetch replaces the whole set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub profile: Profile,
    pub score: f64,
}
