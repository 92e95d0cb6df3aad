//! Match browser: the ordered candidate list and a cyclic cursor.
//!
//! Navigation is a pure local state transition -- "like" and "pass" are
//! presentation-only advances, never recorded server-side. Only
//! `refresh` talks to the network, and a failed refresh leaves the
//! previous candidates and cursor exactly as they were.

use std::sync::Arc;

use campusmatch_types::error::ApiError;
use campusmatch_types::event::SessionEvent;
use campusmatch_types::matching::MatchCandidate;
use campusmatch_types::user::UserId;

use crate::api::MatchmakerApi;
use crate::event::EventBus;

/// Owns the ranked candidate list and the position within it.
///
/// Invariant: `cursor < candidates.len()` whenever the list is
/// non-empty; the cursor is inactive while the list is empty. Advancing
/// and retreating wrap modulo the list length, so the cursor can never
/// go out of bounds.
pub struct MatchBrowser<A> {
    api: Arc<A>,
    events: EventBus,
    candidates: Vec<MatchCandidate>,
    cursor: usize,
}

impl<A: MatchmakerApi> MatchBrowser<A> {
    /// Create a browser with an empty candidate list.
    pub fn new(api: Arc<A>, events: EventBus) -> Self {
        Self {
            api,
            events,
            candidates: Vec::new(),
            cursor: 0,
        }
    }

    /// Re-fetch the candidate list from the service.
    ///
    /// On success the list is wholesale-replaced (never merged) and the
    /// cursor resets to the top-ranked candidate. On failure the prior
    /// list and cursor are left untouched and the error is returned for
    /// display.
    ///
    /// Overlapping refreshes are not fenced: the last response to land
    /// wins. This is a user-paced, single-focus action.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let fetched = self.api.fetch_matches().await?;
        tracing::debug!(count = fetched.len(), "replaced match candidates");
        self.candidates = fetched;
        self.cursor = 0;
        self.events.publish(SessionEvent::MatchesRefreshed {
            count: self.candidates.len(),
        });
        Ok(())
    }

    /// The candidate under the cursor, or `None` while the list is empty.
    pub fn current(&self) -> Option<&MatchCandidate> {
        self.candidates.get(self.cursor)
    }

    /// Move to the next candidate, wrapping at the end of the list.
    pub fn advance(&mut self) {
        self.step(1);
    }

    /// Move to the previous candidate, wrapping at the start of the list.
    pub fn retreat(&mut self) {
        self.step(-1);
    }

    /// The user id of the current candidate, for handing to the
    /// conversation controller. `None` while the list is empty.
    pub fn select_for_chat(&self) -> Option<UserId> {
        self.current().map(|c| c.profile.user_id)
    }

    /// Cursor position, or `None` while the list is empty.
    pub fn position(&self) -> Option<usize> {
        (!self.candidates.is_empty()).then_some(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[MatchCandidate] {
        &self.candidates
    }

    fn step(&mut self, delta: isize) {
        let len = self.candidates.len();
        if len == 0 {
            return;
        }
        self.cursor = (self.cursor as isize + delta).rem_euclid(len as isize) as usize;
        self.events.publish(SessionEvent::CursorMoved {
            position: self.cursor,
            total: len,
        });
    }
}
