//! Assessment session identifiers.
//!
//! Sessions are keyed by ULIDs: 26 characters, URL-safe, and lexicographically
//! sortable by creation time, so a list of session ids sorts oldest first and
//! the creation instant can be recovered from the id alone.
//!
//! # Example
//! ```
//! use cg_common::session_id;
//!
//! let id = session_id::generate();
//! assert!(session_id::created_at(&id).is_some());
//! ```

use chrono::{DateTime, Utc};
use ulid::Ulid;

/// Generates a fresh session id.
#[inline]
pub fn generate() -> String {
    Ulid::new().to_string()
}

/// Creation time encoded in a session id, or None when `id` is not a ULID.
pub fn created_at(id: &str) -> Option<DateTime<Utc>> {
    Ulid::from_string(id)
        .ok()
        .map(|ulid| DateTime::<Utc>::from(ulid.datetime()))
}
