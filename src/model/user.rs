//! User Directory Data Structures
//!
//! Users are owned by the session gateway; this service only mirrors the
//! fields it needs to resolve authors and member lists for display.

use serde::{Deserialize, Serialize};

/// Public profile card embedded in room and message payloads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Gateway-issued user ID
    pub id: String,
    /// Display name shown in the UI
    pub display_name: String,
    /// Avatar image URL, empty when the user has none
    pub avatar_url: String,
}

impl UserSummary {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: avatar_url.into(),
        }
    }

    /// Placeholder for an ID with no matching directory row.
    ///
    /// Membership references stay valid even when the directory has not
    /// seen the user yet, so reads fall back to an empty profile instead
    /// of failing the whole payload.
    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: String::new(),
            avatar_url: String::new(),
        }
    }
}
