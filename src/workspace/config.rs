//! Tunable limits and defaults for a workspace.

use crate::member::domain::MemberId;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the member id in [`WorkspaceConfig::avatar_url_template`].
const ID_PLACEHOLDER: &str = "{id}";

/// Workspace configuration.
///
/// Every field is optional when deserializing; missing fields take their
/// [`Default`] values.
///
/// # Examples
///
/// ```
/// use taskboard::workspace::WorkspaceConfig;
///
/// let config = WorkspaceConfig::from_json(r#"{ "maxTitleLength": 80 }"#)?;
/// assert_eq!(config.max_title_length, 80);
/// assert_eq!(config.max_comment_length, 5_000);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Maximum task title length in characters.
    pub max_title_length: usize,
    /// Maximum comment length in characters.
    pub max_comment_length: usize,
    /// How many times a conflicting reaction toggle is re-read and re-applied.
    pub reaction_retry_limit: u32,
    /// Avatar URL used for profiles created without one.
    pub avatar_url_template: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_title_length: 200,
            max_comment_length: 5_000,
            reaction_retry_limit: 3,
            avatar_url_template: "https://picsum.photos/seed/{id}/200/200".to_owned(),
        }
    }
}

impl WorkspaceConfig {
    /// Creates a configuration with tight limits and no reaction retries.
    ///
    /// Useful in tests that exercise conflict and length handling.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            max_title_length: 80,
            max_comment_length: 1_000,
            reaction_retry_limit: 0,
            ..Self::default()
        }
    }

    /// Parses a (possibly partial) JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Renders the default avatar URL for `id`.
    #[must_use]
    pub fn avatar_url_for(&self, id: &MemberId) -> String {
        self.avatar_url_template.replace(ID_PLACEHOLDER, id.as_str())
    }
}
