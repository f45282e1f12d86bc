//! Theme entity: a named topical grouping of questions.

use serde::{Deserialize, Serialize};

/// Storage-assigned theme identifier.
pub type ThemeId = i64;

/// Topical grouping. `title` is unique across all themes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub title: String,
}

impl Theme {
    pub fn new(id: ThemeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}
