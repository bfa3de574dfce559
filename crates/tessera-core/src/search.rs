//! # Content Search
//!
//! The external lookup an action may call to attach a known release to a
//! classification. Implementations own their own I/O and locking.

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Result, TesseraError};
use crate::parser::clean_title;
use crate::types::{Content, ContentType, Year};

/// Best-effort content lookup by type, title and year.
#[async_trait]
pub trait ContentSearch: Send + Sync {
    /// Finds content matching the query.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Unmatched`] when nothing matches and
    /// [`TesseraError::Search`] when the backend fails.
    async fn content_by_search(
        &self,
        content_type: ContentType,
        title: &str,
        year: Year,
    ) -> Result<Content>;
}

/// In-memory release index.
///
/// Titles compare case-insensitively after normalization. An unknown year on
/// either side matches any year.
#[derive(Debug, Clone, Default)]
pub struct ReleaseIndex {
    entries: Vec<(String, Content)>,
}

fn normalize_title(title: &str) -> String {
    clean_title(title).to_lowercase()
}

impl ReleaseIndex {
    #[must_use]
    pub fn new(contents: impl IntoIterator<Item = Content>) -> Self {
        let mut index = Self::default();
        for content in contents {
            index.insert(content);
        }
        index
    }

    /// Loads an index from a JSON array of content records.
    ///
    /// # Errors
    ///
    /// Returns the deserialization error if `json` is not a list of records.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let contents: Vec<Content> = serde_json::from_str(json)?;
        Ok(Self::new(contents))
    }

    pub fn insert(&mut self, content: Content) {
        self.entries.push((normalize_title(&content.title), content));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn find(&self, content_type: ContentType, title: &str, year: Year) -> Option<&Content> {
        let key = normalize_title(title);
        self.entries
            .iter()
            .find(|(normalized, content)| {
                content.content_type == content_type
                    && *normalized == key
                    && (!year.is_known() || !content.year.is_known() || content.year == year)
            })
            .map(|(_, content)| content)
    }
}

#[async_trait]
impl ContentSearch for ReleaseIndex {
    async fn content_by_search(
        &self,
        content_type: ContentType,
        title: &str,
        year: Year,
    ) -> Result<Content> {
        let found = self.find(content_type, title, year).cloned();
        debug!(%content_type, title, %year, found = found.is_some(), "release index lookup");
        found.ok_or(TesseraError::Unmatched)
    }
}
