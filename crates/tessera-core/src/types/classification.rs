use serde::{Deserialize, Serialize};

use super::attributes::ContentAttributes;
use super::content::{ContentType, Year};
use super::episode::Episodes;
use crate::error::{Result, TesseraError};

/// A record from an external content source, attached by an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub source: String,
    pub id: String,
    pub title: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub year: Year,
}

/// The structured output of the engine for one torrent.
///
/// Fields are private so the cross-field invariants always hold:
/// episodes are empty unless the content type is [`ContentType::TvShow`],
/// and attached content requires both a content type and a base title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    content_type: Option<ContentType>,
    base_title: Option<String>,
    year: Year,
    attributes: ContentAttributes,
    content: Option<Content>,
}

impl Classification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A classification carrying only a content type.
    #[must_use]
    pub fn with_content_type(content_type: ContentType) -> Self {
        let mut classification = Self::default();
        classification.set_content_type(Some(content_type));
        classification
    }

    #[must_use]
    pub fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    #[must_use]
    pub fn base_title(&self) -> Option<&str> {
        self.base_title.as_deref()
    }

    #[must_use]
    pub fn year(&self) -> Year {
        self.year
    }

    #[must_use]
    pub fn attributes(&self) -> &ContentAttributes {
        &self.attributes
    }

    #[must_use]
    pub fn episodes(&self) -> &Episodes {
        &self.attributes.episodes
    }

    #[must_use]
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    /// Sets or clears the content type. Episodes are dropped unless the new
    /// type is a TV show; attached content is dropped when the type is cleared.
    pub fn set_content_type(&mut self, content_type: Option<ContentType>) {
        self.content_type = content_type;
        if content_type != Some(ContentType::TvShow) {
            self.attributes.episodes.clear();
        }
        if content_type.is_none() {
            self.content = None;
        }
    }

    /// Sets or clears the base title. Clearing it drops attached content.
    pub fn set_base_title(&mut self, base_title: Option<String>) {
        if base_title.is_none() {
            self.content = None;
        }
        self.base_title = base_title;
    }

    pub fn set_year(&mut self, year: Year) {
        self.year = year;
    }

    /// Replaces the attributes, dropping episodes unless this is a TV show.
    pub fn set_attributes(&mut self, attributes: ContentAttributes) {
        self.attributes = attributes;
        if self.content_type != Some(ContentType::TvShow) {
            self.attributes.episodes.clear();
        }
    }

    /// Attaches an external content record.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::Unmatched`] if the content type or base title
    /// is not yet known.
    pub fn attach_content(&mut self, content: Content) -> Result<()> {
        if self.content_type.is_none() || self.base_title.is_none() {
            return Err(TesseraError::Unmatched);
        }
        self.content = Some(content);
        Ok(())
    }
}
