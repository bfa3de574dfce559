use tracing::trace;

use super::attributes::{
    infer_languages, infer_video_3d, infer_video_codec_and_release_group, infer_video_modifier,
    infer_video_resolution, infer_video_source, is_multi_language,
};
use super::grammar::parse_title_year_episodes_cascade;
use crate::error::Result;
use crate::types::{ContentAttributes, ContentType, Year};

/// Structured content parsed from a video release name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoContent {
    pub content_type: ContentType,
    pub title: String,
    pub year: Year,
    pub attributes: ContentAttributes,
}

/// Parses a release name into content type, title, year and attributes.
///
/// A supplied `hint` decides the content type outright. Without one, any
/// detected episode makes it a TV show, otherwise a movie. Episodes are
/// dropped for anything but a TV show.
///
/// # Errors
///
/// Returns [`TesseraError::NoMatch`](crate::TesseraError::NoMatch) when no
/// title could be recognised.
pub fn parse_content(hint: Option<ContentType>, input: &str) -> Result<VideoContent> {
    let found = parse_title_year_episodes_cascade(hint, input)?;

    let content_type = match hint {
        Some(ct) => ct,
        None if !found.episodes.is_empty() => ContentType::TvShow,
        None => ContentType::Movie,
    };
    let mut episodes = found.episodes;
    if content_type != ContentType::TvShow {
        episodes.clear();
    }

    let rest = found.rest;
    let (video_codec, release_group) = infer_video_codec_and_release_group(rest);
    let attributes = ContentAttributes {
        episodes,
        languages: infer_languages(rest),
        language_multi: is_multi_language(rest),
        video_resolution: infer_video_resolution(rest),
        video_source: infer_video_source(rest),
        video_codec,
        video_3d: infer_video_3d(rest),
        video_modifier: infer_video_modifier(rest),
        release_group,
    };

    trace!(input, title = %found.title, %content_type, year = %found.year, "parsed video content");

    Ok(VideoContent {
        content_type,
        title: found.title,
        year: found.year,
        attributes,
    })
}
