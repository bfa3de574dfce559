//! Parses the torrent name into a video classification.

use serde_json::Value;

use super::compiler::{Action, CompilerContext};
use super::payload::{PayloadLiteral, PayloadSpec};
use super::{ExecutableAction, ExecutionContext};
use crate::error::{Result, TesseraError};
use crate::parser::parse_content;
use crate::types::{Classification, ContentType};

/// `"parse_video_content"`
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseVideoContent;

const PARSE_VIDEO_CONTENT: PayloadLiteral = PayloadLiteral {
    literal: "parse_video_content",
    description: "Parse title, year, episodes and video attributes from the torrent name",
};

impl Action for ParseVideoContent {
    fn name(&self) -> &'static str {
        PARSE_VIDEO_CONTENT.literal
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        PARSE_VIDEO_CONTENT.unmarshal(ctx)?;
        Ok(ExecutableAction::new(parse_video_content))
    }

    fn json_schema(&self) -> Value {
        PARSE_VIDEO_CONTENT.json_schema()
    }
}

async fn parse_video_content(exec: ExecutionContext) -> Result<Classification> {
    if !matches!(
        exec.result.content_type(),
        None | Some(ContentType::Movie | ContentType::TvShow)
    ) {
        return Err(TesseraError::Unmatched);
    }
    let parsed = match parse_content(exec.torrent.hint, &exec.torrent.name) {
        Ok(parsed) => parsed,
        Err(e) if e.is_no_match() => return Err(TesseraError::Unmatched),
        Err(e) => return Err(e),
    };

    let mut result = exec.result;
    result.set_content_type(Some(parsed.content_type));
    result.set_base_title(Some(parsed.title));
    result.set_year(parsed.year);
    result.set_attributes(parsed.attributes);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::testing::{CountingSearch, context};
    use crate::types::{EpisodeId, VideoResolution, Year};

    fn action() -> ExecutableAction {
        let compiler = crate::action::Compiler::default();
        let source = Value::from("parse_video_content");
        CompilerContext::new(&compiler, &source).compile_action().unwrap()
    }

    fn ctx(name: &str) -> ExecutionContext {
        context(name, Arc::new(CountingSearch::default()))
    }

    #[tokio::test]
    async fn fills_in_a_movie() {
        let result = action().run(ctx("The.Matrix.1999.1080p.BluRay.x264-GRP")).await.unwrap();
        assert_eq!(result.content_type(), Some(ContentType::Movie));
        assert_eq!(result.base_title(), Some("The Matrix"));
        assert_eq!(result.year(), Year(1999));
        assert_eq!(result.attributes().video_resolution, Some(VideoResolution::V1080p));
    }

    #[tokio::test]
    async fn fills_in_episodes() {
        let result = action().run(ctx("Show.Name.S01E02.720p")).await.unwrap();
        assert_eq!(result.content_type(), Some(ContentType::TvShow));
        assert_eq!(result.episodes().as_slice(), &[EpisodeId::new(1, 2)]);
    }

    #[tokio::test]
    async fn torrent_hint_decides_the_type() {
        let mut exec = ctx("Show Name S01E02");
        exec.torrent = Arc::new(exec.torrent.as_ref().clone().with_hint(ContentType::Movie));
        let result = action().run(exec).await.unwrap();
        assert_eq!(result.content_type(), Some(ContentType::Movie));
        assert!(result.episodes().is_empty());
    }

    #[tokio::test]
    async fn declines_non_video_types_and_unparseable_names() {
        let mut exec = ctx("The.Matrix.1999");
        exec.result.set_content_type(Some(ContentType::Music));
        assert!(matches!(action().run(exec).await, Err(TesseraError::Unmatched)));

        assert!(matches!(action().run(ctx("!!!")).await, Err(TesseraError::Unmatched)));
    }
}
