//! Attaches a known release found by searching for the parsed title.

use serde_json::Value;
use tracing::debug;

use super::compiler::{Action, CompilerContext};
use super::payload::{PayloadLiteral, PayloadSpec};
use super::{ExecutableAction, ExecutionContext};
use crate::cancel::guard;
use crate::error::{Result, TesseraError};
use crate::types::Classification;

/// `"attach_release_from_predb"`
///
/// Needs a content type and a base title from earlier actions; declines
/// without searching otherwise. Search errors are returned as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachReleaseFromPredb;

const ATTACH_RELEASE_FROM_PREDB: PayloadLiteral = PayloadLiteral {
    literal: "attach_release_from_predb",
    description: "Attempt to attach a predb release with a search on the torrent name",
};

impl Action for AttachReleaseFromPredb {
    fn name(&self) -> &'static str {
        ATTACH_RELEASE_FROM_PREDB.literal
    }

    fn compile_action(&self, ctx: &CompilerContext<'_>) -> Result<ExecutableAction> {
        ATTACH_RELEASE_FROM_PREDB.unmarshal(ctx)?;
        Ok(ExecutableAction::new(attach_release))
    }

    fn json_schema(&self) -> Value {
        ATTACH_RELEASE_FROM_PREDB.json_schema()
    }
}

async fn attach_release(exec: ExecutionContext) -> Result<Classification> {
    let (Some(content_type), Some(title)) = (exec.result.content_type(), exec.result.base_title())
    else {
        return Err(TesseraError::Unmatched);
    };
    let year = exec.result.year();
    debug!(info_hash = %exec.torrent.info_hash, %content_type, title, %year, "searching for release");

    let search = exec
        .search
        .content_by_search(content_type, title, year);
    let content = guard(&exec.cancel, exec.search_timeout, search).await?;

    debug!(info_hash = %exec.torrent.info_hash, source = %content.source, id = %content.id, "attaching release");
    let mut result = exec.result;
    result.attach_content(content)?;
    Ok(result)
}
