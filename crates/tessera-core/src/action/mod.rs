//! # Actions
//!
//! Declarative enrichment steps. A rule definition is a JSON array of
//! actions, each either a bare tag (`"parse_video_content"`) or a single-key
//! object (`{"set_content_type": "movie"}`). The [`Compiler`] validates a
//! definition once and turns it into a [`Workflow`] of closures bound to the
//! validated configuration; running it never re-parses the definition.

pub mod compiler;
pub mod condition;
pub mod control;
pub mod payload;
pub mod predb;
pub mod video;
pub mod workflow;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::cancel::Cancellation;
use crate::error::Result;
use crate::search::ContentSearch;
use crate::types::{Classification, Torrent};

pub use compiler::{Action, Compiler, CompilerContext, default_workflow};
pub use condition::Condition;
pub use control::{FindMatch, IfElse, SetContentType, UnmatchedAction};
pub use payload::{
    PayloadAction, PayloadCondition, PayloadEnum, PayloadList, PayloadLiteral,
    PayloadSingleKeyValue, PayloadSpec, PayloadStruct,
};
pub use predb::AttachReleaseFromPredb;
pub use video::ParseVideoContent;
pub use workflow::Workflow;

/// Everything an action sees while it runs.
///
/// `result` is the classification accumulated by earlier actions; an action
/// returns the updated copy rather than mutating shared state.
#[derive(Clone)]
pub struct ExecutionContext {
    pub torrent: Arc<Torrent>,
    pub result: Classification,
    pub search: Arc<dyn ContentSearch>,
    pub cancel: Cancellation,
    pub search_timeout: Option<Duration>,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(torrent: Arc<Torrent>, result: Classification, search: Arc<dyn ContentSearch>) -> Self {
        Self {
            torrent,
            result,
            search,
            cancel: Cancellation::never(),
            search_timeout: None,
        }
    }

    #[must_use]
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn with_search_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.search_timeout = timeout;
        self
    }
}

pub type ActionFuture = BoxFuture<'static, Result<Classification>>;

/// A compiled action: a closure from context to updated classification.
#[derive(Clone)]
pub struct ExecutableAction {
    run: Arc<dyn Fn(ExecutionContext) -> ActionFuture + Send + Sync>,
}

impl ExecutableAction {
    pub fn new<F, Fut>(run: F) -> Self
    where
        F: Fn(ExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Classification>> + Send + 'static,
    {
        Self {
            run: Arc::new(move |ctx| run(ctx).boxed()),
        }
    }

    /// Runs the action against `ctx`.
    ///
    /// # Errors
    ///
    /// [`TesseraError::Unmatched`](crate::TesseraError::Unmatched) when the
    /// action does not apply; anything else is a hard failure.
    pub async fn run(&self, ctx: ExecutionContext) -> Result<Classification> {
        (self.run)(ctx).await
    }
}

impl std::fmt::Debug for ExecutableAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ExecutableAction")
    }
}
