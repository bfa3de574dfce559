//! # Pipeline
//!
//! parse → ban → build torrent → classify → run workflow, once per torrent.
//! Everything expensive (workflow compilation, classifier ordering) happens
//! in [`Pipeline::new`].

use std::sync::Arc;

use tessera_core::action::{Compiler, ExecutionContext, Workflow};
use tessera_core::{
    Cancellation, Classification, ClassifierConfig, ClassifierEngine, ContentSearch, ContentType,
    TesseraError, Torrent,
};
use tessera_metainfo::{Banning, InfoHash, MetaInfoError, parse_meta_info_bytes};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The metadata bytes were malformed, mismatched or banned.
    #[error(transparent)]
    MetaInfo(#[from] MetaInfoError),

    #[error(transparent)]
    Classification(#[from] TesseraError),
}

/// A configured classification pipeline. Holds no per-torrent state, so one
/// instance can serve concurrent callers.
pub struct Pipeline {
    config: ClassifierConfig,
    engine: ClassifierEngine,
    workflow: Workflow,
    banning: Banning,
    search: Arc<dyn ContentSearch>,
}

impl Pipeline {
    /// Compiles the configured workflow and orders the classifiers.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Classification`] if the workflow definition
    /// does not compile.
    pub fn new(config: ClassifierConfig, search: Arc<dyn ContentSearch>) -> Result<Self, PipelineError> {
        let workflow = Compiler::default().compile_workflow(&config.workflow)?;
        let engine = ClassifierEngine::default().without(config.disabled_classifiers.as_slice());
        let banning = Banning::default();
        info!(
            classifiers = ?engine.keys(),
            checkers = ?banning.names(),
            actions = workflow.len(),
            "pipeline ready"
        );
        Ok(Self {
            config,
            engine,
            workflow,
            banning,
            search,
        })
    }

    /// Replaces the default banning checks.
    #[must_use]
    pub fn with_banning(mut self, banning: Banning) -> Self {
        self.banning = banning;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a torrent from the raw metadata bytes received for `info_hash`.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::MetaInfo`] when the bytes fail to decode, hash to a
    ///   different info hash, or are banned.
    /// - [`PipelineError::Classification`] when a classifier or action fails.
    pub async fn classify_bytes(
        &self,
        cancel: &Cancellation,
        info_hash: InfoHash,
        bytes: &[u8],
        hint: Option<ContentType>,
    ) -> Result<(Torrent, Classification), PipelineError> {
        let (info, _) = parse_meta_info_bytes(info_hash, bytes)
            .inspect_err(|e| warn!(%info_hash, error = %e, "rejected metadata"))?;
        self.banning
            .check(&info)
            .inspect_err(|e| warn!(%info_hash, error = %e, "banned torrent"))?;

        let mut torrent = Torrent::from_info(info_hash, &info, self.config.files_threshold);
        torrent.hint = hint;
        self.classify_torrent(cancel, torrent).await
    }

    /// Classifies an already-built torrent record.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Classification`] when a classifier or action
    /// fails, including [`TesseraError::Cancelled`].
    pub async fn classify_torrent(
        &self,
        cancel: &Cancellation,
        torrent: Torrent,
    ) -> Result<(Torrent, Classification), PipelineError> {
        let initial = self.engine.classify(&torrent)?;

        let torrent = Arc::new(torrent);
        let ctx = ExecutionContext::new(Arc::clone(&torrent), initial, Arc::clone(&self.search))
            .with_cancellation(cancel.clone())
            .with_search_timeout(self.config.search_timeout);
        let classification = self
            .workflow
            .run(ctx)
            .await
            .inspect_err(|e| warn!(info_hash = %torrent.info_hash, error = %e, "workflow failed"))?;

        info!(
            info_hash = %torrent.info_hash,
            content_type = ?classification.content_type(),
            title = classification.base_title(),
            year = %classification.year(),
            attached = classification.content().is_some(),
            "classified torrent"
        );

        let torrent = Arc::try_unwrap(torrent).unwrap_or_else(|shared| (*shared).clone());
        Ok((torrent, classification))
    }
}
