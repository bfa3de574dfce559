//! # Tessera
//!
//! Turns crawled torrent metadata into structured content classifications.
//!
//! A [`Pipeline`] takes an info hash and the bencoded metadata received for
//! it, verifies and vets the bytes, classifies the torrent and runs the
//! configured enrichment workflow.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tessera::{Cancellation, ClassifierConfig, InfoHash, Pipeline, ReleaseIndex};
//!
//! # async fn run(info_hash: InfoHash, bytes: Vec<u8>) -> Result<(), tessera::PipelineError> {
//! let pipeline = Pipeline::new(ClassifierConfig::new(), Arc::new(ReleaseIndex::default()))?;
//! let (torrent, classification) = pipeline
//!     .classify_bytes(&Cancellation::never(), info_hash, &bytes, None)
//!     .await?;
//! println!("{}: {:?}", torrent.name, classification.content_type());
//! # Ok(())
//! # }
//! ```
pub mod pipeline;

pub use pipeline::{Pipeline, PipelineError};

pub use tessera_core::{
    CancelHandle, Cancellation, Classification, ClassifierConfig, Content, ContentSearch,
    ContentType, ReleaseIndex, TesseraError, Torrent, Year, action, cancel, cancellation,
    classifier, config, parser, search, types,
};
pub use tessera_metainfo::{self as metainfo, Banning, InfoHash, MetaInfoError};
