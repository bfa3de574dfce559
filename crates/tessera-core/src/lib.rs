//! # Tessera Core
//!
//! The classification engine behind Tessera. Turns a torrent's name and file
//! listing into a structured [`Classification`]: content type, base title,
//! release year, episodes and video attributes, optionally enriched with a
//! matching release from an external [`ContentSearch`].
//!
//! ## Quick Start
//!
//! ```rust
//! use tessera_core::parser::parse_content;
//! use tessera_core::types::{ContentType, Year};
//!
//! let content = parse_content(None, "The.Matrix.1999.1080p.BluRay.x264-GRP").unwrap();
//!
//! assert_eq!(content.content_type, ContentType::Movie);
//! assert_eq!(content.title, "The Matrix");
//! assert_eq!(content.year, Year(1999));
//! ```
pub mod action;
pub mod cancel;
pub mod classifier;
pub mod config;
pub mod error;
pub mod parser;
pub mod search;
pub mod types;

// Re-export primary API
pub use action::{Compiler, ExecutionContext, Workflow, default_workflow};
pub use cancel::{CancelHandle, Cancellation, cancellation};
pub use classifier::{Classifier, ClassifierEngine, HintClassifier, ReleaseClassifier};
pub use config::ClassifierConfig;
pub use error::{Result, TesseraError};
pub use search::{ContentSearch, ReleaseIndex};
pub use types::{
    Classification, Content, ContentAttributes, ContentType, EpisodeId, Episodes, FilesStatus,
    Torrent, TorrentFile, Year,
};
