//! # Tessera MetaInfo
//!
//! Protocol layer of the classification pipeline. Decodes bencoded torrent
//! metadata into typed views, verifies the content-addressed info hash, and
//! gates the result through banning checks before anything is classified.
//!
//! ```rust
//! use tessera_metainfo::{Banning, InfoHash, parse_meta_info_bytes};
//!
//! let bytes = b"d6:lengthi1e4:name8:file.mkv12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaae";
//! let hash = InfoHash::digest(bytes);
//!
//! let (info, _meta) = parse_meta_info_bytes(hash, bytes).unwrap();
//! Banning::default().check(&info).unwrap();
//! assert_eq!(info.best_name(), b"file.mkv");
//! ```
pub mod banning;
pub mod error;
pub mod info;
pub mod info_hash;
pub mod parse;
pub mod value;

pub use banning::{Banning, Checker, SizeChecker, Utf8Checker};
pub use error::{DecodeError, MetaInfoError, Result};
pub use info::{File, Info, MetaInfo};
pub use info_hash::{INFO_HASH_LEN, InfoHash, InvalidInfoHash};
pub use parse::{compute_info_hash, parse_meta_info_bytes};
