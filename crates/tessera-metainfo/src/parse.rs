use std::ops::Range;

use bencode::Bencode;
use tracing::debug;

use crate::error::{DecodeError, MetaInfoError, Result};
use crate::info::{Info, MetaInfo};
use crate::info_hash::InfoHash;
use crate::value::{self, Dict};

/// Locates the info dictionary inside a decoded root value, with its byte
/// range in the input.
///
/// Metadata fetched from peers is a bare info dict; a `.torrent` file wraps
/// it in an envelope under the `info` key.
fn info_dict<'v>(
    root: &'v Bencode,
    len: usize,
) -> Result<(&'v Dict, &'v Bencode, Range<usize>)> {
    let dict = value::as_dict(root).ok_or(DecodeError::WrongType {
        field: "root",
        expected: "dictionary",
    })?;
    match value::get(dict, "info") {
        Some(info) if value::as_dict(info).is_some() => {
            let span = value::span_of(dict, "info").ok_or(DecodeError::MissingField("info"))?;
            Ok((dict, info, span))
        }
        Some(_) => Err(DecodeError::WrongType {
            field: "info",
            expected: "dictionary",
        }
        .into()),
        None => Ok((dict, root, 0..len)),
    }
}

/// Computes the info hash of a bare info dict or `.torrent` envelope.
///
/// Only the raw bytes of the info dictionary are hashed.
///
/// # Errors
///
/// Returns [`MetaInfoError::Decode`] if the bytes are not canonical bencode.
pub fn compute_info_hash(bytes: &[u8]) -> Result<InfoHash> {
    let root = value::decode(bytes)?;
    let (_, _, span) = info_dict(&root, bytes.len())?;
    Ok(InfoHash::digest(&bytes[span]))
}

/// Decodes `bytes` into [`Info`] and [`MetaInfo`] views and verifies that the
/// SHA-1 of the info dictionary equals `info_hash`.
///
/// # Errors
///
/// - [`MetaInfoError::Decode`] when the bencode structure or a field is malformed.
/// - [`MetaInfoError::HashMismatch`] when the digest disagrees with `info_hash`.
pub fn parse_meta_info_bytes(info_hash: InfoHash, bytes: &[u8]) -> Result<(Info, MetaInfo)> {
    let root = value::decode(bytes)?;
    let (root_dict, info_value, span) = info_dict(&root, bytes.len())?;

    let actual = InfoHash::digest(&bytes[span]);
    if actual != info_hash {
        return Err(MetaInfoError::HashMismatch {
            expected: info_hash,
            actual,
        });
    }

    let info = Info::from_value(info_value)?;
    let meta_info = MetaInfo::from_value(root_dict, info.clone())?;

    debug!(
        info_hash = %info_hash,
        name = %String::from_utf8_lossy(info.best_name()),
        files = info.files.len(),
        creation_date = meta_info.creation_date,
        "decoded meta info"
    );

    Ok((info, meta_info))
}
