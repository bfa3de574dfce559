//! # Bencode Values
//!
//! Decoding goes through the `bencode` crate; this module adds the typed
//! accessors the info views need, plus the byte span of the info
//! dictionary so it can be hashed exactly as received.

use std::collections::BTreeMap;
use std::ops::Range;

use bencode::Bencode;
use bencode::util::ByteString;

use crate::error::DecodeError;

/// A decoded bencode dictionary.
pub type Dict = BTreeMap<ByteString, Bencode>;

/// Decodes `bytes` into a single bencode value.
///
/// The input must be in canonical form: sorted keys, no leading zeros, no
/// trailing bytes. Canonical input re-encodes to itself, which is what lets
/// [`span_of`] locate nested values in the original buffer.
///
/// # Errors
///
/// - [`DecodeError::Malformed`] when the bytes are not bencode.
/// - [`DecodeError::NonCanonical`] when they are, but not in canonical form.
pub fn decode(bytes: &[u8]) -> Result<Bencode, DecodeError> {
    let value = bencode::from_buffer(bytes).map_err(|e| DecodeError::Malformed(format!("{e:?}")))?;
    let encoded = value
        .to_bytes()
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    if encoded != bytes {
        return Err(DecodeError::NonCanonical);
    }
    Ok(value)
}

/// Byte range of `dict[key]` inside the canonical encoding of `dict`.
#[must_use]
pub fn span_of(dict: &Dict, key: &str) -> Option<Range<usize>> {
    let key = ByteString::from_str(key);
    // Past the leading `d`.
    let mut offset = 1;
    for (k, v) in dict {
        offset += bytes_len(k.as_slice().len());
        if *k == key {
            return Some(offset..offset + encoded_len(v));
        }
        offset += encoded_len(v);
    }
    None
}

/// Length of the canonical encoding of `value`.
#[must_use]
pub fn encoded_len(value: &Bencode) -> usize {
    match value {
        Bencode::Empty => 0,
        Bencode::Number(n) => n.to_string().len() + 2,
        Bencode::ByteString(bytes) => bytes_len(bytes.len()),
        Bencode::List(items) => 2 + items.iter().map(encoded_len).sum::<usize>(),
        Bencode::Dict(dict) => {
            2 + dict
                .iter()
                .map(|(k, v)| bytes_len(k.as_slice().len()) + encoded_len(v))
                .sum::<usize>()
        }
    }
}

fn bytes_len(len: usize) -> usize {
    len.to_string().len() + 1 + len
}

#[must_use]
pub fn get<'a>(dict: &'a Dict, key: &str) -> Option<&'a Bencode> {
    dict.get(&ByteString::from_str(key))
}

#[must_use]
pub fn as_dict(value: &Bencode) -> Option<&Dict> {
    match value {
        Bencode::Dict(dict) => Some(dict),
        _ => None,
    }
}

#[must_use]
pub fn as_list(value: &Bencode) -> Option<&[Bencode]> {
    match value {
        Bencode::List(list) => Some(list.as_slice()),
        _ => None,
    }
}

#[must_use]
pub fn as_bytes(value: &Bencode) -> Option<&[u8]> {
    match value {
        Bencode::ByteString(bytes) => Some(bytes.as_slice()),
        _ => None,
    }
}

#[must_use]
pub fn as_integer(value: &Bencode) -> Option<i64> {
    match value {
        Bencode::Number(n) => Some(*n),
        _ => None,
    }
}
