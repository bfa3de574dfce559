//! # Info and MetaInfo Views
//!
//! Typed views decoded from a bencode value. [`Info`] is the
//! hashing-relevant subset of a torrent's metadata; [`MetaInfo`] is the
//! surrounding `.torrent` envelope. Display strings are kept as raw bytes:
//! whether they are valid text is decided by the banning checks, not here.

use bencode::Bencode;

use crate::error::DecodeError;
use crate::value::{Dict, as_bytes, as_dict, as_integer, as_list, get};

/// Length of one SHA-1 piece hash inside `pieces`.
pub const PIECE_HASH_LEN: usize = 20;

/// The info dictionary of a torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub name: Vec<u8>,
    /// BEP-3 extension carrying an explicitly UTF-8 name.
    pub name_utf8: Option<Vec<u8>>,
    pub piece_length: u64,
    /// Concatenated SHA-1 piece hashes.
    pub pieces: Vec<u8>,
    /// Total length of a single-file torrent.
    pub length: Option<u64>,
    /// File list of a multi-file torrent; empty for single-file torrents.
    pub files: Vec<File>,
    pub private: bool,
}

/// One entry of a multi-file info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    pub length: u64,
    pub path: Vec<Vec<u8>>,
    pub path_utf8: Option<Vec<Vec<u8>>>,
}

/// The full `.torrent` envelope around an [`Info`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetaInfo {
    pub announce: Option<String>,
    pub announce_list: Vec<Vec<String>>,
    /// Unix timestamp.
    pub creation_date: Option<i64>,
    pub comment: Option<String>,
    pub created_by: Option<String>,
    pub encoding: Option<String>,
    pub info: Option<Info>,
}

impl Info {
    /// Decodes an info dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when a required field is missing or mistyped,
    /// or when the file lengths overflow a `u64` total.
    pub fn from_value(value: &Bencode) -> Result<Self, DecodeError> {
        let dict = as_dict(value).ok_or(DecodeError::WrongType {
            field: "info",
            expected: "dictionary",
        })?;

        let name = required_bytes(dict, "name")?.to_vec();
        let name_utf8 = optional_bytes(dict, "name.utf-8")?.map(<[u8]>::to_vec);
        let piece_length = required_u64(dict, "piece length")?;

        let pieces = required_bytes(dict, "pieces")?.to_vec();
        if pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(DecodeError::InvalidPieces(pieces.len()));
        }

        let length = optional_u64(dict, "length")?;
        let files = match get(dict, "files") {
            Some(files) => as_list(files)
                .ok_or(DecodeError::WrongType {
                    field: "files",
                    expected: "list",
                })?
                .iter()
                .map(File::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };
        if length.is_none() && get(dict, "files").is_none() {
            return Err(DecodeError::MissingField("length"));
        }
        files
            .iter()
            .try_fold(0u64, |total, f| total.checked_add(f.length))
            .ok_or(DecodeError::LengthOverflow)?;

        let private = optional_u64(dict, "private")?.is_some_and(|p| p == 1);

        Ok(Self {
            name,
            name_utf8,
            piece_length,
            pieces,
            length,
            files,
            private,
        })
    }

    /// The preferred display name: `name.utf-8` when present, otherwise `name`.
    #[must_use]
    pub fn best_name(&self) -> &[u8] {
        self.name_utf8.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_single_file(&self) -> bool {
        self.files.is_empty()
    }

    /// Files of the torrent, with a single-file torrent presented as one
    /// file whose path is empty (its display path is the best name).
    #[must_use]
    pub fn upverted_files(&self) -> Vec<File> {
        if self.is_single_file() {
            vec![File {
                length: self.length.unwrap_or_default(),
                path: Vec::new(),
                path_utf8: None,
            }]
        } else {
            self.files.clone()
        }
    }

    /// Sum of all file lengths, saturating at `u64::MAX`. Decoded infos
    /// never saturate: an overflowing total is rejected by [`Info::from_value`].
    #[must_use]
    pub fn total_length(&self) -> u64 {
        if self.is_single_file() {
            self.length.unwrap_or_default()
        } else {
            self.files
                .iter()
                .fold(0u64, |total, f| total.saturating_add(f.length))
        }
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.pieces.len() / PIECE_HASH_LEN
    }
}

impl File {
    fn from_value(value: &Bencode) -> Result<Self, DecodeError> {
        let dict = as_dict(value).ok_or(DecodeError::WrongType {
            field: "files",
            expected: "list of dictionaries",
        })?;
        Ok(Self {
            length: required_u64(dict, "length")?,
            path: path_list(dict, "path")?.ok_or(DecodeError::MissingField("path"))?,
            path_utf8: path_list(dict, "path.utf-8")?,
        })
    }

    /// Path components preferring `path.utf-8`.
    #[must_use]
    pub fn best_path(&self) -> &[Vec<u8>] {
        self.path_utf8.as_deref().unwrap_or(&self.path)
    }

    /// Path shown to users, joined with `/`. Empty paths fall back to the
    /// torrent's best name, which is how single-file torrents are displayed.
    #[must_use]
    pub fn display_path(&self, info: &Info) -> Vec<u8> {
        let path = self.best_path();
        if path.is_empty() {
            return info.best_name().to_vec();
        }
        path.join(&b'/')
    }
}

impl MetaInfo {
    /// Decodes the envelope fields of `root`, attaching an already decoded `info`.
    ///
    /// A bare info dictionary has no envelope fields; they are left empty.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] when an envelope field has the wrong type.
    pub fn from_value(root: &Dict, info: Info) -> Result<Self, DecodeError> {
        let announce_list = match get(root, "announce-list") {
            Some(tiers) => as_list(tiers)
                .ok_or(DecodeError::WrongType {
                    field: "announce-list",
                    expected: "list",
                })?
                .iter()
                .map(|tier| {
                    as_list(tier)
                        .ok_or(DecodeError::WrongType {
                            field: "announce-list",
                            expected: "list of lists",
                        })?
                        .iter()
                        .map(|url| {
                            as_bytes(url).map(lossy).ok_or(DecodeError::WrongType {
                                field: "announce-list",
                                expected: "list of strings",
                            })
                        })
                        .collect::<Result<Vec<String>, DecodeError>>()
                })
                .collect::<Result<Vec<Vec<String>>, _>>()?,
            None => Vec::new(),
        };

        Ok(Self {
            announce: optional_bytes(root, "announce")?.map(lossy),
            announce_list,
            creation_date: optional_integer(root, "creation date")?,
            comment: optional_bytes(root, "comment")?.map(lossy),
            created_by: optional_bytes(root, "created by")?.map(lossy),
            encoding: optional_bytes(root, "encoding")?.map(lossy),
            info: Some(info),
        })
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn optional_bytes<'a>(dict: &'a Dict, field: &'static str) -> Result<Option<&'a [u8]>, DecodeError> {
    get(dict, field)
        .map(|v| {
            as_bytes(v).ok_or(DecodeError::WrongType {
                field,
                expected: "byte string",
            })
        })
        .transpose()
}

fn required_bytes<'a>(dict: &'a Dict, field: &'static str) -> Result<&'a [u8], DecodeError> {
    optional_bytes(dict, field)?.ok_or(DecodeError::MissingField(field))
}

fn optional_integer(dict: &Dict, field: &'static str) -> Result<Option<i64>, DecodeError> {
    get(dict, field)
        .map(|v| {
            as_integer(v).ok_or(DecodeError::WrongType {
                field,
                expected: "integer",
            })
        })
        .transpose()
}

fn optional_u64(dict: &Dict, field: &'static str) -> Result<Option<u64>, DecodeError> {
    optional_integer(dict, field)?
        .map(|n| {
            u64::try_from(n).map_err(|_| DecodeError::WrongType {
                field,
                expected: "non-negative integer",
            })
        })
        .transpose()
}

fn required_u64(dict: &Dict, field: &'static str) -> Result<u64, DecodeError> {
    optional_u64(dict, field)?.ok_or(DecodeError::MissingField(field))
}

fn path_list(dict: &Dict, field: &'static str) -> Result<Option<Vec<Vec<u8>>>, DecodeError> {
    let wrong = DecodeError::WrongType {
        field,
        expected: "list of byte strings",
    };
    match get(dict, field) {
        Some(list) => as_list(list)
            .ok_or(wrong.clone())?
            .iter()
            .map(|part| as_bytes(part).map(<[u8]>::to_vec).ok_or(wrong.clone()))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        None => Ok(None),
    }
}
