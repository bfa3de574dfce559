use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tessera_metainfo::{Info, InfoHash};

use super::content::ContentType;

static EXTENSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.([A-Za-z0-9]{1,10})$").expect("Invalid extension pattern")
});

/// Shape of a torrent's file listing, as far as classifiers care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilesStatus {
    /// Only the name is known.
    NoInfo,
    Single,
    Multi,
    /// More files than the configured threshold.
    OverThreshold,
}

impl FilesStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoInfo => "no_info",
            Self::Single => "single",
            Self::Multi => "multi",
            Self::OverThreshold => "over_threshold",
        }
    }
}

impl fmt::Display for FilesStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file of a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFile {
    pub path: String,
    pub size: u64,
    pub extension: Option<String>,
}

impl TorrentFile {
    #[must_use]
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        let path = path.into();
        let extension = file_extension(&path);
        Self {
            path,
            size,
            extension,
        }
    }
}

/// Lower-cased suffix after the last `.` of the final path component.
#[must_use]
pub fn file_extension(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    EXTENSION_PATTERN
        .captures(file_name)
        .map(|c| c[1].to_ascii_lowercase())
}

/// A torrent as seen by the classification engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Torrent {
    pub info_hash: InfoHash,
    pub name: String,
    pub files: Vec<TorrentFile>,
    pub size: u64,
    pub files_status: FilesStatus,
    pub hint: Option<ContentType>,
}

impl Torrent {
    /// Builds a name-only record.
    #[must_use]
    pub fn new(info_hash: InfoHash, name: impl Into<String>) -> Self {
        Self {
            info_hash,
            name: name.into(),
            files: Vec::new(),
            size: 0,
            files_status: FilesStatus::NoInfo,
            hint: None,
        }
    }

    /// Builds a record from a decoded info dictionary that already passed banning.
    ///
    /// Invalid UTF-8 is replaced lossily, which never happens after the
    /// UTF-8 check.
    #[must_use]
    pub fn from_info(info_hash: InfoHash, info: &Info, files_threshold: usize) -> Self {
        let files: Vec<TorrentFile> = info
            .upverted_files()
            .iter()
            .map(|f| TorrentFile::new(String::from_utf8_lossy(&f.display_path(info)), f.length))
            .collect();

        let files_status = if info.is_single_file() {
            FilesStatus::Single
        } else if files.len() > files_threshold {
            FilesStatus::OverThreshold
        } else {
            FilesStatus::Multi
        };

        Self {
            info_hash,
            name: String::from_utf8_lossy(info.best_name()).into_owned(),
            size: info.total_length(),
            files,
            files_status,
            hint: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: ContentType) -> Self {
        self.hint = Some(hint);
        self
    }

    #[must_use]
    pub fn with_files(mut self, files: Vec<TorrentFile>, files_threshold: usize) -> Self {
        self.size = files
            .iter()
            .fold(0u64, |total, f| total.saturating_add(f.size));
        self.files_status = match files.len() {
            0 => FilesStatus::NoInfo,
            1 => FilesStatus::Single,
            n if n > files_threshold => FilesStatus::OverThreshold,
            _ => FilesStatus::Multi,
        };
        self.files = files;
        self
    }

    /// Extension of the lone file of a single-file torrent.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        match (self.files_status, self.files.as_slice()) {
            (FilesStatus::Single, [file]) => file.extension.as_deref(),
            _ => None,
        }
    }
}
