use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of content a torrent carries.
///
/// Declaration order is significant: it is the iteration order of
/// size buckets in the release classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    TvShow,
    Music,
    Ebook,
    Comic,
    Audiobook,
    Game,
    Software,
    Xxx,
}

impl ContentType {
    pub const ALL: [ContentType; 9] = [
        Self::Movie,
        Self::TvShow,
        Self::Music,
        Self::Ebook,
        Self::Comic,
        Self::Audiobook,
        Self::Game,
        Self::Software,
        Self::Xxx,
    ];

    /// Serialized names, in the same order as [`ContentType::ALL`].
    pub const NAMES: [&'static str; 9] = [
        "movie",
        "tv_show",
        "music",
        "ebook",
        "comic",
        "audiobook",
        "game",
        "software",
        "xxx",
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvShow => "tv_show",
            Self::Music => "music",
            Self::Ebook => "ebook",
            Self::Comic => "comic",
            Self::Audiobook => "audiobook",
            Self::Game => "game",
            Self::Software => "software",
            Self::Xxx => "xxx",
        }
    }

    /// Looks up the content type implied by a lower-case file extension.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        let ct = match extension {
            "3g2" | "3gp" | "avi" | "divx" | "flv" | "m2ts" | "m4v" | "mkv" | "mov" | "mp4"
            | "mpeg" | "mpg" | "mts" | "ogm" | "ogv" | "rm" | "rmvb" | "ts" | "vob" | "webm"
            | "wmv" | "xvid" => Self::Movie,
            "aac" | "aiff" | "alac" | "ape" | "dsf" | "flac" | "m4a" | "mka" | "mp3" | "ogg"
            | "opus" | "wav" | "wma" | "wv" => Self::Music,
            "azw" | "azw3" | "azw4" | "djvu" | "epub" | "mobi" | "pdf" => Self::Ebook,
            "cb7" | "cba" | "cbr" | "cbt" | "cbz" => Self::Comic,
            "m4b" => Self::Audiobook,
            "apk" | "app" | "bin" | "deb" | "dmg" | "exe" | "img" | "iso" | "msi" | "pkg"
            | "rpm" => Self::Software,
            _ => return None,
        };
        Some(ct)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown content type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content type: {0:?}")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ct| ct.as_str() == s)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// Release year; `0` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Year(pub u16);

impl Year {
    pub const UNKNOWN: Year = Year(0);

    #[must_use]
    pub fn is_known(self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub fn get(self) -> Option<u16> {
        self.is_known().then_some(self.0)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_known() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("unknown")
        }
    }
}
