use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::episode::Episodes;

/// Vertical video resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VideoResolution {
    #[serde(rename = "V360p")]
    V360p,
    #[serde(rename = "V480p")]
    V480p,
    #[serde(rename = "V540p")]
    V540p,
    #[serde(rename = "V576p")]
    V576p,
    #[serde(rename = "V720p")]
    V720p,
    #[serde(rename = "V1080p")]
    V1080p,
    #[serde(rename = "V1440p")]
    V1440p,
    #[serde(rename = "V2160p")]
    V2160p,
    #[serde(rename = "V4320p")]
    V4320p,
}

impl fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = match self {
            Self::V360p => 360,
            Self::V480p => 480,
            Self::V540p => 540,
            Self::V576p => 576,
            Self::V720p => 720,
            Self::V1080p => 1080,
            Self::V1440p => 1440,
            Self::V2160p => 2160,
            Self::V4320p => 4320,
        };
        write!(f, "{lines}p")
    }
}

/// Where a video release was captured or ripped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoSource {
    Cam,
    Telesync,
    Telecine,
    Workprint,
    Dvd,
    Tv,
    WebDl,
    WebRip,
    BluRay,
}

impl fmt::Display for VideoSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cam => "CAM",
            Self::Telesync => "TELESYNC",
            Self::Telecine => "TELECINE",
            Self::Workprint => "WORKPRINT",
            Self::Dvd => "DVD",
            Self::Tv => "TV",
            Self::WebDl => "WEB-DL",
            Self::WebRip => "WEBRip",
            Self::BluRay => "BluRay",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VideoCodec {
    H264,
    #[serde(rename = "x264")]
    X264,
    #[serde(rename = "x265")]
    X265,
    XviD,
    DivX,
    #[serde(rename = "MPEG2")]
    Mpeg2,
    #[serde(rename = "AV1")]
    Av1,
}

impl fmt::Display for VideoCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::H264 => "H.264",
            Self::X264 => "x264",
            Self::X265 => "x265",
            Self::XviD => "XviD",
            Self::DivX => "DivX",
            Self::Mpeg2 => "MPEG-2",
            Self::Av1 => "AV1",
        })
    }
}

/// Stereoscopic layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Video3d {
    #[serde(rename = "V3D")]
    V3d,
    #[serde(rename = "V3DSBS")]
    V3dSbs,
    #[serde(rename = "V3DOU")]
    V3dOu,
}

impl fmt::Display for Video3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::V3d => "3D",
            Self::V3dSbs => "3D SBS",
            Self::V3dOu => "3D OU",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoModifier {
    Regional,
    Screener,
    Rawhd,
    Brdisk,
    Remux,
}

impl fmt::Display for VideoModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regional => "REGIONAL",
            Self::Screener => "SCREENER",
            Self::Rawhd => "RAWHD",
            Self::Brdisk => "BRDISK",
            Self::Remux => "REMUX",
        })
    }
}

/// Spoken or subtitle language, identified by ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    Cs,
    Da,
    De,
    El,
    En,
    Es,
    Fi,
    Fr,
    He,
    Hi,
    Hu,
    It,
    Ja,
    Ko,
    Nl,
    No,
    Pl,
    Pt,
    Ro,
    Ru,
    Sv,
    Th,
    Tr,
    Uk,
    Vi,
    Zh,
}

impl Language {
    pub const ALL: [Language; 27] = [
        Self::Ar,
        Self::Cs,
        Self::Da,
        Self::De,
        Self::El,
        Self::En,
        Self::Es,
        Self::Fi,
        Self::Fr,
        Self::He,
        Self::Hi,
        Self::Hu,
        Self::It,
        Self::Ja,
        Self::Ko,
        Self::Nl,
        Self::No,
        Self::Pl,
        Self::Pt,
        Self::Ro,
        Self::Ru,
        Self::Sv,
        Self::Th,
        Self::Tr,
        Self::Uk,
        Self::Vi,
        Self::Zh,
    ];

    /// ISO 639-1 code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::Cs => "cs",
            Self::Da => "da",
            Self::De => "de",
            Self::El => "el",
            Self::En => "en",
            Self::Es => "es",
            Self::Fi => "fi",
            Self::Fr => "fr",
            Self::He => "he",
            Self::Hi => "hi",
            Self::Hu => "hu",
            Self::It => "it",
            Self::Ja => "ja",
            Self::Ko => "ko",
            Self::Nl => "nl",
            Self::No => "no",
            Self::Pl => "pl",
            Self::Pt => "pt",
            Self::Ro => "ro",
            Self::Ru => "ru",
            Self::Sv => "sv",
            Self::Th => "th",
            Self::Tr => "tr",
            Self::Uk => "uk",
            Self::Vi => "vi",
            Self::Zh => "zh",
        }
    }

    /// English name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ar => "Arabic",
            Self::Cs => "Czech",
            Self::Da => "Danish",
            Self::De => "German",
            Self::El => "Greek",
            Self::En => "English",
            Self::Es => "Spanish",
            Self::Fi => "Finnish",
            Self::Fr => "French",
            Self::He => "Hebrew",
            Self::Hi => "Hindi",
            Self::Hu => "Hungarian",
            Self::It => "Italian",
            Self::Ja => "Japanese",
            Self::Ko => "Korean",
            Self::Nl => "Dutch",
            Self::No => "Norwegian",
            Self::Pl => "Polish",
            Self::Pt => "Portuguese",
            Self::Ro => "Romanian",
            Self::Ru => "Russian",
            Self::Sv => "Swedish",
            Self::Th => "Thai",
            Self::Tr => "Turkish",
            Self::Uk => "Ukrainian",
            Self::Vi => "Vietnamese",
            Self::Zh => "Chinese",
        }
    }

    /// Release-name tags that denote this language besides its English name.
    ///
    /// Tags are matched case-insensitively as whole tokens.
    #[must_use]
    pub fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Ar => &["ara"],
            Self::Cs => &["cze", "ces"],
            Self::Da => &["dansk", "dk"],
            Self::De => &["ger", "deu", "deutsch"],
            Self::El => &["gre", "ell"],
            Self::En => &["eng"],
            Self::Es => &["spa", "esp", "castellano", "latino"],
            Self::Fi => &["fin"],
            Self::Fr => &["fre", "fra", "vff", "vf", "truefrench"],
            Self::He => &["heb"],
            Self::Hi => &["hin"],
            Self::Hu => &["hun"],
            Self::It => &["ita"],
            Self::Ja => &["jap", "jpn"],
            Self::Ko => &["kor"],
            Self::Nl => &["dut", "nld"],
            Self::No => &["nor"],
            Self::Pl => &["pol"],
            Self::Pt => &["por", "dublado"],
            Self::Ro => &["rum", "ron"],
            Self::Ru => &["rus"],
            Self::Sv => &["swe"],
            Self::Th => &["tha"],
            Self::Tr => &["tur"],
            Self::Uk => &["ukr"],
            Self::Vi => &["vie"],
            Self::Zh => &["chi", "zho", "mandarin", "cantonese"],
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything inferred about a release beyond its title and year.
///
/// Each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentAttributes {
    pub episodes: Episodes,
    pub languages: BTreeSet<Language>,
    pub language_multi: bool,
    pub video_resolution: Option<VideoResolution>,
    pub video_source: Option<VideoSource>,
    pub video_codec: Option<VideoCodec>,
    pub video_3d: Option<Video3d>,
    pub video_modifier: Option<VideoModifier>,
    pub release_group: Option<String>,
}

impl ContentAttributes {
    /// Returns `true` if nothing beyond the defaults was inferred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
