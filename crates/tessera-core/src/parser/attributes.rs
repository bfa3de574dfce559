//! # Attribute Inferers
//!
//! Pure detectors run over the part of a release name left after the title,
//! year and episodes were consumed. Each one looks for its own tokens,
//! delimited by non-word characters, and ignores everything else.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexSet};

use crate::types::{Language, Video3d, VideoCodec, VideoModifier, VideoResolution, VideoSource};

/// Wraps `alternatives` so they only match as whole tokens.
fn token_pattern(alternatives: &str) -> String {
    format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}])(?:{alternatives})(?:[^\p{{L}}\p{{N}}]|$)")
}

static RESOLUTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern(
        r"(360|480|540|576|720|1080|1440|2160|4320)[pi]|(4k|uhd)",
    ))
    .expect("Invalid resolution pattern")
});

static SOURCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern(
        r"(cam(?:rip)?|hdcam|telesync|hdts|ts|pdvd|telecine|hdtc|tc|workprint|wp|dvd(?:rip|r|scr|5|9)?|hdtv|pdtv|sdtv|dsr|tvrip|satrip|web[ ._-]?dl|web[ ._-]?rip|web|blu[ ._-]?ray|bdrip|brrip|bdremux|bdr|bd)",
    ))
    .expect("Invalid source pattern")
});

static CODEC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern(
        r"(h[ .]?264|avc|x[ .]?264|x[ .]?265|h[ .]?265|hevc|xvid|divx|mpeg-?2|av1)(?:-([\p{L}\p{N}]+))?",
    ))
    .expect("Invalid codec pattern")
});

static TRAILING_GROUP_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-([\p{L}\p{N}]+)(?:\.[a-z0-9]{2,4})?$").expect("Invalid release group pattern")
});

static MULTI_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&token_pattern("multi")).expect("Invalid multi pattern"));

static VIDEO_3D_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern(
        r"((?:3d[ ._-]?)?h?-?sbs|(?:3d[ ._-]?)?h?-?ou|3d)",
    ))
    .expect("Invalid 3d pattern")
});

static MODIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&token_pattern(
        r"(r5|r6|regional|(?:dvd|bd|web)?scr|screener|rawhd|raw[ ._-]hd|brdisk|bd25|bd50|bdremux|remux)",
    ))
    .expect("Invalid modifier pattern")
});

/// One pattern per entry of [`Language::ALL`], in the same order.
static LANGUAGE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new(Language::ALL.iter().map(|lang| {
        let mut alternatives = vec![lang.name()];
        alternatives.extend_from_slice(lang.tags());
        token_pattern(&alternatives.join("|"))
    }))
    .expect("Invalid language pattern")
});

/// Tokens after a hyphen that are part of a source tag, not a group name.
const NOT_RELEASE_GROUPS: &[&str] = &["dl", "rip", "ray", "hd"];

fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '_' | '-'))
        .collect()
}

#[must_use]
pub fn infer_video_resolution(input: &str) -> Option<VideoResolution> {
    let caps = RESOLUTION_PATTERN.captures(input)?;
    if caps.get(2).is_some() {
        return Some(VideoResolution::V2160p);
    }
    match caps.get(1)?.as_str() {
        "360" => Some(VideoResolution::V360p),
        "480" => Some(VideoResolution::V480p),
        "540" => Some(VideoResolution::V540p),
        "576" => Some(VideoResolution::V576p),
        "720" => Some(VideoResolution::V720p),
        "1080" => Some(VideoResolution::V1080p),
        "1440" => Some(VideoResolution::V1440p),
        "2160" => Some(VideoResolution::V2160p),
        "4320" => Some(VideoResolution::V4320p),
        _ => None,
    }
}

#[must_use]
pub fn infer_video_source(input: &str) -> Option<VideoSource> {
    SOURCE_PATTERN.captures(input).and_then(|c| {
        match normalize(&c[1]).as_str() {
            "cam" | "camrip" | "hdcam" => Some(VideoSource::Cam),
            "ts" | "telesync" | "hdts" | "pdvd" => Some(VideoSource::Telesync),
            "tc" | "telecine" | "hdtc" => Some(VideoSource::Telecine),
            "wp" | "workprint" => Some(VideoSource::Workprint),
            s if s.starts_with("dvd") => Some(VideoSource::Dvd),
            "hdtv" | "pdtv" | "sdtv" | "dsr" | "tvrip" | "satrip" => Some(VideoSource::Tv),
            "webdl" | "web" => Some(VideoSource::WebDl),
            "webrip" => Some(VideoSource::WebRip),
            "bluray" | "bdrip" | "brrip" | "bdremux" | "bdr" | "bd" => Some(VideoSource::BluRay),
            _ => None,
        }
    })
}

/// Detects the video codec and the release group.
///
/// The group is the `-Group` token right after the codec, or failing that
/// the trailing `-Group` token of the input (before an optional extension).
#[must_use]
pub fn infer_video_codec_and_release_group(input: &str) -> (Option<VideoCodec>, Option<String>) {
    let mut codec = None;
    let mut group = None;

    if let Some(caps) = CODEC_PATTERN.captures(input) {
        codec = match normalize(&caps[1]).as_str() {
            "h264" | "avc" => Some(VideoCodec::H264),
            "x264" => Some(VideoCodec::X264),
            "x265" | "h265" | "hevc" => Some(VideoCodec::X265),
            "xvid" => Some(VideoCodec::XviD),
            "divx" => Some(VideoCodec::DivX),
            "mpeg2" => Some(VideoCodec::Mpeg2),
            "av1" => Some(VideoCodec::Av1),
            _ => None,
        };
        group = caps.get(2).map(|m| m.as_str().to_string());
    }

    if group.is_none() {
        group = TRAILING_GROUP_PATTERN
            .captures(input)
            .map(|c| c[1].to_string())
            .filter(|g| !NOT_RELEASE_GROUPS.contains(&g.to_lowercase().as_str()));
    }

    (codec, group)
}

#[must_use]
pub fn infer_languages(input: &str) -> BTreeSet<Language> {
    LANGUAGE_PATTERNS
        .matches(input)
        .iter()
        .map(|i| Language::ALL[i])
        .collect()
}

#[must_use]
pub fn is_multi_language(input: &str) -> bool {
    MULTI_PATTERN.is_match(input)
}

#[must_use]
pub fn infer_video_3d(input: &str) -> Option<Video3d> {
    let caps = VIDEO_3D_PATTERN.captures(input)?;
    let token = normalize(&caps[1]);
    if token.ends_with("sbs") {
        Some(Video3d::V3dSbs)
    } else if token.ends_with("ou") {
        Some(Video3d::V3dOu)
    } else {
        Some(Video3d::V3d)
    }
}

#[must_use]
pub fn infer_video_modifier(input: &str) -> Option<VideoModifier> {
    MODIFIER_PATTERN.captures(input).and_then(|c| {
        match normalize(&c[1]).as_str() {
            "r5" | "r6" | "regional" => Some(VideoModifier::Regional),
            "rawhd" => Some(VideoModifier::Rawhd),
            "brdisk" | "bd25" | "bd50" => Some(VideoModifier::Brdisk),
            s if s.ends_with("remux") => Some(VideoModifier::Remux),
            s if s.ends_with("scr") || s == "screener" => Some(VideoModifier::Screener),
            _ => None,
        }
    })
}
