//! # Title Grammar
//!
//! Anchored token grammars that split a free-text release name into a title,
//! an optional year, an optional episode designator and the unconsumed rest.
//!
//! A title is a run of word tokens (letters and digits, optionally joined by
//! hyphens) and separator runs, ending in a separator or at end of input.
//! All grammars are greedy and anchored at the start of the input.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TesseraError};
use crate::types::{ContentType, EpisodeId, Episodes, Year};

const TITLE: &str = r"((?:[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)*|[^\p{L}\p{N}]+)+(?:[^\p{L}\p{N}]+|$))";

/// Upper bound on the number of ids a single `a-b` range expands to.
const MAX_RANGE_LEN: u16 = 100;

static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{TITLE})")).expect("Invalid title pattern"));

static TITLE_YEAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{TITLE})[^\p{{L}}\p{{N}}]*((?:18|19|20)[0-9]{{2}})(?:[^\p{{L}}\p{{N}}]|$)"
    ))
    .expect("Invalid title year pattern")
});

static TITLE_EPISODES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?:{TITLE})(?i:(s[0-9]{{1,2}}(?:-s[0-9]{{1,2}}|[ ._-]?e[0-9]{{1,3}}(?:-?e?[0-9]{{1,3}})*)?|[0-9]{{1,2}}x[0-9]{{1,3}}(?:-[0-9]{{1,3}})?|season[ ._]?[0-9]{{1,2}}(?:-[0-9]{{1,2}})?))(?:[^\p{{L}}\p{{N}}]|$)"
    ))
    .expect("Invalid title episodes pattern")
});

static LEADING_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[^\]]+\]").expect("Invalid leading tag pattern"));

static SEPARATORS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ._]+").expect("Invalid separators pattern"));

static EDGES_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\p{L}\p{N}]+|[^\p{L}\p{N}]+$").expect("Invalid edges pattern")
});

static EPISODE_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-)?e?([0-9]+)").expect("Invalid episode number pattern"));

/// What the grammar cascade extracted from a release name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch<'a> {
    pub title: String,
    pub year: Year,
    pub episodes: Episodes,
    /// Unconsumed remainder, for attribute inference.
    pub rest: &'a str,
}

/// Normalizes a captured title.
///
/// Removes one leading `[...]` tag, collapses each run of spaces, dots and
/// underscores to a single space, and trims non-word characters at both ends.
#[must_use]
pub fn clean_title(title: &str) -> String {
    let title = LEADING_TAG_PATTERN.replace(title, "");
    let title = SEPARATORS_PATTERN.replace_all(&title, " ");
    EDGES_PATTERN.replace_all(&title, "").into_owned()
}

fn parse_title_year(input: &str) -> Option<(String, Year, &str)> {
    let caps = TITLE_YEAR_PATTERN.captures(input)?;
    let title = clean_title(&caps[1]);
    if title.is_empty() {
        return None;
    }
    let year = caps[2].parse().ok()?;
    let consumed = caps.get(0)?.end();
    Some((title, Year(year), &input[consumed..]))
}

fn parse_title(input: &str) -> Option<(String, &str)> {
    let caps = TITLE_PATTERN.captures(input)?;
    let title = clean_title(&caps[1]);
    if title.is_empty() {
        return None;
    }
    let consumed = caps.get(0)?.end();
    Some((title, &input[consumed..]))
}

fn parse_title_year_episodes(input: &str) -> Option<TitleMatch<'_>> {
    let caps = TITLE_EPISODES_PATTERN.captures(input)?;
    let (title, year) = match parse_title_year(&caps[1]) {
        Some((title, year, _)) => (title, year),
        None => (clean_title(&caps[1]), Year::UNKNOWN),
    };
    let consumed = caps.get(0)?.end();
    Some(TitleMatch {
        title,
        year,
        episodes: parse_episodes(&caps[2]),
        rest: &input[consumed..],
    })
}

/// Runs the grammar cascade over `input`. The first grammar that matches wins.
///
/// The episodes grammar is only tried when `hint` is absent or a TV show.
///
/// # Errors
///
/// Returns [`TesseraError::NoMatch`] when no grammar recognises a title.
pub fn parse_title_year_episodes_cascade(
    hint: Option<ContentType>,
    input: &str,
) -> Result<TitleMatch<'_>> {
    if matches!(hint, None | Some(ContentType::TvShow)) {
        if let Some(found) = parse_title_year_episodes(input) {
            return Ok(found);
        }
    }
    if let Some((title, year, rest)) = parse_title_year(input) {
        return Ok(TitleMatch {
            title,
            year,
            episodes: Episodes::new(),
            rest,
        });
    }
    if let Some((title, rest)) = parse_title(input) {
        return Ok(TitleMatch {
            title,
            year: Year::UNKNOWN,
            episodes: Episodes::new(),
            rest,
        });
    }
    Err(TesseraError::NoMatch)
}

fn number(digits: &str) -> Option<u16> {
    digits.parse().ok()
}

fn expand(start: u16, end: u16) -> Vec<u16> {
    if end > start && end - start < MAX_RANGE_LEN {
        (start..=end).collect()
    } else {
        vec![start, end]
    }
}

/// Turns a matched designator (`S01E02`, `S01E02-E04`, `S01-S03`, `1x02`,
/// `Season 2`, ...) into episode ids.
#[must_use]
pub fn parse_episodes(designator: &str) -> Episodes {
    let lower = designator.to_ascii_lowercase();

    if let Some(seasons) = lower.strip_prefix("season") {
        let seasons = seasons.trim_start_matches([' ', '.', '_']);
        let mut bounds = seasons.split('-').filter_map(number);
        return match (bounds.next(), bounds.next()) {
            (Some(start), Some(end)) => expand(start, end).into_iter().map(EpisodeId::season).collect(),
            (Some(season), None) => std::iter::once(EpisodeId::season(season)).collect(),
            _ => Episodes::new(),
        };
    }

    if let Some((season, episodes)) = lower.split_once('x') {
        let Some(season) = number(season) else {
            return Episodes::new();
        };
        let mut bounds = episodes.split('-').filter_map(number);
        return match (bounds.next(), bounds.next()) {
            (Some(start), Some(end)) => expand(start, end)
                .into_iter()
                .map(|ep| EpisodeId::new(season, ep))
                .collect(),
            (Some(ep), None) => std::iter::once(EpisodeId::new(season, ep)).collect(),
            _ => Episodes::new(),
        };
    }

    let Some(rest) = lower.strip_prefix('s') else {
        return Episodes::new();
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let Some(season) = number(&rest[..digits]) else {
        return Episodes::new();
    };
    let tail = &rest[digits..];

    if tail.is_empty() {
        return std::iter::once(EpisodeId::season(season)).collect();
    }
    if let Some(last) = tail.strip_prefix("-s").and_then(number) {
        return expand(season, last).into_iter().map(EpisodeId::season).collect();
    }

    let mut ids = Vec::new();
    let mut previous: Option<u16> = None;
    for caps in EPISODE_NUMBER_PATTERN.captures_iter(tail) {
        let Some(ep) = number(&caps[2]) else { continue };
        match previous {
            Some(start) if caps.get(1).is_some() => {
                ids.extend(expand(start, ep).into_iter().map(|e| EpisodeId::new(season, e)));
            }
            _ => ids.push(EpisodeId::new(season, ep)),
        }
        previous = Some(ep);
    }
    ids.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cascade(input: &str) -> TitleMatch<'_> {
        parse_title_year_episodes_cascade(None, input).unwrap()
    }

    #[test]
    fn title_and_year() {
        let m = cascade("The Matrix 1999");
        assert_eq!(m.title, "The Matrix");
        assert_eq!(m.year, Year(1999));
        assert!(m.episodes.is_empty());
        assert_eq!(m.rest, "");
    }

    #[test]
    fn title_and_episode() {
        let m = cascade("Show Name S01E02");
        assert_eq!(m.title, "Show Name");
        assert_eq!(m.year, Year::UNKNOWN);
        assert_eq!(m.episodes.as_slice(), &[EpisodeId::new(1, 2)]);
    }

    #[test]
    fn dotted_scene_name() {
        let m = cascade("The.Matrix.1999.1080p.BluRay.x264-GRP");
        assert_eq!(m.title, "The Matrix");
        assert_eq!(m.year, Year(1999));
        assert_eq!(m.rest, "1080p.BluRay.x264-GRP");
    }

    #[test]
    fn parenthesised_year() {
        let m = cascade("Blade Runner 2049 (2017) [1080p]");
        assert_eq!(m.title, "Blade Runner 2049");
        assert_eq!(m.year, Year(2017));
        assert_eq!(m.rest, " [1080p]");
    }

    #[test]
    fn episode_title_with_embedded_year() {
        let m = cascade("Doctor.Who.2005.S10E01.720p.HDTV.x264-FoV");
        assert_eq!(m.title, "Doctor Who");
        assert_eq!(m.year, Year(2005));
        assert_eq!(m.episodes.as_slice(), &[EpisodeId::new(10, 1)]);
        assert_eq!(m.rest, "720p.HDTV.x264-FoV");
    }

    #[test]
    fn title_only_fallback() {
        let m = cascade("[Group] Some_Title");
        assert_eq!(m.title, "Some Title");
        assert_eq!(m.year, Year::UNKNOWN);
        assert!(m.episodes.is_empty());
    }

    #[test]
    fn no_title_is_no_match() {
        assert!(matches!(
            parse_title_year_episodes_cascade(None, "..."),
            Err(TesseraError::NoMatch)
        ));
        assert!(matches!(
            parse_title_year_episodes_cascade(None, ""),
            Err(TesseraError::NoMatch)
        ));
    }

    #[test]
    fn movie_hint_skips_episode_grammar() {
        let m = parse_title_year_episodes_cascade(Some(ContentType::Movie), "Show Name S01E02").unwrap();
        assert!(m.episodes.is_empty());
        assert_eq!(m.title, "Show Name S01E02");
    }

    #[test]
    fn hyphenated_words_stay_in_title() {
        let m = cascade("Spider-Man No Way Home 2021 2160p");
        assert_eq!(m.title, "Spider-Man No Way Home");
        assert_eq!(m.year, Year(2021));
    }

    #[test]
    fn clean_title_normalization() {
        assert_eq!(clean_title("[HorribleSubs] One_Piece."), "One Piece");
        assert_eq!(clean_title("The..Matrix  -"), "The Matrix");
        assert_eq!(clean_title("  Show - Name "), "Show - Name");
        assert_eq!(clean_title(""), "");
        assert_eq!(clean_title("[Grp] Amélie_.-.Poulain..2001"), "Amélie - Poulain 2001");
        assert_eq!(clean_title("東京.物語"), "東京 物語");
        assert_eq!(clean_title("[字幕组]_進撃の巨人_-_01"), "進撃の巨人 - 01");
    }

    #[test]
    fn clean_title_is_idempotent() {
        for input in [
            "[a] b.c_d",
            " [a] b",
            "-[x]y",
            "..The...Matrix..",
            "Amélie_(2001)",
            "[only]",
            "a . _ b",
            "]]][[[",
            "[Grp] Amélie_.-.Poulain..2001",
            "__Ça._va__",
            "東京.物語",
            "«Ля_Бемоль»",
            "[字幕组]_進撃の巨人_-_01",
            "[a][b] [c]_d",
            "._-[Ω]-_.",
        ] {
            let once = clean_title(input);
            assert_eq!(clean_title(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn episode_designators() {
        let ids = |d: &str| parse_episodes(d).as_slice().to_vec();

        assert_eq!(ids("S01E02"), vec![EpisodeId::new(1, 2)]);
        assert_eq!(ids("s01.e02"), vec![EpisodeId::new(1, 2)]);
        assert_eq!(ids("S01E02E03"), vec![EpisodeId::new(1, 2), EpisodeId::new(1, 3)]);
        assert_eq!(
            ids("S01E02-E04"),
            vec![EpisodeId::new(1, 2), EpisodeId::new(1, 3), EpisodeId::new(1, 4)]
        );
        assert_eq!(ids("S02"), vec![EpisodeId::season(2)]);
        assert_eq!(
            ids("S01-S03"),
            vec![EpisodeId::season(1), EpisodeId::season(2), EpisodeId::season(3)]
        );
        assert_eq!(ids("1x05"), vec![EpisodeId::new(1, 5)]);
        assert_eq!(ids("2x01-02"), vec![EpisodeId::new(2, 1), EpisodeId::new(2, 2)]);
        assert_eq!(ids("Season 3"), vec![EpisodeId::season(3)]);
        assert_eq!(ids("season.1-2"), vec![EpisodeId::season(1), EpisodeId::season(2)]);
    }

    #[test]
    fn oversized_ranges_keep_only_endpoints() {
        assert_eq!(
            parse_episodes("S01E001-E999").as_slice(),
            &[EpisodeId::new(1, 1), EpisodeId::new(1, 999)]
        );
    }

    #[test]
    fn other_designator_forms_match() {
        let m = cascade("Show 1x05 HDTV");
        assert_eq!(m.title, "Show");
        assert_eq!(m.episodes.as_slice(), &[EpisodeId::new(1, 5)]);
        assert_eq!(m.rest, "HDTV");

        let m = cascade("Show Season 2 Complete");
        assert_eq!(m.episodes.as_slice(), &[EpisodeId::season(2)]);
    }
}
