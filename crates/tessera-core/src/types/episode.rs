use std::fmt;

use serde::{Deserialize, Serialize};

/// One season/episode designator.
///
/// A missing `episode` denotes a whole season (e.g. a season pack).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EpisodeId {
    pub season: u16,
    pub episode: Option<u16>,
}

impl EpisodeId {
    #[must_use]
    pub const fn new(season: u16, episode: u16) -> Self {
        Self {
            season,
            episode: Some(episode),
        }
    }

    #[must_use]
    pub const fn season(season: u16) -> Self {
        Self {
            season,
            episode: None,
        }
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.episode {
            Some(ep) => write!(f, "S{:02}E{ep:02}", self.season),
            None => write!(f, "S{:02}", self.season),
        }
    }
}

/// Ordered, de-duplicated list of episode designators.
///
/// Empty means "not applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Episodes(Vec<EpisodeId>);

impl Episodes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EpisodeId> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EpisodeId] {
        &self.0
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl FromIterator<EpisodeId> for Episodes {
    fn from_iter<I: IntoIterator<Item = EpisodeId>>(iter: I) -> Self {
        let mut ids: Vec<EpisodeId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }
}

impl<'a> IntoIterator for &'a Episodes {
    type Item = &'a EpisodeId;
    type IntoIter = std::slice::Iter<'a, EpisodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Episodes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", formatted.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_id_display() {
        assert_eq!(EpisodeId::new(1, 2).to_string(), "S01E02");
        assert_eq!(EpisodeId::new(12, 104).to_string(), "S12E104");
        assert_eq!(EpisodeId::season(3).to_string(), "S03");
    }

    #[test]
    fn collecting_sorts_and_dedups() {
        let episodes: Episodes = [
            EpisodeId::new(1, 3),
            EpisodeId::new(1, 1),
            EpisodeId::new(1, 3),
            EpisodeId::season(1),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            episodes.as_slice(),
            &[EpisodeId::season(1), EpisodeId::new(1, 1), EpisodeId::new(1, 3)]
        );
        assert_eq!(episodes.to_string(), "S01, S01E01, S01E03");
    }

    #[test]
    fn clear_empties_the_list() {
        let mut episodes: Episodes = std::iter::once(EpisodeId::new(2, 5)).collect();
        assert_eq!(episodes.len(), 1);
        episodes.clear();
        assert!(episodes.is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let episodes: Episodes = std::iter::once(EpisodeId::new(1, 2)).collect();
        assert_eq!(
            serde_json::to_string(&episodes).unwrap(),
            r#"[{"season":1,"episode":2}]"#
        );
    }
}
