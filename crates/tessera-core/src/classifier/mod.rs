//! # Classification Engine
//!
//! Independent strategies that each map a torrent to a candidate
//! classification. The engine consults them in a fixed order: descending
//! priority, ties broken by ascending key. The first classifier that does not
//! return [`TesseraError::NoMatch`] wins; results are never merged.

pub mod hint;
pub mod release;

use tracing::debug;

use crate::error::{Result, TesseraError};
use crate::types::{Classification, Torrent};

pub use hint::HintClassifier;
pub use release::ReleaseClassifier;

/// A pure classification strategy.
pub trait Classifier: Send + Sync {
    /// Stable key used in logs and configuration.
    fn key(&self) -> &'static str;

    /// Higher priorities are consulted first.
    fn priority(&self) -> i32;

    /// Classifies `torrent` without any I/O.
    ///
    /// # Errors
    ///
    /// Returns [`TesseraError::NoMatch`] when the strategy does not apply.
    /// Any other error aborts classification of the torrent.
    fn classify(&self, torrent: &Torrent) -> Result<Classification>;
}

/// An ordered set of classifiers.
pub struct ClassifierEngine {
    classifiers: Vec<Box<dyn Classifier>>,
}

impl Default for ClassifierEngine {
    fn default() -> Self {
        Self::new(vec![Box::new(HintClassifier), Box::new(ReleaseClassifier)])
    }
}

impl ClassifierEngine {
    #[must_use]
    pub fn new(mut classifiers: Vec<Box<dyn Classifier>>) -> Self {
        classifiers.sort_by(|a, b| {
            b.priority()
                .cmp(&a.priority())
                .then_with(|| a.key().cmp(b.key()))
        });
        Self { classifiers }
    }

    /// Drops every classifier whose key is in `keys`.
    #[must_use]
    pub fn without<S: AsRef<str>>(mut self, keys: &[S]) -> Self {
        self.classifiers
            .retain(|c| !keys.iter().any(|k| k.as_ref() == c.key()));
        self
    }

    /// Keys in dispatch order.
    #[must_use]
    pub fn keys(&self) -> Vec<&'static str> {
        self.classifiers.iter().map(|c| c.key()).collect()
    }

    /// Returns the first non-`NoMatch` result, or an empty classification
    /// when every classifier declines.
    ///
    /// # Errors
    ///
    /// Propagates the first error other than [`TesseraError::NoMatch`].
    pub fn classify(&self, torrent: &Torrent) -> Result<Classification> {
        for classifier in &self.classifiers {
            match classifier.classify(torrent) {
                Ok(classification) => {
                    debug!(
                        classifier = classifier.key(),
                        info_hash = %torrent.info_hash,
                        content_type = ?classification.content_type(),
                        "classifier matched"
                    );
                    return Ok(classification);
                }
                Err(TesseraError::NoMatch) => {
                    debug!(classifier = classifier.key(), info_hash = %torrent.info_hash, "classifier skipped");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(Classification::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentType;
    use tessera_metainfo::InfoHash;

    struct Fixed {
        key: &'static str,
        priority: i32,
        outcome: fn() -> Result<Classification>,
    }

    impl Classifier for Fixed {
        fn key(&self) -> &'static str {
            self.key
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn classify(&self, _torrent: &Torrent) -> Result<Classification> {
            (self.outcome)()
        }
    }

    fn fixed(key: &'static str, priority: i32, outcome: fn() -> Result<Classification>) -> Box<dyn Classifier> {
        Box::new(Fixed { key, priority, outcome })
    }

    fn torrent() -> Torrent {
        Torrent::new(InfoHash::new([0; 20]), "name")
    }

    #[test]
    fn dispatch_order_is_priority_then_key() {
        let engine = ClassifierEngine::new(vec![
            fixed("b", 5, || Err(TesseraError::NoMatch)),
            fixed("low", 1, || Err(TesseraError::NoMatch)),
            fixed("a", 5, || Err(TesseraError::NoMatch)),
            fixed("high", 9, || Err(TesseraError::NoMatch)),
        ]);
        assert_eq!(engine.keys(), vec!["high", "a", "b", "low"]);
    }

    #[test]
    fn first_match_wins() {
        let engine = ClassifierEngine::new(vec![
            fixed("movie", 1, || Ok(Classification::with_content_type(ContentType::Movie))),
            fixed("none", 3, || Err(TesseraError::NoMatch)),
            fixed("music", 2, || Ok(Classification::with_content_type(ContentType::Music))),
        ]);
        let c = engine.classify(&torrent()).unwrap();
        assert_eq!(c.content_type(), Some(ContentType::Music));
    }

    #[test]
    fn all_no_match_yields_empty_classification() {
        let engine = ClassifierEngine::new(vec![fixed("none", 1, || Err(TesseraError::NoMatch))]);
        assert_eq!(engine.classify(&torrent()).unwrap(), Classification::new());
    }

    #[test]
    fn hard_errors_abort() {
        let engine = ClassifierEngine::new(vec![
            fixed("broken", 2, || Err(TesseraError::search("index offline"))),
            fixed("movie", 1, || Ok(Classification::with_content_type(ContentType::Movie))),
        ]);
        assert!(matches!(engine.classify(&torrent()), Err(TesseraError::Search(_))));
    }

    #[test]
    fn default_engine_and_disabling() {
        let engine = ClassifierEngine::default();
        assert_eq!(engine.keys(), vec!["hint", "release"]);
        assert_eq!(engine.without(&["hint"]).keys(), vec!["release"]);
    }
}
