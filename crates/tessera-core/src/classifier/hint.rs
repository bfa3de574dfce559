use super::Classifier;
use crate::error::{Result, TesseraError};
use crate::types::{Classification, Torrent};

/// Trusts a content type supplied alongside the torrent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintClassifier;

impl Classifier for HintClassifier {
    fn key(&self) -> &'static str {
        "hint"
    }

    fn priority(&self) -> i32 {
        20
    }

    fn classify(&self, torrent: &Torrent) -> Result<Classification> {
        torrent
            .hint
            .map(Classification::with_content_type)
            .ok_or(TesseraError::NoMatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentType;
    use tessera_metainfo::InfoHash;

    #[test]
    fn uses_hint_when_present() {
        let torrent = Torrent::new(InfoHash::new([0; 20]), "x").with_hint(ContentType::Ebook);
        let c = HintClassifier.classify(&torrent).unwrap();
        assert_eq!(c.content_type(), Some(ContentType::Ebook));
    }

    #[test]
    fn no_hint_is_no_match() {
        let torrent = Torrent::new(InfoHash::new([0; 20]), "x");
        assert!(matches!(HintClassifier.classify(&torrent), Err(TesseraError::NoMatch)));
    }
}
