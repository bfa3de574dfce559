use std::collections::BTreeMap;

use super::Classifier;
use crate::error::{Result, TesseraError};
use crate::types::{Classification, ContentType, FilesStatus, Torrent};

/// Classifies by file extension, weighted by file size.
///
/// A single file is classified by its extension alone. For multiple files,
/// each file's size goes to the bucket of its extension's content type (or
/// the unknown bucket) and the largest bucket wins if it outweighs the
/// unknown bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseClassifier;

impl Classifier for ReleaseClassifier {
    fn key(&self) -> &'static str {
        "release"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn classify(&self, torrent: &Torrent) -> Result<Classification> {
        if torrent.hint.is_some() {
            return Err(TesseraError::NoMatch);
        }
        match torrent.files_status {
            FilesStatus::NoInfo | FilesStatus::OverThreshold => Err(TesseraError::NoMatch),
            FilesStatus::Single => torrent
                .extension()
                .and_then(ContentType::from_extension)
                .map(Classification::with_content_type)
                .ok_or(TesseraError::NoMatch),
            FilesStatus::Multi => majority_by_size(torrent)
                .map(Classification::with_content_type)
                .ok_or(TesseraError::NoMatch),
        }
    }
}

fn majority_by_size(torrent: &Torrent) -> Option<ContentType> {
    let mut unknown: u64 = 0;
    let mut buckets: BTreeMap<ContentType, u64> = BTreeMap::new();

    for file in &torrent.files {
        let content_type = file
            .extension
            .as_deref()
            .and_then(ContentType::from_extension)
            .filter(|_| file.size > 0);
        match content_type {
            Some(ct) => {
                let bucket = buckets.entry(ct).or_default();
                *bucket = bucket.saturating_add(file.size);
            }
            None => unknown = unknown.saturating_add(file.size),
        }
    }

    let mut best: Option<(ContentType, u64)> = None;
    for (ct, size) in buckets {
        if best.is_none_or(|(_, max)| size > max) {
            best = Some((ct, size));
        }
    }

    best.filter(|&(_, size)| size > 0 && size > unknown)
        .map(|(ct, _)| ct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TorrentFile;
    use tessera_metainfo::InfoHash;

    fn torrent(files: &[(&str, u64)]) -> Torrent {
        let files = files
            .iter()
            .map(|&(path, size)| TorrentFile::new(path, size))
            .collect();
        Torrent::new(InfoHash::new([0; 20]), "release").with_files(files, 100)
    }

    fn classify(torrent: &Torrent) -> Result<Classification> {
        ReleaseClassifier.classify(torrent)
    }

    #[test]
    fn single_file_by_extension() {
        let c = classify(&torrent(&[("book.epub", 10)])).unwrap();
        assert_eq!(c.content_type(), Some(ContentType::Ebook));

        assert!(matches!(classify(&torrent(&[("notes.txt", 10)])), Err(TesseraError::NoMatch)));
        assert!(matches!(classify(&torrent(&[("README", 10)])), Err(TesseraError::NoMatch)));
    }

    #[test]
    fn largest_bucket_wins() {
        let t = torrent(&[
            ("Album/01.flac", 300),
            ("Album/02.flac", 300),
            ("Album/video.mkv", 500),
            ("Album/cover.jpg", 10),
        ]);
        assert_eq!(classify(&t).unwrap().content_type(), Some(ContentType::Music));
    }

    #[test]
    fn unknown_bucket_must_be_outweighed() {
        let t = torrent(&[("a.mkv", 100), ("b.bin2", 100)]);
        assert!(matches!(classify(&t), Err(TesseraError::NoMatch)));

        let t = torrent(&[("a.mkv", 100), ("b.nfo", 150)]);
        assert!(matches!(classify(&t), Err(TesseraError::NoMatch)));

        let t = torrent(&[("a.mkv", 101), ("b.nfo", 100)]);
        assert_eq!(classify(&t).unwrap().content_type(), Some(ContentType::Movie));
    }

    #[test]
    fn zero_size_files_are_unknown() {
        let t = torrent(&[("a.mkv", 0), ("b.mkv", 0)]);
        assert!(matches!(classify(&t), Err(TesseraError::NoMatch)));
    }

    #[test]
    fn ties_go_to_the_first_content_type() {
        let t = torrent(&[("a.flac", 100), ("b.mkv", 100)]);
        assert_eq!(classify(&t).unwrap().content_type(), Some(ContentType::Movie));
    }

    #[test]
    fn skips_hinted_and_unlisted_torrents() {
        let hinted = torrent(&[("a.mkv", 1), ("b.mkv", 1)]).with_hint(ContentType::TvShow);
        assert!(matches!(classify(&hinted), Err(TesseraError::NoMatch)));

        let no_info = Torrent::new(InfoHash::new([0; 20]), "x.mkv");
        assert!(matches!(classify(&no_info), Err(TesseraError::NoMatch)));

        let many = Torrent::new(InfoHash::new([0; 20]), "many")
            .with_files(vec![TorrentFile::new("a.mkv", 1); 3], 2);
        assert_eq!(many.files_status, FilesStatus::OverThreshold);
        assert!(matches!(classify(&many), Err(TesseraError::NoMatch)));
    }

    #[test]
    fn huge_buckets_saturate() {
        let t = torrent(&[("a.mkv", u64::MAX), ("b.mkv", u64::MAX), ("c.nfo", 1)]);
        assert_eq!(classify(&t).unwrap().content_type(), Some(ContentType::Movie));
    }
}
