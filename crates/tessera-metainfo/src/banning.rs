//! # Banning Checks
//!
//! Gate run on a decoded [`Info`] before it is turned into a torrent record.
//! Checks are independent; the first failure rejects the whole torrent.

use tracing::debug;

use crate::error::{MetaInfoError, Result};
use crate::info::Info;

/// A single validation rule over a decoded info dictionary.
pub trait Checker: Send + Sync {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    /// Returns an error if `info` must be rejected.
    ///
    /// # Errors
    ///
    /// Returns a [`MetaInfoError`] describing why the info is unsafe.
    fn check(&self, info: &Info) -> Result<()>;
}

/// Rejects any display string (best name or file path) that is not valid UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8Checker;

impl Checker for Utf8Checker {
    fn name(&self) -> &'static str {
        "utf8"
    }

    fn check(&self, info: &Info) -> Result<()> {
        let display_strings = std::iter::once(("name".to_string(), info.best_name().to_vec()))
            .chain(
                info.files
                    .iter()
                    .enumerate()
                    .map(|(i, file)| (format!("files[{i}]"), file.display_path(info))),
            );
        for (field, bytes) in display_strings {
            if std::str::from_utf8(&bytes).is_err() {
                return Err(MetaInfoError::InvalidEncoding { field });
            }
        }
        Ok(())
    }
}

/// Rejects a zero piece length or a `pieces` blob too short to cover the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeChecker;

impl Checker for SizeChecker {
    fn name(&self) -> &'static str {
        "size"
    }

    fn check(&self, info: &Info) -> Result<()> {
        if info.piece_length == 0 {
            return Err(MetaInfoError::Banned("piece length is zero".into()));
        }
        let covered = (info.piece_count() as u64).saturating_mul(info.piece_length);
        if covered < info.total_length() {
            return Err(MetaInfoError::Banned(format!(
                "{} pieces of {} bytes cannot cover {} bytes",
                info.piece_count(),
                info.piece_length,
                info.total_length()
            )));
        }
        Ok(())
    }
}

/// An ordered set of checkers.
pub struct Banning {
    checkers: Vec<Box<dyn Checker>>,
}

impl Default for Banning {
    fn default() -> Self {
        Self::new().with_checker(Utf8Checker)
    }
}

impl Banning {
    /// Creates an empty set that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checkers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_checker(mut self, checker: impl Checker + 'static) -> Self {
        self.checkers.push(Box::new(checker));
        self
    }

    /// Runs every checker in order and stops at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first checker's error.
    pub fn check(&self, info: &Info) -> Result<()> {
        for checker in &self.checkers {
            if let Err(err) = checker.check(info) {
                debug!(checker = checker.name(), error = %err, "meta info banned");
                return Err(err);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.checkers.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{File, PIECE_HASH_LEN};

    fn info(name: &[u8], files: Vec<File>) -> Info {
        Info {
            name: name.to_vec(),
            name_utf8: None,
            piece_length: 16384,
            pieces: vec![0; PIECE_HASH_LEN],
            length: files.is_empty().then_some(10),
            files,
            private: false,
        }
    }

    fn file(path: &[&[u8]]) -> File {
        File {
            length: 5,
            path: path.iter().map(|p| p.to_vec()).collect(),
            path_utf8: None,
        }
    }

    #[test]
    fn accepts_valid_utf8() {
        let info = info("Amélie (2001)".as_bytes(), vec![file(&[&b"a"[..], "é.mkv".as_bytes()])]);
        assert!(Banning::default().check(&info).is_ok());
    }

    #[test]
    fn rejects_invalid_name() {
        let info = info(b"bad\xff\xfename", Vec::new());
        assert!(matches!(
            Banning::default().check(&info),
            Err(MetaInfoError::InvalidEncoding { field }) if field == "name"
        ));
    }

    #[test]
    fn rejects_invalid_file_path() {
        let info = info(b"pack", vec![
            file(&[&b"ok.mkv"[..]]),
            file(&[&b"dir"[..], &b"\xc3\x28.mkv"[..]]),
        ]);
        assert!(matches!(
            Banning::default().check(&info),
            Err(MetaInfoError::InvalidEncoding { field }) if field == "files[1]"
        ));
    }

    #[test]
    fn valid_utf8_name_overrides_invalid_legacy_name() {
        let mut info = info(b"\xff", Vec::new());
        info.name_utf8 = Some(b"fine".to_vec());
        assert!(Utf8Checker.check(&info).is_ok());
    }

    #[test]
    fn size_checker_requires_enough_pieces() {
        let mut info = info(b"x", Vec::new());
        assert!(SizeChecker.check(&info).is_ok());

        info.length = Some(16384 * 2);
        assert!(matches!(SizeChecker.check(&info), Err(MetaInfoError::Banned(_))));

        info.piece_length = 0;
        assert!(SizeChecker.check(&info).is_err());
    }

    #[test]
    fn first_failure_short_circuits() {
        let banning = Banning::new().with_checker(SizeChecker).with_checker(Utf8Checker);
        let mut info = info(b"\xff", Vec::new());
        info.piece_length = 0;

        assert_eq!(banning.names(), vec!["size", "utf8"]);
        assert!(matches!(banning.check(&info), Err(MetaInfoError::Banned(_))));
    }

    #[test]
    fn empty_set_accepts_everything() {
        let info = info(b"\xff", Vec::new());
        assert!(Banning::new().check(&info).is_ok());
    }
}
