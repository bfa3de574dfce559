use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha1::{Digest, Sha1};

/// Length in bytes of a v1 info hash.
pub const INFO_HASH_LEN: usize = 20;

/// Content identifier of a torrent: the SHA-1 digest of its bencoded info dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; INFO_HASH_LEN]);

/// Error returned when parsing an info hash from text or a slice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid info hash: {0}")]
pub struct InvalidInfoHash(String);

impl InfoHash {
    #[must_use]
    pub const fn new(bytes: [u8; INFO_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Hashes arbitrary bytes into an info hash.
    #[must_use]
    pub fn digest(data: &[u8]) -> Self {
        Self(Sha1::digest(data).into())
    }

    /// Builds an info hash from a 20-byte slice.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInfoHash`] if the slice has the wrong length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, InvalidInfoHash> {
        <[u8; INFO_HASH_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| {
                InvalidInfoHash(format!(
                    "expected {INFO_HASH_LEN} bytes, got {}",
                    bytes.len()
                ))
            })
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; INFO_HASH_LEN] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl FromStr for InfoHash {
    type Err = InvalidInfoHash;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim()).map_err(|e| InvalidInfoHash(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

impl Serialize for InfoHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for InfoHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
