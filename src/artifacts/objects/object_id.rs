//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings representing SHA-1 hashes.
//! They identify both blobs and commits; the two live in separate namespaces on
//! disk but share the same hash function.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234"), as shown in merge log entries
//!
//! ## Storage
//!
//! Objects are stored flat, in a file named by the full hex digest.

use crate::artifacts::objects::{MIN_PREFIX_LENGTH, OBJECT_ID_LENGTH};
use sha1::{Digest, Sha1};

/// Object identifier (SHA-1 hash)
///
/// A 40-character lowercase hexadecimal string that uniquely identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash raw bytes into an object ID
    pub fn hash(content: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(content);

        let oid = hasher.finalize();
        Self(format!("{oid:x}"))
    }

    /// Whether `prefix` could abbreviate an object ID at all
    ///
    /// Shorter prefixes than [`MIN_PREFIX_LENGTH`] are rejected outright rather
    /// than scanned for.
    pub fn is_valid_prefix(prefix: &str) -> bool {
        (MIN_PREFIX_LENGTH..=OBJECT_ID_LENGTH).contains(&prefix.len())
            && prefix.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(&prefix.to_ascii_lowercase())
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{any, proptest};

    proptest! {
        #[test]
        fn hashing_always_yields_a_parseable_id(content in proptest::collection::vec(any::<u8>(), 0..512)) {
            let oid = ObjectId::hash(&content);
            assert_eq!(ObjectId::try_parse(oid.to_string()).unwrap(), oid);
        }

        #[test]
        fn short_oid_is_a_prefix(content in proptest::collection::vec(any::<u8>(), 0..64)) {
            let oid = ObjectId::hash(&content);
            assert!(oid.starts_with(&oid.to_short_oid()));
        }
    }

    #[test]
    fn hash_matches_known_sha1() {
        // sha1("x")
        assert_eq!(
            ObjectId::hash(b"x").as_ref(),
            "11f6ad8ec52a2984abaafd7c3b516503785c2072"
        );
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }

    #[test]
    fn prefix_validation() {
        assert!(ObjectId::is_valid_prefix("abcdef"));
        assert!(!ObjectId::is_valid_prefix("abcde"));
        assert!(!ObjectId::is_valid_prefix("abcdeg"));
    }
}
