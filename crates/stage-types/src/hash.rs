use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Digest size in bytes. Rendered as twice as many hex characters.
pub const HASH_SIZE: usize = 8;

/// Short content digest embedded in cache-busted file names.
///
/// A `ContentHash` is an 8-byte digest of a file's exact bytes. Identical
/// content hashed with the same algorithm always produces the same
/// `ContentHash`. It is a cache-busting key, not a security control.
///
/// Serializes as its 16-character lowercase hex form so it can be written
/// directly in configuration files.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentHash([u8; HASH_SIZE]);

impl ContentHash {
    /// Wrap a pre-computed digest.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != HASH_SIZE {
            return Err(TypeError::InvalidLength {
                expected: HASH_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; HASH_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for ContentHash {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for ContentHash {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<ContentHash> for String {
    fn from(hash: ContentHash) -> Self {
        hash.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_is_16_chars() {
        let hash = ContentHash::from_bytes([0xab; HASH_SIZE]);
        assert_eq!(hash.to_hex(), "abababababababab");
        assert_eq!(hash.to_hex().len(), 16);
    }

    #[test]
    fn parse_known_hash() {
        let hash: ContentHash = "6b0b56b4fa32f063".parse().unwrap();
        assert_eq!(
            hash.as_bytes(),
            &[0x6b, 0x0b, 0x56, 0xb4, 0xfa, 0x32, 0xf0, 0x63]
        );
        assert_eq!(hash.to_string(), "6b0b56b4fa32f063");
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(matches!(
            ContentHash::from_hex("zz0b56b4fa32f063"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            ContentHash::from_hex("6b0b56b4"),
            Err(TypeError::InvalidLength {
                expected: HASH_SIZE,
                actual: 4
            })
        );
    }

    #[test]
    fn serde_uses_hex_string() {
        let hash = ContentHash::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"0102030405060708\"");
        let parsed: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hash);
    }

    #[test]
    fn serde_rejects_invalid_hex() {
        let result: Result<ContentHash, _> = serde_json::from_str("\"not-a-hash\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn hex_parse_inverts_display(bytes in any::<[u8; HASH_SIZE]>()) {
            let hash = ContentHash::from_bytes(bytes);
            prop_assert_eq!(ContentHash::from_hex(&hash.to_hex()).unwrap(), hash);
        }

        #[test]
        fn uppercase_hex_is_accepted(bytes in any::<[u8; HASH_SIZE]>()) {
            let hash = ContentHash::from_bytes(bytes);
            let upper = hash.to_hex().to_uppercase();
            prop_assert_eq!(upper.parse::<ContentHash>().unwrap(), hash);
        }
    }
}
