use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Digest function used to compute a [`ContentHash`](crate::ContentHash).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// BLAKE2b parameterized for an 8-byte digest.
    ///
    /// The digest length is part of the BLAKE2b parameter block, so this is
    /// not the same as truncating BLAKE2b-512.
    #[default]
    Blake2b,
    /// BLAKE3, truncated to its first 8 output bytes.
    Blake3,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [Self; 2] = [Self::Blake2b, Self::Blake3];

    /// Lowercase name as used in config files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blake2b => "blake2b",
            Self::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownAlgorithm(s.to_string()))
    }
}
