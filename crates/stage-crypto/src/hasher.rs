use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};
use stage_types::{ContentHash, HashAlgorithm, HASH_SIZE};
use tracing::debug;

type Blake2b64 = Blake2b<U8>;

/// Read buffer size for streaming file digests.
const CHUNK_SIZE: usize = 64 * 1024;

/// Short content hasher for cache-busted asset names.
///
/// Wraps a [`HashAlgorithm`] and produces 8-byte [`ContentHash`]es over byte
/// slices, readers, or files. The digest covers the exact bytes only: file
/// names and metadata never contribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentHasher {
    algorithm: HashAlgorithm,
}

/// In-progress digest state for one of the supported algorithms.
enum State {
    Blake2b(Blake2b64),
    Blake3(Box<blake3::Hasher>),
}

impl State {
    fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Blake2b => Self::Blake2b(Blake2b64::new()),
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            Self::Blake2b(h) => Digest::update(h, data),
            Self::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize(self) -> ContentHash {
        let mut out = [0u8; HASH_SIZE];
        match self {
            Self::Blake2b(h) => out.copy_from_slice(&h.finalize()),
            Self::Blake3(h) => out.copy_from_slice(&h.finalize().as_bytes()[..HASH_SIZE]),
        }
        ContentHash::from_bytes(out)
    }
}

impl ContentHasher {
    /// BLAKE2b with an 8-byte digest.
    pub const BLAKE2B: Self = Self {
        algorithm: HashAlgorithm::Blake2b,
    };
    /// BLAKE3 truncated to 8 bytes.
    pub const BLAKE3: Self = Self {
        algorithm: HashAlgorithm::Blake3,
    };

    /// Create a hasher for the given algorithm.
    pub const fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Hash raw bytes.
    pub fn hash(&self, data: &[u8]) -> ContentHash {
        let mut state = State::new(self.algorithm);
        state.update(data);
        state.finalize()
    }

    /// Hash everything readable from `reader`, in fixed-size chunks.
    pub fn hash_reader<R: Read>(&self, mut reader: R) -> io::Result<ContentHash> {
        let mut state = State::new(self.algorithm);
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => state.update(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(state.finalize())
    }

    /// Hash the contents of the file at `path`.
    pub fn hash_file(&self, path: &Path) -> io::Result<ContentHash> {
        let file = File::open(path)?;
        let hash = self.hash_reader(file)?;
        debug!(path = %path.display(), %hash, algorithm = %self.algorithm, "hashed file");
        Ok(hash)
    }

    /// Verify that data produces the expected hash.
    pub fn verify(&self, data: &[u8], expected: &ContentHash) -> bool {
        self.hash(data) == *expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LOADER_TEMPLATE: &[u8] = b"import init from './worker.js';await init();";

    #[test]
    fn hash_is_deterministic() {
        let data = b"hello world";
        assert_eq!(ContentHasher::BLAKE2B.hash(data), ContentHasher::BLAKE2B.hash(data));
        assert_eq!(ContentHasher::BLAKE3.hash(data), ContentHasher::BLAKE3.hash(data));
    }

    #[test]
    fn blake2b_known_vectors() {
        assert_eq!(
            ContentHasher::BLAKE2B.hash(LOADER_TEMPLATE).to_hex(),
            "6b0b56b4fa32f063"
        );
        assert_eq!(ContentHasher::BLAKE2B.hash(b"").to_hex(), "e4a6a0577479b2b4");
        assert_eq!(
            ContentHasher::BLAKE2B.hash(b"hello world").to_hex(),
            "878633aa32a3b150"
        );
    }

    #[test]
    fn blake3_is_truncated_full_digest() {
        let full = blake3::hash(b"hello world");
        let hash = ContentHasher::BLAKE3.hash(b"hello world");
        assert_eq!(hash.as_bytes()[..], full.as_bytes()[..HASH_SIZE]);
    }

    #[test]
    fn algorithms_disagree() {
        assert_ne!(
            ContentHasher::BLAKE2B.hash(b"same content"),
            ContentHasher::BLAKE3.hash(b"same content")
        );
    }

    #[test]
    fn different_data_produces_different_hashes() {
        assert_ne!(
            ContentHasher::BLAKE2B.hash(b"\0asm\x01\0\0\0"),
            ContentHasher::BLAKE2B.hash(b"export function init() {}")
        );
    }

    #[test]
    fn verify_correct_and_tampered() {
        let hash = ContentHasher::BLAKE2B.hash(b"original");
        assert!(ContentHasher::BLAKE2B.verify(b"original", &hash));
        assert!(!ContentHasher::BLAKE2B.verify(b"tampered", &hash));
    }

    #[test]
    fn hash_file_matches_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("worker_loader.js");
        std::fs::write(&path, LOADER_TEMPLATE).unwrap();
        let hash = ContentHasher::default().hash_file(&path).unwrap();
        assert_eq!(hash.to_hex(), "6b0b56b4fa32f063");
    }

    #[test]
    fn hash_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentHasher::default()
            .hash_file(&dir.path().join("missing.wasm"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn large_input_spans_chunks() {
        let data = vec![b'a'; 200_000];
        let hash = ContentHasher::BLAKE2B.hash_reader(data.as_slice()).unwrap();
        assert_eq!(hash.to_hex(), "1661dba84c4ffd5f");
    }

    proptest! {
        #[test]
        fn reader_agrees_with_bytes(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            for hasher in [ContentHasher::BLAKE2B, ContentHasher::BLAKE3] {
                prop_assert_eq!(hasher.hash_reader(data.as_slice()).unwrap(), hasher.hash(&data));
            }
        }
    }
}
