use sha2::{Digest, Sha256};

/// Digest algorithm applied to the joined component values. Pluggable so
/// callers can swap the algorithm without touching the formatter.
pub trait Hasher: Send + Sync {
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// SHA-256, the default hash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        Sha256::digest(data).to_vec()
    }
}
