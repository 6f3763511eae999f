// Licensed under the Apache-2.0 license

//! Algorithm selection and digest output types

use super::error::HashError;
use heapless::Vec;

/// Largest digest produced by any supported algorithm (SHA-256)
pub const MAX_DIGEST_SIZE: usize = 32;

/// Hash algorithms the engine can be asked to compute
///
/// All three variants share one physical unit.
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgo {
    SHA1,
    SHA224,
    SHA256,
}

impl HashAlgo {
    /// Digest length in bytes
    #[must_use]
    pub const fn digest_size(self) -> usize {
        match self {
            Self::SHA1 => 20,
            Self::SHA224 => 28,
            Self::SHA256 => 32,
        }
    }

    /// Message block length in bytes
    #[must_use]
    pub const fn block_size(self) -> usize {
        64
    }

    /// Command bits selecting this algorithm in the engine's command register
    #[must_use]
    pub const fn hash_cmd(self) -> u32 {
        match self {
            Self::SHA1 => 0x20,
            Self::SHA224 => 0x40,
            Self::SHA256 => 0x50,
        }
    }

    /// Whether support for this algorithm was compiled in
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        match self {
            Self::SHA1 => cfg!(feature = "hw-sha1"),
            Self::SHA224 => cfg!(feature = "hw-sha224"),
            Self::SHA256 => true,
        }
    }

    /// Reject algorithms that were compiled out
    ///
    /// # Errors
    /// Returns `HashError::InvalidAlgorithm` if the algorithm is disabled.
    pub const fn ensure_enabled(self) -> Result<Self, HashError> {
        if self.is_enabled() {
            Ok(self)
        } else {
            Err(HashError::InvalidAlgorithm)
        }
    }
}

impl TryFrom<u32> for HashAlgo {
    type Error = HashError;

    /// Decode a raw command selector
    fn try_from(cmd: u32) -> Result<Self, Self::Error> {
        match cmd {
            0x20 => Ok(Self::SHA1),
            0x40 => Ok(Self::SHA224),
            0x50 => Ok(Self::SHA256),
            _ => Err(HashError::InvalidAlgorithm),
        }
    }
}

/// Digest produced by the engine
///
/// Its length always equals `algo().digest_size()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Digest {
    algo: HashAlgo,
    bytes: Vec<u8, MAX_DIGEST_SIZE>,
}

impl Digest {
    pub(crate) fn zeroed(algo: HashAlgo) -> Self {
        // digest_size() never exceeds MAX_DIGEST_SIZE
        let bytes = core::iter::repeat(0).take(algo.digest_size()).collect();
        Self { algo, bytes }
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[must_use]
    pub const fn algo(&self) -> HashAlgo {
        self.algo
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}
