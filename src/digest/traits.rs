// Licensed under the Apache-2.0 license

use super::hash::HashAlgo;

/// Hardware hash engine capability
///
/// Implemented by the peripheral driver. The engine computes a digest over a
/// whole message in one blocking call; it has no incremental mode.
///
/// Only [`compute_digest`](super::compute_digest) calls `compute`, and only
/// while holding the session lock.
pub trait HashEngine {
    /// Driver-specific failure detail
    type Error: core::fmt::Debug;

    /// Bring the peripheral up (clocks, reset release)
    ///
    /// # Errors
    /// Returns the driver error if the peripheral cannot be initialized.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Put the peripheral back into its idle/reset state
    fn shutdown(&mut self);

    /// Compute the digest of `data` with `algo` into `digest`
    ///
    /// `digest` is exactly `algo.digest_size()` bytes long.
    ///
    /// # Errors
    /// Returns the driver error if the computation fails.
    fn compute(&mut self, algo: HashAlgo, data: &[u8], digest: &mut [u8])
        -> Result<(), Self::Error>;
}
