// Licensed under the Apache-2.0 license

//! The single path from buffered messages to the engine

use super::error::HashError;
use super::hash::{Digest, HashAlgo};
use super::session::HashSession;
use super::traits::HashEngine;
use log::{debug, error};

/// Compute the digest of a complete message on the engine
///
/// Validates `algo`, takes the session lock, runs the engine and releases
/// the lock whatever the engine returned. Nothing else in this crate calls
/// [`HashEngine::compute`].
///
/// # Errors
///
/// - `HashError::InvalidAlgorithm` if `algo` was compiled out (engine untouched)
/// - `HashError::SessionNotOpen` if the session is closed (engine untouched)
/// - `HashError::HardwareFailure` if the engine reports an error
pub fn compute_digest<E: HashEngine>(
    session: &HashSession<E>,
    algo: HashAlgo,
    data: &[u8],
) -> Result<Digest, HashError> {
    let algo = algo.ensure_enabled()?;
    let mut digest = Digest::zeroed(algo);

    let mut engine = session.lock()?;
    debug!("dispatching {algo:?} over {} bytes", data.len());
    let outcome = engine.compute(algo, data, digest.as_mut_bytes());
    engine.unlock();

    outcome.map_err(|e| {
        error!("{algo:?} digest failed: {e:?}");
        HashError::HardwareFailure
    })?;

    Ok(digest)
}
