// Licensed under the Apache-2.0 license

use core::fmt;

/// Errors surfaced by sessions, contexts and the dispatcher
///
/// None of these are retried internally. Any error returned from
/// [`HashContext::append`](super::HashContext::append) or
/// [`HashContext::finalize`](super::HashContext::finalize) is terminal for
/// that context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HashError {
    /// The session has not been opened, or was closed
    SessionNotOpen,
    /// The engine is held by another caller (non-blocking acquisition only)
    LockUnavailable,
    /// The engine failed to initialize or to compute a digest
    HardwareFailure,
    /// The message buffer could not grow to hold the appended data
    AllocationFailure,
    /// Unknown algorithm selector, or algorithm compiled out
    InvalidAlgorithm,
    /// Context used after finalize or after a previous error
    InvalidState,
}

impl fmt::Display for HashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::SessionNotOpen => "hash session is not open",
            Self::LockUnavailable => "hash engine is busy",
            Self::HardwareFailure => "hash engine failure",
            Self::AllocationFailure => "message buffer allocation failed",
            Self::InvalidAlgorithm => "unsupported hash algorithm",
            Self::InvalidState => "hash context is no longer usable",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for HashError {}
