// Licensed under the Apache-2.0 license

//! Streaming digest context
//!
//! The engine only digests whole messages, so a context accumulates every
//! appended byte in a local buffer and hands the complete message to the
//! dispatcher at finalize time. Appending never touches the engine, which
//! lets any number of contexts be filled concurrently.

use super::config::ContextConfig;
use super::dispatch::compute_digest;
use super::error::HashError;
use super::hash::{Digest, HashAlgo};
use super::session::HashSession;
use super::traits::HashEngine;
use alloc::vec::Vec;
use core::sync::atomic::{compiler_fence, Ordering};
use log::{trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContextState {
    /// Accepting data
    Active,
    /// Digest produced (or dispatch attempted); buffer released
    Finalized,
    /// A previous append failed
    Failed,
}

/// Streaming digest bound to one algorithm and one session
pub struct HashContext<'s, E: HashEngine> {
    session: &'s HashSession<E>,
    algo: HashAlgo,
    buffer: Vec<u8>,
    total_len: u64,
    state: ContextState,
    config: ContextConfig,
}

impl<'s, E: HashEngine> HashContext<'s, E> {
    /// Create a context with the default buffering limits
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidAlgorithm` if `algo` was compiled out and
    /// `HashError::AllocationFailure` if the initial buffer cannot be reserved.
    pub fn new(session: &'s HashSession<E>, algo: HashAlgo) -> Result<Self, HashError> {
        Self::with_config(session, algo, ContextConfig::default())
    }

    /// Create a context with explicit buffering limits
    ///
    /// # Errors
    ///
    /// Same as [`HashContext::new`].
    pub fn with_config(
        session: &'s HashSession<E>,
        algo: HashAlgo,
        config: ContextConfig,
    ) -> Result<Self, HashError> {
        let algo = algo.ensure_enabled()?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(config.initial_capacity)
            .map_err(|_| HashError::AllocationFailure)?;

        trace!("{algo:?} context created");
        Ok(Self {
            session,
            algo,
            buffer,
            total_len: 0,
            state: ContextState::Active,
            config,
        })
    }

    /// Buffer more message data
    ///
    /// # Errors
    ///
    /// - `HashError::InvalidState` if the context was finalized or failed
    /// - `HashError::AllocationFailure` if the buffer cannot grow, either
    ///   because the allocator refused or the configured maximum message
    ///   length would be exceeded. The context is unusable afterwards.
    pub fn append(&mut self, data: &[u8]) -> Result<(), HashError> {
        self.ensure_active()?;

        if data.is_empty() {
            return Ok(());
        }

        let needed = self
            .buffer
            .len()
            .checked_add(data.len())
            .filter(|&len| len <= self.config.max_message_len);

        let grown = match needed {
            Some(len) if len > self.buffer.capacity() => self.grow(len),
            Some(_) => Ok(()),
            None => Err(HashError::AllocationFailure),
        };

        if let Err(e) = grown {
            warn!(
                "{:?} context cannot grow past {} bytes",
                self.algo,
                self.buffer.len()
            );
            self.state = ContextState::Failed;
            return Err(e);
        }

        self.buffer.extend_from_slice(data);
        self.total_len += data.len() as u64;
        Ok(())
    }

    /// Digest everything appended so far
    ///
    /// The buffer is scrubbed and released whether or not the engine
    /// succeeds; the context accepts no further data until [`reset`].
    ///
    /// # Errors
    ///
    /// - `HashError::InvalidState` if already finalized or failed (no engine call)
    /// - any error from [`compute_digest`]
    ///
    /// [`reset`]: HashContext::reset
    pub fn finalize(&mut self) -> Result<Digest, HashError> {
        self.ensure_active()?;
        self.state = ContextState::Finalized;

        let result = compute_digest(self.session, self.algo, &self.buffer);

        scrub(&mut self.buffer);
        self.buffer = Vec::new();
        result
    }

    /// Discard buffered data and accept a new message
    ///
    /// Keeps the buffer's capacity and the algorithm.
    pub fn reset(&mut self) {
        scrub(&mut self.buffer);
        self.buffer.clear();
        self.total_len = 0;
        self.state = ContextState::Active;
    }

    /// Duplicate a running context, e.g. to fork a transcript hash
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidState` if this context is not active and
    /// `HashError::AllocationFailure` if the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, HashError> {
        self.ensure_active()?;

        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(self.buffer.capacity())
            .map_err(|_| HashError::AllocationFailure)?;
        buffer.extend_from_slice(&self.buffer);

        Ok(Self {
            session: self.session,
            algo: self.algo,
            buffer,
            total_len: self.total_len,
            state: self.state,
            config: self.config,
        })
    }

    #[must_use]
    pub const fn algo(&self) -> HashAlgo {
        self.algo
    }

    /// Bytes currently held in the buffer
    #[must_use]
    pub fn used(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes appended since creation or the last reset
    #[must_use]
    pub const fn total_len(&self) -> u64 {
        self.total_len
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Whether the context still accepts data
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == ContextState::Active
    }

    /// Move the message into a larger allocation, scrubbing the old one
    ///
    /// Growing in place would let the allocator free the previous block
    /// with message bytes still in it.
    fn grow(&mut self, needed: usize) -> Result<(), HashError> {
        let target = self
            .buffer
            .capacity()
            .saturating_mul(2)
            .min(self.config.max_message_len)
            .max(needed);

        let mut grown = Vec::new();
        grown
            .try_reserve_exact(target)
            .map_err(|_| HashError::AllocationFailure)?;
        grown.extend_from_slice(&self.buffer);

        scrub(&mut self.buffer);
        self.buffer = grown;
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), HashError> {
        match self.state {
            ContextState::Active => Ok(()),
            ContextState::Finalized | ContextState::Failed => Err(HashError::InvalidState),
        }
    }
}

impl<E: HashEngine> Drop for HashContext<'_, E> {
    fn drop(&mut self) {
        scrub(&mut self.buffer);
    }
}

/// Zero message bytes before the allocation is reused or freed
fn scrub(buf: &mut [u8]) {
    for byte in buf.iter_mut() {
        // SAFETY: `byte` is a valid, exclusive reference into `buf`
        unsafe { core::ptr::write_volatile(byte, 0) };
    }
    compiler_fence(Ordering::SeqCst);
}
