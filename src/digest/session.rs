// Licensed under the Apache-2.0 license

//! Hash engine session: open/close lifecycle and exclusive access
//!
//! A [`HashSession`] owns the engine. It is constructed explicitly and shared
//! by reference, so a process typically keeps one in a `static` or hands out
//! `&HashSession` to every task that hashes.
//!
//! # Lifecycle
//!
//! ```text
//! Closed --open()--> Open --close()--> Closed
//! ```
//!
//! There is no reference counting. `open()` on an open session and `close()`
//! on a closed one are logged no-ops; the caller is responsible for opening
//! once before use and closing once after every user is done.
//!
//! # Exclusion
//!
//! [`HashSession::lock`] blocks until the engine is free and returns an
//! [`EngineGuard`]. Dropping the guard (or calling [`EngineGuard::unlock`])
//! releases the engine, on every exit path.

use super::error::HashError;
use super::hash::HashAlgo;
use super::traits::HashEngine;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use log::{debug, error, trace, warn};
use spin::{Mutex, MutexGuard};

/// Snapshot of session activity counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Successful lock acquisitions
    pub acquisitions: u32,
    /// Lock releases
    pub releases: u32,
    /// Digest computations handed to the engine
    pub dispatches: u32,
    /// Engine init/compute failures
    pub hw_failures: u32,
}

struct Counters {
    acquisitions: AtomicU32,
    releases: AtomicU32,
    dispatches: AtomicU32,
    hw_failures: AtomicU32,
}

impl Counters {
    const fn new() -> Self {
        Self {
            acquisitions: AtomicU32::new(0),
            releases: AtomicU32::new(0),
            dispatches: AtomicU32::new(0),
            hw_failures: AtomicU32::new(0),
        }
    }

    fn bump(counter: &AtomicU32) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> SessionStats {
        SessionStats {
            acquisitions: self.acquisitions.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            dispatches: self.dispatches.load(Ordering::Relaxed),
            hw_failures: self.hw_failures.load(Ordering::Relaxed),
        }
    }
}

/// Shared hash engine handle
pub struct HashSession<E: HashEngine> {
    open: AtomicBool,
    engine: Mutex<E>,
    counters: Counters,
}

impl<E: HashEngine> HashSession<E> {
    /// Wrap an engine in a closed session
    pub const fn new(engine: E) -> Self {
        Self {
            open: AtomicBool::new(false),
            engine: Mutex::new(engine),
            counters: Counters::new(),
        }
    }

    /// Initialize the engine and mark the session open
    ///
    /// Calling this on an already open session does nothing.
    ///
    /// # Errors
    ///
    /// Returns `HashError::HardwareFailure` if the engine fails to initialize.
    /// The session stays closed; the failure is not retried.
    pub fn open(&self) -> Result<(), HashError> {
        let mut engine = self.engine.lock();

        if self.open.load(Ordering::Acquire) {
            warn!("hash session already open");
            return Ok(());
        }

        engine.init().map_err(|e| {
            error!("hash engine init failed: {e:?}");
            Counters::bump(&self.counters.hw_failures);
            HashError::HardwareFailure
        })?;

        self.open.store(true, Ordering::Release);
        debug!("hash session opened");
        Ok(())
    }

    /// Shut the engine down and mark the session closed
    ///
    /// Waits for any in-flight computation to finish first. Closing a session
    /// that was never opened does nothing.
    pub fn close(&self) {
        let mut engine = self.engine.lock();

        if !self.open.swap(false, Ordering::AcqRel) {
            warn!("hash session close without open");
            return;
        }

        engine.shutdown();
        debug!("hash session closed");
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Whether some caller currently holds the engine
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.engine.is_locked()
    }

    /// Block until the engine is free and take exclusive access
    ///
    /// # Errors
    ///
    /// Returns `HashError::SessionNotOpen` if the session is closed, either
    /// before waiting or by the time access is granted.
    pub fn lock(&self) -> Result<EngineGuard<'_, E>, HashError> {
        if !self.is_open() {
            return Err(HashError::SessionNotOpen);
        }
        self.acquired(self.engine.lock())
    }

    /// Take exclusive access without waiting
    ///
    /// # Errors
    ///
    /// Returns `HashError::SessionNotOpen` if the session is closed and
    /// `HashError::LockUnavailable` if another caller holds the engine.
    pub fn try_lock(&self) -> Result<EngineGuard<'_, E>, HashError> {
        if !self.is_open() {
            return Err(HashError::SessionNotOpen);
        }
        let engine = self.engine.try_lock().ok_or(HashError::LockUnavailable)?;
        self.acquired(engine)
    }

    fn acquired<'a>(&'a self, engine: MutexGuard<'a, E>) -> Result<EngineGuard<'a, E>, HashError> {
        // close() may have won the race while we were waiting
        if !self.is_open() {
            return Err(HashError::SessionNotOpen);
        }

        Counters::bump(&self.counters.acquisitions);
        trace!("hash engine acquired");

        Ok(EngineGuard {
            engine,
            counters: &self.counters,
        })
    }

    /// Activity counters since construction
    #[must_use]
    pub fn stats(&self) -> SessionStats {
        self.counters.snapshot()
    }

    /// Start a streaming digest bound to this session
    ///
    /// # Errors
    ///
    /// See [`HashContext::new`](super::HashContext::new).
    pub fn context(&self, algo: HashAlgo) -> Result<super::HashContext<'_, E>, HashError> {
        super::HashContext::new(self, algo)
    }

    /// One-shot digest of `data`
    ///
    /// # Errors
    ///
    /// See [`compute_digest`](super::compute_digest).
    pub fn digest(&self, algo: HashAlgo, data: &[u8]) -> Result<super::Digest, HashError> {
        super::compute_digest(self, algo, data)
    }
}

/// Exclusive access to the engine
///
/// Releases the engine when dropped.
pub struct EngineGuard<'a, E: HashEngine> {
    engine: MutexGuard<'a, E>,
    counters: &'a Counters,
}

impl<E: HashEngine> EngineGuard<'_, E> {
    pub(crate) fn compute(
        &mut self,
        algo: HashAlgo,
        data: &[u8],
        digest: &mut [u8],
    ) -> Result<(), E::Error> {
        Counters::bump(&self.counters.dispatches);
        self.engine.compute(algo, data, digest).inspect_err(|_| {
            Counters::bump(&self.counters.hw_failures);
        })
    }

    /// Release the engine
    pub fn unlock(self) {
        drop(self);
    }
}

impl<E: HashEngine> Drop for EngineGuard<'_, E> {
    fn drop(&mut self) {
        Counters::bump(&self.counters.releases);
        trace!("hash engine released");
    }
}
