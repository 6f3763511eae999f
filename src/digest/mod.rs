// Licensed under the Apache-2.0 license

//! Streaming SHA-1/SHA-224/SHA-256 digests offloaded to a hash engine
//!
//! The engine only supports single-shot digests over a whole message, so
//! streaming is emulated above it: a [`HashContext`] buffers appended data
//! locally and a single dispatch happens at finalize time.
//!
//! ```no_run
//! use hace_digest::digest::{HashAlgo, HashEngine, HashError, HashSession};
//!
//! # fn example<E: HashEngine>(engine: E) -> Result<(), HashError> {
//! let session = HashSession::new(engine);
//! session.open()?;
//!
//! let mut ctx = session.context(HashAlgo::SHA256)?;
//! ctx.append(b"hello")?;
//! ctx.append(b" world")?;
//! let digest = ctx.finalize()?;
//! assert_eq!(digest.len(), 32);
//!
//! session.close();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod hash;
pub mod session;
pub mod traits;

pub use config::{ContextConfig, ContextConfigBuilder};
pub use context::HashContext;
pub use dispatch::compute_digest;
pub use error::HashError;
pub use hash::{Digest, HashAlgo, MAX_DIGEST_SIZE};
pub use session::{EngineGuard, HashSession, SessionStats};
pub use traits::HashEngine;
