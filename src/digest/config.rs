// Licensed under the Apache-2.0 license

//! Buffering limits for streaming contexts

/// Default capacity reserved when a context is created (one message block)
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Largest message the engine's 32-bit length register can describe
#[allow(clippy::cast_possible_truncation)]
pub const DEFAULT_MAX_MESSAGE_LEN: usize = if usize::BITS > u32::BITS {
    u32::MAX as usize
} else {
    usize::MAX
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ContextConfig {
    /// Bytes reserved up front
    pub initial_capacity: usize,
    /// Upper bound on buffered message length
    pub max_message_len: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfigBuilder::new().build()
    }
}

pub struct ContextConfigBuilder {
    initial_capacity: usize,
    max_message_len: usize,
}

impl Default for ContextConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_message_len: DEFAULT_MAX_MESSAGE_LEN,
        }
    }
    #[must_use]
    pub fn initial_capacity(mut self, bytes: usize) -> Self {
        self.initial_capacity = bytes;
        self
    }
    #[must_use]
    pub fn max_message_len(mut self, bytes: usize) -> Self {
        self.max_message_len = bytes;
        self
    }
    #[must_use]
    pub fn build(self) -> ContextConfig {
        ContextConfig {
            initial_capacity: self.initial_capacity.min(self.max_message_len),
            max_message_len: self.max_message_len,
        }
    }
}
