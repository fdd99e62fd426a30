//! Byte-budget accounting for a single stream stage
//!
//! What this module provides
//! - `ByteLimiter`: the synchronous decision core — a running byte counter
//!   against a fixed budget, one decision per arriving chunk
//! - `LimiterAction`: the tagged outcome of a decision (forward, forward a
//!   prefix then close, or close without forwarding)
//!
//! Implementation strategy
//! - The counter never passes the budget; once the stage closes it stays
//!   closed and every further push is a no-op
//! - Truncation is a zero-copy `Bytes::slice` of the leading prefix; the
//!   trailing bytes of a straddling chunk are never buffered
//!
//! Composition
//! - Driven by `stream::limit_bytes` over an async byte stream, or usable
//!   directly anywhere chunks arrive one at a time

use bytes::Bytes;

/// Outcome of feeding one chunk through a [`ByteLimiter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimiterAction {
    /// The whole chunk fits under the budget; forward it unchanged.
    Forward(Bytes),
    /// Only this leading prefix fits; forward it, then close the stage.
    ForwardThenClose(Bytes),
    /// Nothing of the chunk fits; close the stage without forwarding.
    Close,
}

/// Running byte-budget state for one stream stage.
///
/// Created once with a fixed budget. `read` counts bytes forwarded so far
/// and never exceeds the budget.
#[derive(Debug, Clone)]
pub struct ByteLimiter {
    size: usize,
    read: usize,
    closed: bool,
}

impl ByteLimiter {
    /// Create a limiter with a total budget of `size` bytes.
    ///
    /// A budget of zero is valid: the first chunk observed (of any length,
    /// including zero) is the last, and nothing is ever forwarded unless it
    /// is empty.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            read: 0,
            closed: false,
        }
    }

    /// Feed one chunk and decide what to forward.
    ///
    /// Exactly one call per arriving chunk. After the limiter has closed,
    /// every further call returns [`LimiterAction::Close`] without touching
    /// the counter, so close is idempotent.
    pub fn push(&mut self, chunk: Bytes) -> LimiterAction {
        if self.closed {
            return LimiterAction::Close;
        }
        let remaining = self.size - self.read;
        if chunk.len() <= remaining {
            self.read += chunk.len();
            tracing::trace!(len = chunk.len(), read = self.read, "forwarding chunk");
            LimiterAction::Forward(chunk)
        } else if remaining > 0 {
            self.read = self.size;
            self.closed = true;
            tracing::debug!(
                kept = remaining,
                dropped = chunk.len() - remaining,
                "budget reached mid-chunk, truncating and closing"
            );
            LimiterAction::ForwardThenClose(chunk.slice(..remaining))
        } else {
            self.closed = true;
            tracing::debug!(len = chunk.len(), "budget already met, closing");
            LimiterAction::Close
        }
    }

    /// Bytes forwarded so far.
    pub fn forwarded(&self) -> usize {
        self.read
    }

    /// Bytes still available under the budget.
    pub fn remaining(&self) -> usize {
        self.size - self.read
    }

    /// Whether the stage has reached its terminal state.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
