//! # tower-bytelimit
//!
//! A Tower-based byte-budget stage for byte streams. It forwards chunks
//! from an upstream producer until a caller-specified total byte budget is
//! exhausted, truncates the one chunk straddling the budget, then closes
//! the downstream sequence and discards everything after it.
//!
//! ## Core Concepts
//!
//! - **ByteLimiter**: the synchronous decision core — one call per chunk,
//!   returning forward / truncate-then-close / close
//! - **limit_bytes**: the stream adapter that drives a limiter over an
//!   async byte stream
//! - **ByteLimitLayer**: Tower middleware applying the budget to any
//!   service whose response is a byte stream
//!
//! Chunk boundaries under the budget are preserved exactly; only the one
//! straddling chunk is cut. Upstream errors propagate downstream verbatim.
//!
//! ## Getting Started
//!
//! ```rust
//! use bytes::Bytes;
//! use futures::stream;
//! use tower_bytelimit::{collect_bytes, limit_bytes, BytesStream};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tower::BoxError> {
//! let upstream: BytesStream = Box::pin(stream::iter(vec![
//!     Ok(Bytes::from_static(b"1234")),
//!     Ok(Bytes::from_static(b"5678")),
//! ]));
//!
//! let limited = limit_bytes(upstream, 5);
//! let chunks = collect_bytes(limited).await?;
//! assert_eq!(
//!     chunks,
//!     vec![Bytes::from_static(b"1234"), Bytes::from_static(b"5")]
//! );
//! # Ok(())
//! # }
//! ```

pub mod limiter;
pub mod service;
pub mod stream;

pub use limiter::{ByteLimiter, LimiterAction};
pub use service::{ByteLimit, ByteLimitLayer};
pub use stream::{collect_bytes, limit_bytes, BytesStream};
