//! Async adapter that applies a byte budget to a byte stream
//!
//! What this module provides
//! - `BytesStream`: the boxed byte-stream currency used across the crate
//! - `limit_bytes`: wrap an upstream `BytesStream` so that at most `size`
//!   bytes are ever forwarded, closing the downstream sequence once the
//!   budget is reached
//! - `collect_bytes`: drain a byte stream into its chunk sequence
//!
//! Implementation strategy
//! - A spawned task pulls from upstream, runs each chunk through a
//!   [`ByteLimiter`], and forwards over a bounded mpsc channel wrapped in
//!   `ReceiverStream`
//! - Dropping the sender is the close signal; a failed send means the
//!   receiver is gone (downstream cancelled), which stops the task and
//!   releases upstream immediately
//! - Backpressure: the channel holds a single in-flight item, so the task
//!   does not pull chunk n+1 until chunk n has been handed downstream
//!
//! Error handling
//! - An `Err` item from upstream is forwarded verbatim as the final item;
//!   the chunk in flight when the failure occurred is discarded with it

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tower::BoxError;

use crate::limiter::{ByteLimiter, LimiterAction};

/// Boxed stream of byte chunks, the upstream and downstream currency of
/// the limiting stage.
pub type BytesStream = Pin<Box<dyn Stream<Item = Result<Bytes, BoxError>> + Send>>;

/// Cap the total bytes of `upstream` at `size`.
///
/// Chunks that fit entirely under the budget pass through with their
/// boundaries untouched; the one chunk straddling the budget is replaced by
/// its leading prefix; everything after that is discarded and the returned
/// stream ends. If upstream ends before the budget is reached, the returned
/// stream simply ends with it.
pub fn limit_bytes(upstream: BytesStream, size: usize) -> BytesStream {
    let (tx, rx) = mpsc::channel::<Result<Bytes, BoxError>>(1);
    tokio::spawn(async move {
        let mut upstream = upstream;
        let mut limiter = ByteLimiter::new(size);
        while let Some(item) = upstream.next().await {
            match item {
                Ok(chunk) => match limiter.push(chunk) {
                    LimiterAction::Forward(bytes) => {
                        if tx.send(Ok(bytes)).await.is_err() {
                            // Downstream cancelled; stop pulling.
                            return;
                        }
                    }
                    LimiterAction::ForwardThenClose(bytes) => {
                        let _ = tx.send(Ok(bytes)).await;
                        return;
                    }
                    LimiterAction::Close => return,
                },
                Err(err) => {
                    let _ = tx.send(Err(err)).await;
                    return;
                }
            }
        }
        // Natural upstream end; dropping the sender closes downstream.
    });
    Box::pin(ReceiverStream::new(rx))
}

/// Drain a byte stream into its chunk sequence.
///
/// Returns the first upstream error, if any, in place of the collected
/// chunks.
pub async fn collect_bytes<S>(stream: S) -> Result<Vec<Bytes>, BoxError>
where
    S: Stream<Item = Result<Bytes, BoxError>>,
{
    futures::pin_mut!(stream);
    let mut chunks = Vec::new();
    while let Some(item) = stream.next().await {
        chunks.push(item?);
    }
    Ok(chunks)
}
