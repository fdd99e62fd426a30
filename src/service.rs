//! Tower middleware that caps the byte volume of stream responses
//!
//! Wraps any service whose response is a [`BytesStream`] and applies
//! [`limit_bytes`] to it, so the budget composes with the rest of a
//! `ServiceBuilder` stack like any other layer.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::{BoxError, Layer, Service};

use crate::stream::{limit_bytes, BytesStream};

/// Layer that caps the total bytes of a service's response stream.
#[derive(Debug, Clone, Copy)]
pub struct ByteLimitLayer {
    size: usize,
}

impl ByteLimitLayer {
    /// Cap response streams at `size` bytes total.
    pub fn new(size: usize) -> Self {
        Self { size }
    }
}

impl<S> Layer<S> for ByteLimitLayer {
    type Service = ByteLimit<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ByteLimit {
            inner,
            size: self.size,
        }
    }
}

/// Service produced by [`ByteLimitLayer`].
#[derive(Debug, Clone)]
pub struct ByteLimit<S> {
    inner: S,
    size: usize,
}

impl<S, Req> Service<Req> for ByteLimit<S>
where
    S: Service<Req, Response = BytesStream, Error = BoxError>,
    S::Future: Send + 'static,
{
    type Response = BytesStream;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<BytesStream, BoxError>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Req) -> Self::Future {
        let size = self.size;
        let fut = self.inner.call(req);
        Box::pin(async move {
            let upstream = fut.await?;
            Ok(limit_bytes(upstream, size))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::collect_bytes;
    use bytes::Bytes;
    use futures::stream;
    use tower::{service_fn, ServiceExt};

    fn chunk_service(
        chunks: Vec<&'static [u8]>,
    ) -> impl Service<(), Response = BytesStream, Error = BoxError, Future: Send + 'static> {
        service_fn(move |_req: ()| {
            let items: Vec<Result<Bytes, BoxError>> =
                chunks.iter().map(|&c| Ok(Bytes::from_static(c))).collect();
            async move { Ok(Box::pin(stream::iter(items)) as BytesStream) }
        })
    }

    #[tokio::test]
    async fn layer_applies_the_budget() {
        let svc = chunk_service(vec![b"123", b"456"]);
        let mut limited = ByteLimitLayer::new(2).layer(svc);

        let stream = limited.ready().await.unwrap().call(()).await.unwrap();
        let chunks = collect_bytes(stream).await.unwrap();
        assert_eq!(chunks, vec![Bytes::from_static(b"12")]);
    }

    #[tokio::test]
    async fn layer_is_transparent_under_budget() {
        let svc = chunk_service(vec![b"123", b"456"]);
        let mut limited = ByteLimitLayer::new(6).layer(svc);

        let stream = limited.ready().await.unwrap().call(()).await.unwrap();
        let chunks = collect_bytes(stream).await.unwrap();
        assert_eq!(
            chunks,
            vec![Bytes::from_static(b"123"), Bytes::from_static(b"456")]
        );
    }

    #[tokio::test]
    async fn inner_service_errors_pass_through() {
        let svc = service_fn(|_req: ()| async {
            Err::<BytesStream, BoxError>("inner refused".into())
        });
        let mut limited = ByteLimitLayer::new(10).layer(svc);

        let err = limited.ready().await.unwrap().call(()).await.err().unwrap();
        assert_eq!(err.to_string(), "inner refused");
    }
}
