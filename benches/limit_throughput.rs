use bytes::Bytes;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use futures::stream;
use tokio::runtime::Runtime;
use tower::BoxError;
use tower_bytelimit::{collect_bytes, limit_bytes, BytesStream};

const CHUNK_LEN: usize = 4 * 1024;
const CHUNKS: usize = 256;

fn scripted_upstream() -> BytesStream {
    let chunk = Bytes::from(vec![0xA5u8; CHUNK_LEN]);
    let items: Vec<Result<Bytes, BoxError>> =
        (0..CHUNKS).map(|_| Ok(chunk.clone())).collect();
    Box::pin(stream::iter(items))
}

fn bench_limit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    // Budget above the total: every chunk passes through untouched.
    c.bench_function("limit_passthrough_1mib", |b| {
        b.to_async(&rt).iter_batched(
            scripted_upstream,
            |upstream| async {
                let limited = limit_bytes(upstream, CHUNK_LEN * CHUNKS + 1);
                let _ = collect_bytes(limited).await.unwrap();
            },
            BatchSize::SmallInput,
        )
    });

    // Budget in the middle of the sequence: truncate and stop early.
    c.bench_function("limit_truncated_halfway", |b| {
        b.to_async(&rt).iter_batched(
            scripted_upstream,
            |upstream| async {
                let limited = limit_bytes(upstream, CHUNK_LEN * CHUNKS / 2 + 17);
                let _ = collect_bytes(limited).await.unwrap();
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_limit);
criterion_main!(benches);
