use bytequeue::ByteQueue;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

fn bench_enqueue_dequeue_sizes(c: &mut Criterion) {
    let sizes: Vec<(usize, &str)> = vec![
        (64, "64_bytes"),
        (256, "256_bytes"),
        (1024, "1024_bytes"),
        (4096, "4096_bytes"),
        (16384, "16384_bytes"),
    ];

    let mut group = c.benchmark_group("enqueue_dequeue_by_size");

    for (size, name) in sizes {
        let chunk = vec![0xAA_u8; size];
        let queue = ByteQueue::with_capacity(size * 2);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                queue.enqueue(black_box(&chunk));
                queue.dequeue(size).unwrap()
            })
        });
    }

    group.finish();
}

fn bench_wrapped_cycle(c: &mut Criterion) {
    // Steady state that keeps pushing both cursors across the end of the
    // store, so the two-segment copy paths are exercised continuously.
    let queue = ByteQueue::with_capacity(1024);
    queue.enqueue(&vec![0u8; 700]);
    queue.dequeue(500).unwrap();

    let chunk = vec![0x42_u8; 600];

    let mut group = c.benchmark_group("wrapped_cycle");
    group.throughput(Throughput::Bytes(600));

    group.bench_function("enqueue_dequeue_600", |b| {
        b.iter(|| {
            queue.enqueue(black_box(&chunk));
            queue.dequeue(600).unwrap()
        })
    });

    group.finish();
}

fn bench_buffer_linearize(c: &mut Criterion) {
    let queue = ByteQueue::with_capacity(4096);
    queue.enqueue(&vec![0x17_u8; 3000]);
    queue.dequeue(2000).unwrap();
    queue.enqueue(&vec![0x18_u8; 2500]);

    let mut group = c.benchmark_group("buffer_linearize");
    group.throughput(Throughput::Bytes(queue.len() as u64));

    group.bench_function("wrapped_3500_bytes", |b| b.iter(|| black_box(queue.buffer())));

    group.finish();
}

criterion_group!(
    benches,
    bench_enqueue_dequeue_sizes,
    bench_wrapped_cycle,
    bench_buffer_linearize
);
criterion_main!(benches);
