use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use julia_explorer::{Canvas, Colour, PixelBuffer, copy_colours_to_rgba};

fn bench_copy_to_rgba(c: &mut Criterion) {
    let canvas = Canvas::new(1440, 720).unwrap();
    let display = PixelBuffer::filled(
        canvas,
        Colour {
            r: 255,
            g: 127,
            b: 0,
        },
    );
    let mut frame = vec![0u8; canvas.size() * 4];

    let mut group = c.benchmark_group("presenter_copy");
    group.throughput(Throughput::Elements(canvas.size() as u64));

    group.bench_function("copy_colours_to_rgba_1440x720", |b| {
        b.iter(|| copy_colours_to_rgba(black_box(&display), black_box(&mut frame)).unwrap())
    });

    group.bench_function("copy_from_1440x720", |b| {
        let target = PixelBuffer::new(canvas);
        b.iter(|| target.copy_from(black_box(&display)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_copy_to_rgba);
criterion_main!(benches);
