//! Composite pass benchmark: a player-sized pipeline (~40 layers) with a
//! mix of active and inactive layers, full pass and head-only pass.

use std::convert::Infallible;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use stratum::{DrawBuffer, DrawContext, FnLayer, PipelineBuilder, Position};

struct BenchDrawSet {
    frame: u32,
    output: DrawBuffer<u32>,
}

impl DrawContext for BenchDrawSet {
    type Primitive = u32;
    type Error = Infallible;

    fn output(&self) -> &DrawBuffer<u32> {
        &self.output
    }

    fn output_mut(&mut self) -> &mut DrawBuffer<u32> {
        &mut self.output
    }
}

fn build_pipeline(layers: u32) -> stratum::Compositor<BenchDrawSet> {
    let mut builder = PipelineBuilder::new();
    for i in 0..layers {
        let layer = FnLayer::<BenchDrawSet>::new(format!("Layer{i}"), i % 4 == 0, move |set| {
            set.output_mut().push(i);
            Ok(())
        })
        .with_setup(move |set, _order| Ok((set.frame + i) % 3 != 0));

        let position = if i > 1 && i % 5 == 0 {
            Position::before(format!("Layer{}", i / 2))
        } else {
            Position::Append
        };
        if let Err(err) = builder.register(layer, position) {
            panic!("benchmark pipeline is invalid: {err}");
        }
    }
    builder.build()
}

fn bench_composite(c: &mut Criterion) {
    let compositor = build_pipeline(40);
    let mut set = BenchDrawSet {
        frame: 0,
        output: DrawBuffer::with_capacity(64),
    };

    c.bench_function("composite_40_layers", |b| {
        b.iter(|| {
            set.frame = set.frame.wrapping_add(1);
            set.output.clear();
            let Ok(summary) = compositor.composite(black_box(&mut set));
            black_box(summary)
        });
    });

    c.bench_function("composite_head_layers_40", |b| {
        b.iter(|| {
            set.output.clear();
            let Ok(summary) = compositor.composite_head_layers(black_box(&mut set));
            black_box(summary)
        });
    });
}

criterion_group!(benches, bench_composite);
criterion_main!(benches);
