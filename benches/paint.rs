use criterion::{Criterion, black_box, criterion_group, criterion_main};

use bevy::math::Vec2;
use bevy_terrain_layers::layers::compositor;
use bevy_terrain_layers::prelude::*;

fn layered_stack(registry: &TextureRegistry) -> LayerStack {
    let mut stack = LayerStack::with_base(&registry.acquire("grass"));
    for (n, name) in ["dirt", "rock", "sand"].into_iter().enumerate() {
        let index = stack.add_layer(&registry.acquire(name)).unwrap();
        let grid = stack.grid_mut(index).unwrap();
        for texel in 0..grid.as_bytes().len() {
            grid.set_value(texel, ((texel * (n + 3)) % 200) as u8);
        }
    }
    stack
}

fn bench_paint_full_patch(c: &mut Criterion) {
    let registry = TextureRegistry::new();
    let patch = PatchGeometry::new(Vec2::ZERO, 64.0);
    let brush = Brush::new(48.0, 0.5);
    let base = layered_stack(&registry);

    c.bench_function("paint_full_patch", |b| {
        let mut strength = 0.0f32;
        b.iter(|| {
            strength = (strength + 37.0) % 255.0;
            let mut stack = base.clone();
            let stroke = PaintStroke::new(patch.center(), registry.acquire("rock"))
                .with_strength(strength);
            paint(&mut stack, &patch, &brush, black_box(&stroke))
        });
    });
}

fn bench_decode_encode(c: &mut Criterion) {
    let registry = TextureRegistry::new();
    let mut stack = layered_stack(&registry);

    c.bench_function("decode_encode_4096", |b| {
        b.iter(|| {
            for texel in 0..4096 {
                let visibility = compositor::decode(stack.grids(), black_box(texel));
                stack.store_visibility(texel, &visibility);
            }
        });
    });
}

fn bench_swap_layers(c: &mut Criterion) {
    let registry = TextureRegistry::new();
    let mut stack = layered_stack(&registry);

    c.bench_function("swap_layers_1_3", |b| {
        b.iter(|| stack.swap_layers(black_box(1), black_box(3)));
    });
}

fn bench_cumulative_round_trip(c: &mut Criterion) {
    let registry = TextureRegistry::new();
    let mut stack = layered_stack(&registry);

    c.bench_function("cumulative_round_trip", |b| {
        b.iter(|| {
            stack.to_cumulative_form();
            stack.to_relative_form();
        });
    });
}

criterion_group!(
    benches,
    bench_paint_full_patch,
    bench_decode_encode,
    bench_swap_layers,
    bench_cumulative_round_trip,
);
criterion_main!(benches);
