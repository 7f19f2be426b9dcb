use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::UVec2;

use navgrid::types::{MapInfo, OCCUPIED};
use navgrid::{Grid2d, dilate};

fn sparse_grid(side: u32, step: u32) -> Grid2d<u8> {
    let mut grid = Grid2d::<u8>::empty(MapInfo::square(side, 1.0));
    for y in (0..side).step_by(step as usize) {
        for x in (0..side).step_by(step as usize) {
            let _ = grid.set(UVec2::new(x, y), OCCUPIED);
        }
    }
    grid
}

fn bench_dilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("dilation");

    for side in [256u32, 1024] {
        let grid = sparse_grid(side, 16);
        group.bench_function(format!("k5_{side}x{side}"), |b| {
            b.iter(|| dilate(black_box(&grid), 5, 1).unwrap())
        });
        group.bench_function(format!("k9_{side}x{side}"), |b| {
            b.iter(|| dilate(black_box(&grid), 9, 1).unwrap())
        });
    }

    let grid = sparse_grid(512, 16);
    group.bench_function("k5_512x512_iter3", |b| {
        b.iter(|| dilate(black_box(&grid), 5, 3).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_dilation);
criterion_main!(benches);
