// Released under MIT License.
// Copyright (c) 2024 venus_gmx developers

use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;
use venus_gmx::prelude::*;

fn benchmark(c: &mut Criterion) {
    let content = std::fs::read_to_string("test_files/venus_short.out").unwrap();
    let reorder = ReorderMap::from_file("test_files/reorder.dat").unwrap();
    let template = read_gro_template("test_files/template.gro").unwrap();

    c.bench_function("VenusScanner (events)", |b| {
        b.iter(|| {
            std::hint::black_box(VenusScanner::new(&content).count());
        })
    });

    c.bench_function("VenusParser::parse_str", |b| {
        b.iter(|| {
            std::hint::black_box(VenusParser::new().parse_str(&content).unwrap());
        })
    });

    c.bench_function("VenusParser::parse_str (reordered)", |b| {
        b.iter(|| {
            std::hint::black_box(
                VenusParser::new()
                    .with_reorder(&reorder)
                    .parse_str(&content)
                    .unwrap(),
            );
        })
    });

    let trajectories = VenusParser::new().parse_str(&content).unwrap();
    let directory = TempDir::new().unwrap();
    let g96 = directory.path().join("traj.g96");
    let gro = directory.path().join("traj.gro");

    c.bench_function("G96Writer::write_frame", |b| {
        b.iter(|| {
            let mut writer = G96Writer::new(&g96).unwrap();
            for frame in trajectories.frames_iter() {
                writer.write_frame(frame).unwrap();
            }
            writer.flush().unwrap();
        })
    });

    c.bench_function("GroWriter::write_frame", |b| {
        b.iter(|| {
            let mut writer = GroWriter::new(&gro, &template).unwrap();
            for frame in trajectories.frames_iter() {
                writer.write_frame(frame).unwrap();
            }
            writer.flush().unwrap();
        })
    });
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
