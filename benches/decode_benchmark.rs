// SPDX-FileCopyrightText: 2026 Joshua Goins <josh@redstrate.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs::read;
use std::path::PathBuf;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use legacy_defs::config::npc::NpcDefinition;
use legacy_defs::model::Model;

fn resource(name: &str) -> Vec<u8> {
    let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    d.push("resources/tests");
    d.push(name);

    read(d).unwrap()
}

fn criterion_benchmark(c: &mut Criterion) {
    let npc = resource("npc.dat");
    let model = resource("model.dat");

    c.bench_function("npc decode", |b| {
        b.iter(|| NpcDefinition::from_existing(1, black_box(&npc)))
    });
    c.bench_function("model decode", |b| {
        b.iter(|| Model::from_existing(black_box(&model)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
