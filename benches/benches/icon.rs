// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_icon`.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::{string::String, vec::Vec};

use understory_icon::{FetchQueue, IconLibrary};

const SVG: &str = r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M3 12l9-9 9 9"/></svg>"#;

fn library() -> IconLibrary {
    IconLibrary::new("bench", |name| format!("/icons/{name}.svg"))
}

fn bench_icon(c: &mut Criterion) {
    let mut group = c.benchmark_group("icon/request");

    group.bench_function("cached", |b| {
        let mut library = library();
        let mut fetches = FetchQueue::new();
        library.request("home", &mut fetches);
        for fetch in fetches.drain() {
            library.complete(&fetch.name, fetch.id, Ok(String::from(SVG)));
        }
        b.iter(|| black_box(library.request("home", &mut fetches)))
    });

    for names in [1_usize, 32] {
        group.bench_function(BenchmarkId::new("fetch_and_complete", names), |b| {
            let names: Vec<String> = (0..names).map(|i| format!("icon-{i}")).collect();
            b.iter_batched(
                || (library(), FetchQueue::new()),
                |(mut library, mut fetches)| {
                    for name in &names {
                        library.request(name, &mut fetches);
                        library.request(name, &mut fetches);
                    }
                    let done: Vec<_> = fetches.drain().collect();
                    for fetch in done {
                        let svg = Ok(String::from(SVG));
                        black_box(library.complete(&fetch.name, fetch.id, svg));
                    }
                    black_box(library.len())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_icon);
criterion_main!(benches);
