// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `understory_element`.

use core::time::Duration;
use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::sync::Once;
use std::{string::String, vec::Vec};

use serde_json::json;
use understory_element::{
    Element, ElementRegistry, Node, NumberFallback, PropertyDeclaration, Props, RenderError,
    Schema, Value, Widget, coerce,
};
use understory_frame::FrameQueue;

struct Gauge;

impl Widget for Gauge {
    fn properties() -> Vec<PropertyDeclaration> {
        vec![
            PropertyDeclaration::number("value").default_value(0.0).css_var(true),
            PropertyDeclaration::number("max").default_value(100.0),
            PropertyDeclaration::string("label").reflect(true),
            PropertyDeclaration::boolean("disabled").reflect(true),
            PropertyDeclaration::number_array("size").css_var(true),
            PropertyDeclaration::object("options"),
        ]
    }

    fn render(&self, props: &Props<'_>) -> Result<Node, RenderError> {
        let value = props.number("value").unwrap_or_default();
        let max = props.number("max").unwrap_or(100.0);
        Ok(Node::element("div")
            .attr("class", "gauge")
            .child(
                Node::element("span")
                    .attr("style", format!("width: {}%", value / max * 100.0))
                    .text(props.str("label").unwrap_or_default()),
            )
            .into())
    }
}

fn connected(registry: &mut ElementRegistry) -> Element<Gauge> {
    let mut element = Element::new(Gauge, registry);
    let _ = element.connect();
    element
}

fn declarations(count: usize) -> Vec<PropertyDeclaration> {
    (0..count)
        .map(|i| match i % 4 {
            0 => PropertyDeclaration::number(format!("n{i}")).css_var(true),
            1 => PropertyDeclaration::string(format!("s{i}")).reflect(true),
            2 => PropertyDeclaration::boolean(format!("b{i}")).no_attribute(),
            _ => PropertyDeclaration::new(format!("x{i}")).type_name("Array"),
        })
        .collect()
}

fn bench_element(c: &mut Criterion) {
    static PRINT_SIZES: Once = Once::new();
    PRINT_SIZES.call_once(|| {
        eprintln!(
            "sizes: Value={} Element<Gauge>={}",
            core::mem::size_of::<Value>(),
            core::mem::size_of::<Element<Gauge>>(),
        );
    });

    let mut registry = ElementRegistry::new();

    let mut group = c.benchmark_group("element/set");

    group.bench_function("number/unchanged", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        b.iter(|| black_box(element.set("value", 0.0, &mut frames.source(()))))
    });

    group.bench_function("number/changed", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let mut n = 0.0;
        b.iter(|| {
            n += 1.0;
            black_box(element.set("value", n, &mut frames.source(())))
        })
    });

    group.bench_function("string/reflected", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let labels = ["alpha", "beta"];
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            black_box(element.set("label", labels[i], &mut frames.source(())))
        })
    });

    group.bench_function("number/from_text", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let texts = ["12.5", "0x1f"];
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            black_box(element.set("value", texts[i], &mut frames.source(())))
        })
    });

    group.finish();

    let mut group = c.benchmark_group("element/attribute");

    group.bench_function("watched", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let texts = ["3 4", "5 6"];
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            black_box(element.set_attribute("size", texts[i], &mut frames.source(())))
        })
    });

    group.bench_function("object_json", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let texts = [
            json!({ "mode": "auto", "ticks": [0, 50, 100] }).to_string(),
            json!({ "mode": "manual", "ticks": [0, 25, 50, 75, 100] }).to_string(),
        ];
        let mut i = 0;
        b.iter(|| {
            i ^= 1;
            black_box(element.set_attribute("options", &texts[i], &mut frames.source(())))
        })
    });

    group.finish();

    let mut group = c.benchmark_group("element/flush");

    for writes in [1_usize, 8, 64] {
        group.bench_function(BenchmarkId::new("coalesced_writes", writes), |b| {
            b.iter_batched(
                || (connected(&mut registry), FrameQueue::new()),
                |(mut element, mut frames)| {
                    for i in 0..writes {
                        let _ = element.set("value", i as f64 + 1.0, &mut frames.source(()));
                    }
                    let now = Duration::from_millis(16);
                    for request in frames.begin_frame(now) {
                        element.on_tick(request.handle, now);
                    }
                    black_box(element.render_count())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.bench_function("reconnect", |b| {
        let mut element = connected(&mut registry);
        let mut frames = FrameQueue::new();
        let mut n = 0.0;
        b.iter(|| {
            n += 1.0;
            let _ = element.set("value", n, &mut frames.source(()));
            let _ = element.disconnect(&mut frames.source(()));
            let _ = element.connect();
            black_box(element.render_count())
        })
    });

    group.finish();

    let mut group = c.benchmark_group("schema");

    for count in [4_usize, 16, 64] {
        group.bench_function(BenchmarkId::new("normalize", count), |b| {
            b.iter_batched(
                || declarations(count),
                |decls| black_box(Schema::normalize(decls, NumberFallback::default())),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();

    let mut group = c.benchmark_group("coerce");

    let inputs: Vec<String> = ["42", "-1.5e3", "0x1F", "Infinity", "abc", ""]
        .into_iter()
        .map(String::from)
        .collect();
    group.bench_function("number_from_text", |b| {
        b.iter(|| {
            for input in &inputs {
                black_box(coerce::number_from_text(input));
            }
        })
    });

    group.bench_function("parse_number_array", |b| {
        b.iter_batched(
            || Value::from("1 2 3 4 5 6 7 8"),
            |value| black_box(coerce::parse_number_array(value)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_element);
criterion_main!(benches);
