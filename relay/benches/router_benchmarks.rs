//! Subject Router Benchmarks
//!
//! Measures wildcard-matching and subscriber-resolution cost:
//! - Raw `Subject::matches` for star, greater, and non-matching patterns
//! - `SubscriptionRegistry::get_subscribers` fan-out lookup against a
//!   registry with a realistic mix of concrete and wildcard subscriptions

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use relay::registry::SubscriptionRegistry;
use relay::subject::Subject;

fn bench_subject_matches(c: &mut Criterion) {
    let star = Subject::pattern("relay.agent.*").unwrap();
    let greater = Subject::pattern("relay.system.pulse.>").unwrap();
    let hit = Subject::concrete("relay.agent.sess1").unwrap();
    let deep = Subject::concrete("relay.system.pulse.daily-standup.response").unwrap();

    c.bench_function("subject_matches_star", |b| {
        b.iter(|| black_box(star.matches(black_box(&hit))));
    });

    c.bench_function("subject_matches_greater_deep", |b| {
        b.iter(|| black_box(greater.matches(black_box(&deep))));
    });
}

fn bench_get_subscribers(c: &mut Criterion) {
    let registry = SubscriptionRegistry::in_memory();
    let noop: relay::registry::Handler = Arc::new(|_subject, _payload, _envelope| {});

    // A realistic mix: one wildcard per agent session plus a handful of
    // system-wide patterns, the same shape the adapter/pulse layers register.
    for i in 0..50 {
        registry
            .subscribe(&format!("relay.agent.sess{i}.*"), noop.clone())
            .unwrap();
    }
    registry.subscribe("relay.system.pulse.>", noop.clone()).unwrap();
    registry.subscribe("relay.human.console.*", noop).unwrap();

    let target = Subject::concrete("relay.agent.sess25.reply").unwrap();

    c.bench_function("subscription_registry_get_subscribers_50_patterns", |b| {
        b.iter(|| black_box(registry.get_subscribers(black_box(&target))));
    });
}

criterion_group!(benches, bench_subject_matches, bench_get_subscribers);
criterion_main!(benches);
