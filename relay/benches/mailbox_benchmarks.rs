//! Maildir Mailbox Benchmarks
//!
//! Measures the crash-consistent delivery hot path:
//! - Single-message deliver (tmp -> new rename)
//! - Claim + complete round trip (new -> cur -> removed)
//! - Batch delivery throughput (100 messages)

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

// Layer 3: Internal module imports
use relay::envelope::{Budget, Envelope};
use relay::maildir::MaildirStore;
use relay::subject::Subject;

fn bench_envelope() -> Envelope {
    let subject = Subject::concrete("relay.agent.sess1").unwrap();
    let from = Subject::concrete("relay.human.console.c1").unwrap();
    let budget = Budget::default_at(chrono::Utc::now());
    Envelope::new(&subject, &from, None, budget, serde_json::json!({"content": "hello"}))
}

fn bench_deliver(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = MaildirStore::new(dir.path());
    store.ensure_maildir("abcd1234ef01").unwrap();
    let envelope = bench_envelope();

    c.bench_function("maildir_deliver_single", |b| {
        b.iter(|| {
            let id = store.deliver(black_box("abcd1234ef01"), black_box(&envelope)).unwrap();
            // Drain `new/` so repeated iterations don't pile up unread files.
            store.claim("abcd1234ef01", &id).unwrap();
            store.complete("abcd1234ef01", &id).unwrap();
        });
    });
}

fn bench_claim_complete_roundtrip(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = MaildirStore::new(dir.path());
    store.ensure_maildir("fedc9876ba54").unwrap();
    let envelope = bench_envelope();

    c.bench_function("maildir_claim_complete_roundtrip", |b| {
        b.iter(|| {
            let id = store.deliver("fedc9876ba54", &envelope).unwrap();
            let claimed = store.claim(black_box("fedc9876ba54"), black_box(&id)).unwrap();
            black_box(claimed);
            store.complete("fedc9876ba54", &id).unwrap();
        });
    });
}

fn bench_batch_delivery(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let store = MaildirStore::new(dir.path());
    store.ensure_maildir("111122223333").unwrap();
    let envelope = bench_envelope();

    c.bench_function("maildir_batch_deliver_100", |b| {
        b.iter(|| {
            let mut ids = Vec::with_capacity(100);
            for _ in 0..100 {
                ids.push(store.deliver("111122223333", black_box(&envelope)).unwrap());
            }
            for id in ids {
                store.claim("111122223333", &id).unwrap();
                store.complete("111122223333", &id).unwrap();
            }
        });
    });
}

criterion_group!(
    benches,
    bench_deliver,
    bench_claim_complete_roundtrip,
    bench_batch_delivery
);
criterion_main!(benches);
