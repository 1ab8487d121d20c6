//! Throughput benchmark for the full detection pipeline over a synthetic
//! multi-pattern batch (a cycle, a fan-in hub, and a shell chain interleaved).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{TimeZone, Utc};
use mule_ring_detector::{detect, DetectorConfig, Transaction};

fn synthetic_batch(scale: usize) -> Vec<Transaction> {
    let mut txs = Vec::new();
    let mut tx_id = 0usize;
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

    let mut push = |sender: String, receiver: String, amount: f64, hour: i64| {
        txs.push(Transaction {
            transaction_id: format!("T{tx_id}"),
            sender_id: sender,
            receiver_id: receiver,
            amount,
            timestamp: base + chrono::Duration::hours(hour),
        });
        tx_id += 1;
    };

    for ring in 0..scale {
        let a = format!("CYCLE_{ring}_A");
        let b = format!("CYCLE_{ring}_B");
        let c = format!("CYCLE_{ring}_C");
        push(a.clone(), b.clone(), 5000.0, 0);
        push(b, c.clone(), 6000.0, 2);
        push(c, a, 7000.0, 4);

        let hub = format!("HUB_{ring}");
        for i in 0..10 {
            push(format!("SENDER_{ring}_{i}"), hub.clone(), 1000.0, i);
        }

        let chain: Vec<String> = (0..4).map(|i| format!("SHELL_{ring}_{i}")).collect();
        for pair in chain.windows(2) {
            push(pair[0].clone(), pair[1].clone(), 500.0, 0);
        }
    }

    txs
}

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect");

    for scale in [10, 100, 500].iter() {
        let batch = synthetic_batch(*scale);
        group.throughput(Throughput::Elements(batch.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(scale), &batch, |b, batch| {
            b.iter(|| black_box(detect(batch, &DetectorConfig::default())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_detect);
criterion_main!(benches);
