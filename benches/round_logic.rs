use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashMap;
use tui_pairs::core::Round;
use tui_pairs::types::{Card, DeviceOrientation};

fn bench_deal(c: &mut Criterion) {
    c.bench_function("deal_16_slots", |b| {
        b.iter(|| Round::deal(black_box(16), black_box(12345)).unwrap())
    });
}

fn bench_deal_full_deck(c: &mut Criterion) {
    c.bench_function("deal_104_slots", |b| {
        b.iter(|| Round::deal(black_box(104), black_box(12345)).unwrap())
    });
}

fn bench_choose_slot(c: &mut Criterion) {
    let mut round = Round::deal(16, 12345).unwrap();

    c.bench_function("choose_slot", |b| {
        b.iter(|| {
            round.choose_slot(black_box(0));
            round.choose_slot(black_box(1));
            round.take_intents();
        })
    });
}

fn bench_play_out_round(c: &mut Criterion) {
    c.bench_function("play_out_16_slots", |b| {
        b.iter(|| {
            let mut round = Round::deal(16, 7).unwrap();
            let mut pairs: HashMap<Card, Vec<usize>> = HashMap::new();
            for (id, slot) in round.slots().iter().enumerate() {
                pairs.entry(slot.card()).or_default().push(id);
            }
            for slots in pairs.values() {
                round.choose_slot(slots[0]);
                round.choose_slot(slots[1]);
            }
            round.take_intents()
        })
    });
}

fn bench_orientation_sample(c: &mut Criterion) {
    let mut round = Round::deal(16, 12345).unwrap();
    round.set_field_active(true);

    c.bench_function("orientation_sample", |b| {
        b.iter(|| {
            round.orientation_sample(black_box(0.5), black_box(-0.25), DeviceOrientation::Upright);
            round.take_intents();
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let round = Round::deal(16, 12345).unwrap();
    let mut snapshot = tui_pairs::core::RoundSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            round.snapshot_into(&mut snapshot);
        })
    });
}

criterion_group!(
    benches,
    bench_deal,
    bench_deal_full_deck,
    bench_choose_slot,
    bench_play_out_round,
    bench_orientation_sample,
    bench_snapshot
);
criterion_main!(benches);
