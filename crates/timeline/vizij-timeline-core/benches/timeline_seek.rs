use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vizij_timeline_core::{
    shared, CompositeStateChange, PlayerConfig, PropertyBag, PropertyStateChange, SequencePlayer,
    SharedTarget, StateChange, TargetRef, Transition,
};

/// `n` staggered leaves spread over a few properties of one target.
fn build_player(n: usize) -> (SequencePlayer, SharedTarget<PropertyBag>) {
    let target = shared(
        PropertyBag::new("bench")
            .with("a", 0.0)
            .with("b", 0.0)
            .with("c", 0.0)
            .with("d", 0.0),
    );
    let r = TargetRef::new(&target);
    let props = ["a", "b", "c", "d"];
    let mut root = CompositeStateChange::new();
    for i in 0..n {
        let leaf = PropertyStateChange::new(r.clone(), props[i % props.len()], i as f32)
            .with_transition(Transition::Sine)
            .with_duration(0.5);
        root.add_at(leaf, i as f64 * 0.1).expect("add leaf");
    }
    let cfg = PlayerConfig {
        auto_play: false,
        ..PlayerConfig::default()
    };
    let player = SequencePlayer::new(root, cfg).expect("player");
    (player, target)
}

fn bench_seek(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_seek");
    for &n in &[10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let (mut player, _target) = build_player(n);
            let total = player.total_duration();
            let mut t = 0.0;
            b.iter(|| {
                // Alternate forward and backward jumps.
                t = (t + total * 0.37) % total;
                player.seek_to(black_box(t));
            });
        });
    }
    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_tick");
    for &n in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let (mut player, _target) = build_player(n);
            b.iter(|| {
                if !player.is_playing() {
                    player.seek_to(0.0);
                    player.play();
                }
                player.tick(black_box(1.0 / 60.0));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_seek, bench_tick);
criterion_main!(benches);
