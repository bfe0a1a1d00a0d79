use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;
use turnsweep_core::*;

const TIERS: [(&str, Coord2, CellCount); 3] = [
    ("beginner", (9, 9), 10),
    ("intermediate", (16, 16), 40),
    ("expert", (16, 30), 99),
];

fn play_out(layout: &MineLayout, opening: Coord2, seed: u64) -> Summary {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(layout);
    let mut agent = Agent::new(layout.size()).expect("generated layouts are never empty");

    board.apply(agent.start(opening));
    while board.state().is_playing() {
        agent
            .observe(&board.render())
            .expect("rendering matches the agent's size");
        let Some(action) = agent.decide(&mut rng) else {
            break;
        };
        board.apply(action);
    }
    board.summary()
}

fn self_play(c: &mut Criterion) {
    let mut group = c.benchmark_group("self_play");
    for (name, size, mines) in TIERS {
        let config = GameConfig::new(size, mines);
        let opening = (size.0 / 2, size.1 / 2);
        let layouts: Vec<MineLayout> = (0..16)
            .map(|seed| {
                RandomLayoutGenerator::new(seed, opening, StartCell::AlwaysZero).generate(config)
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(name), &layouts, |b, layouts| {
            b.iter(|| {
                for (seed, layout) in layouts.iter().enumerate() {
                    black_box(play_out(layout, opening, seed as u64));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, self_play);
criterion_main!(benches);
