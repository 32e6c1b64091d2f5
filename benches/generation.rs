use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dungen::{Arcana, Deck, EncounterEngine, FloorGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_floor_generation(c: &mut Criterion) {
    let mut seed = 0_u64;
    c.bench_function("generate_seeded 30x30", |b| {
        b.iter(|| {
            seed = seed.wrapping_add(1);
            dungen::generate_seeded(black_box(30), black_box(seed))
        })
    });

    let generator = FloorGenerator::new();
    c.bench_function("single attempt 30x30", |b| {
        b.iter(|| generator.generate_attempt(black_box(30), black_box(42)))
    });
}

fn bench_components(c: &mut Criterion) {
    c.bench_function("deal full deck", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let mut deck = Deck::new();
            while deck.draw(&mut rng).is_ok() {}
            deck.cards_drawn()
        })
    });

    let engine = EncounterEngine::new(Arcana::ALL[..6].to_vec());
    c.bench_function("roll rosters", |b| {
        let mut rng = StdRng::seed_from_u64(11);
        b.iter(|| {
            for difficulty in dungen::Difficulty::ALL {
                black_box(engine.roll_roster(difficulty, &mut rng).ok());
            }
        })
    });
}

criterion_group!(benches, bench_floor_generation, bench_components);
criterion_main!(benches);
