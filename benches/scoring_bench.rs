use countyforge::clock::ManualClock;
use countyforge::config::ScoringConfig;
use countyforge::content::Roster;
use countyforge::game::GameStateMachine;
use countyforge::scorer::{calculate_score, GameStats};
use countyforge::types::Difficulty;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn bench_calculate_score(c: &mut Criterion) {
    let config = ScoringConfig::default();
    let stats = GameStats::builder()
        .correct_answers(54)
        .total_questions(58)
        .mistakes(4)
        .hints_used(2)
        .time_elapsed_seconds(412.5)
        .difficulty(Difficulty::Hard)
        .build();

    c.bench_function("calculate_score", |b| {
        b.iter(|| calculate_score(black_box(&stats), black_box(&config)))
    });
}

fn bench_full_session(c: &mut Criterion) {
    let roster = Roster::california().expect("Failed to load bundled roster");
    let ids = roster.ids_in(None);

    c.bench_function("play_58_counties", |b| {
        b.iter(|| {
            let mut m = GameStateMachine::with_clock(
                ids.clone(),
                ScoringConfig::default(),
                ManualClock::default(),
            )
            .expect("default config is valid");
            m.start_game();
            for id in &ids {
                let _ = m.place_county(id, id);
            }
            black_box(m.summary())
        })
    });
}

criterion_group!(benches, bench_calculate_score, bench_full_session);
criterion_main!(benches);
