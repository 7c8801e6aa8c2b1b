use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use quizr::quiz::catalog::{Catalog, Question, QuestionId};
use quizr::quiz::progress::{ProgressState, ProgressTracker, unsolved};
use quizr::store::memory::MemoryStore;

fn make_catalog(count: i64) -> Catalog {
    let questions = (0..count)
        .map(|id| Question {
            id: QuestionId::Number(id),
            question: format!("Question {id}"),
            passage: None,
            choices: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answer: 1,
            explanation: String::new(),
        })
        .collect();
    Catalog::new(questions).unwrap()
}

fn half_solved(count: i64) -> ProgressState {
    ProgressState::from_parts((0..count).step_by(2).map(QuestionId::Number).collect(), None)
}

fn bench_unsolved(c: &mut Criterion) {
    let catalog = make_catalog(2000);
    let state = half_solved(2000);

    c.bench_function("unsolved (2000 questions, half solved)", |b| {
        b.iter(|| unsolved(black_box(&catalog), black_box(&state)).len())
    });
}

fn bench_pick_next(c: &mut Criterion) {
    let catalog = make_catalog(2000);
    let tracker = ProgressTracker::new(MemoryStore::new());
    let mut rng = SmallRng::seed_from_u64(0);

    c.bench_function("pick_next fresh pick + persist (2000 questions)", |b| {
        b.iter(|| {
            let mut state = half_solved(2000);
            tracker
                .pick_next(black_box(&catalog), &mut state, &mut rng)
                .map(|q| q.id.clone())
        })
    });
}

fn bench_mark_solved(c: &mut Criterion) {
    let tracker = ProgressTracker::new(MemoryStore::new());

    c.bench_function("mark_solved into 1000 solved ids", |b| {
        b.iter(|| {
            let mut state = half_solved(2000);
            tracker.mark_solved(&mut state, black_box(&QuestionId::Number(1)));
            state
        })
    });
}

criterion_group!(benches, bench_unsolved, bench_pick_next, bench_mark_solved);
criterion_main!(benches);
