//! Integration test: best records on disk, shared between sessions and
//! stores, plus the ordering rules under arbitrary candidate sequences.

use arcade::challenges::flappy::{FlappyGame, FlappyIntent, FRAME_INTERVAL_MS};
use arcade::challenges::{GameKind, Session};
use arcade::core::scheduler::ManualScheduler;
use arcade::scores::{
    save_best_if_better, BestOrdering, BestScoreStore, InMemoryBestScoreStore,
    JsonBestScoreStore, BEST_SCORES_FILE,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;

#[test]
fn test_records_survive_a_new_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(BEST_SCORES_FILE);

    let mut store = JsonBestScoreStore::new(path.clone());
    assert!(save_best_if_better(&mut store, "flappy_high_score", 4, BestOrdering::HigherWins));
    assert!(save_best_if_better(&mut store, "memory_high_score", 12, BestOrdering::LowerWins));

    let reopened = JsonBestScoreStore::new(path);
    assert_eq!(reopened.load_best("flappy_high_score"), Some(4));
    assert_eq!(reopened.load_best("memory_high_score"), Some(12));
    assert_eq!(reopened.load_best("snake_high_score"), None);
}

#[test]
fn test_unreadable_file_reads_as_no_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(BEST_SCORES_FILE);
    fs::write(&path, "not json at all").unwrap();

    let mut store = JsonBestScoreStore::new(path.clone());
    assert_eq!(store.load_best("snake_high_score"), None);

    // The first write replaces the broken file.
    assert!(save_best_if_better(&mut store, "snake_high_score", 3, BestOrdering::HigherWins));
    assert_eq!(JsonBestScoreStore::new(path).load_best("snake_high_score"), Some(3));
}

#[test]
fn test_string_and_garbage_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(BEST_SCORES_FILE);
    fs::write(
        &path,
        r#"{"flappy_high_score": "7", "snake_high_score": -2, "memory_high_score": "abc"}"#,
    )
    .unwrap();

    let store = JsonBestScoreStore::new(path);
    assert_eq!(store.load_best("flappy_high_score"), Some(7));
    assert_eq!(store.load_best("snake_high_score"), None);
    assert_eq!(store.load_best("memory_high_score"), None);
}

#[test]
fn test_sessions_sharing_a_file_see_each_others_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(BEST_SCORES_FILE);
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let mut first = Session::new(
        FlappyGame::new(),
        Box::new(JsonBestScoreStore::new(path.clone())),
        |_| {},
    );
    assert_eq!(first.best(), None);

    // Fall straight to the floor: a zero score still sets the first record.
    first.intent(FlappyIntent::Jump, &mut sched, &mut rng);
    while !first.has_reported() {
        sched.advance(FRAME_INTERVAL_MS);
        first.run_due(&mut sched, &mut rng);
    }
    assert_eq!(first.best(), Some(0));

    let second = Session::new(
        FlappyGame::new(),
        Box::new(JsonBestScoreStore::new(path.clone())),
        |_| {},
    );
    assert_eq!(second.best(), Some(0));
    assert_eq!(
        JsonBestScoreStore::new(path).load_best(GameKind::Flappy.best_key()),
        Some(0)
    );
}

#[derive(Debug, Clone, Copy)]
enum Order {
    Higher,
    Lower,
}

fn ordering_strategy() -> impl Strategy<Value = Order> {
    prop_oneof![Just(Order::Higher), Just(Order::Lower)]
}

proptest! {
    #[test]
    fn prop_store_holds_extreme_of_candidates(
        order in ordering_strategy(),
        candidates in prop::collection::vec(0u32..1000, 1..40),
    ) {
        let ordering = match order {
            Order::Higher => BestOrdering::HigherWins,
            Order::Lower => BestOrdering::LowerWins,
        };
        let mut store = InMemoryBestScoreStore::new();
        let mut improvements = 0;
        for &candidate in &candidates {
            let before = store.load_best("k");
            let improved = save_best_if_better(&mut store, "k", candidate, ordering);
            prop_assert_eq!(improved, ordering.is_better(candidate, before));
            if improved {
                improvements += 1;
            }
        }

        let expected = match order {
            Order::Higher => candidates.iter().max().copied(),
            Order::Lower => candidates.iter().min().copied(),
        };
        prop_assert_eq!(store.load_best("k"), expected);
        prop_assert!(improvements >= 1);
        prop_assert!(improvements <= candidates.len());
    }
}
