//! Integration test: Focus Flappy driven through a session and a manual
//! scheduler, one 16ms frame at a time.

use arcade::challenges::flappy::{
    FlappyGame, FlappyIntent, FLOOR_Y, FRAME_INTERVAL_MS, JUMP_VELOCITY,
};
use arcade::challenges::{GameEnd, GameKind, GamePhase, Session};
use arcade::core::scheduler::{FrameScheduler, ManualScheduler, FRAME_BUDGET_MS};
use arcade::scores::InMemoryBestScoreStore;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

fn flappy_session() -> (Session<FlappyGame>, Rc<RefCell<Vec<GameEnd>>>) {
    let ends = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&ends);
    let session = Session::new(
        FlappyGame::new(),
        Box::new(InMemoryBestScoreStore::new()),
        move |end| sink.borrow_mut().push(end),
    );
    (session, ends)
}

#[test]
fn test_idle_until_first_jump() {
    let (mut session, ends) = flappy_session();
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    for _ in 0..10 {
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);
    }
    assert_eq!(session.phase(), GamePhase::Idle);
    assert_eq!(session.game().clock.elapsed, 0);
    assert_eq!(sched.active_timers(), 0);
    assert!(ends.borrow().is_empty());
}

#[test]
fn test_free_fall_to_floor_reports_once() {
    let (mut session, ends) = flappy_session();
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.game().bird.velocity, JUMP_VELOCITY);

    let mut frames = 0;
    let mut last_velocity = session.game().bird.velocity;
    while session.phase() == GamePhase::Playing {
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);
        frames += 1;

        let velocity = session.game().bird.velocity;
        assert!(velocity > last_velocity, "gravity must keep pulling down");
        last_velocity = velocity;
        assert!(frames < 1000, "bird never reached the floor");
    }

    // y(n) = 250 - 8n + n(n+1)/4 first exceeds the floor at n = 49; the bird
    // stays at y(48).
    assert_eq!(frames, 49);
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.game().bird.y, 454.0);
    assert!(session.game().bird.y <= FLOOR_Y);
    assert_eq!(session.game().score, 0);

    let ends = ends.borrow();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].kind, GameKind::Flappy);
    assert_eq!(ends[0].score, 0);
}

#[test]
fn test_no_frames_after_game_over() {
    let (mut session, ends) = flappy_session();
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);
    while session.phase() == GamePhase::Playing {
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);
    }
    let frozen = session.game().clock.elapsed;
    let bird = session.game().bird;

    assert_eq!(session.live_timers(), 0);
    assert_eq!(sched.active_timers(), 0);

    for _ in 0..20 {
        sched.advance(FRAME_INTERVAL_MS);
        assert!(!session.run_due(&mut sched, &mut rng));
    }
    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);

    assert_eq!(session.game().clock.elapsed, frozen);
    assert_eq!(session.game().bird, bird);
    assert_eq!(ends.borrow().len(), 1);
}

#[test]
fn test_flapping_scores_pipes() {
    let (mut session, ends) = flappy_session();
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);

    // Gap positions of every pipe seen flagged as passed.
    let mut passed_gaps: Vec<u64> = Vec::new();

    // Autopilot: flap whenever the bird sinks below the middle of the next gap.
    for _ in 0..3000 {
        if session.phase() != GamePhase::Playing {
            break;
        }
        let game = session.game();
        let target = game
            .pipes
            .iter()
            .find(|p| p.right() >= 50.0)
            .map_or(250.0, |p| p.gap_start + 60.0);
        if game.bird.y > target && game.bird.velocity > 0.0 {
            session.intent(FlappyIntent::Jump, &mut sched, &mut rng);
        }
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);

        for pipe in session.game().pipes.iter().filter(|p| p.passed) {
            let gap = pipe.gap_start.to_bits();
            if !passed_gaps.contains(&gap) {
                passed_gaps.push(gap);
            }
        }
    }

    let score = session.game().score;
    assert!(score >= 1, "autopilot should clear at least one pipe");
    assert_eq!(passed_gaps.len() as u32, score);
    assert_eq!(session.phase(), GamePhase::GameOver);

    let ends = ends.borrow();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].score, score);
}

#[test]
fn test_restart_returns_to_idle_with_fresh_state() {
    let (mut session, ends) = flappy_session();
    let mut sched = ManualScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);
    while session.phase() == GamePhase::Playing {
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);
    }
    session.restart(&mut sched, &mut rng);

    assert_eq!(session.phase(), GamePhase::Idle);
    assert!(session.game().pipes.is_empty());
    assert_eq!(session.best(), Some(0));

    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);
    while session.phase() == GamePhase::Playing {
        sched.advance(FRAME_INTERVAL_MS);
        session.run_due(&mut sched, &mut rng);
    }
    let ends = ends.borrow();
    assert_eq!(ends.len(), 2);
    assert!(ends[0].new_best);
    assert!(!ends[1].new_best);
}

#[test]
fn test_physics_rate_ignores_poll_rate() {
    let (mut session, _ends) = flappy_session();
    let mut sched = FrameScheduler::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let start = Instant::now();
    session.intent(FlappyIntent::Jump, &mut sched, &mut rng);

    // Poll as fast as possible, the way a flood of input events would.
    let mut polls = 0u32;
    while start.elapsed() < Duration::from_millis(80) && session.phase() == GamePhase::Playing {
        session.run_due(&mut sched, &mut rng);
        polls += 1;
    }

    let ticks = session.game().clock.elapsed;
    assert!(polls > 100, "only {} polls", polls);
    assert!(ticks >= 1);
    assert!(
        ticks <= 80 / FRAME_BUDGET_MS + 1,
        "{} physics ticks in 80ms",
        ticks
    );
    assert_eq!(session.phase(), GamePhase::Playing);
}
