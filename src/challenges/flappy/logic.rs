//! Game logic for the Focus Flappy minigame.

use super::types::{Bounds, FlappyGame, Pipe, BIRD_X, FLOOR_Y, GRAVITY, JUMP_VELOCITY, PIPE_SPEED};
use crate::challenges::{GameKind, GamePhase, Minigame, TimerRequest, TimerSlot};
use crate::core::scheduler::TimerSpec;
use rand::Rng;

/// Player intents for Flappy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyIntent {
    /// Click, Space or Up. Starts the run from `Idle`.
    Jump,
}

/// Apply an intent. Jumps set the velocity outright, so they never stack.
/// Ignored once the run is over.
pub fn process_intent(game: &mut FlappyGame, intent: FlappyIntent) {
    match intent {
        FlappyIntent::Jump => match game.phase {
            GamePhase::Idle => {
                game.phase = GamePhase::Playing;
                game.bird.velocity = JUMP_VELOCITY;
            }
            GamePhase::Playing => game.bird.velocity = JUMP_VELOCITY,
            GamePhase::GameOver | GamePhase::Won => {}
        },
    }
}

/// Advance one frame: gravity, integration, scrolling, spawning, scoring,
/// collision, cleanup.
///
/// A move that would leave the playfield ends the run instead: the bird keeps
/// its last in-bounds `y` and the pipes stay where they were.
pub fn process_tick<R: Rng + ?Sized>(game: &mut FlappyGame, rng: &mut R) {
    if game.phase != GamePhase::Playing {
        return;
    }
    game.clock.advance();

    game.bird.velocity += GRAVITY;
    let next_y = game.bird.y + game.bird.velocity;
    if out_of_bounds(next_y) {
        game.phase = GamePhase::GameOver;
        return;
    }
    game.bird.y = next_y;

    for pipe in &mut game.pipes {
        pipe.x -= PIPE_SPEED;
    }

    if game.should_spawn_pipe() {
        game.spawn_pipe(rng);
    }

    score_passed_pipes(game);

    let bird = game.bird.bounds();
    if game.pipes.iter().any(|pipe| pipe_collision(&bird, pipe)) {
        game.phase = GamePhase::GameOver;
        return;
    }

    game.pipes.retain(|pipe| pipe.right() > 0.0);
}

/// Above the ceiling or below the floor. Never clamped into play.
pub fn out_of_bounds(bird_y: f64) -> bool {
    bird_y < 0.0 || bird_y > FLOOR_Y
}

/// The bird overlaps the pipe horizontally and pokes out of its gap.
pub fn pipe_collision(bird: &Bounds, pipe: &Pipe) -> bool {
    let overlaps = bird.right > pipe.x && bird.left < pipe.right();
    let outside_gap = bird.top < pipe.gap_start || bird.bottom > pipe.gap_end();
    overlaps && outside_gap
}

/// Award one point per pipe whose trailing edge has cleared the bird.
/// The `passed` flag keeps each pipe to a single point.
pub fn score_passed_pipes(game: &mut FlappyGame) -> u32 {
    let mut newly_passed = 0;
    for pipe in &mut game.pipes {
        if !pipe.passed && pipe.right() < BIRD_X {
            pipe.passed = true;
            newly_passed += 1;
        }
    }
    game.score += newly_passed;
    newly_passed
}

impl Minigame for FlappyGame {
    type Intent = FlappyIntent;

    const KIND: GameKind = GameKind::Flappy;

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn apply_intent<R: Rng + ?Sized>(&mut self, intent: FlappyIntent, _rng: &mut R) {
        process_intent(self, intent);
    }

    fn on_timer<R: Rng + ?Sized>(&mut self, slot: TimerSlot, rng: &mut R) {
        if slot == TimerSlot::Physics {
            process_tick(self, rng);
        }
    }

    fn wanted_timers(&self) -> Vec<TimerRequest> {
        match self.phase {
            GamePhase::Playing => vec![TimerRequest::new(TimerSlot::Physics, TimerSpec::NextFrame)],
            _ => Vec::new(),
        }
    }

    fn final_score(&self) -> u32 {
        self.score
    }

    fn best_candidate(&self) -> Option<u32> {
        Some(self.score)
    }

    fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) {
        *self = FlappyGame::new();
    }
}
