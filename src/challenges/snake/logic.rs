//! Snake game logic: movement, input processing, collision detection.

use super::types::*;
use crate::challenges::{GameKind, GamePhase, Minigame, TimerRequest, TimerSlot};
use crate::core::scheduler::TimerSpec;
use rand::Rng;

/// Player intents for Snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeIntent {
    /// Leave the start screen.
    Start,
    Turn(Direction),
}

/// Outcome of a single movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    HitWall,
    HitSelf,
    /// Ate the last free cell; nothing left to spawn food on.
    FilledGrid,
}

/// Process player input.
pub fn process_intent(game: &mut SnakeGame, intent: SnakeIntent) {
    match (game.phase, intent) {
        (GamePhase::Idle, SnakeIntent::Start) => game.phase = GamePhase::Playing,
        (GamePhase::Playing, SnakeIntent::Turn(direction)) => {
            request_turn(game, direction);
        }
        _ => {}
    }
}

/// Queue a turn for the next step.
///
/// Reversals are judged against the direction of the last move, not the last
/// request, so two quick presses inside one step cannot fold the snake back
/// onto itself. Returns whether the request was accepted.
pub fn request_turn(game: &mut SnakeGame, direction: Direction) -> bool {
    if direction == game.direction.opposite() {
        return false;
    }
    game.next_direction = direction;
    true
}

/// Next head cell would end the run: off the grid or on any current segment.
///
/// The whole pre-move body counts, including the tail that would otherwise
/// be vacated this step.
pub fn is_fatal(snake: &std::collections::VecDeque<Position>, next_head: Position) -> bool {
    !next_head.in_bounds() || snake.contains(&next_head)
}

/// Single movement step.
pub fn step_snake<R: Rng + ?Sized>(game: &mut SnakeGame, rng: &mut R) -> StepOutcome {
    game.clock.advance();

    // Apply buffered direction
    game.direction = game.next_direction;
    let new_head = game.head().step(game.direction);

    if !new_head.in_bounds() {
        game.phase = GamePhase::GameOver;
        return StepOutcome::HitWall;
    }
    if is_fatal(&game.snake, new_head) {
        game.phase = GamePhase::GameOver;
        return StepOutcome::HitSelf;
    }

    game.snake.push_front(new_head);

    if new_head != game.food {
        game.snake.pop_back();
        return StepOutcome::Moved;
    }

    // Grow (tail stays), score and speed up
    game.score += 1;
    game.clock.tick_interval_ms = game
        .clock
        .tick_interval_ms
        .saturating_sub(SPEEDUP_STEP_MS)
        .max(MIN_INTERVAL_MS);

    match spawn_food(&game.snake, rng) {
        Some(food) => {
            game.food = food;
            StepOutcome::Ate
        }
        None => {
            game.phase = GamePhase::GameOver;
            StepOutcome::FilledGrid
        }
    }
}

impl Minigame for SnakeGame {
    type Intent = SnakeIntent;

    const KIND: GameKind = GameKind::Snake;

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn apply_intent<R: Rng + ?Sized>(&mut self, intent: SnakeIntent, _rng: &mut R) {
        process_intent(self, intent);
    }

    fn on_timer<R: Rng + ?Sized>(&mut self, slot: TimerSlot, rng: &mut R) {
        if slot == TimerSlot::Physics && self.phase == GamePhase::Playing {
            step_snake(self, rng);
        }
    }

    fn wanted_timers(&self) -> Vec<TimerRequest> {
        match self.phase {
            GamePhase::Playing => vec![TimerRequest::new(
                TimerSlot::Physics,
                TimerSpec::Repeating(self.move_interval_ms()),
            )],
            _ => Vec::new(),
        }
    }

    fn final_score(&self) -> u32 {
        self.score
    }

    fn best_candidate(&self) -> Option<u32> {
        Some(self.score)
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = SnakeGame::new(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// A started game with the given body (head first) and food.
    fn game_with(body: &[(i16, i16)], food: (i16, i16), direction: Direction) -> SnakeGame {
        let mut game = SnakeGame::new(&mut rng());
        game.phase = GamePhase::Playing;
        game.snake = body.iter().map(|&(x, y)| Position::new(x, y)).collect();
        game.food = Position::new(food.0, food.1);
        game.direction = direction;
        game.next_direction = direction;
        game
    }

    #[test]
    fn test_start_intent_leaves_idle() {
        let mut game = SnakeGame::new(&mut rng());
        process_intent(&mut game, SnakeIntent::Turn(Direction::Up));
        assert_eq!(game.phase, GamePhase::Idle);
        assert_eq!(game.next_direction, Direction::Right);

        process_intent(&mut game, SnakeIntent::Start);
        assert_eq!(game.phase, GamePhase::Playing);
    }

    #[test]
    fn test_reversal_rejected_perpendicular_accepted() {
        let mut game = game_with(&[(5, 5)], (0, 0), Direction::Right);

        process_intent(&mut game, SnakeIntent::Turn(Direction::Left));
        assert_eq!(game.next_direction, Direction::Right);

        process_intent(&mut game, SnakeIntent::Turn(Direction::Up));
        assert_eq!(game.next_direction, Direction::Up);

        let mut game = game_with(&[(5, 5)], (0, 0), Direction::Right);
        process_intent(&mut game, SnakeIntent::Turn(Direction::Down));
        assert_eq!(game.next_direction, Direction::Down);
    }

    #[test]
    fn test_reversal_checked_against_current_direction() {
        let mut game = game_with(&[(5, 5), (4, 5), (3, 5)], (0, 0), Direction::Right);

        // Up then Left inside one step: Left is still the reverse of Right.
        process_intent(&mut game, SnakeIntent::Turn(Direction::Up));
        process_intent(&mut game, SnakeIntent::Turn(Direction::Left));
        assert_eq!(game.next_direction, Direction::Up);

        let outcome = step_snake(&mut game, &mut rng());
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(game.head(), Position::new(5, 4));

        // Now moving Up, Left is a legal turn.
        assert!(request_turn(&mut game, Direction::Left));
    }

    #[test]
    fn test_turns_ignored_after_game_over() {
        let mut game = game_with(&[(5, 5)], (0, 0), Direction::Right);
        game.phase = GamePhase::GameOver;
        process_intent(&mut game, SnakeIntent::Turn(Direction::Up));
        assert_eq!(game.next_direction, Direction::Right);
    }

    #[test]
    fn test_move_keeps_length() {
        let mut game = game_with(&[(5, 5), (4, 5), (3, 5)], (0, 0), Direction::Right);
        let outcome = step_snake(&mut game, &mut rng());
        assert_eq!(outcome, StepOutcome::Moved);
        assert_eq!(
            game.snake,
            VecDeque::from(vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5)
            ])
        );
        assert_eq!(game.score, 0);
    }

    #[test]
    fn test_eating_grows_scores_and_speeds_up() {
        let mut game = game_with(&[(5, 5), (4, 5)], (6, 5), Direction::Right);
        let outcome = step_snake(&mut game, &mut rng());

        assert_eq!(outcome, StepOutcome::Ate);
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.head(), Position::new(6, 5));
        assert_eq!(game.score, 1);
        assert_eq!(game.move_interval_ms(), INITIAL_INTERVAL_MS - SPEEDUP_STEP_MS);
        assert!(!game.snake.contains(&game.food));
    }

    #[test]
    fn test_speed_has_floor() {
        let mut game = game_with(&[(5, 5)], (6, 5), Direction::Right);
        game.clock.tick_interval_ms = MIN_INTERVAL_MS + 2;
        step_snake(&mut game, &mut rng());
        assert_eq!(game.move_interval_ms(), MIN_INTERVAL_MS);
    }

    #[test]
    fn test_wall_collision() {
        let mut game = game_with(&[(19, 3)], (0, 0), Direction::Right);
        assert_eq!(step_snake(&mut game, &mut rng()), StepOutcome::HitWall);
        assert_eq!(game.phase, GamePhase::GameOver);
        assert_eq!(game.head(), Position::new(19, 3), "body is not moved on death");

        let mut game = game_with(&[(4, 0)], (0, 5), Direction::Up);
        assert_eq!(step_snake(&mut game, &mut rng()), StepOutcome::HitWall);
    }

    #[test]
    fn test_self_collision() {
        // Head at (5,5) heading Down into (5,6), which is body.
        let mut game = game_with(
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            (0, 0),
            Direction::Down,
        );
        assert_eq!(step_snake(&mut game, &mut rng()), StepOutcome::HitSelf);
        assert_eq!(game.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_fatal() {
        // 2x2 loop: the head's next cell is the tail about to move away.
        let mut game = game_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], (0, 0), Direction::Down);
        assert_eq!(step_snake(&mut game, &mut rng()), StepOutcome::HitSelf);
    }

    #[test]
    fn test_filling_grid_ends_game() {
        let mut body: Vec<(i16, i16)> = Vec::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if (x, y) != (0, 0) && (x, y) != (1, 0) {
                    body.push((x, y));
                }
            }
        }
        body.insert(0, (1, 0));
        let mut game = game_with(&body, (0, 0), Direction::Left);

        assert_eq!(step_snake(&mut game, &mut rng()), StepOutcome::FilledGrid);
        assert_eq!(game.phase, GamePhase::GameOver);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_wanted_timer_tracks_speed() {
        let mut game = game_with(&[(5, 5)], (6, 5), Direction::Right);
        assert_eq!(
            game.wanted_timers()[0].spec,
            TimerSpec::Repeating(INITIAL_INTERVAL_MS)
        );
        step_snake(&mut game, &mut rng());
        assert_eq!(
            game.wanted_timers()[0].spec,
            TimerSpec::Repeating(INITIAL_INTERVAL_MS - SPEEDUP_STEP_MS)
        );
    }

    proptest! {
        #[test]
        fn prop_body_cells_stay_distinct(seed in any::<u64>(), turns in proptest::collection::vec(0u8..4, 1..300)) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut game = SnakeGame::new(&mut rng);
            process_intent(&mut game, SnakeIntent::Start);
            for t in turns {
                let dir = [Direction::Up, Direction::Down, Direction::Left, Direction::Right][t as usize];
                process_intent(&mut game, SnakeIntent::Turn(dir));
                let len_before = game.snake.len();
                let outcome = step_snake(&mut game, &mut rng);
                let mut cells: Vec<Position> = game.snake.iter().copied().collect();
                cells.sort_by_key(|p| (p.x, p.y));
                cells.dedup();
                prop_assert_eq!(cells.len(), game.snake.len());
                prop_assert!(game.snake.len() >= len_before);
                prop_assert!(!game.snake.contains(&game.food) || game.phase == GamePhase::GameOver);
                if outcome != StepOutcome::Moved && outcome != StepOutcome::Ate {
                    break;
                }
            }
        }

        #[test]
        fn prop_entering_body_cell_is_fatal(
            len in 2usize..12,
            pick in any::<proptest::sample::Index>(),
        ) {
            // Straight body along row 10, head at the right end.
            let body: Vec<(i16, i16)> = (0..len as i16).map(|i| (15 - i, 10)).collect();
            let game = game_with(&body, (0, 0), Direction::Right);
            let target = game.snake[pick.index(len)];
            prop_assert!(is_fatal(&game.snake, target));

            // Food directly ahead on a free cell is never fatal.
            let ahead = game.head().step(Direction::Right);
            prop_assert!(!is_fatal(&game.snake, ahead));
        }
    }
}
