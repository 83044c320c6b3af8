//! Memory Match logic: card selection, pair resolution, win detection.

use super::types::*;
use crate::challenges::{GameKind, GamePhase, Minigame, TimerRequest, TimerSlot};
use crate::core::scheduler::TimerSpec;
use rand::Rng;

/// Player intents for Memory Match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryIntent {
    Start,
    /// Flip the card at this deck index.
    Select(usize),
    MoveCursor(CursorMove),
    /// Flip the card under the cursor.
    SelectCursor,
}

/// Result of a selection that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// First card of a pair attempt is face-up.
    FirstFlipped,
    Matched,
    /// Both cards stay visible until the flip-back delay runs out.
    Mismatched,
}

/// Process player input.
pub fn process_intent(game: &mut MemoryGame, intent: MemoryIntent) {
    match intent {
        MemoryIntent::Start => {
            if game.phase == GamePhase::Idle {
                game.phase = GamePhase::Playing;
            }
        }
        MemoryIntent::Select(index) => {
            select_card(game, index);
        }
        MemoryIntent::MoveCursor(dir) => move_cursor(game, dir),
        MemoryIntent::SelectCursor => {
            select_card(game, game.cursor);
        }
    }
}

/// Flip a card. Returns `None` when the selection is ignored.
pub fn select_card(game: &mut MemoryGame, index: usize) -> Option<Selection> {
    if game.phase != GamePhase::Playing || game.awaiting_flip_back() {
        return None;
    }
    let card = game.cards.get(index)?;
    if card.matched || card.flipped {
        return None;
    }

    game.cards[index].flipped = true;
    game.pending.push(index);
    if game.pending.len() < 2 {
        return Some(Selection::FirstFlipped);
    }

    game.moves += 1;
    let (first, second) = (game.pending[0], game.pending[1]);
    if game.cards[first].face != game.cards[second].face {
        return Some(Selection::Mismatched);
    }

    for i in [first, second] {
        game.cards[i].matched = true;
    }
    game.pending.clear();
    game.matches += 1;
    game.tip = Some(game.cards[first].face().tip);

    if game.matches == PAIR_COUNT {
        game.phase = GamePhase::Won;
        game.tip = None;
    }
    Some(Selection::Matched)
}

/// Turn a mismatched pair face-down and unlock selection.
pub fn flip_back(game: &mut MemoryGame) {
    for index in game.pending.drain(..) {
        if let Some(card) = game.cards.get_mut(index) {
            if !card.matched {
                card.flipped = false;
            }
        }
    }
}

/// Move the keyboard cursor, clamped to the grid.
pub fn move_cursor(game: &mut MemoryGame, dir: CursorMove) {
    let last = game.cards.len().saturating_sub(1);
    let cursor = game.cursor;
    game.cursor = match dir {
        CursorMove::Left => cursor.saturating_sub(1),
        CursorMove::Right => (cursor + 1).min(last),
        CursorMove::Up => cursor.checked_sub(GRID_COLUMNS).unwrap_or(cursor),
        CursorMove::Down if cursor + GRID_COLUMNS <= last => cursor + GRID_COLUMNS,
        CursorMove::Down => cursor,
    };
}

impl Minigame for MemoryGame {
    type Intent = MemoryIntent;

    const KIND: GameKind = GameKind::Memory;

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn apply_intent<R: Rng + ?Sized>(&mut self, intent: MemoryIntent, _rng: &mut R) {
        process_intent(self, intent);
    }

    fn on_timer<R: Rng + ?Sized>(&mut self, slot: TimerSlot, _rng: &mut R) {
        match slot {
            TimerSlot::Clock => {
                self.clock.advance();
            }
            TimerSlot::Reveal => flip_back(self),
            TimerSlot::Tip => self.tip = None,
            TimerSlot::Physics => {}
        }
    }

    fn wanted_timers(&self) -> Vec<TimerRequest> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }
        let mut wanted = vec![TimerRequest::new(
            TimerSlot::Clock,
            TimerSpec::Repeating(CLOCK_INTERVAL_MS),
        )];
        if self.awaiting_flip_back() {
            wanted.push(TimerRequest::new(
                TimerSlot::Reveal,
                TimerSpec::Once(MISMATCH_DELAY_MS),
            ));
        }
        if self.tip.is_some() {
            wanted.push(TimerRequest::new(
                TimerSlot::Tip,
                TimerSpec::Once(TIP_DURATION_MS),
            ));
        }
        wanted
    }

    fn final_score(&self) -> u32 {
        MEMORY_REWARD
    }

    /// Fewest moves, and only for a finished board.
    fn best_candidate(&self) -> Option<u32> {
        (self.phase == GamePhase::Won).then_some(self.moves)
    }

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = MemoryGame::new(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn playing_game() -> MemoryGame {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut game = MemoryGame::new(&mut rng);
        process_intent(&mut game, MemoryIntent::Start);
        game
    }

    /// Index of both cards showing `face`.
    fn pair_of(game: &MemoryGame, face: usize) -> (usize, usize) {
        let idx: Vec<usize> = game
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.face == face)
            .map(|(i, _)| i)
            .collect();
        (idx[0], idx[1])
    }

    fn mismatched_pair(game: &MemoryGame) -> (usize, usize) {
        let (a, _) = pair_of(game, 0);
        let (b, _) = pair_of(game, 1);
        (a, b)
    }

    #[test]
    fn test_select_ignored_while_idle() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut game = MemoryGame::new(&mut rng);
        assert_eq!(select_card(&mut game, 0), None);
        assert!(!game.cards[0].flipped);
    }

    #[test]
    fn test_match_marks_cards_and_shows_tip() {
        let mut game = playing_game();
        let (a, b) = pair_of(&game, 2);

        assert_eq!(select_card(&mut game, a), Some(Selection::FirstFlipped));
        assert_eq!(select_card(&mut game, b), Some(Selection::Matched));

        assert!(game.cards[a].matched && game.cards[b].matched);
        assert!(game.pending.is_empty());
        assert_eq!(game.moves, 1);
        assert_eq!(game.matches, 1);
        assert_eq!(game.tip, Some("Quality sleep"));
    }

    #[test]
    fn test_mismatch_locks_until_flip_back() {
        let mut game = playing_game();
        let (a, b) = mismatched_pair(&game);
        let other = (0..DECK_SIZE).find(|i| *i != a && *i != b).unwrap();

        select_card(&mut game, a);
        assert_eq!(select_card(&mut game, b), Some(Selection::Mismatched));
        assert_eq!(game.moves, 1);
        assert!(game.awaiting_flip_back());

        assert_eq!(select_card(&mut game, other), None);
        assert!(!game.cards[other].flipped);

        flip_back(&mut game);
        assert!(!game.cards[a].flipped && !game.cards[b].flipped);
        assert!(game.pending.is_empty());
        assert_eq!(select_card(&mut game, other), Some(Selection::FirstFlipped));
    }

    #[test]
    fn test_reselecting_same_card_is_noop() {
        let mut game = playing_game();
        select_card(&mut game, 0);
        assert_eq!(select_card(&mut game, 0), None);
        assert_eq!(game.pending, vec![0]);
        assert_eq!(game.moves, 0);
    }

    #[test]
    fn test_matched_card_is_noop() {
        let mut game = playing_game();
        let (a, b) = pair_of(&game, 4);
        select_card(&mut game, a);
        select_card(&mut game, b);
        assert_eq!(select_card(&mut game, a), None);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut game = playing_game();
        assert_eq!(select_card(&mut game, DECK_SIZE), None);
    }

    #[test]
    fn test_wins_after_all_pairs() {
        let mut game = playing_game();
        for face in 0..FACES.len() {
            assert_eq!(game.phase, GamePhase::Playing);
            let (a, b) = pair_of(&game, face);
            select_card(&mut game, a);
            select_card(&mut game, b);
        }
        assert_eq!(game.phase, GamePhase::Won);
        assert_eq!(game.matches, PAIR_COUNT);
        assert_eq!(game.moves, PAIR_COUNT);
        assert_eq!(game.best_candidate(), Some(PAIR_COUNT));
        assert_eq!(game.final_score(), MEMORY_REWARD);
        assert!(game.wanted_timers().is_empty());
    }

    #[test]
    fn test_final_match_leaves_no_tip_behind() {
        let mut game = playing_game();
        for face in 0..FACES.len() - 1 {
            let (a, b) = pair_of(&game, face);
            select_card(&mut game, a);
            select_card(&mut game, b);
        }
        assert!(game.tip.is_some());

        let (a, b) = pair_of(&game, FACES.len() - 1);
        select_card(&mut game, a);
        assert_eq!(select_card(&mut game, b), Some(Selection::Matched));
        assert_eq!(game.phase, GamePhase::Won);
        assert_eq!(game.tip, None);
    }

    #[test]
    fn test_no_best_candidate_before_win() {
        let game = playing_game();
        assert_eq!(game.best_candidate(), None);
    }

    #[test]
    fn test_wanted_timers_follow_state() {
        let mut game = playing_game();
        let slots = |g: &MemoryGame| g.wanted_timers().iter().map(|r| r.slot).collect::<Vec<_>>();
        assert_eq!(slots(&game), vec![TimerSlot::Clock]);

        let (a, b) = mismatched_pair(&game);
        select_card(&mut game, a);
        select_card(&mut game, b);
        assert_eq!(slots(&game), vec![TimerSlot::Clock, TimerSlot::Reveal]);

        let mut rng = ChaCha8Rng::seed_from_u64(0);
        game.on_timer(TimerSlot::Reveal, &mut rng);
        let (c, d) = pair_of(&game, 5);
        select_card(&mut game, c);
        select_card(&mut game, d);
        assert_eq!(slots(&game), vec![TimerSlot::Clock, TimerSlot::Tip]);

        game.on_timer(TimerSlot::Tip, &mut rng);
        assert_eq!(game.tip, None);
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut game = playing_game();
        move_cursor(&mut game, CursorMove::Up);
        move_cursor(&mut game, CursorMove::Left);
        assert_eq!(game.cursor, 0);

        move_cursor(&mut game, CursorMove::Down);
        move_cursor(&mut game, CursorMove::Right);
        assert_eq!(game.cursor, GRID_COLUMNS + 1);

        game.cursor = DECK_SIZE - 1;
        move_cursor(&mut game, CursorMove::Down);
        move_cursor(&mut game, CursorMove::Right);
        assert_eq!(game.cursor, DECK_SIZE - 1);
    }

    #[test]
    fn test_select_cursor_flips_highlighted_card() {
        let mut game = playing_game();
        game.cursor = 6;
        process_intent(&mut game, MemoryIntent::SelectCursor);
        assert!(game.cards[6].flipped);
    }
}
