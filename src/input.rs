//! Terminal input for the arcade.
//!
//! Key and mouse events are turned into menu actions or per-game intents
//! here; nothing in this module touches game state directly.

use crate::challenges::memory::CursorMove;
use crate::challenges::snake::Direction;
use crate::challenges::{FlappyIntent, GameKind, GamePhase, MemoryIntent, SnakeIntent};
use crate::host::Arcade;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    /// Leave the arcade.
    Quit,
}

/// What a key means while a game is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey<I> {
    Intent(I),
    Restart,
    /// Back to the menu.
    Leave,
    Ignored,
}

pub fn flappy_key(code: KeyCode, phase: GamePhase) -> GameKey<FlappyIntent> {
    match (code, phase.is_terminal()) {
        (KeyCode::Esc, _) => GameKey::Leave,
        (KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R'), true) => GameKey::Restart,
        (KeyCode::Char(' ') | KeyCode::Up, false) => GameKey::Intent(FlappyIntent::Jump),
        _ => GameKey::Ignored,
    }
}

pub fn snake_key(code: KeyCode, phase: GamePhase) -> GameKey<SnakeIntent> {
    if code == KeyCode::Esc {
        return GameKey::Leave;
    }
    if phase.is_terminal() {
        return match code {
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => GameKey::Restart,
            _ => GameKey::Ignored,
        };
    }
    let direction = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Enter | KeyCode::Char(' ') if phase == GamePhase::Idle => {
            return GameKey::Intent(SnakeIntent::Start)
        }
        _ => return GameKey::Ignored,
    };
    GameKey::Intent(SnakeIntent::Turn(direction))
}

pub fn memory_key(code: KeyCode, phase: GamePhase) -> GameKey<MemoryIntent> {
    let cursor = |dir| GameKey::Intent(MemoryIntent::MoveCursor(dir));
    match code {
        KeyCode::Esc => GameKey::Leave,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') if phase.is_terminal() => {
            GameKey::Restart
        }
        KeyCode::Enter | KeyCode::Char(' ') if phase == GamePhase::Idle => {
            GameKey::Intent(MemoryIntent::Start)
        }
        KeyCode::Enter | KeyCode::Char(' ') if phase == GamePhase::Playing => {
            GameKey::Intent(MemoryIntent::SelectCursor)
        }
        KeyCode::Up => cursor(CursorMove::Up),
        KeyCode::Down => cursor(CursorMove::Down),
        KeyCode::Left => cursor(CursorMove::Left),
        KeyCode::Right => cursor(CursorMove::Right),
        _ => GameKey::Ignored,
    }
}

/// Dispatch a key press to the menu or the running game.
pub fn handle_key(key: KeyEvent, arcade: &mut Arcade) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }

    let Some(active) = arcade.active() else {
        return handle_menu(key.code, arcade);
    };

    let phase = active.phase();
    match active.kind() {
        GameKind::Flappy => match flappy_key(key.code, phase) {
            GameKey::Intent(intent) => arcade.flappy(intent),
            other => apply_common(other, arcade),
        },
        GameKind::Snake => match snake_key(key.code, phase) {
            GameKey::Intent(intent) => arcade.snake(intent),
            other => apply_common(other, arcade),
        },
        GameKind::Memory => match memory_key(key.code, phase) {
            GameKey::Intent(intent) => arcade.memory(intent),
            other => apply_common(other, arcade),
        },
    }
    InputResult::Continue
}

fn apply_common<I>(key: GameKey<I>, arcade: &mut Arcade) {
    match key {
        GameKey::Restart => arcade.restart(),
        GameKey::Leave => arcade.leave(),
        GameKey::Intent(_) | GameKey::Ignored => {}
    }
}

fn handle_menu(code: KeyCode, arcade: &mut Arcade) -> InputResult {
    match code {
        KeyCode::Up => arcade.select_prev(),
        KeyCode::Down => arcade.select_next(),
        KeyCode::Enter | KeyCode::Char(' ') => arcade.open_selected(),
        KeyCode::Char(c @ '1'..='3') => {
            arcade.selected = (c as usize) - ('1' as usize);
            arcade.open_selected();
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return InputResult::Quit,
        _ => {}
    }
    InputResult::Continue
}

/// Pointer input: a left click jumps in Flappy and flips the clicked card in
/// Memory. `hit_test` maps a screen cell to a deck index.
pub fn handle_mouse(
    mouse: MouseEvent,
    arcade: &mut Arcade,
    hit_test: impl Fn(u16, u16) -> Option<usize>,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some((kind, phase)) = arcade.active().map(|g| (g.kind(), g.phase())) else {
        return;
    };
    match kind {
        GameKind::Flappy if !phase.is_terminal() => arcade.flappy(FlappyIntent::Jump),
        GameKind::Memory if phase == GamePhase::Idle => arcade.memory(MemoryIntent::Start),
        GameKind::Memory => {
            if let Some(index) = hit_test(mouse.column, mouse.row) {
                arcade.memory(MemoryIntent::Select(index));
            }
        }
        _ => {}
    }
}

/// Deck index under a screen cell for a 4-column grid drawn in `grid`.
pub fn card_at(grid: Rect, columns: usize, cards: usize, x: u16, y: u16) -> Option<usize> {
    if columns == 0 || cards == 0 || x < grid.x || y < grid.y {
        return None;
    }
    let rows = cards.div_ceil(columns);
    let (dx, dy) = ((x - grid.x) as usize, (y - grid.y) as usize);
    let cell_w = (grid.width as usize / columns).max(1);
    let cell_h = (grid.height as usize / rows).max(1);
    let (col, row) = (dx / cell_w, dy / cell_h);
    if col >= columns || row >= rows {
        return None;
    }
    let index = row * columns + col;
    (index < cards).then_some(index)
}
