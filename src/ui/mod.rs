pub mod arcade_menu;
pub mod flappy_scene;
pub mod game_common;
pub mod memory_scene;
pub mod snake_scene;

use crate::host::{ActiveGame, Arcade};
use ratatui::{layout::Rect, Frame};

/// Main UI drawing function.
///
/// Returns the Memory card grid when one is on screen so mouse clicks can be
/// mapped back to cards.
pub fn draw_arcade(frame: &mut Frame, arcade: &Arcade) -> Option<Rect> {
    let area = frame.size();
    let last_end = arcade.last_end();

    match arcade.active() {
        None => {
            arcade_menu::render_arcade_menu(frame, area, arcade);
            None
        }
        Some(ActiveGame::Flappy(s)) => {
            flappy_scene::render_flappy(frame, area, s.game(), s.best(), last_end);
            None
        }
        Some(ActiveGame::Snake(s)) => {
            snake_scene::render_snake_scene(frame, area, s.game(), s.best(), last_end);
            None
        }
        Some(ActiveGame::Memory(s)) => Some(memory_scene::render_memory_scene(
            frame,
            area,
            s.game(),
            s.best(),
            last_end,
        )),
    }
}
