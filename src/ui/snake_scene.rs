//! Habit Snake UI rendering.
//!
//! Half-block pixel rendering: two vertically adjacent grid cells share one
//! terminal row via `▀` with fg = top cell and bg = bottom cell.

use super::game_common::{
    best_text, create_game_layout, info_line, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, reward_text, GameResultType, GAME_OVER_CONTROLS,
};
use crate::challenges::snake::types::{Position, SnakeGame, GRID_SIZE};
use crate::challenges::{GameEnd, GamePhase};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const HALF_TOP: char = '\u{2580}'; // ▀

const HEAD_COLOR: Color = Color::Rgb(100, 255, 100);
const BODY_BRIGHT: (f64, f64, f64) = (50.0, 220.0, 50.0);
const BODY_DIM: (f64, f64, f64) = (20.0, 80.0, 20.0);
const FOOD_COLOR: Color = Color::Rgb(255, 90, 50);
const EMPTY_BG: Color = Color::Rgb(12, 12, 18);

const CONTROLS: &[(&str, &str)] = &[("[Arrows]", "Steer"), ("[Esc]", "Menu")];

/// Render the Snake scene.
pub fn render_snake_scene(
    frame: &mut Frame,
    area: Rect,
    game: &SnakeGame,
    best: Option<u32>,
    last_end: Option<&GameEnd>,
) {
    let layout = create_game_layout(frame, area, " Habit Snake ", Color::LightGreen, 12, 20);

    render_play_field(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, best);

    if game.phase == GamePhase::GameOver {
        render_game_over_overlay(
            frame,
            layout.content,
            GameResultType::Loss,
            "GAME OVER",
            &format!("Habits collected: {}", game.score),
            &reward_text(last_end),
        );
    }
}

/// Interpolated color for a body segment, bright at the head.
fn body_color(index: usize, snake_len: usize) -> Color {
    let t = index as f64 / (snake_len - 1).max(1) as f64;
    let r = (BODY_BRIGHT.0 * (1.0 - t) + BODY_DIM.0 * t) as u8;
    let g = (BODY_BRIGHT.1 * (1.0 - t) + BODY_DIM.1 * t) as u8;
    let b = (BODY_BRIGHT.2 * (1.0 - t) + BODY_DIM.2 * t) as u8;
    Color::Rgb(r, g, b)
}

/// Color of every grid cell, row-major.
fn pixel_grid(game: &SnakeGame) -> Vec<Vec<Color>> {
    let size = GRID_SIZE as usize;
    let mut pixels = vec![vec![EMPTY_BG; size]; size];

    let mut paint = |pos: Position, color: Color| {
        if pos.in_bounds() {
            pixels[pos.y as usize][pos.x as usize] = color;
        }
    };

    paint(game.food, FOOD_COLOR);
    let len = game.snake.len();
    for (i, seg) in game.snake.iter().enumerate().rev() {
        paint(*seg, if i == 0 { HEAD_COLOR } else { body_color(i, len) });
    }
    pixels
}

fn render_play_field(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    let size = GRID_SIZE as u16;
    let field_w = (size + 2).min(area.width);
    let field_h = (size.div_ceil(2) + 2).min(area.height);
    if field_w < 3 || field_h < 3 {
        return;
    }
    let field = Rect::new(
        area.x + (area.width - field_w) / 2,
        area.y + (area.height - field_h) / 2,
        field_w,
        field_h,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(80, 80, 80)));
    let inner = block.inner(field);
    frame.render_widget(block, field);

    let pixels = pixel_grid(game);
    let lines: Vec<Line> = pixels
        .chunks(2)
        .map(|pair| {
            let top = &pair[0];
            let bottom = pair.get(1);
            let spans: Vec<Span> = (0..top.len())
                .map(|x| {
                    let bg = bottom.map_or(EMPTY_BG, |row| row[x]);
                    Span::styled(HALF_TOP.to_string(), Style::default().fg(top[x]).bg(bg))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &SnakeGame) {
    match game.phase {
        GamePhase::Idle => render_status_bar(
            frame,
            area,
            "Press Enter to start!",
            Color::Yellow,
            &[("[Enter]", "Start"), ("[Esc]", "Menu")],
        ),
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score),
            Color::Green,
            CONTROLS,
        ),
        GamePhase::GameOver | GamePhase::Won => {
            render_status_bar(frame, area, "Ouch!", Color::Red, GAME_OVER_CONTROLS)
        }
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &SnakeGame, best: Option<u32>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let lines = vec![
        info_line("Score", game.score.to_string(), Color::White),
        info_line("Best", best_text(best), Color::Yellow),
        info_line("Length", game.snake.len().to_string(), Color::Green),
        info_line(
            "Speed",
            format!("{}ms", game.move_interval_ms()),
            Color::Cyan,
        ),
        Line::from(""),
        Line::from(Span::styled(
            " +5 XP per habit,",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(" up to 30.", Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
