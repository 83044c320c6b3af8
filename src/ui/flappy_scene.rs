//! UI rendering for Focus Flappy.

use crate::challenges::flappy::types::{
    FlappyGame, BIRD_SIZE, BIRD_X, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH,
};
use crate::challenges::{GameEnd, GamePhase};
use crate::ui::game_common::{
    best_text, create_game_layout, info_line, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, reward_text, GameResultType, GAME_OVER_CONTROLS,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const CONTROLS: &[(&str, &str)] = &[("[Space/Up/Click]", "Flap"), ("[Esc]", "Menu")];

/// Render the Flappy scene.
pub fn render_flappy(
    frame: &mut Frame,
    area: Rect,
    game: &FlappyGame,
    best: Option<u32>,
    last_end: Option<&GameEnd>,
) {
    let layout = create_game_layout(frame, area, " Focus Flappy ", Color::Cyan, 10, 22);

    render_play_area(frame, layout.content, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, best);

    if game.phase == GamePhase::GameOver {
        render_game_over_overlay(
            frame,
            layout.content,
            GameResultType::Loss,
            "GAME OVER",
            &format!("Score: {}", game.score),
            &reward_text(last_end),
        );
    }
}

/// What occupies a playfield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Bird,
    Pipe,
}

/// Sample the playfield at the center of a display cell.
fn cell_at(game: &FlappyGame, gx: f64, gy: f64) -> Cell {
    if (BIRD_X..BIRD_X + BIRD_SIZE).contains(&gx)
        && (game.bird.y..game.bird.y + BIRD_SIZE).contains(&gy)
    {
        return Cell::Bird;
    }
    let in_pipe = game
        .pipes
        .iter()
        .any(|p| (p.x..p.right()).contains(&gx) && !(p.gap_start..p.gap_end()).contains(&gy));
    if in_pipe {
        Cell::Pipe
    } else {
        Cell::Empty
    }
}

fn render_play_area(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width == 0 || height == 0 {
        return;
    }

    let x_scale = PLAYFIELD_WIDTH / width as f64;
    let y_scale = PLAYFIELD_HEIGHT / height as f64;

    let bird_char = if game.bird.velocity < -0.5 {
        "▲"
    } else if game.bird.velocity > 1.0 {
        "▼"
    } else {
        "►"
    };

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let gy = (row as f64 + 0.5) * y_scale;
        let spans: Vec<Span> = (0..width)
            .map(|col| {
                let gx = (col as f64 + 0.5) * x_scale;
                match cell_at(game, gx, gy) {
                    Cell::Bird => Span::styled(
                        bird_char,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::Pipe => Span::styled("█", Style::default().fg(Color::Green)),
                    Cell::Empty => Span::raw(" "),
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &FlappyGame) {
    match game.phase {
        GamePhase::Idle => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            CONTROLS,
        ),
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            &format!("Score: {}", game.score),
            Color::Green,
            CONTROLS,
        ),
        GamePhase::GameOver | GamePhase::Won => {
            render_status_bar(frame, area, "Crashed!", Color::Red, GAME_OVER_CONTROLS)
        }
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &FlappyGame, best: Option<u32>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let lines = vec![
        info_line("Score", game.score.to_string(), Color::White),
        info_line("Best", best_text(best), Color::Yellow),
        Line::from(""),
        Line::from(Span::styled(
            " Fly through the gaps.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " +10 XP per pipe,",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " up to 50.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
