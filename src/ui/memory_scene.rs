//! Memory Match UI rendering.

use super::game_common::{
    best_text, create_game_layout, info_line, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, reward_text, GameResultType, GAME_OVER_CONTROLS,
};
use crate::challenges::memory::types::{
    format_time, MemoryCard, MemoryGame, GRID_COLUMNS, PAIR_COUNT,
};
use crate::challenges::{GameEnd, GamePhase};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 9;
const CARD_HEIGHT: u16 = 4;

/// Render the Memory scene. Returns the card grid area for mouse hit tests.
pub fn render_memory_scene(
    frame: &mut Frame,
    area: Rect,
    game: &MemoryGame,
    best: Option<u32>,
    last_end: Option<&GameEnd>,
) -> Rect {
    let layout = create_game_layout(frame, area, " Memory Match ", Color::Magenta, 12, 22);

    let (tip_area, board_area) = split_tip_row(layout.content);
    render_tip(frame, tip_area, game.tip);
    let grid = grid_area(board_area, game.rows() as u16);
    render_cards(frame, grid, game);
    render_status_bar_content(frame, layout.status_bar, game);
    render_info_panel(frame, layout.info_panel, game, best);

    if game.phase == GamePhase::Won {
        render_game_over_overlay(
            frame,
            layout.content,
            GameResultType::Win,
            "YOU WIN!",
            &format!("{} moves in {}", game.moves, format_time(game.elapsed_secs())),
            &reward_text(last_end),
        );
    }
    grid
}

fn split_tip_row(content: Rect) -> (Rect, Rect) {
    let tip_height = content.height.min(1);
    (
        Rect { height: tip_height, ..content },
        Rect {
            y: content.y + tip_height,
            height: content.height - tip_height,
            ..content
        },
    )
}

/// Centered grid of fixed-size cards, shrunk to fit small terminals.
pub fn grid_area(area: Rect, rows: u16) -> Rect {
    let width = (CARD_WIDTH * GRID_COLUMNS as u16).min(area.width);
    let height = (CARD_HEIGHT * rows).min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_tip(frame: &mut Frame, area: Rect, tip: Option<&str>) {
    if let Some(tip) = tip {
        let line = Paragraph::new(Span::styled(
            format!("✨ {}", tip),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(line, area);
    }
}

fn card_label(card: &MemoryCard) -> String {
    if card.is_face_up() {
        card.face().emoji.to_string()
    } else {
        "?".to_string()
    }
}

fn render_cards(frame: &mut Frame, grid: Rect, game: &MemoryGame) {
    let columns = GRID_COLUMNS as u16;
    let rows = game.rows().max(1) as u16;
    let cell_w = grid.width / columns;
    let cell_h = grid.height / rows;
    if cell_w < 3 || cell_h < 3 {
        return;
    }

    for (index, card) in game.cards.iter().enumerate() {
        let (col, row) = ((index % GRID_COLUMNS) as u16, (index / GRID_COLUMNS) as u16);
        let cell = Rect::new(grid.x + col * cell_w, grid.y + row * cell_h, cell_w, cell_h);

        let color = if card.matched {
            Color::Green
        } else if card.flipped {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        let mut border = Style::default().fg(color);
        if index == game.cursor && game.phase == GamePhase::Playing {
            border = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        }

        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(cell);
        frame.render_widget(block, cell);
        frame.render_widget(
            Paragraph::new(card_label(card)).alignment(Alignment::Center),
            inner,
        );
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, game: &MemoryGame) {
    let controls: &[(&str, &str)] = &[("[Arrows]", "Move"), ("[Enter/Click]", "Flip"), ("[Esc]", "Menu")];
    match game.phase {
        GamePhase::Idle => render_status_bar(
            frame,
            area,
            "Find matching wellness tips! Press Enter to start.",
            Color::Yellow,
            &[("[Enter]", "Start"), ("[Esc]", "Menu")],
        ),
        GamePhase::Playing if game.awaiting_flip_back() => {
            render_status_bar(frame, area, "No match...", Color::Red, controls)
        }
        GamePhase::Playing => render_status_bar(
            frame,
            area,
            &format!("Moves: {}", game.moves),
            Color::Green,
            controls,
        ),
        GamePhase::Won | GamePhase::GameOver => {
            render_status_bar(frame, area, "Board cleared!", Color::Green, GAME_OVER_CONTROLS)
        }
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, game: &MemoryGame, best: Option<u32>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let lines = vec![
        info_line("Time", format_time(game.elapsed_secs()), Color::White),
        info_line("Moves", game.moves.to_string(), Color::White),
        info_line(
            "Pairs",
            format!("{}/{}", game.matches, PAIR_COUNT),
            Color::Green,
        ),
        info_line("Best", best_text(best), Color::Yellow),
        Line::from(""),
        Line::from(Span::styled(
            " Fewest moves wins.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            " 25 XP per board.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
