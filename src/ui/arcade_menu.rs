//! Arcade menu rendering: game list, stored bests and the session XP total.

use super::game_common::best_text;
use crate::challenges::GameKind;
use crate::host::rewards::xp_range_label;
use crate::host::Arcade;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

fn icon(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Flappy => "🐦",
        GameKind::Snake => "🐍",
        GameKind::Memory => "🧠",
    }
}

/// Label for the stored best of a game.
fn best_label(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Memory => "Best moves",
        GameKind::Flappy | GameKind::Snake => "Best",
    }
}

pub fn render_arcade_menu(frame: &mut Frame, area: Rect, arcade: &Arcade) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Game Arcade ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(inner);

    let header = vec![
        Line::from(Span::styled(
            "Play games, earn XP!",
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!("+{} XP earned this session", arcade.total_xp()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    frame.render_widget(
        Paragraph::new(header).alignment(Alignment::Center),
        chunks[0],
    );

    let items: Vec<ListItem> = GameKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let selected = i == arcade.selected;
            let prefix = if selected { "> " } else { "  " };
            let title_style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{}{} {}", prefix, icon(*kind), kind.name()),
                        title_style,
                    ),
                    Span::styled(
                        format!("  {}", xp_range_label(*kind)),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::from(Span::styled(
                    format!(
                        "     {}  ·  {}: {}",
                        kind.tagline(),
                        best_label(*kind),
                        best_text(arcade.best_for(*kind))
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ];
            ListItem::new(lines)
        })
        .collect();
    frame.render_widget(List::new(items), chunks[1]);

    let help = Paragraph::new("[↑/↓] Navigate  [Enter/1-3] Play  [q] Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}
