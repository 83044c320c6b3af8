//! Shared UI components for the arcade games.

use crate::challenges::{GameEnd, GamePhase};
use crate::host::rewards::xp_for;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Playfield - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the standard game layout with an outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [playfield]                   │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a 2-line status bar: message, then `(key, action)` controls.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let mut spans = Vec::new();
        for (i, (key, action)) in controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", Style::default()));
            }
            spans.push(Span::styled(*key, Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let controls_line = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Controls shown once a game has ended.
pub const GAME_OVER_CONTROLS: &[(&str, &str)] = &[("[Enter/R]", "Play again"), ("[Esc]", "Menu")];

/// Game result type for the shared overlay.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum GameResultType {
    Win,
    Loss,
}

impl GameResultType {
    pub fn from_phase(phase: GamePhase) -> Self {
        if phase == GamePhase::Won {
            GameResultType::Win
        } else {
            GameResultType::Loss
        }
    }

    pub fn color(self) -> Color {
        match self {
            GameResultType::Win => Color::Green,
            GameResultType::Loss => Color::Red,
        }
    }
}

/// Reward line for the overlay: XP earned plus a new-best marker.
pub fn reward_text(end: Option<&GameEnd>) -> String {
    let Some(end) = end else {
        return String::new();
    };
    let xp = xp_for(end.kind, end.score);
    match (xp, end.new_best) {
        (0, true) => "New best!".to_string(),
        (0, false) => "No XP this time".to_string(),
        (xp, true) => format!("+{} XP  ·  New best!", xp),
        (xp, false) => format!("+{} XP", xp),
    }
}

/// Render a centered game-over box over the playfield.
pub fn render_game_over_overlay(
    frame: &mut Frame,
    area: Rect,
    result_type: GameResultType,
    title: &str,
    message: &str,
    reward: &str,
) {
    let width = area.width.min(36);
    let height = area.height.min(9);
    let modal = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    frame.render_widget(Clear, modal);

    let title_color = result_type.color();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(title_color));
    let inner = block.inner(modal);
    frame.render_widget(block, modal);

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(Span::styled(reward, Style::default().fg(Color::Cyan))),
        Line::from(""),
        Line::from(Span::styled(
            "[Enter] Play again",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let text = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(text, inner);
}

/// Render an info panel frame with standard " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// ` Label: value` line used by every info panel.
pub fn info_line(label: &str, value: String, value_color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default()
                .fg(value_color)
                .add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Best record as text, `-` when there is none.
pub fn best_text(best: Option<u32>) -> String {
    best.map_or_else(|| "-".to_string(), |b| b.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges::GameKind;

    fn end(kind: GameKind, score: u32, new_best: bool) -> GameEnd {
        GameEnd {
            kind,
            score,
            new_best,
            best: Some(score),
        }
    }

    #[test]
    fn test_reward_text() {
        assert_eq!(reward_text(None), "");
        assert_eq!(reward_text(Some(&end(GameKind::Flappy, 2, false))), "+20 XP");
        assert_eq!(
            reward_text(Some(&end(GameKind::Snake, 9, true))),
            "+30 XP  ·  New best!"
        );
        assert_eq!(
            reward_text(Some(&end(GameKind::Flappy, 0, false))),
            "No XP this time"
        );
    }

    #[test]
    fn test_best_text() {
        assert_eq!(best_text(None), "-");
        assert_eq!(best_text(Some(12)), "12");
    }

    #[test]
    fn test_result_type_from_phase() {
        assert!(GameResultType::from_phase(GamePhase::Won) == GameResultType::Win);
        assert!(GameResultType::from_phase(GamePhase::GameOver) == GameResultType::Loss);
    }
}
