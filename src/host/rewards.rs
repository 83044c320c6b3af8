//! Score to experience point conversion.

use crate::challenges::{GameEnd, GameKind};
use serde::Serialize;

/// XP per pipe and the Flappy cap.
pub const FLAPPY_XP_PER_POINT: u32 = 10;
pub const FLAPPY_XP_CAP: u32 = 50;

/// XP per food and the Snake cap.
pub const SNAKE_XP_PER_POINT: u32 = 5;
pub const SNAKE_XP_CAP: u32 = 30;

/// Body of an add-xp request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XpGrant {
    pub amount: u32,
    pub source: String,
    pub description: String,
}

/// XP earned for a reported score. Memory reports its reward directly.
pub fn xp_for(kind: GameKind, score: u32) -> u32 {
    match kind {
        GameKind::Flappy => score.saturating_mul(FLAPPY_XP_PER_POINT).min(FLAPPY_XP_CAP),
        GameKind::Snake => score.saturating_mul(SNAKE_XP_PER_POINT).min(SNAKE_XP_CAP),
        GameKind::Memory => score,
    }
}

/// Range shown on the arcade menu.
pub fn xp_range_label(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Flappy => "10-50 XP",
        GameKind::Snake => "5-30 XP",
        GameKind::Memory => "25 XP",
    }
}

/// The grant for a finished session, or `None` when it earned nothing.
pub fn grant_for(end: &GameEnd) -> Option<XpGrant> {
    let amount = xp_for(end.kind, end.score);
    if amount == 0 {
        return None;
    }
    let detail = match end.kind {
        GameKind::Flappy => plural(end.score, "pipe"),
        GameKind::Snake => plural(end.score, "habit"),
        GameKind::Memory => "board cleared".to_string(),
    };
    Some(XpGrant {
        amount,
        source: end.kind.source_tag().to_string(),
        description: format!("{}: {}", end.kind.name(), detail),
    })
}

fn plural(n: u32, noun: &str) -> String {
    if n == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", n, noun)
    }
}
