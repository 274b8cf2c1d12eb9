//! Streak-based pacing across levels.
//!
//! This is a coarse, topic-independent model: it decides *when* a student
//! moves up. *What* a level contains is decided per topic by the generators'
//! own level → mode mapping. The two are orthogonal and share only the
//! level number.

use serde::Serialize;

use crate::drill_engine::i18n::{Localized, Term};

/// Correct answers in a row needed to move up.
pub const PROMOTION_STREAK: u32 = 8;
/// Global level cap.
pub const MAX_LEVEL: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpDecision {
    pub should_promote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Localized>,
}

pub fn check_level_up(streak: u32, current_level: u32) -> LevelUpDecision {
    let should_promote = streak >= PROMOTION_STREAK && current_level < MAX_LEVEL;
    LevelUpDecision {
        should_promote,
        message: should_promote.then(|| Term::LevelUp.text()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    OneStep,
    TwoStep,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyConfig {
    pub allow_negatives: bool,
    pub allow_fractions: bool,
    pub complexity: Complexity,
}

pub fn get_config(level: u32) -> DifficultyConfig {
    DifficultyConfig {
        allow_negatives: level > 1,
        allow_fractions: level > 3,
        complexity: if level > 2 { Complexity::TwoStep } else { Complexity::OneStep },
    }
}
