//! Match settings chosen in the menu

use crate::Params;

/// AI strength, selected in the menu and mapped to paddle speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    #[default]
    Average,
    Hard,
    Demon,
    Impossible,
}

impl Difficulty {
    pub const MIN_LEVEL: i8 = -2;
    pub const MAX_LEVEL: i8 = 3;

    /// Level relative to Average (-2..=3)
    pub fn level(self) -> i8 {
        match self {
            Difficulty::VeryEasy => -2,
            Difficulty::Easy => -1,
            Difficulty::Average => 0,
            Difficulty::Hard => 1,
            Difficulty::Demon => 2,
            Difficulty::Impossible => 3,
        }
    }

    /// Out-of-range levels are clamped
    pub fn from_level(level: i8) -> Self {
        match level.clamp(Self::MIN_LEVEL, Self::MAX_LEVEL) {
            -2 => Difficulty::VeryEasy,
            -1 => Difficulty::Easy,
            0 => Difficulty::Average,
            1 => Difficulty::Hard,
            2 => Difficulty::Demon,
            _ => Difficulty::Impossible,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Average => "Average",
            Difficulty::Hard => "Hard",
            Difficulty::Demon => "Demon",
            Difficulty::Impossible => "Impossible",
        }
    }

    /// AI paddle speed in units per second
    pub fn ai_speed(self) -> f32 {
        match self {
            Difficulty::VeryEasy => 100.0,
            Difficulty::Easy => 175.0,
            Difficulty::Average => 270.0,
            Difficulty::Hard => 360.0,
            Difficulty::Demon => 450.0,
            Difficulty::Impossible => 850.0,
        }
    }

    pub fn step(self, delta: i8) -> Self {
        Self::from_level(self.level().saturating_add(delta))
    }
}

/// Everything needed to build a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    pub multiplayer: bool,
    pub max_points: u8,
    pub difficulty: Difficulty,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            multiplayer: false,
            max_points: Params::MAX_POINTS_DEFAULT,
            difficulty: Difficulty::default(),
        }
    }
}
