use glam::Vec2;

use crate::{FontHandle, Key, SpriteHandle};

/// Which half of the field a paddle or point belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// Position of an entity. Sprites treat it as top-left, text as centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Gates both update and draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Active(pub bool);

/// What the renderer draws for an entity
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Sprite { sprite: SpriteHandle, size: Vec2 },
    Text { font: FontHandle, text: String },
}

impl Visual {
    pub fn set_text(&mut self, new_text: &str) {
        if let Visual::Text { text, .. } = self {
            text.clear();
            text.push_str(new_text);
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Visual::Text { text, .. } => Some(text),
            Visual::Sprite { .. } => None,
        }
    }
}

/// How a paddle decides where to go
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaddleControl {
    Human { up: Key, down: Key },
    Ai { speed: f32 },
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub size: Vec2,
    pub speed: f32,
    pub control: PaddleControl,
}

impl Paddle {
    pub fn new(side: Side, size: Vec2, speed: f32, control: PaddleControl) -> Self {
        Self {
            side,
            size,
            speed,
            control,
        }
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.control, PaddleControl::Ai { .. })
    }
}

/// Ball lifecycle: awaiting spawn or under simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BallState {
    #[default]
    Idle,
    Active,
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub vel: Vec2,
    pub size: Vec2,
    pub state: BallState,
    /// Paddle hits since the last spawn
    pub collisions: u32,
}

impl Ball {
    pub fn new(size: Vec2) -> Self {
        Self {
            vel: Vec2::ZERO,
            size,
            state: BallState::Idle,
            collisions: 0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.state == BallState::Active
    }
}

/// Text entity mirroring one side's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreLabel(pub Side);

/// "<name> won!" text shown once a match ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndBanner;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_starts_idle() {
        let ball = Ball::new(Vec2::splat(15.0));
        assert_eq!(ball.state, BallState::Idle);
        assert!(!ball.is_moving());
        assert_eq!(ball.collisions, 0);
    }

    #[test]
    fn test_visual_set_text_ignores_sprites() {
        let mut sprite = Visual::Sprite {
            sprite: SpriteHandle(1),
            size: Vec2::ONE,
        };
        sprite.set_text("nope");
        assert_eq!(sprite.text(), None);

        let mut text = Visual::Text {
            font: FontHandle(0),
            text: "0".to_string(),
        };
        text.set_text("7");
        assert_eq!(text.text(), Some("7"));
    }
}
