//! Collaborator boundary
//!
//! Windowing, input polling, drawing and audio live outside the core. The
//! core only sees these traits.

use std::collections::HashMap;

use glam::Vec2;

use crate::PongError;

/// Abstract key identifiers the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    W,
    S,
    R,
    Space,
}

/// Images the game asks the platform for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Pixel,
    MiddleLine,
    ArrowLeft,
    ArrowRight,
}

impl SpriteKind {
    pub fn name(self) -> &'static str {
        match self {
            SpriteKind::Pixel => "pixel",
            SpriteKind::MiddleLine => "middle",
            SpriteKind::ArrowLeft => "arrow_left",
            SpriteKind::ArrowRight => "arrow_right",
        }
    }
}

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Hit,
    Point,
    Win,
    Lose,
    Select,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::Hit => "hit",
            Cue::Point => "lose_point",
            Cue::Win => "game_end_positive",
            Cue::Lose => "game_end_negative",
            Cue::Select => "menu_select",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub u32);

/// Keyboard state sampled once per frame
pub trait Input {
    /// Key is currently held
    fn is_key_down(&self, key: Key) -> bool;
    /// Key went down during this frame
    fn key_just_pressed(&self, key: Key) -> bool;
}

pub trait Renderer {
    fn draw_sprite(&mut self, sprite: SpriteHandle, top_left: Vec2, size: Vec2);
    fn draw_text(&mut self, font: FontHandle, text: &str, center: Vec2);
}

/// Fire-and-forget audio
pub trait Audio {
    fn play(&mut self, sound: SoundHandle);
    fn start_music(&mut self);
    fn stop_music(&mut self);
}

/// Asset loading happens at mode entry and may fail
pub trait Assets {
    fn load_sprite(&mut self, kind: SpriteKind) -> Result<SpriteHandle, PongError>;
    fn load_font(&mut self) -> Result<FontHandle, PongError>;
    fn load_sound(&mut self, cue: Cue) -> Result<SoundHandle, PongError>;
}

/// Everything the frame loop needs from the outside world
pub trait Platform: Input + Renderer + Audio + Assets {
    /// Sample input for the new frame
    fn begin_frame(&mut self) -> Result<(), PongError>;
    /// Present the drawn frame and wait for the next tick
    fn end_frame(&mut self) -> Result<(), PongError>;
    fn close_requested(&self) -> bool;
}

/// Sounds a mode loaded on entry
#[derive(Debug, Clone, Default)]
pub struct SoundBank {
    sounds: HashMap<Cue, SoundHandle>,
}

impl SoundBank {
    pub fn load(assets: &mut dyn Assets, cues: &[Cue]) -> Result<Self, PongError> {
        let mut sounds = HashMap::new();
        for &cue in cues {
            sounds.insert(cue, assets.load_sound(cue)?);
        }
        Ok(Self { sounds })
    }

    pub fn get(&self, cue: Cue) -> Option<SoundHandle> {
        self.sounds.get(&cue).copied()
    }

    /// Play each queued cue this bank knows about
    pub fn play_all(&self, audio: &mut dyn Audio, cues: &[Cue]) {
        for &cue in cues {
            match self.get(cue) {
                Some(sound) => audio.play(sound),
                None => tracing::debug!("No sound loaded for {:?}", cue),
            }
        }
    }
}
