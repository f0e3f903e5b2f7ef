//! A running match, including its end screen

use glam::Vec2;
use hecs::Entity;

use crate::systems::spawn_ball;
use crate::{
    Assets, Ball, Config, Cue, EndBanner, Events, FontHandle, GameRng, Key, MatchConfig, Paddle,
    PaddleControl, Params, PongError, Position, Registry, ScoreLabel, Scoreboard, Side,
    SoundBank, SpriteKind, Visual,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Playing,
    /// Only the score labels and the banner remain visible
    EndScreen { winner: Side },
}

pub struct MatchMode {
    pub settings: MatchConfig,
    pub scoreboard: Scoreboard,
    pub phase: MatchPhase,
    pub left_paddle: Entity,
    pub right_paddle: Entity,
    pub ball: Entity,
    pub score_labels: [Entity; 2],
    pub sounds: SoundBank,
    font: FontHandle,
    center: Vec2,
}

impl MatchMode {
    pub fn new(
        registry: &mut Registry,
        assets: &mut dyn Assets,
        config: &Config,
        settings: MatchConfig,
        rng: &mut GameRng,
    ) -> Result<Self, PongError> {
        let font = assets.load_font()?;
        let pixel = assets.load_sprite(SpriteKind::Pixel)?;
        let middle = assets.load_sprite(SpriteKind::MiddleLine)?;
        let sounds = SoundBank::load(assets, &[Cue::Hit, Cue::Point, Cue::Win, Cue::Lose])?;

        let w = config.screen_width;
        let h = config.screen_height;
        let score_text = |side: Side| {
            (
                Visual::Text {
                    font,
                    text: "0".to_string(),
                },
                ScoreLabel(side),
            )
        };
        let left_label = registry.spawn(Vec2::new(w / 4.0, h / 9.0), score_text(Side::Left));
        let right_label = registry.spawn(Vec2::new(w / 4.0 * 3.0, h / 9.0), score_text(Side::Right));

        let middle_width = (w / Params::MIDDLE_LINE_DIVISOR).floor();
        registry.spawn(
            Vec2::new(w / 2.0 - middle_width / 2.0, 0.0),
            (Visual::Sprite {
                sprite: middle,
                size: Vec2::new(middle_width, h),
            },),
        );

        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);
        let (left_keys, right_control) = if settings.multiplayer {
            (
                (Key::W, Key::S),
                PaddleControl::Human {
                    up: Key::Up,
                    down: Key::Down,
                },
            )
        } else {
            (
                (Key::Up, Key::Down),
                PaddleControl::Ai {
                    speed: settings.difficulty.ai_speed(),
                },
            )
        };
        let left_control = PaddleControl::Human {
            up: left_keys.0,
            down: left_keys.1,
        };
        let paddle_sprite = Visual::Sprite {
            sprite: pixel,
            size: paddle_size,
        };
        let left_paddle = registry.spawn(
            Vec2::new(config.paddle_x(Side::Left), h / 2.0),
            (
                Paddle::new(Side::Left, paddle_size, config.paddle_speed, left_control),
                paddle_sprite.clone(),
            ),
        );
        let right_paddle = registry.spawn(
            Vec2::new(config.paddle_x(Side::Right), h / 2.0),
            (
                Paddle::new(Side::Right, paddle_size, config.paddle_speed, right_control),
                paddle_sprite,
            ),
        );

        let ball_size = Vec2::splat(config.ball_size);
        let mut ball = Ball::new(ball_size);
        let mut ball_pos = Vec2::ZERO;
        spawn_ball(&mut ball, &mut ball_pos, config, rng);
        let ball = registry.spawn(
            ball_pos,
            (
                ball,
                Visual::Sprite {
                    sprite: pixel,
                    size: ball_size,
                },
            ),
        );

        tracing::info!(
            multiplayer = settings.multiplayer,
            max_points = settings.max_points,
            difficulty = settings.difficulty.label(),
            "Match started"
        );

        Ok(Self {
            settings,
            scoreboard: Scoreboard::new(settings.max_points),
            phase: MatchPhase::Playing,
            left_paddle,
            right_paddle,
            ball,
            score_labels: [left_label, right_label],
            sounds,
            font,
            center: Vec2::new(w / 2.0, h / 2.0),
        })
    }

    /// Display name of the winner
    pub fn winner_name(&self, side: Side) -> &'static str {
        match (self.settings.multiplayer, side) {
            (true, Side::Left) => "Player 1",
            (true, Side::Right) => "Player 2",
            (false, Side::Left) => "You",
            (false, Side::Right) => "The Computer",
        }
    }

    pub fn refresh_scores(&self, registry: &mut Registry) {
        for &label in &self.score_labels {
            let side = match registry.world.get::<&ScoreLabel>(label) {
                Ok(label) => label.0,
                Err(_) => continue,
            };
            registry.set_text(label, &self.scoreboard.points(side).to_string());
        }
    }

    /// Called after each update pass. Switches to the end screen the first
    /// time the scoreboard reports a winner.
    pub fn after_update(&mut self, registry: &mut Registry, events: &mut Events) {
        if events.scored.is_some() {
            self.refresh_scores(registry);
        }
        if self.phase != MatchPhase::Playing {
            return;
        }
        if let Some(winner) = self.scoreboard.winner() {
            self.enter_end_screen(registry, events, winner);
        }
    }

    fn enter_end_screen(&mut self, registry: &mut Registry, events: &mut Events, winner: Side) {
        let name = self.winner_name(winner);
        events.play(match winner {
            Side::Left => Cue::Win,
            Side::Right => Cue::Lose,
        });

        registry.set_active_all(false);
        for &label in &self.score_labels {
            registry.set_active(label, true);
        }
        registry.spawn(
            self.center,
            (
                Visual::Text {
                    font: self.font,
                    text: format!("{name} won!"),
                },
                EndBanner,
            ),
        );

        tracing::info!(
            winner = name,
            left = self.scoreboard.left,
            right = self.scoreboard.right,
            "Match over"
        );
        self.phase = MatchPhase::EndScreen { winner };
    }

    pub fn ball_position(&self, registry: &Registry) -> Option<Vec2> {
        registry
            .world
            .get::<&Position>(self.ball)
            .ok()
            .map(|pos| pos.0)
    }
}
