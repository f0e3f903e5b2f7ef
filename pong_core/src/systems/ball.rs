use glam::Vec2;
use hecs::Entity;

use crate::{Ball, BallState, Config, Cue, GameRng, Paddle, Position, Registry, Side};

use super::collision::{check_paddle_hit, PaddleRect};
use super::scoring::apply_point;
use super::Frame;

/// What happened to the ball during one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallStep {
    pub wall_bounce: bool,
    /// Side that earned a point because the ball left the field
    pub scored: Option<Side>,
    pub paddle_hit: Option<Side>,
}

/// Put the ball back in play: centred horizontally, random height within the
/// middle half of the screen, random direction
pub fn spawn_ball(ball: &mut Ball, pos: &mut Vec2, config: &Config, rng: &mut GameRng) {
    ball.collisions = 0;

    let low = config.screen_height / 4.0;
    let high = config.screen_height / 4.0 * 3.0 - ball.size.y;
    pos.x = config.screen_width / 2.0 - ball.size.x / 2.0;
    pos.y = rng.between(low, high);

    ball.vel.x = if rng.coin_flip() {
        config.ball_start_speed_x
    } else {
        -config.ball_start_speed_x
    };
    ball.vel.y = rng.between(-config.ball_max_y_speed, config.ball_max_y_speed);
    ball.state = BallState::Active;
}

/// Integrate, bounce off the top and bottom, detect exits and paddle hits.
///
/// An idle ball is left untouched. A ball leaving the field goes idle; the
/// caller decides whether it respawns.
pub fn advance_ball(
    ball: &mut Ball,
    pos: &mut Vec2,
    dt: f32,
    config: &Config,
    paddles: &[PaddleRect],
) -> BallStep {
    let mut step = BallStep::default();
    if ball.state == BallState::Idle {
        return step;
    }

    let last_x = pos.x;
    *pos += ball.vel * dt;

    if pos.y <= 0.0 {
        ball.vel.y = ball.vel.y.abs();
        step.wall_bounce = true;
    }
    if pos.y >= config.screen_height - ball.size.y {
        ball.vel.y = -ball.vel.y.abs();
        step.wall_bounce = true;
    }

    // Left edge first; the two exits never both count in one frame
    if pos.x <= 0.0 {
        step.scored = Some(Side::Right);
    } else if pos.x >= config.screen_width - ball.size.x {
        step.scored = Some(Side::Left);
    }
    if step.scored.is_some() {
        ball.state = BallState::Idle;
        return step;
    }

    step.paddle_hit = check_paddle_hit(ball, *pos, last_x, paddles, config);
    step
}

fn paddle_rects(registry: &Registry) -> Vec<PaddleRect> {
    registry
        .world
        .query::<(&Paddle, &Position)>()
        .iter()
        .map(|(_e, (paddle, pos))| PaddleRect {
            side: paddle.side,
            pos: pos.0,
            size: paddle.size,
        })
        .collect()
}

/// Run one ball entity for this frame
pub fn update_ball(registry: &mut Registry, entity: Entity, frame: &mut Frame) {
    let paddles = paddle_rects(registry);
    let Ok((ball, pos)) = registry
        .world
        .query_one_mut::<(&mut Ball, &mut Position)>(entity)
    else {
        return;
    };

    let step = advance_ball(ball, &mut pos.0, frame.time.dt, frame.config, &paddles);

    if step.wall_bounce {
        frame.events.play(Cue::Hit);
    }
    if let Some(side) = step.paddle_hit {
        tracing::debug!(?side, rally = ball.collisions, "Ball hit paddle");
        frame.events.play(Cue::Hit);
    }
    if let Some(side) = step.scored {
        // A ball only runs inside a match; without a scoreboard it stays idle
        let Some(scoreboard) = frame.scoreboard.as_deref_mut() else {
            tracing::warn!(?side, "Ball scored outside a match");
            return;
        };
        if apply_point(side, scoreboard, frame.events) {
            spawn_ball(ball, &mut pos.0, frame.config, frame.rng);
        }
    }
}
