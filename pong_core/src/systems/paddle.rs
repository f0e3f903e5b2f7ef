use glam::Vec2;
use hecs::Entity;

use crate::{Ball, Config, Input, Paddle, PaddleControl, Params, Position, Registry};

use super::Frame;

/// What the AI can see of the ball
#[derive(Debug, Clone, Copy)]
pub struct BallView {
    pub y: f32,
    pub vel_y: f32,
}

/// Next top-edge position of a paddle, clamped to the screen
pub fn paddle_next_y(
    paddle: &Paddle,
    y: f32,
    dt: f32,
    input: &dyn Input,
    ball: Option<BallView>,
    config: &Config,
) -> f32 {
    let mut y = y;
    match paddle.control {
        PaddleControl::Human { up, down } => {
            // Both held cancels out
            if input.is_key_down(up) {
                y -= paddle.speed * dt;
            }
            if input.is_key_down(down) {
                y += paddle.speed * dt;
            }
        }
        PaddleControl::Ai { speed } => {
            if let Some(ball) = ball {
                y += ai_velocity(paddle, y, speed, ball) * dt;
            }
        }
    }
    config.clamp_paddle_y(y, paddle.size.y)
}

/// Chase the ball when it leaves the reaction zone, otherwise follow its
/// vertical velocity capped at `speed`
fn ai_velocity(paddle: &Paddle, y: f32, speed: f32, ball: BallView) -> f32 {
    let zone_top = y + paddle.size.y * Params::AI_REACTION_TOP;
    let zone_bottom = y + paddle.size.y * Params::AI_REACTION_BOTTOM;
    if ball.y < zone_top {
        -speed
    } else if ball.y > zone_bottom {
        speed
    } else {
        ball.vel_y.clamp(-speed, speed)
    }
}

fn ball_view(registry: &Registry) -> Option<BallView> {
    registry
        .world
        .query::<(&Ball, &Position)>()
        .iter()
        .next()
        .map(|(_e, (ball, pos))| BallView {
            y: pos.0.y,
            vel_y: ball.vel.y,
        })
}

/// Move one paddle entity for this frame
pub fn update_paddle(registry: &mut Registry, entity: Entity, frame: &Frame) {
    let ball = ball_view(registry);
    if let Ok((paddle, pos)) = registry
        .world
        .query_one_mut::<(&Paddle, &mut Position)>(entity)
    {
        let y = paddle_next_y(paddle, pos.0.y, frame.time.dt, frame.input, ball, frame.config);
        pos.0 = Vec2::new(pos.0.x, y);
    }
}
