use glam::Vec2;

use crate::{Ball, Config, Params, Side};

/// A paddle as the ball sees it
#[derive(Debug, Clone, Copy)]
pub struct PaddleRect {
    pub side: Side,
    pub pos: Vec2, // top-left
    pub size: Vec2,
}

impl PaddleRect {
    /// X the ball's leading edge must cross to hit this paddle
    pub fn collision_line(&self, ball_size: Vec2) -> f32 {
        match self.side {
            Side::Left => self.pos.x + self.size.x,
            Side::Right => self.pos.x - ball_size.x,
        }
    }

    /// True only on the frame the ball moves through the line towards the paddle
    pub fn crossed(&self, ball_size: Vec2, last_x: f32, x: f32) -> bool {
        let line = self.collision_line(ball_size);
        match self.side {
            Side::Left => x <= line && last_x > line,
            Side::Right => x >= line && last_x < line,
        }
    }

    /// Vertical overlap, padded above the paddle for fast relative motion
    pub fn within_reach(&self, ball_y: f32, ball_height: f32) -> bool {
        ball_y >= self.pos.y - ball_height * Params::BALL_PADDLE_TOLERANCE
            && ball_y <= self.pos.y + self.size.y
    }
}

/// Vertical speed after a hit: -max at the paddle's top edge, 0 at its
/// centre, +max at the bottom, scaled up by the rally length
pub fn deflected_y_speed(ball: &Ball, ball_y: f32, paddle: &PaddleRect, config: &Config) -> f32 {
    let offset = (ball_y + ball.size.y / 2.0) - paddle.pos.y;
    let unit = offset / paddle.size.y;
    let signed = unit * 2.0 - 1.0;
    signed
        * config.ball_max_y_speed
        * (1.0 + ball.collisions as f32 * config.ball_y_speed_increase)
}

/// Horizontal speed after a hit, pointing away from `side`
pub fn rebound_x_speed(vel_x: f32, side: Side, config: &Config) -> f32 {
    let speed = (vel_x.abs() + config.ball_x_speed_increase).min(config.ball_max_x_speed);
    match side {
        Side::Left => speed,
        Side::Right => -speed,
    }
}

/// Resolve a paddle hit for a ball that moved from `last_x` to `pos`.
///
/// The left paddle is tested first; once a collision line is crossed the
/// other paddle is not considered this frame.
pub fn check_paddle_hit(
    ball: &mut Ball,
    pos: Vec2,
    last_x: f32,
    paddles: &[PaddleRect],
    config: &Config,
) -> Option<Side> {
    let crossed = [Side::Left, Side::Right].into_iter().find_map(|side| {
        paddles
            .iter()
            .find(|p| p.side == side && p.crossed(ball.size, last_x, pos.x))
    })?;

    if !crossed.within_reach(pos.y, ball.size.y) {
        return None;
    }

    ball.vel.x = rebound_x_speed(ball.vel.x, crossed.side, config);
    ball.collisions += 1;
    ball.vel.y = deflected_y_speed(ball, pos.y, crossed, config);
    Some(crossed.side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Config, Ball, PaddleRect, PaddleRect) {
        let config = Config::new();
        let ball = Ball::new(Vec2::splat(config.ball_size));
        let size = Vec2::new(config.paddle_width, config.paddle_height);
        let left = PaddleRect {
            side: Side::Left,
            pos: Vec2::new(config.paddle_x(Side::Left), 250.0),
            size,
        };
        let right = PaddleRect {
            side: Side::Right,
            pos: Vec2::new(config.paddle_x(Side::Right), 250.0),
            size,
        };
        (config, ball, left, right)
    }

    #[test]
    fn test_left_paddle_hit_reverses_and_speeds_up() {
        let (config, mut ball, left, right) = setup();
        ball.vel = Vec2::new(-400.0, 0.0);
        let line = left.collision_line(ball.size);
        let pos = Vec2::new(line - 2.0, 290.0);

        let hit = check_paddle_hit(&mut ball, pos, line + 5.0, &[left, right], &config);

        assert_eq!(hit, Some(Side::Left));
        assert_eq!(ball.vel.x, 433.0, "Speed increases by the increment");
        assert_eq!(ball.collisions, 1);
    }

    #[test]
    fn test_right_paddle_hit_sends_ball_left() {
        let (config, mut ball, left, right) = setup();
        ball.vel = Vec2::new(500.0, 10.0);
        let line = right.collision_line(ball.size);
        let pos = Vec2::new(line + 1.0, 260.0);

        let hit = check_paddle_hit(&mut ball, pos, line - 4.0, &[left, right], &config);

        assert_eq!(hit, Some(Side::Right));
        assert_eq!(ball.vel.x, -533.0);
    }

    #[test]
    fn test_x_speed_caps_at_max() {
        let config = Config::new();
        let near_max = config.ball_max_x_speed - 10.0;
        assert_eq!(
            rebound_x_speed(-near_max, Side::Left, &config),
            config.ball_max_x_speed
        );
        assert_eq!(
            rebound_x_speed(near_max, Side::Right, &config),
            -config.ball_max_x_speed
        );
        // Below the cap the increment applies in full
        assert_eq!(rebound_x_speed(-400.0, Side::Left, &config), 433.0);
    }

    #[test]
    fn test_no_hit_without_crossing() {
        let (config, mut ball, left, right) = setup();
        ball.vel = Vec2::new(-400.0, 0.0);
        let line = left.collision_line(ball.size);
        // Already past the line last frame: overlapping must not retrigger
        let pos = Vec2::new(line - 6.0, 290.0);
        let hit = check_paddle_hit(&mut ball, pos, line - 1.0, &[left, right], &config);
        assert_eq!(hit, None);
        assert_eq!(ball.vel.x, -400.0);
        assert_eq!(ball.collisions, 0);
    }

    #[test]
    fn test_crossing_outside_paddle_misses() {
        let (config, mut ball, left, right) = setup();
        ball.vel = Vec2::new(-400.0, 0.0);
        let line = left.collision_line(ball.size);
        let pos = Vec2::new(line - 2.0, 500.0); // well below the paddle
        let hit = check_paddle_hit(&mut ball, pos, line + 5.0, &[left, right], &config);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_reach_padded_above_paddle() {
        let (_config, ball, left, _right) = setup();
        let h = ball.size.y;
        assert!(left.within_reach(250.0 - h * 1.5, h));
        assert!(!left.within_reach(250.0 - h * 1.5 - 0.1, h));
        assert!(left.within_reach(350.0, h));
        assert!(!left.within_reach(350.1, h));
    }

    #[test]
    fn test_deflection_centre_top_bottom() {
        let (config, mut ball, left, _right) = setup();
        let half = ball.size.y / 2.0;
        for n in [1u32, 3, 7] {
            ball.collisions = n;
            let scale = config.ball_max_y_speed * (1.0 + n as f32 * config.ball_y_speed_increase);

            let centre = deflected_y_speed(&ball, 300.0 - half, &left, &config);
            assert!(centre.abs() < 1e-3, "Centre hit is flat");

            let top = deflected_y_speed(&ball, 250.0 - half, &left, &config);
            assert!((top + scale).abs() < 1e-3, "Top edge sends ball up");

            let bottom = deflected_y_speed(&ball, 350.0 - half, &left, &config);
            assert!((bottom - scale).abs() < 1e-3, "Bottom edge sends ball down");
        }
    }

    #[test]
    fn test_hit_uses_post_increment_counter() {
        let (config, mut ball, left, right) = setup();
        ball.vel = Vec2::new(-400.0, 0.0);
        ball.collisions = 2;
        let line = left.collision_line(ball.size);
        let pos = Vec2::new(line - 1.0, 250.0 - ball.size.y / 2.0);

        check_paddle_hit(&mut ball, pos, line + 1.0, &[left, right], &config);

        let expected = -config.ball_max_y_speed * (1.0 + 3.0 * config.ball_y_speed_increase);
        assert_eq!(ball.collisions, 3);
        assert!((ball.vel.y - expected).abs() < 1e-3);
    }
}
