use std::path::Path;

use serde::Deserialize;

use crate::{Params, PongError, Side};

/// Game configuration
///
/// Defaults come from [`Params`]; any subset of fields can be overridden from
/// a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,
    pub fast_forward_scale: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub ball_size: f32,
    pub ball_max_y_speed: f32,
    pub ball_x_speed_increase: f32,
    pub ball_max_x_speed: f32,
    pub ball_y_speed_increase: f32,
    pub ball_start_speed_x: f32,
    pub default_max_points: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: Params::SCREEN_WIDTH,
            screen_height: Params::SCREEN_HEIGHT,
            fps: Params::TARGET_FPS,
            fast_forward_scale: Params::FAST_FORWARD_SCALE,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED,
            ball_size: Params::BALL_SIZE,
            ball_max_y_speed: Params::BALL_MAX_Y_SPEED,
            ball_x_speed_increase: Params::BALL_X_SPEED_INCREASE,
            ball_max_x_speed: Params::BALL_MAX_X_SPEED,
            ball_y_speed_increase: Params::BALL_Y_SPEED_INCREASE,
            ball_start_speed_x: Params::BALL_START_SPEED_X,
            default_max_points: Params::MAX_POINTS_DEFAULT,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, PongError> {
        let config: Config =
            toml::from_str(contents).map_err(|err| PongError::Config(err.to_string()))?;
        config.validated()
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PongError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Clamp the counters and reject tunables the simulation cannot use
    fn validated(mut self) -> Result<Self, PongError> {
        self.default_max_points = clamp_max_points(self.default_max_points as i32);
        self.fps = self.fps.max(1);

        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("fast_forward_scale", self.fast_forward_scale),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_speed", self.paddle_speed),
            ("ball_size", self.ball_size),
            ("ball_max_y_speed", self.ball_max_y_speed),
            ("ball_max_x_speed", self.ball_max_x_speed),
            ("ball_start_speed_x", self.ball_start_speed_x),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(PongError::Config(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        let non_negative = [
            ("ball_x_speed_increase", self.ball_x_speed_increase),
            ("ball_y_speed_increase", self.ball_y_speed_increase),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(PongError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        if self.paddle_height >= self.screen_height || self.ball_size * 2.0 >= self.screen_height {
            return Err(PongError::Config(format!(
                "screen height {} is too small for the paddles and ball",
                self.screen_height
            )));
        }
        Ok(self)
    }

    /// Nominal seconds per frame, before time scaling
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// X position (left edge) for a paddle
    pub fn paddle_x(&self, side: Side) -> f32 {
        let inset = self.screen_width / Params::PADDLE_INSET_DIVISOR;
        match side {
            Side::Left => inset,
            Side::Right => self.screen_width - inset,
        }
    }

    /// Clamp paddle top edge to the screen
    pub fn clamp_paddle_y(&self, y: f32, paddle_height: f32) -> f32 {
        y.min(self.screen_height - paddle_height).max(0.0)
    }
}

/// Clamp a max-points value into the allowed range
pub fn clamp_max_points(points: i32) -> u8 {
    points.clamp(Params::MAX_POINTS_MIN as i32, Params::MAX_POINTS_MAX as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        let inset = 1000.0 / 11.0;
        assert_eq!(config.paddle_x(Side::Left), inset, "Left paddle X position");
        assert_eq!(
            config.paddle_x(Side::Right),
            1000.0 - inset,
            "Right paddle X position"
        );
    }

    #[test]
    fn test_config_clamp_paddle_y() {
        let config = Config::new();
        let h = config.paddle_height;
        assert_eq!(config.clamp_paddle_y(-40.0, h), 0.0);
        assert_eq!(config.clamp_paddle_y(10_000.0, h), config.screen_height - h);
        assert_eq!(config.clamp_paddle_y(250.0, h), 250.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("paddle_speed = 650.0\nfps = 30\n").unwrap();
        assert_eq!(config.paddle_speed, 650.0);
        assert_eq!(config.fps, 30);
        assert_eq!(config.ball_start_speed_x, Params::BALL_START_SPEED_X);
    }

    #[test]
    fn test_toml_max_points_clamped() {
        let config = Config::from_toml_str("default_max_points = 99").unwrap();
        assert_eq!(config.default_max_points, 25);
        let config = Config::from_toml_str("default_max_points = 0").unwrap();
        assert_eq!(config.default_max_points, 1);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml_str("paddle_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, PongError::Config(_)));
    }

    #[test]
    fn test_negative_tunable_rejected() {
        let err = Config::from_toml_str("ball_max_y_speed = -85.0").unwrap_err();
        assert!(
            matches!(&err, PongError::Config(msg) if msg.contains("ball_max_y_speed")),
            "Negative speed should be rejected, got {err:?}"
        );
        for doc in [
            "fast_forward_scale = 0.0",
            "ball_size = -15.0",
            "paddle_height = nan",
            "ball_start_speed_x = inf",
            "screen_width = -1000.0",
            "ball_y_speed_increase = -0.4",
        ] {
            assert!(
                matches!(Config::from_toml_str(doc), Err(PongError::Config(_))),
                "{doc} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_increase_accepted() {
        let config = Config::from_toml_str("ball_x_speed_increase = 0.0").unwrap();
        assert_eq!(config.ball_x_speed_increase, 0.0);
    }

    #[test]
    fn test_oversized_paddle_rejected() {
        let err = Config::from_toml_str("paddle_height = 600.0").unwrap_err();
        assert!(matches!(err, PongError::Config(_)));
    }

    #[test]
    fn test_frame_dt() {
        let config = Config::new();
        assert!((config.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
    }
}
