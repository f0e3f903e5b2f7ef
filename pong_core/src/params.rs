/// Compiled-in defaults: field size, paddle and ball physics, match length
/// limits and menu geometry. [`crate::Config`] can override most of them.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Screen (logical units)
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    pub const TARGET_FPS: u32 = 60;
    pub const FAST_FORWARD_SCALE: f32 = 3.0;

    // Paddle
    pub const PADDLE_WIDTH: f32 = 18.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_SPEED: f32 = 500.0; // units per second
    pub const PADDLE_INSET_DIVISOR: f32 = 11.0; // paddle x = width / 11
    pub const AI_REACTION_TOP: f32 = 0.33;
    pub const AI_REACTION_BOTTOM: f32 = 0.67;

    // Ball
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_MAX_Y_SPEED: f32 = 85.0;
    pub const BALL_X_SPEED_INCREASE: f32 = 33.0; // added on each paddle hit
    pub const BALL_MAX_X_SPEED: f32 = 1000.0;
    pub const BALL_Y_SPEED_INCREASE: f32 = 0.4; // per collision multiplier
    pub const BALL_START_SPEED_X: f32 = 400.0;
    pub const BALL_PADDLE_TOLERANCE: f32 = 1.5; // ball heights above the paddle

    // Score
    pub const MAX_POINTS_DEFAULT: u8 = 10;
    pub const MAX_POINTS_MIN: u8 = 1;
    pub const MAX_POINTS_MAX: u8 = 25;

    // Menu layout
    pub const MENU_BUTTON_DISTANCE: f32 = 100.0;
    pub const MENU_BUTTON_HALF_WIDTH: f32 = 230.0;
    pub const MENU_ARROW_WIDTH: f32 = 40.0;
    pub const MENU_ARROW_HEIGHT: f32 = 60.0;

    // Middle line is 1/100 of the screen width
    pub const MIDDLE_LINE_DIVISOR: f32 = 100.0;
}
