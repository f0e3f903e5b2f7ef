use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Config, Cue, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this frame
    pub now: f32, // Total simulated time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }

    /// Advance by one nominal frame scaled by `scale`
    pub fn tick(&mut self, config: &Config, scale: f32) {
        self.dt = config.frame_dt() * scale;
        self.now += self.dt;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            now: 0.0,
        }
    }
}

/// Score tracking and win condition
#[derive(Debug, Clone, Copy)]
pub struct Scoreboard {
    pub left: u8,
    pub right: u8,
    pub max_points: u8,
}

impl Scoreboard {
    pub fn new(max_points: u8) -> Self {
        Self {
            left: 0,
            right: 0,
            max_points,
        }
    }

    pub fn register_point(&mut self, side: Side) {
        match side {
            Side::Left => self.left = self.left.saturating_add(1),
            Side::Right => self.right = self.right.saturating_add(1),
        }
    }

    pub fn points(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_match_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Left is checked first
    pub fn winner(&self) -> Option<Side> {
        if self.left >= self.max_points {
            Some(Side::Left)
        } else if self.right >= self.max_points {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Seeded source for ball serves; the same seed replays the same match
pub struct GameRng {
    rng: StdRng,
}

impl GameRng {
    const TEST_SEED: u64 = 12345;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `low..=high`; a reversed range collapses to `low`
    pub fn between(&mut self, low: f32, high: f32) -> f32 {
        if high > low {
            self.rng.gen_range(low..=high)
        } else {
            low
        }
    }

    pub fn coin_flip(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(Self::TEST_SEED)
    }
}

/// Things that happened during this frame's update pass
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub cues: Vec<Cue>,
    pub scored: Option<Side>,
    /// One-shot request for the mode controller
    pub switch_requested: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn play(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    pub fn clear(&mut self) {
        self.cues.clear();
        self.scored = None;
        self.switch_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_point_left() {
        let mut score = Scoreboard::new(10);
        assert_eq!(score.left, 0);
        score.register_point(Side::Left);
        assert_eq!(score.left, 1);
        score.register_point(Side::Left);
        assert_eq!(score.left, 2);
        assert_eq!(score.right, 0);
    }

    #[test]
    fn test_register_point_right() {
        let mut score = Scoreboard::new(10);
        score.register_point(Side::Right);
        assert_eq!(score.points(Side::Right), 1);
        assert_eq!(score.points(Side::Left), 0);
    }

    #[test]
    fn test_left_wins_at_threshold_two() {
        let mut score = Scoreboard::new(2);
        score.register_point(Side::Left);
        assert!(!score.is_match_over());
        score.register_point(Side::Right);
        assert!(!score.is_match_over());
        score.register_point(Side::Left);
        assert!(score.is_match_over(), "Left reached the threshold");
        assert_eq!(score.winner(), Some(Side::Left));
    }

    #[test]
    fn test_right_wins() {
        let mut score = Scoreboard::new(3);
        for _ in 0..3 {
            score.register_point(Side::Right);
        }
        assert_eq!(score.winner(), Some(Side::Right));
    }

    #[test]
    fn test_no_winner_below_threshold() {
        let mut score = Scoreboard::new(11);
        for _ in 0..10 {
            score.register_point(Side::Left);
        }
        assert_eq!(score.winner(), None, "No winner below threshold");
    }

    #[test]
    fn test_same_seed_same_serves() {
        let mut a = GameRng::new(7);
        let mut b = GameRng::new(7);
        for _ in 0..20 {
            assert_eq!(a.between(-85.0, 85.0), b.between(-85.0, 85.0));
            assert_eq!(a.coin_flip(), b.coin_flip());
        }
    }

    #[test]
    fn test_between_stays_in_range() {
        let mut rng = GameRng::default();
        for _ in 0..200 {
            let v = rng.between(150.0, 435.0);
            assert!((150.0..=435.0).contains(&v));
        }
        assert_eq!(rng.between(10.0, 10.0), 10.0);
        assert_eq!(rng.between(10.0, -10.0), 10.0, "Reversed range collapses");
    }

    #[test]
    fn test_time_tick_scales() {
        let config = Config::new();
        let mut time = Time::new(0.0, 0.0);
        time.tick(&config, 3.0);
        assert!((time.dt - 3.0 / 60.0).abs() < 1e-6);
        assert!((time.now - time.dt).abs() < 1e-6);
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.play(Cue::Hit);
        events.scored = Some(Side::Left);
        events.switch_requested = true;

        events.clear();

        assert!(events.cues.is_empty());
        assert!(events.scored.is_none());
        assert!(!events.switch_requested);
    }
}
