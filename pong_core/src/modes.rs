//! Mode controller
//!
//! Owns the registry and switches it between the menu and a match. Each
//! switch clears every entity of the old mode before the new one is built.

use crate::game::MatchMode;
use crate::menu::MenuMode;
use crate::systems::{update_entities, Frame};
use crate::{
    Assets, Audio, Config, Difficulty, Events, GameRng, Input, Key, MatchConfig, Platform,
    PongError, Registry, Renderer, Time,
};

/// Top-level modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Menu,
    Match,
}

impl ModeKind {
    /// The only transitions are Menu -> Match and Match -> Menu
    pub fn next(self) -> Self {
        match self {
            ModeKind::Menu => ModeKind::Match,
            ModeKind::Match => ModeKind::Menu,
        }
    }
}

pub enum Mode {
    Menu(MenuMode),
    Match(MatchMode),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Menu(_) => ModeKind::Menu,
            Mode::Match(_) => ModeKind::Match,
        }
    }
}

pub struct ModeController {
    pub registry: Registry,
    pub mode: Mode,
    pub config: Config,
    pub time: Time,
    pub events: Events,
    pub rng: GameRng,
    /// Settings of the last match, used to seed the next menu
    pub carried: MatchConfig,
}

impl ModeController {
    /// Start in the menu
    pub fn new(assets: &mut dyn Assets, config: Config, seed: u64) -> Result<Self, PongError> {
        let carried = MatchConfig {
            multiplayer: false,
            max_points: config.default_max_points,
            difficulty: Difficulty::default(),
        };
        let mut registry = Registry::new();
        let menu = MenuMode::new(&mut registry, assets, &config, carried)?;
        Ok(Self {
            registry,
            mode: Mode::Menu(menu),
            time: Time::new(config.frame_dt(), 0.0),
            config,
            events: Events::new(),
            rng: GameRng::new(seed),
            carried,
        })
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn match_mode(&self) -> Option<&MatchMode> {
        match &self.mode {
            Mode::Match(game) => Some(game),
            Mode::Menu(_) => None,
        }
    }

    pub fn menu_mode(&self) -> Option<&MenuMode> {
        match &self.mode {
            Mode::Menu(menu) => Some(menu),
            Mode::Match(_) => None,
        }
    }

    /// One update pass over the registry
    pub fn update(&mut self, input: &dyn Input) {
        self.events.clear();
        let scale = if input.is_key_down(Key::Space) {
            self.config.fast_forward_scale
        } else {
            1.0
        };
        self.time.tick(&self.config, scale);

        let scoreboard = match &mut self.mode {
            Mode::Match(game) => Some(&mut game.scoreboard),
            Mode::Menu(_) => None,
        };
        let mut frame = Frame {
            time: self.time,
            input,
            config: &self.config,
            events: &mut self.events,
            rng: &mut self.rng,
            scoreboard,
        };
        update_entities(&mut self.registry, &mut frame);

        if let Mode::Match(game) = &mut self.mode {
            game.after_update(&mut self.registry, &mut self.events);
            if input.key_just_pressed(Key::R) {
                self.events.switch_requested = true;
            }
        }
    }

    pub fn switch_pending(&self) -> bool {
        self.events.switch_requested
    }

    /// Tear down the current mode and build the other one
    pub fn switch(&mut self, assets: &mut dyn Assets) -> Result<(), PongError> {
        let from = self.kind();
        if let Mode::Menu(menu) = &self.mode {
            if let Some(model) = menu.model(&self.registry) {
                self.carried = model.match_config();
            }
        }
        self.registry.clear();
        self.events.switch_requested = false;

        self.mode = match from.next() {
            ModeKind::Match => Mode::Match(MatchMode::new(
                &mut self.registry,
                assets,
                &self.config,
                self.carried,
                &mut self.rng,
            )?),
            ModeKind::Menu => Mode::Menu(MenuMode::new(
                &mut self.registry,
                assets,
                &self.config,
                self.carried,
            )?),
        };
        tracing::info!(?from, to = ?self.kind(), "Switched mode");
        Ok(())
    }

    /// Play this frame's cues through the current mode's sounds
    pub fn play_cues(&self, audio: &mut dyn Audio) {
        let sounds = match &self.mode {
            Mode::Menu(menu) => &menu.sounds,
            Mode::Match(game) => &game.sounds,
        };
        sounds.play_all(audio, &self.events.cues);
    }

    pub fn draw(&self, renderer: &mut dyn Renderer) {
        self.registry.draw(renderer);
    }

    /// Update, switch if requested, then draw
    pub fn frame<P: Platform>(&mut self, platform: &mut P) -> Result<(), PongError> {
        self.update(&*platform);
        self.play_cues(platform);
        if self.switch_pending() {
            self.switch(platform)?;
        }
        self.draw(platform);
        Ok(())
    }
}

/// Run frames until the platform asks to close
pub fn run<P: Platform>(platform: &mut P, config: Config, seed: u64) -> Result<(), PongError> {
    let mut game = ModeController::new(platform, config, seed)?;
    platform.start_music();
    while !platform.close_requested() {
        platform.begin_frame()?;
        game.frame(platform)?;
        platform.end_frame()?;
    }
    platform.stop_music();
    tracing::info!("Closing");
    Ok(())
}
