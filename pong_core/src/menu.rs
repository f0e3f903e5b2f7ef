//! Main menu
//!
//! Two screens: the top menu (One Player / Two Players / Max. Points) and the
//! difficulty selector reached by confirming One Player. The menu never
//! starts a match itself; it raises the switch request and the mode
//! controller reads the chosen [`MatchConfig`].

use glam::Vec2;
use hecs::Entity;

use crate::config::clamp_max_points;
use crate::systems::Frame;
use crate::{
    Assets, Config, Cue, Difficulty, Input, Key, MatchConfig, Params, PongError, Registry,
    SoundBank, SpriteKind, Visual,
};

/// Cursor stops on the top menu
pub const CURSOR_ONE_PLAYER: i8 = -1;
pub const CURSOR_TWO_PLAYERS: i8 = 0;
pub const CURSOR_MAX_POINTS: i8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Top,
    DifficultySelect,
}

/// Keys that were pressed this frame, as the menu cares about them
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
}

impl MenuInput {
    pub fn sample(input: &dyn Input) -> Self {
        Self {
            up: input.key_just_pressed(Key::Up),
            down: input.key_just_pressed(Key::Down),
            left: input.key_just_pressed(Key::Left),
            right: input.key_just_pressed(Key::Right),
            confirm: input.key_just_pressed(Key::Enter),
        }
    }
}

/// Side effects of one menu update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuReaction {
    pub select_sounds: u8,
    pub points_changed: bool,
    pub difficulty_changed: bool,
    pub opened_difficulty: bool,
    pub start: bool,
}

/// Menu navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuModel {
    pub screen: MenuScreen,
    pub cursor: i8,
    pub max_points: u8,
    pub difficulty: Difficulty,
    pub multiplayer_requested: bool,
}

impl MenuModel {
    pub fn new(max_points: u8, difficulty: Difficulty) -> Self {
        Self {
            screen: MenuScreen::Top,
            cursor: CURSOR_ONE_PLAYER,
            max_points: clamp_max_points(max_points as i32),
            difficulty,
            multiplayer_requested: false,
        }
    }

    pub fn update(&mut self, input: MenuInput) -> MenuReaction {
        match self.screen {
            MenuScreen::Top => self.update_top(input),
            MenuScreen::DifficultySelect => self.update_difficulty(input),
        }
    }

    fn update_top(&mut self, input: MenuInput) -> MenuReaction {
        let mut reaction = MenuReaction::default();
        if input.up {
            self.cursor -= 1;
            reaction.select_sounds += 1;
        }
        if input.down {
            self.cursor += 1;
            reaction.select_sounds += 1;
        }
        self.cursor = self.cursor.clamp(CURSOR_ONE_PLAYER, CURSOR_MAX_POINTS);

        if self.cursor == CURSOR_MAX_POINTS {
            let delta = input.right as i32 - input.left as i32;
            if input.left || input.right {
                self.max_points = clamp_max_points(self.max_points as i32 + delta);
                reaction.select_sounds += 1;
                reaction.points_changed = true;
            }
        } else if input.confirm {
            self.multiplayer_requested = self.cursor == CURSOR_TWO_PLAYERS;
            if self.multiplayer_requested {
                reaction.start = true;
            } else {
                self.screen = MenuScreen::DifficultySelect;
                self.cursor = 0;
                reaction.opened_difficulty = true;
            }
        }
        reaction
    }

    fn update_difficulty(&mut self, input: MenuInput) -> MenuReaction {
        let mut reaction = MenuReaction::default();
        let delta = input.right as i8 - input.left as i8;
        if input.left || input.right {
            self.difficulty = self.difficulty.step(delta);
            reaction.select_sounds += 1;
            reaction.difficulty_changed = true;
        }
        if input.confirm {
            reaction.start = true;
        }
        reaction
    }

    /// Arrows swap sides while Left/Right adjust a value
    pub fn arrows_reversed(&self) -> bool {
        self.cursor == CURSOR_MAX_POINTS || self.screen == MenuScreen::DifficultySelect
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            multiplayer: self.multiplayer_requested,
            max_points: self.max_points,
            difficulty: self.difficulty,
        }
    }
}

pub fn points_label(points: u8) -> String {
    format!("Max. Points: {points}")
}

/// Text and arrow entities owned by the menu
#[derive(Debug, Clone, Copy)]
pub struct MenuWidgets {
    pub one_player: Entity,
    pub two_players: Entity,
    pub points: Entity,
    pub difficulty: Entity,
    pub arrow_left: Entity,
    pub arrow_right: Entity,
}

/// Component on the menu entity
#[derive(Debug, Clone)]
pub struct MenuController {
    pub model: MenuModel,
    pub widgets: MenuWidgets,
    pub center: Vec2,
}

impl MenuController {
    fn place_arrows(&self, registry: &mut Registry) {
        let arrow = Vec2::new(Params::MENU_ARROW_WIDTH, Params::MENU_ARROW_HEIGHT);
        let y = self.center.y + self.model.cursor as f32 * Params::MENU_BUTTON_DISTANCE
            - arrow.y / 2.0;
        let near = self.center.x - Params::MENU_BUTTON_HALF_WIDTH - arrow.x;
        let far = self.center.x + Params::MENU_BUTTON_HALF_WIDTH;
        let (left_x, right_x) = if self.model.arrows_reversed() {
            (far, near)
        } else {
            (near, far)
        };
        registry.set_position(self.widgets.arrow_left, Vec2::new(left_x, y));
        registry.set_position(self.widgets.arrow_right, Vec2::new(right_x, y));
    }

    fn open_difficulty(&self, registry: &mut Registry, menu: Entity) {
        registry.set_active_all(false);
        registry.set_active(menu, true);
        registry.set_active(self.widgets.difficulty, true);
        registry.set_active(self.widgets.arrow_left, true);
        registry.set_active(self.widgets.arrow_right, true);
        registry.set_text(self.widgets.difficulty, self.model.difficulty.label());
    }
}

/// Run the menu entity for this frame
pub fn update_menu(registry: &mut Registry, entity: Entity, frame: &mut Frame) {
    let Ok(mut controller) = registry
        .world
        .get::<&MenuController>(entity)
        .map(|c| (*c).clone())
    else {
        return;
    };

    let reaction = controller.model.update(MenuInput::sample(frame.input));

    for _ in 0..reaction.select_sounds {
        frame.events.play(Cue::Select);
    }
    if reaction.points_changed {
        registry.set_text(
            controller.widgets.points,
            &points_label(controller.model.max_points),
        );
    }
    if reaction.opened_difficulty {
        controller.open_difficulty(registry, entity);
    }
    if reaction.difficulty_changed {
        registry.set_text(
            controller.widgets.difficulty,
            controller.model.difficulty.label(),
        );
    }
    if reaction.start {
        tracing::info!(config = ?controller.model.match_config(), "Menu ready to start");
        frame.events.switch_requested = true;
    }
    controller.place_arrows(registry);

    if let Ok(stored) = registry.world.query_one_mut::<&mut MenuController>(entity) {
        *stored = controller;
    }
}

/// The menu mode: its entities live in the shared registry
pub struct MenuMode {
    pub menu: Entity,
    pub sounds: SoundBank,
}

impl MenuMode {
    /// Spawn the menu, seeded with the last used settings
    pub fn new(
        registry: &mut Registry,
        assets: &mut dyn Assets,
        config: &Config,
        seed: MatchConfig,
    ) -> Result<Self, PongError> {
        let font = assets.load_font()?;
        let arrow_left_sprite = assets.load_sprite(SpriteKind::ArrowLeft)?;
        let arrow_right_sprite = assets.load_sprite(SpriteKind::ArrowRight)?;
        let sounds = SoundBank::load(assets, &[Cue::Select])?;

        let model = MenuModel::new(seed.max_points, seed.difficulty);
        let center = Vec2::new(config.screen_width / 2.0, config.screen_height / 2.0);
        let row =
            |cursor: i8| center + Vec2::new(0.0, cursor as f32 * Params::MENU_BUTTON_DISTANCE);
        let label = |text: &str| Visual::Text {
            font,
            text: text.to_string(),
        };
        let arrow_size = Vec2::new(Params::MENU_ARROW_WIDTH, Params::MENU_ARROW_HEIGHT);

        let one_player = registry.spawn(row(CURSOR_ONE_PLAYER), (label("One Player"),));
        let two_players = registry.spawn(row(CURSOR_TWO_PLAYERS), (label("Two Players"),));
        let points = registry.spawn(
            row(CURSOR_MAX_POINTS),
            (label(&points_label(model.max_points)),),
        );
        let difficulty = registry.spawn(center, (label(""),));
        registry.set_active(difficulty, false);
        let arrow_left = registry.spawn(
            Vec2::ZERO,
            (Visual::Sprite {
                sprite: arrow_left_sprite,
                size: arrow_size,
            },),
        );
        let arrow_right = registry.spawn(
            Vec2::ZERO,
            (Visual::Sprite {
                sprite: arrow_right_sprite,
                size: arrow_size,
            },),
        );

        let controller = MenuController {
            model,
            widgets: MenuWidgets {
                one_player,
                two_players,
                points,
                difficulty,
                arrow_left,
                arrow_right,
            },
            center,
        };
        controller.place_arrows(registry);
        let menu = registry.spawn(Vec2::ZERO, (controller,));

        tracing::info!(
            max_points = model.max_points,
            difficulty = model.difficulty.label(),
            "Entered menu"
        );
        Ok(Self { menu, sounds })
    }

    pub fn model(&self, registry: &Registry) -> Option<MenuModel> {
        registry
            .world
            .get::<&MenuController>(self.menu)
            .ok()
            .map(|c| c.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(f: impl FnOnce(&mut MenuInput)) -> MenuInput {
        let mut input = MenuInput::default();
        f(&mut input);
        input
    }

    fn down() -> MenuInput {
        press(|i| i.down = true)
    }

    fn up() -> MenuInput {
        press(|i| i.up = true)
    }

    fn right() -> MenuInput {
        press(|i| i.right = true)
    }

    fn left() -> MenuInput {
        press(|i| i.left = true)
    }

    fn enter() -> MenuInput {
        press(|i| i.confirm = true)
    }

    #[test]
    fn test_initial_state() {
        let menu = MenuModel::new(10, Difficulty::Average);
        assert_eq!(menu.screen, MenuScreen::Top);
        assert_eq!(menu.cursor, CURSOR_ONE_PLAYER);
        assert!(!menu.arrows_reversed());
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let mut menu = MenuModel::new(10, Difficulty::Average);
        menu.update(down());
        assert_eq!(menu.cursor, 0);
        menu.update(down());
        assert_eq!(menu.cursor, 1);
        let reaction = menu.update(down());
        assert_eq!(menu.cursor, 1, "Cursor clamps at the last entry");
        assert_eq!(reaction.select_sounds, 1, "Each press still plays a cue");

        menu.update(up());
        menu.update(up());
        menu.update(up());
        assert_eq!(menu.cursor, -1);
    }

    #[test]
    fn test_max_points_clamps_at_25() {
        let mut menu = MenuModel::new(10, Difficulty::Average);
        menu.update(down());
        menu.update(down());
        for _ in 0..30 {
            menu.update(right());
        }
        assert_eq!(menu.max_points, 25);
        assert!(menu.arrows_reversed());
    }

    #[test]
    fn test_max_points_clamps_at_1() {
        let mut menu = MenuModel::new(3, Difficulty::Average);
        menu.update(down());
        menu.update(down());
        for _ in 0..5 {
            menu.update(left());
        }
        assert_eq!(menu.max_points, 1);
    }

    #[test]
    fn test_left_right_ignored_off_points_entry() {
        let mut menu = MenuModel::new(10, Difficulty::Average);
        let reaction = menu.update(right());
        assert_eq!(menu.max_points, 10);
        assert!(!reaction.points_changed);
    }

    #[test]
    fn test_enter_inert_on_points_entry() {
        let mut menu = MenuModel::new(10, Difficulty::Average);
        menu.update(down());
        menu.update(down());
        let reaction = menu.update(enter());
        assert_eq!(reaction, MenuReaction::default());
        assert_eq!(menu.screen, MenuScreen::Top);
    }

    #[test]
    fn test_two_players_starts_immediately() {
        let mut menu = MenuModel::new(7, Difficulty::Hard);
        menu.update(down());
        let reaction = menu.update(enter());
        assert!(reaction.start);
        assert_eq!(
            menu.match_config(),
            MatchConfig {
                multiplayer: true,
                max_points: 7,
                difficulty: Difficulty::Hard,
            }
        );
    }

    #[test]
    fn test_one_player_opens_difficulty() {
        let mut menu = MenuModel::new(10, Difficulty::Average);
        let reaction = menu.update(enter());
        assert!(!reaction.start, "One player does not start right away");
        assert!(reaction.opened_difficulty);
        assert_eq!(menu.screen, MenuScreen::DifficultySelect);
        assert_eq!(menu.cursor, 0);
        assert!(menu.arrows_reversed());
    }

    #[test]
    fn test_difficulty_select_flow() {
        let mut menu = MenuModel::new(5, Difficulty::Average);
        menu.update(enter());
        menu.update(right());
        menu.update(right());
        assert_eq!(menu.difficulty, Difficulty::Demon);
        for _ in 0..10 {
            menu.update(right());
        }
        assert_eq!(menu.difficulty, Difficulty::Impossible);
        for _ in 0..10 {
            menu.update(left());
        }
        assert_eq!(menu.difficulty, Difficulty::VeryEasy);

        // Up/Down do nothing here
        let reaction = menu.update(down());
        assert_eq!(reaction, MenuReaction::default());

        let reaction = menu.update(enter());
        assert!(reaction.start);
        assert!(!menu.match_config().multiplayer);
    }

    #[test]
    fn test_points_label() {
        assert_eq!(points_label(12), "Max. Points: 12");
    }
}
