pub mod ball;
pub mod collision;
pub mod paddle;
pub mod scoring;

pub use ball::*;
pub use collision::*;
pub use paddle::*;
pub use scoring::*;

use hecs::Entity;

use crate::menu::{update_menu, MenuController};
use crate::{
    Ball, Config, EndBanner, Events, GameRng, Input, Key, Paddle, Registry, Scoreboard, Time,
};

/// Per-frame context handed to every entity update
pub struct Frame<'a> {
    pub time: Time,
    pub input: &'a dyn Input,
    pub config: &'a Config,
    pub events: &'a mut Events,
    pub rng: &'a mut GameRng,
    /// Present only while a match is running
    pub scoreboard: Option<&'a mut Scoreboard>,
}

/// Update every active entity once, in spawn order
pub fn update_entities(registry: &mut Registry, frame: &mut Frame) {
    let order = registry.order().to_vec();
    for entity in order {
        if !registry.is_active(entity) {
            continue;
        }
        if has::<Paddle>(registry, entity) {
            update_paddle(registry, entity, frame);
        } else if has::<Ball>(registry, entity) {
            update_ball(registry, entity, frame);
        } else if has::<MenuController>(registry, entity) {
            update_menu(registry, entity, frame);
        } else if has::<EndBanner>(registry, entity) {
            update_end_banner(frame);
        }
    }
}

fn has<T: hecs::Component>(registry: &Registry, entity: Entity) -> bool {
    registry.world.get::<&T>(entity).is_ok()
}

/// Enter on the end screen returns to the menu
fn update_end_banner(frame: &mut Frame) {
    if frame.input.key_just_pressed(Key::Enter) {
        frame.events.switch_requested = true;
    }
}
