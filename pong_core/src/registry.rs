//! Entity registry
//!
//! A hecs world plus the order entities were spawned in. Update and draw
//! both walk that order.

use glam::Vec2;
use hecs::{DynamicBundle, Entity, World};

use crate::{Active, Position, Renderer, Visual};

#[derive(Default)]
pub struct Registry {
    pub world: World,
    order: Vec<Entity>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an active entity at `pos` and append it to the update order
    pub fn spawn(&mut self, pos: Vec2, components: impl DynamicBundle) -> Entity {
        let entity = self.world.spawn(components);
        // Insert cannot fail: the entity was just spawned
        let _ = self.world.insert(entity, (Position(pos), Active(true)));
        self.order.push(entity);
        entity
    }

    /// Entities in spawn order
    pub fn order(&self) -> &[Entity] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every entity
    pub fn clear(&mut self) {
        self.world.clear();
        self.order.clear();
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world
            .get::<&Active>(entity)
            .map(|active| active.0)
            .unwrap_or(false)
    }

    pub fn set_active(&mut self, entity: Entity, active: bool) {
        if let Ok(flag) = self.world.query_one_mut::<&mut Active>(entity) {
            flag.0 = active;
        }
    }

    pub fn set_active_all(&mut self, active: bool) {
        for (_entity, flag) in self.world.query_mut::<&mut Active>() {
            flag.0 = active;
        }
    }

    pub fn position(&self, entity: Entity) -> Option<Vec2> {
        self.world.get::<&Position>(entity).ok().map(|pos| pos.0)
    }

    pub fn set_position(&mut self, entity: Entity, pos: Vec2) {
        if let Ok(p) = self.world.query_one_mut::<&mut Position>(entity) {
            p.0 = pos;
        }
    }

    pub fn set_text(&mut self, entity: Entity, text: &str) {
        if let Ok(visual) = self.world.query_one_mut::<&mut Visual>(entity) {
            visual.set_text(text);
        }
    }

    pub fn text(&self, entity: Entity) -> Option<String> {
        let visual = self.world.get::<&Visual>(entity).ok()?;
        visual.text().map(str::to_owned)
    }

    /// Draw every active visual in spawn order
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        for &entity in &self.order {
            let Ok(mut query) = self
                .world
                .query_one::<(&Active, &Position, &Visual)>(entity)
            else {
                continue;
            };
            let Some((active, pos, visual)) = query.get() else {
                continue;
            };
            if !active.0 {
                continue;
            }
            match visual {
                Visual::Sprite { sprite, size } => renderer.draw_sprite(*sprite, pos.0, *size),
                Visual::Text { font, text } => renderer.draw_text(*font, text, pos.0),
            }
        }
    }
}
