use glam::Vec2;

use super::{EntityId, Particle};
use crate::collision::Aabb;
use crate::config::GameConfig;

/// A descending attacker.
///
/// Horizontal drift is fixed at spawn; vertical speed is a pure function of
/// age, so a fresh enemy eases in from above, stalls briefly, and then
/// accelerates hard for the rest of its life.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    /// Pixels per tick; y is recomputed from age every update
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u32,
    /// Seconds since spawn
    pub age: f32,
    pub trail: Vec<Particle>,
    since_particle: f32,
}

impl Enemy {
    /// Spawns above the visible field at the given x with a fixed sideways
    /// drift in pixels per tick.
    pub fn new(id: EntityId, x: f32, drift: f32, config: &GameConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(x, config.enemy_spawn_y),
            vel: Vec2::new(drift, 0.0),
            size: config.enemy_size,
            health: 1,
            age: 0.0,
            trail: Vec::new(),
            since_particle: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, config: &GameConfig) {
        for p in &mut self.trail {
            p.update(dt);
        }
        self.trail.retain(|p| !p.is_expired());

        self.since_particle += dt;
        if self.since_particle >= config.particle_interval {
            self.trail
                .push(Particle::trail(self.pos, self.size, self.vel));
            self.since_particle = 0.0;
        }

        self.age += dt;
        self.vel.y = (config.enemy_fall_scale * (self.age - config.enemy_fall_offset)).powi(4);
        self.pos += self.vel;
    }

    /// True once the top edge has dropped past the field bottom.
    pub fn is_past_bottom(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }

    /// Marks the enemy destroyed; it is compacted out of the live
    /// collection at the end of the current phase.
    pub fn kill(&mut self) {
        self.health = 0;
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec!["/o\\", "\\v/"]
    }
}
