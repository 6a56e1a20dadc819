use std::f32::consts::SQRT_2;

use glam::Vec2;

use super::{EntityId, Particle};
use crate::collision::Aabb;
use crate::config::GameConfig;
use crate::input::InputSnapshot;

/// Palette tag for player shots; the renderer maps it to a concrete color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserColor {
    Standard,
    Boosted,
}

/// The player ship.
///
/// Session-mutable tuning (fire delay, laser color) lives here rather than
/// in the shared config, so a reset restores it along with everything else.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    /// Per-tick scratch value: assigned from held input each tick and
    /// zeroed again at the end of movement, so there is no momentum
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u32,
    /// Seconds since the last shot. Primed to the fire delay so a fresh
    /// ship can shoot immediately
    pub since_last_shot: f32,
    /// Current seconds between shots; a speed powerup shortens it
    pub fire_delay: f32,
    pub laser_color: LaserColor,
    /// Bomb charges left
    pub bombs: u32,
    pub trail: Vec<Particle>,
    since_particle: f32,
}

impl Player {
    pub fn new(id: EntityId, config: &GameConfig) -> Self {
        Self {
            id,
            pos: Vec2::new(config.field_width / 2.0, config.field_height - 100.0),
            vel: Vec2::ZERO,
            size: config.player_size,
            health: config.player_health,
            since_last_shot: config.fire_delay,
            fire_delay: config.fire_delay,
            laser_color: LaserColor::Standard,
            bombs: config.starting_bombs,
            trail: Vec::new(),
            since_particle: 0.0,
        }
    }

    /// Ages and evicts existing trail puffs. Emission happens during
    /// movement, while this tick's velocity is still set.
    pub fn update_trail(&mut self, dt: f32) {
        for p in &mut self.trail {
            p.update(dt);
        }
        self.trail.retain(|p| !p.is_expired());
    }

    /// Turns held movement actions into this tick's displacement: sum the
    /// signed axis intents, normalize diagonals so they are no faster than
    /// straight lines, integrate, clamp to the field.
    pub fn update_movement(&mut self, input: &InputSnapshot, dt: f32, config: &GameConfig) {
        let mut intent = Vec2::ZERO;
        if input.left {
            intent.x -= 1.0;
        }
        if input.right {
            intent.x += 1.0;
        }
        if input.up {
            intent.y -= 1.0;
        }
        if input.down {
            intent.y += 1.0;
        }
        if intent.x != 0.0 && intent.y != 0.0 {
            intent /= SQRT_2;
        }

        self.vel = intent * dt * config.player_speed;
        self.pos += self.vel;
        self.pos.x = self.pos.x.clamp(0.0, config.field_width - self.size.x);
        self.pos.y = self.pos.y.clamp(0.0, config.field_height - self.size.y);

        self.since_particle += dt;
        if self.since_particle >= config.particle_interval {
            self.trail
                .push(Particle::trail(self.pos, self.size, self.vel));
            self.since_particle = 0.0;
        }

        self.vel = Vec2::ZERO;
    }

    pub fn update_cooldown(&mut self, dt: f32) {
        self.since_last_shot += dt;
    }

    pub fn can_fire(&self) -> bool {
        self.since_last_shot >= self.fire_delay
    }

    pub fn reset_cooldown(&mut self) {
        self.since_last_shot = 0.0;
    }

    pub fn take_damage(&mut self, damage: u32) {
        self.health = self.health.saturating_sub(damage);
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Logical destruction: the wreck is parked far off-field so nothing
    /// can collide with it while the game-over screen is up.
    pub fn destroy(&mut self) {
        self.pos = Vec2::new(999.0, 999.0);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" /^\\ ", "|*=*|", "/!-!\\"]
    }
}
