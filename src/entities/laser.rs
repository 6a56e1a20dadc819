use glam::Vec2;

use crate::collision::Aabb;
use crate::config::GameConfig;

/// A player shot travelling straight up the field at constant speed.
#[derive(Debug, Clone)]
pub struct Laser {
    pub pos: Vec2,
    pub size: Vec2,
    /// Set on the first enemy hit. Terminal: a collided laser is purged by
    /// the same tick's lifecycle pass and can never hit a second enemy.
    pub collided: bool,
}

impl Laser {
    /// Spawns at the firing player's top center.
    pub fn new(player_pos: Vec2, player_size: Vec2, config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(player_pos.x + player_size.x / 2.0, player_pos.y),
            size: config.laser_size,
            collided: false,
        }
    }

    pub fn update(&mut self, dt: f32, config: &GameConfig) {
        self.pos.y -= config.laser_speed * dt;
    }

    pub fn is_past_top(&self) -> bool {
        self.pos.y <= 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}
