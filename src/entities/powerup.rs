use glam::Vec2;

use super::player::{LaserColor, Player};
use crate::collision::Aabb;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    /// Grants one bomb charge on pickup
    Bomb,
    /// Permanently shortens the fire delay and recolors lasers
    Speed,
}

/// A collectible dropped where a milestone kill happened, drifting down
/// toward the player.
#[derive(Debug, Clone)]
pub struct Powerup {
    pub kind: PowerupKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub age: f32,
}

impl Powerup {
    pub fn new(kind: PowerupKind, pos: Vec2, config: &GameConfig) -> Self {
        Self {
            kind,
            pos,
            size: config.powerup_size,
            vel: Vec2::ZERO,
            age: 0.0,
        }
    }

    /// Falls faster the longer it has existed: per-tick vertical velocity
    /// equals its age in seconds.
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.vel.y = self.age;
        self.pos += self.vel;
    }

    pub fn is_past_bottom(&self, field_height: f32) -> bool {
        self.pos.y > field_height
    }

    /// Collection effect, dispatched on the variant.
    pub fn apply(&self, player: &mut Player, config: &GameConfig) {
        match self.kind {
            PowerupKind::Bomb => player.bombs += 1,
            PowerupKind::Speed => {
                player.fire_delay = config.boosted_fire_delay;
                player.laser_color = LaserColor::Boosted;
            }
        }
    }

    pub fn symbol(&self) -> char {
        match self.kind {
            PowerupKind::Bomb => 'B',
            PowerupKind::Speed => 'S',
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_pos_size(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::IdAllocator;

    fn powerup(kind: PowerupKind) -> Powerup {
        Powerup::new(kind, Vec2::new(100.0, 100.0), &GameConfig::default())
    }

    #[test]
    fn test_fall_speed_grows_with_age() {
        let mut p = powerup(PowerupKind::Bomb);
        p.update(0.1);
        p.update(0.1);
        // First step drops by 0.1, second by 0.2
        assert!((p.pos.y - 100.3).abs() < 1e-3);
        assert!((p.vel.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_bomb_pickup_grants_charge() {
        let config = GameConfig::default();
        let mut ids = IdAllocator::new();
        let mut player = Player::new(ids.allocate(), &config);
        let before = player.bombs;

        powerup(PowerupKind::Bomb).apply(&mut player, &config);
        assert_eq!(player.bombs, before + 1);
        // Fire rate untouched
        assert_eq!(player.fire_delay, config.fire_delay);
    }

    #[test]
    fn test_speed_pickup_boosts_fire_rate() {
        let config = GameConfig::default();
        let mut ids = IdAllocator::new();
        let mut player = Player::new(ids.allocate(), &config);

        powerup(PowerupKind::Speed).apply(&mut player, &config);
        assert_eq!(player.fire_delay, config.boosted_fire_delay);
        assert_eq!(player.laser_color, LaserColor::Boosted);
    }

    #[test]
    fn test_despawns_past_field_bottom() {
        let mut p = powerup(PowerupKind::Speed);
        assert!(!p.is_past_bottom(600.0));
        p.pos.y = 600.5;
        assert!(p.is_past_bottom(600.0));
    }
}
