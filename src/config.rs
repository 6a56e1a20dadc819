use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config: {field} must be positive, got {value}")]
    InvalidArgument { field: &'static str, value: f32 },
}

/// Tuning constants for one game session.
///
/// Built once at startup and passed by reference into the subsystems that
/// need it; nothing reads tuning from ambient state. Session-mutable tuning
/// (current fire delay, laser color) lives on the player instead.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Play-field width in field pixels (the stat panel sits outside it)
    pub field_width: f32,
    /// Play-field height in field pixels
    pub field_height: f32,
    /// Player movement speed in pixels per second
    pub player_speed: f32,
    /// Starting player health
    pub player_health: u32,
    /// Player bounding box in field pixels
    pub player_size: Vec2,
    /// Health lost per enemy body collision
    pub collision_damage: u32,
    /// Bomb charges a fresh player carries
    pub starting_bombs: u32,
    /// Seconds between shots at the default fire rate
    pub fire_delay: f32,
    /// Seconds between shots after a speed powerup
    pub boosted_fire_delay: f32,
    /// Enemy bounding box in field pixels
    pub enemy_size: Vec2,
    /// Spawn height above the visible field (negative y)
    pub enemy_spawn_y: f32,
    /// Scale factor k in the fall curve (k * (age - offset))^4
    pub enemy_fall_scale: f32,
    /// Age offset in the fall curve, in seconds
    pub enemy_fall_offset: f32,
    /// Laser bounding box in field pixels
    pub laser_size: Vec2,
    /// Laser speed in pixels per second, straight up
    pub laser_speed: f32,
    /// Powerup bounding box in field pixels
    pub powerup_size: Vec2,
    /// Seconds of alive time between trail particle emissions
    pub particle_interval: f32,
    /// Seconds between enemy spawns at zero kills
    pub base_spawn_interval: f32,
    /// Interval reduction applied per five kills
    pub spawn_interval_step: f32,
    /// Hard minimum spawn interval, reached late in a good run
    pub spawn_interval_floor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 650.0,
            field_height: 600.0,
            player_speed: 250.0,
            player_health: 50,
            player_size: Vec2::new(34.0, 37.0),
            collision_damage: 5,
            starting_bombs: 3,
            fire_delay: 0.15,
            boosted_fire_delay: 0.07,
            enemy_size: Vec2::new(22.0, 23.0),
            enemy_spawn_y: -10.0,
            enemy_fall_scale: 1.8,
            enemy_fall_offset: 0.8,
            laser_size: Vec2::new(4.0, 10.0),
            laser_speed: 500.0,
            powerup_size: Vec2::new(20.0, 20.0),
            particle_interval: 0.5,
            base_spawn_interval: 0.5,
            spawn_interval_step: 0.01,
            spawn_interval_floor: 0.1,
        }
    }
}

impl GameConfig {
    /// Rejects dimensions, speeds, and intervals that would make the
    /// simulation degenerate. Run once before the game loop starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positives = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("player_speed", self.player_speed),
            ("player_size.x", self.player_size.x),
            ("player_size.y", self.player_size.y),
            ("fire_delay", self.fire_delay),
            ("boosted_fire_delay", self.boosted_fire_delay),
            ("enemy_size.x", self.enemy_size.x),
            ("enemy_size.y", self.enemy_size.y),
            ("enemy_fall_scale", self.enemy_fall_scale),
            ("laser_size.x", self.laser_size.x),
            ("laser_size.y", self.laser_size.y),
            ("laser_speed", self.laser_speed),
            ("powerup_size.x", self.powerup_size.x),
            ("powerup_size.y", self.powerup_size.y),
            ("particle_interval", self.particle_interval),
            ("base_spawn_interval", self.base_spawn_interval),
            ("spawn_interval_floor", self.spawn_interval_floor),
        ];
        for (field, value) in positives {
            if value <= 0.0 {
                return Err(ConfigError::InvalidArgument { field, value });
            }
        }
        Ok(())
    }
}
