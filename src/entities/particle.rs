use glam::Vec2;
use rand::Rng;

/// Seconds before a trail particle's fade formula runs out and the particle
/// must be evicted by its owner.
pub const PARTICLE_LIFETIME: f32 = 0.4;

/// One puff of engine exhaust trailing behind a ship.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
}

impl Particle {
    /// Spawns at the parent's engine (bottom center), drifting against the
    /// parent's travel direction with a little sideways jitter.
    pub fn trail(parent_pos: Vec2, parent_size: Vec2, parent_vel: Vec2) -> Self {
        let jitter = rand::rng().random_range(-0.15..0.15);
        Self {
            pos: Vec2::new(
                parent_pos.x + parent_size.x / 2.0,
                parent_pos.y + parent_size.y - 10.0,
            ),
            vel: Vec2::new(parent_vel.x * -0.3 + jitter, parent_vel.y * -0.3),
            age: 0.0,
        }
    }

    /// Velocity is pixels per tick, matching how parents assign their own
    /// per-tick velocities, so position moves by one velocity per call.
    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.pos += self.vel;
    }

    /// Fades with age, hitting zero at the lifetime limit.
    pub fn opacity(&self) -> f32 {
        (PARTICLE_LIFETIME - self.age).max(0.0).sqrt()
    }

    pub fn is_expired(&self) -> bool {
        self.age > PARTICLE_LIFETIME
    }
}
