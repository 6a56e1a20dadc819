mod enemy;
mod game_state;
mod laser;
mod particle;
mod player;
mod powerup;
mod spawner;

// Re-export all public types
pub use enemy::Enemy;
pub use game_state::GameState;
pub use laser::Laser;
pub use particle::{PARTICLE_LIFETIME, Particle};
pub use player::{LaserColor, Player};
pub use powerup::{Powerup, PowerupKind};
pub use spawner::EnemySpawner;

/// Stable identity for long-lived entities, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Hands out ids monotonically. Never rewinds, so ids stay unique even
/// across game resets.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
