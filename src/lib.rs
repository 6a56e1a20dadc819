// Library exports for testing
pub use app::App;
pub use config::GameConfig;
pub use entities::{Enemy, GameState, Laser, LaserColor, Player, Powerup, PowerupKind};

pub mod animation;
pub mod app;
pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
