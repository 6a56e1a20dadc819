use color_eyre::Result;
use glam::Vec2;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::animation::Animation;
use crate::clock::{FixedTimestep, TICK, TICK_RATE};
use crate::config::GameConfig;
use crate::entities::{
    Enemy, EnemySpawner, GameState, IdAllocator, Laser, Player, Powerup, PowerupKind,
};
use crate::input::{InputManager, InputSnapshot};
use crate::renderer::{GameRenderer, RenderView};

/// The main application which holds the state and logic of the game.
///
/// Simulation state is public so the update path can be driven directly in
/// tests; the terminal, input, and timing plumbing stays private.
pub struct App {
    running: bool,
    pub config: GameConfig,
    pub game_state: GameState,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub lasers: Vec<Laser>,
    pub powerups: Vec<Powerup>,
    pub animations: Vec<Animation>,
    pub spawner: EnemySpawner,
    ids: IdAllocator,
    pub kills: u32,
    pub score: u32,
    /// Simulation ticks since the current run started
    pub tick_count: u64,
    pub elapsed_minutes: u64,
    pub elapsed_seconds: u64,
    /// Current seconds between enemy spawns, tightens as kills accumulate
    pub spawn_interval: f32,
    timestep: FixedTimestep,
    last_frame_time: Instant,
    fps: u32,
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`]. Touches no terminal state, so
    /// tests can build one and drive [`App::update_game`] by hand.
    pub fn new(config: GameConfig) -> Self {
        let mut ids = IdAllocator::new();
        let player = Player::new(ids.allocate(), &config);
        let spawn_interval = config.base_spawn_interval;

        Self {
            running: true,
            game_state: GameState::Playing,
            player,
            enemies: Vec::new(),
            lasers: Vec::new(),
            powerups: Vec::new(),
            animations: Vec::new(),
            spawner: EnemySpawner::new(spawn_interval),
            ids,
            kills: 0,
            score: 0,
            tick_count: 0,
            elapsed_minutes: 0,
            elapsed_seconds: 0,
            spawn_interval,
            timestep: FixedTimestep::new(),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        log::info!("session started");
        self.last_frame_time = Instant::now();

        while self.running {
            // Calculate FPS from real frame spacing
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events(self.game_state)?;
            let mut input = self.input_manager.snapshot();

            if input.quit {
                log::info!("quit requested, final score {}", self.score);
                self.running = false;
                continue;
            }
            if input.restart {
                self.reset();
                self.input_manager.consume_edges();
                input.consume_edges();
            }

            // Run however many fixed ticks wall time owes us. A slow frame
            // runs several so game speed never depends on render speed.
            let ticks = self.timestep.advance(frame_time.as_secs_f32());
            for _ in 0..ticks {
                self.update_game(TICK, &input);
                // Press edges count once: the first tick spends them, in
                // the manager too. A frame that yields no ticks leaves
                // them pending for the next frame instead of dropping them
                self.input_manager.consume_edges();
                input.consume_edges();
            }

            terminal.draw(|frame| {
                let view = RenderView {
                    game_state: self.game_state,
                    player: &self.player,
                    enemies: &self.enemies,
                    lasers: &self.lasers,
                    powerups: &self.powerups,
                    animations: &self.animations,
                    kills: self.kills,
                    score: self.score,
                    elapsed_minutes: self.elapsed_minutes,
                    elapsed_seconds: self.elapsed_seconds,
                    frame_count: self.tick_count,
                    fps: self.fps,
                    field_size: Vec2::new(self.config.field_width, self.config.field_height),
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }
        Ok(())
    }

    /// One fixed simulation tick.
    ///
    /// The order is deliberate: effects, enemies, lasers, and powerups keep
    /// settling even after the run ends, while the player, the spawner, and
    /// the derived stats stop the moment it does. The tick counter always
    /// advances so leftover drift stays on its curve.
    pub fn update_game(&mut self, dt: f32, input: &InputSnapshot) {
        for animation in &mut self.animations {
            animation.update(dt);
        }
        self.animations.retain(|a| !a.is_finished());

        self.tick_count += 1;

        let field_height = self.config.field_height;
        for enemy in &mut self.enemies {
            enemy.update(dt, &self.config);
        }
        self.enemies.retain(|e| !e.is_past_bottom(field_height));

        for laser in &mut self.lasers {
            laser.update(dt, &self.config);
        }
        self.check_laser_hits();
        self.lasers.retain(|l| !l.collided && !l.is_past_top());
        self.enemies.retain(|e| e.is_alive());

        for powerup in &mut self.powerups {
            powerup.update(dt);
        }
        self.powerups.retain(|p| !p.is_past_bottom(field_height));

        if self.game_state == GameState::GameOver {
            return;
        }

        self.player.update_trail(dt);
        self.player.update_movement(input, dt, &self.config);
        self.player.update_cooldown(dt);
        if input.fire && self.player.can_fire() {
            self.lasers
                .push(Laser::new(self.player.pos, self.player.size, &self.config));
            self.player.reset_cooldown();
        }
        // A bomb with no charges left is a silent no-op
        if input.bomb && self.player.bombs > 0 {
            self.player.bombs -= 1;
            self.bomb_screen();
        }
        self.check_player_collisions();
        self.check_game_over();

        if self.spawner.update(dt, self.spawn_interval) {
            self.spawn_enemy();
        }

        // Derived stats recompute only while playing, which freezes the
        // final score and clock on the death tick
        let total_seconds = self.tick_count / TICK_RATE as u64;
        self.elapsed_minutes = total_seconds / 60;
        self.elapsed_seconds = total_seconds % 60;
        self.score = 30 * self.kills + self.elapsed_seconds as u32;
        self.spawn_interval = (self.config.base_spawn_interval
            - self.config.spawn_interval_step * (self.kills / 5) as f32)
            .max(self.config.spawn_interval_floor);
    }

    /// Resolves laser hits. A laser stops at its first victim, and an enemy
    /// already killed this tick cannot soak a second laser.
    fn check_laser_hits(&mut self) {
        let mut kill_positions = Vec::new();
        for laser in &mut self.lasers {
            if laser.collided {
                continue;
            }
            let laser_box = laser.aabb();
            for enemy in &mut self.enemies {
                if enemy.is_alive() && laser_box.overlaps(&enemy.aabb()) {
                    enemy.kill();
                    laser.collided = true;
                    kill_positions.push(enemy.pos);
                    break;
                }
            }
        }
        for pos in kill_positions {
            self.kills += 1;
            self.animations.push(Animation::explosion(pos));
            self.spawn_milestone_powerup(pos);
        }
    }

    /// Kill milestones drop powerups where the enemy died: the hundredth
    /// kill upgrades the fire rate, every fiftieth otherwise restocks a
    /// bomb. The speed check runs first so kill 100 never yields both.
    fn spawn_milestone_powerup(&mut self, pos: Vec2) {
        if self.kills == 100 {
            self.powerups
                .push(Powerup::new(PowerupKind::Speed, pos, &self.config));
        } else if self.kills % 50 == 0 {
            self.powerups
                .push(Powerup::new(PowerupKind::Bomb, pos, &self.config));
        }
    }

    /// Enemy bodies ram the player for contact damage; powerups that touch
    /// the player are collected. Rammed enemies die without kill credit.
    fn check_player_collisions(&mut self) {
        let player_box = self.player.aabb();

        let mut crash_positions = Vec::new();
        for enemy in &mut self.enemies {
            if enemy.is_alive() && player_box.overlaps(&enemy.aabb()) {
                enemy.kill();
                crash_positions.push(enemy.pos);
            }
        }
        self.enemies.retain(|e| e.is_alive());
        for pos in crash_positions {
            self.animations.push(Animation::explosion(pos));
            self.player.take_damage(self.config.collision_damage);
        }

        let mut collected = Vec::new();
        for (idx, powerup) in self.powerups.iter().enumerate() {
            if player_box.overlaps(&powerup.aabb()) {
                collected.push(idx);
            }
        }
        for idx in collected.into_iter().rev() {
            let powerup = self.powerups.remove(idx);
            powerup.apply(&mut self.player, &self.config);
        }
    }

    /// Flips into game over exactly once, with a final explosion where the
    /// ship was.
    fn check_game_over(&mut self) {
        if self.game_state == GameState::Playing && !self.player.is_alive() {
            self.animations.push(Animation::explosion(self.player.pos));
            self.player.destroy();
            self.game_state = GameState::GameOver;
            log::info!(
                "game over: score {}, kills {}, {:02}:{:02} survived",
                self.score,
                self.kills,
                self.elapsed_minutes,
                self.elapsed_seconds
            );
        }
    }

    /// Spends one bomb charge: every enemy on the field dies at once for
    /// full kill credit, with an explosion each plus a field-wide blast.
    /// Bomb kills never drop milestone powerups.
    fn bomb_screen(&mut self) {
        log::debug!("bomb cleared {} enemies", self.enemies.len());
        self.kills += self.enemies.len() as u32;
        for enemy in &self.enemies {
            self.animations.push(Animation::explosion(enemy.pos));
        }
        self.enemies.clear();
        self.animations.push(Animation::blast(Vec2::new(
            self.config.field_width,
            self.config.field_height,
        )));
    }

    /// Drops a fresh enemy just above the field at a random x with a small
    /// random sideways drift.
    fn spawn_enemy(&mut self) {
        let mut rng = rand::rng();
        let max_x = self.config.field_width - self.config.enemy_size.x;
        let x = rng.random_range(0.0..max_x);
        let drift = rng.random_range(-1.0..1.0);
        self.enemies
            .push(Enemy::new(self.ids.allocate(), x, drift, &self.config));
    }

    /// Returns the session to its starting state with a fresh player. Ids
    /// keep counting up, so entities from the previous run can never be
    /// confused with new ones.
    pub fn reset(&mut self) {
        log::info!("restarting after {} kills", self.kills);
        self.player = Player::new(self.ids.allocate(), &self.config);
        self.enemies.clear();
        self.lasers.clear();
        self.powerups.clear();
        self.animations.clear();
        self.spawner = EnemySpawner::new(self.config.base_spawn_interval);
        self.spawn_interval = self.config.base_spawn_interval;
        self.kills = 0;
        self.score = 0;
        self.tick_count = 0;
        self.elapsed_minutes = 0;
        self.elapsed_seconds = 0;
        self.game_state = GameState::Playing;
    }
}
