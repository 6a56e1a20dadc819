/// Integration tests for the game session
///
/// These tests drive whole simulation ticks through `App::update_game` and
/// verify the interactions between entities: collision outcomes, kill
/// accounting, powerup drops, bombs, game over, and restart.
use glam::Vec2;
use starfall::clock::TICK;
use starfall::entities::{EnemySpawner, EntityId};
use starfall::input::InputSnapshot;
use starfall::{App, Enemy, GameConfig, GameState, Laser, LaserColor, Powerup, PowerupKind};

/// App with the spawner parked far in the future, so tests control exactly
/// which entities are on the field.
fn quiet_app() -> App {
    let config = GameConfig {
        base_spawn_interval: 1000.0,
        ..GameConfig::default()
    };
    let mut app = App::new(config);
    app.spawner = EnemySpawner::new(0.0);
    app
}

fn tick(app: &mut App) {
    app.update_game(TICK, &InputSnapshot::default());
}

fn tick_n(app: &mut App, n: u32) {
    for _ in 0..n {
        tick(app);
    }
}

fn fire_input() -> InputSnapshot {
    InputSnapshot {
        fire: true,
        ..Default::default()
    }
}

fn bomb_input() -> InputSnapshot {
    InputSnapshot {
        bomb: true,
        ..Default::default()
    }
}

fn enemy_at(app: &App, pos: Vec2, drift: f32) -> Enemy {
    let mut enemy = Enemy::new(EntityId(900), pos.x, drift, &app.config);
    enemy.pos = pos;
    enemy
}

fn laser_at(app: &App, pos: Vec2) -> Laser {
    let mut laser = Laser::new(app.player.pos, app.player.size, &app.config);
    laser.pos = pos;
    laser
}

/// Enemy and laser placed so their boxes overlap after this tick's movement
fn stage_laser_kill(app: &mut App) {
    let enemy = enemy_at(app, Vec2::new(100.0, 300.0), -1.0);
    app.enemies.push(enemy);
    let laser = laser_at(app, Vec2::new(105.0, 310.0));
    app.lasers.push(laser);
}

#[test]
fn test_laser_kill_removes_both_and_scores() {
    let mut app = quiet_app();
    stage_laser_kill(&mut app);

    tick(&mut app);

    assert!(app.enemies.is_empty());
    assert!(app.lasers.is_empty());
    assert_eq!(app.kills, 1);
    // 30 points per kill plus zero elapsed seconds
    assert_eq!(app.score, 30);
    // One explosion where the enemy died
    assert_eq!(app.animations.len(), 1);
}

#[test]
fn test_touching_boxes_do_not_collide() {
    let mut app = quiet_app();
    // Drift +1 carries the enemy to x=101 this tick, so its right edge
    // lands exactly on the laser's left edge at x=123
    let enemy = enemy_at(&app, Vec2::new(100.0, 300.0), 1.0);
    app.enemies.push(enemy);
    let laser = laser_at(&app, Vec2::new(123.0, 310.0));
    app.lasers.push(laser);

    tick(&mut app);

    // Shared edges are a miss; both survive
    assert_eq!(app.enemies.len(), 1);
    assert_eq!(app.lasers.len(), 1);
    assert_eq!(app.kills, 0);
}

#[test]
fn test_one_laser_kills_at_most_one_enemy() {
    let mut app = quiet_app();
    // Two enemies stacked so both overlap the laser's path this tick
    app.enemies.push(enemy_at(&app, Vec2::new(100.0, 300.0), 0.0));
    app.enemies.push(enemy_at(&app, Vec2::new(102.0, 302.0), 0.0));
    app.lasers.push(laser_at(&app, Vec2::new(105.0, 310.0)));

    tick(&mut app);

    // The laser stops at its first victim; the second enemy flies on
    assert_eq!(app.enemies.len(), 1);
    assert_eq!(app.kills, 1);
    assert!(app.lasers.is_empty());
    assert_eq!(app.animations.len(), 1);
}

#[test]
fn test_dead_enemy_cannot_soak_a_second_laser() {
    let mut app = quiet_app();
    app.enemies.push(enemy_at(&app, Vec2::new(100.0, 300.0), 0.0));
    // Both lasers overlap the same enemy after this tick's movement
    app.lasers.push(laser_at(&app, Vec2::new(105.0, 310.0)));
    app.lasers.push(laser_at(&app, Vec2::new(110.0, 315.0)));

    tick(&mut app);

    // One kill, one spent laser; the trailing laser passes through the
    // corpse untouched and keeps flying
    assert_eq!(app.kills, 1);
    assert!(app.enemies.is_empty());
    assert_eq!(app.lasers.len(), 1);
    assert!(!app.lasers[0].collided);
}

#[test]
fn test_laser_leaving_the_top_is_removed() {
    let mut app = quiet_app();
    let laser = laser_at(&app, Vec2::new(300.0, 5.0));
    app.lasers.push(laser);

    tick(&mut app);

    assert!(app.lasers.is_empty());
    assert_eq!(app.kills, 0);
}

#[test]
fn test_contact_crash_damages_without_kill_credit() {
    let mut app = quiet_app();
    let enemy = enemy_at(&app, Vec2::new(328.0, 502.0), -1.0);
    app.enemies.push(enemy);

    tick(&mut app);

    // The enemy is destroyed by the crash but never counts as a kill
    assert!(app.enemies.is_empty());
    assert_eq!(app.kills, 0);
    assert_eq!(app.player.health, 45);
    assert_eq!(app.animations.len(), 1);
}

#[test]
fn test_ten_crashes_end_the_game_once() {
    let mut app = quiet_app();

    for hit in 0..10u32 {
        let enemy = enemy_at(&app, Vec2::new(328.0, 502.0), -1.0);
        app.enemies.push(enemy);
        tick(&mut app);
        assert_eq!(app.player.health, 50 - 5 * (hit + 1));
    }

    assert_eq!(app.game_state, GameState::GameOver);
    // The wreck is parked far off the field
    assert_eq!(app.player.pos, Vec2::new(999.0, 999.0));

    // Further ticks stay in game over without touching the player again
    tick_n(&mut app, 5);
    assert_eq!(app.game_state, GameState::GameOver);
    assert_eq!(app.player.health, 0);
}

#[test]
fn test_world_keeps_settling_after_game_over() {
    let mut app = quiet_app();
    app.player.take_damage(50);
    tick(&mut app);
    assert_eq!(app.game_state, GameState::GameOver);

    let enemy = enemy_at(&app, Vec2::new(100.0, 300.0), 1.0);
    app.enemies.push(enemy);
    let y_before = app.enemies[0].pos.y;

    // Leftover enemies keep falling and the tick counter keeps advancing
    tick_n(&mut app, 60);
    assert_eq!(app.enemies.len(), 1);
    assert!(app.enemies[0].pos.y > y_before);
    assert_eq!(app.tick_count, 61);

    // But the dead player cannot shoot
    app.update_game(TICK, &fire_input());
    assert!(app.lasers.is_empty());
}

#[test]
fn test_stats_freeze_after_game_over() {
    let mut app = quiet_app();
    app.kills = 3;
    app.player.take_damage(50);
    tick(&mut app);

    // Score was computed one last time on the death tick
    assert_eq!(app.game_state, GameState::GameOver);
    assert_eq!(app.score, 90);

    tick_n(&mut app, 120);
    assert_eq!(app.score, 90);
    assert_eq!(app.elapsed_minutes, 0);
    assert_eq!(app.elapsed_seconds, 0);
    assert_eq!(app.tick_count, 121);
}

#[test]
fn test_bomb_clears_field_with_full_credit() {
    let mut app = quiet_app();
    app.kills = 47;
    app.enemies.push(enemy_at(&app, Vec2::new(100.0, 100.0), 1.0));
    app.enemies.push(enemy_at(&app, Vec2::new(300.0, 200.0), -1.0));
    app.enemies.push(enemy_at(&app, Vec2::new(500.0, 300.0), 1.0));

    app.update_game(TICK, &bomb_input());

    assert!(app.enemies.is_empty());
    assert_eq!(app.kills, 50);
    assert_eq!(app.player.bombs, 2);
    // One explosion per enemy plus the field-wide blast
    assert_eq!(app.animations.len(), 4);
    // Bomb kills never drop milestone powerups, even across a threshold
    assert!(app.powerups.is_empty());
}

#[test]
fn test_bomb_with_no_charges_is_silent_noop() {
    let mut app = quiet_app();
    app.player.bombs = 0;
    app.enemies.push(enemy_at(&app, Vec2::new(100.0, 100.0), 1.0));

    app.update_game(TICK, &bomb_input());

    assert_eq!(app.enemies.len(), 1);
    assert_eq!(app.kills, 0);
    assert_eq!(app.player.bombs, 0);
    assert!(app.animations.is_empty());
}

#[test]
fn test_fiftieth_kill_drops_bomb_powerup() {
    let mut app = quiet_app();
    app.kills = 49;
    stage_laser_kill(&mut app);

    tick(&mut app);

    assert_eq!(app.kills, 50);
    assert_eq!(app.powerups.len(), 1);
    assert_eq!(app.powerups[0].kind, PowerupKind::Bomb);
}

#[test]
fn test_hundredth_kill_drops_speed_powerup_only() {
    let mut app = quiet_app();
    app.kills = 99;
    stage_laser_kill(&mut app);

    tick(&mut app);

    // 100 is also a multiple of 50, but the speed drop takes precedence
    assert_eq!(app.kills, 100);
    assert_eq!(app.powerups.len(), 1);
    assert_eq!(app.powerups[0].kind, PowerupKind::Speed);
}

#[test]
fn test_hundred_fiftieth_kill_drops_bomb_powerup() {
    let mut app = quiet_app();
    app.kills = 149;
    stage_laser_kill(&mut app);

    tick(&mut app);

    assert_eq!(app.kills, 150);
    assert_eq!(app.powerups.len(), 1);
    assert_eq!(app.powerups[0].kind, PowerupKind::Bomb);
}

#[test]
fn test_speed_powerup_boosts_fire_rate_on_pickup() {
    let mut app = quiet_app();
    let powerup = Powerup::new(PowerupKind::Speed, Vec2::new(330.0, 505.0), &app.config);
    app.powerups.push(powerup);

    tick(&mut app);

    assert!(app.powerups.is_empty());
    assert_eq!(app.player.fire_delay, app.config.boosted_fire_delay);
    assert_eq!(app.player.laser_color, LaserColor::Boosted);
}

#[test]
fn test_bomb_powerup_restocks_on_pickup() {
    let mut app = quiet_app();
    let powerup = Powerup::new(PowerupKind::Bomb, Vec2::new(330.0, 505.0), &app.config);
    app.powerups.push(powerup);

    tick(&mut app);

    assert!(app.powerups.is_empty());
    assert_eq!(app.player.bombs, 4);
}

#[test]
fn test_powerup_despawns_past_bottom() {
    let mut app = quiet_app();
    let mut powerup = Powerup::new(PowerupKind::Bomb, Vec2::new(10.0, 599.0), &app.config);
    // An old powerup falls fast, one tick carries it off the field
    powerup.age = 5.0;
    app.powerups.push(powerup);

    tick(&mut app);

    assert!(app.powerups.is_empty());
    assert_eq!(app.player.bombs, 3);
}

#[test]
fn test_enemy_escaping_bottom_gives_no_credit() {
    let mut app = quiet_app();
    let mut enemy = enemy_at(&app, Vec2::new(50.0, 590.0), 1.0);
    enemy.age = 2.0;
    app.enemies.push(enemy);

    tick(&mut app);

    assert!(app.enemies.is_empty());
    assert_eq!(app.kills, 0);
    assert_eq!(app.player.health, 50);
}

#[test]
fn test_fire_gated_by_cooldown() {
    let mut app = quiet_app();

    // The cooldown starts primed, so the first tick fires exactly one shot
    app.update_game(TICK, &fire_input());
    assert_eq!(app.lasers.len(), 1);

    // Held fire stays silent until the delay elapses
    for _ in 0..7 {
        app.update_game(TICK, &fire_input());
    }
    assert_eq!(app.lasers.len(), 1);

    for _ in 0..4 {
        app.update_game(TICK, &fire_input());
    }
    assert_eq!(app.lasers.len(), 2);
}

#[test]
fn test_first_spawn_is_immediate() {
    let mut app = App::new(GameConfig::default());
    assert!(app.enemies.is_empty());

    tick(&mut app);
    assert_eq!(app.enemies.len(), 1);

    // The next arrival waits for the full interval
    tick(&mut app);
    assert_eq!(app.enemies.len(), 1);
}

#[test]
fn test_spawn_interval_tightens_with_kills() {
    let mut app = App::new(GameConfig::default());
    assert_eq!(app.spawn_interval, 0.5);

    app.kills = 25;
    tick(&mut app);
    assert!((app.spawn_interval - 0.45).abs() < 1e-4);
}

#[test]
fn test_spawn_interval_hits_floor() {
    let mut app = App::new(GameConfig::default());
    app.kills = 250;
    tick(&mut app);
    assert!((app.spawn_interval - 0.1).abs() < 1e-6);
}

#[test]
fn test_reset_restores_fresh_session() {
    let mut app = App::new(GameConfig::default());
    tick_n(&mut app, 3);
    app.kills = 12;
    app.lasers
        .push(Laser::new(app.player.pos, app.player.size, &app.config));
    app.powerups.push(Powerup::new(
        PowerupKind::Speed,
        Vec2::new(50.0, 50.0),
        &app.config,
    ));
    app.player.take_damage(15);
    let old_id = app.player.id;

    app.reset();

    assert_eq!(app.game_state, GameState::Playing);
    assert_eq!(app.kills, 0);
    assert_eq!(app.score, 0);
    assert_eq!(app.tick_count, 0);
    assert!(app.enemies.is_empty());
    assert!(app.lasers.is_empty());
    assert!(app.powerups.is_empty());
    assert!(app.animations.is_empty());
    assert_eq!(app.spawn_interval, 0.5);
    // Fresh player at the default spawn with everything restored
    assert_eq!(app.player.health, 50);
    assert_eq!(app.player.pos, Vec2::new(325.0, 500.0));
    assert_eq!(app.player.bombs, 3);
    assert_eq!(app.player.fire_delay, app.config.fire_delay);
    assert_eq!(app.player.laser_color, LaserColor::Standard);
    assert_ne!(app.player.id, old_id);
}

#[test]
fn test_score_formula_uses_seconds_in_minute() {
    let mut app = quiet_app();
    app.kills = 2;
    app.tick_count = 299;

    tick(&mut app);
    assert_eq!(app.elapsed_seconds, 5);
    assert_eq!(app.score, 65);

    // The seconds term wraps each minute
    app.tick_count = 3659;
    tick(&mut app);
    assert_eq!(app.elapsed_minutes, 1);
    assert_eq!(app.elapsed_seconds, 1);
    assert_eq!(app.score, 61);
}
