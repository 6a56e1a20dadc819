use glam::Vec2;
use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::animation::Animation;
use crate::entities::{Enemy, GameState, Laser, LaserColor, Particle, Player, Powerup, PowerupKind};

/// Width of the stats panel on the right edge, in cells
const PANEL_WIDTH: u16 = 20;

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub lasers: &'a [Laser],
    pub powerups: &'a [Powerup],
    pub animations: &'a [Animation],
    pub kills: u32,
    pub score: u32,
    pub elapsed_minutes: u64,
    pub elapsed_seconds: u64,
    pub frame_count: u64,
    pub fps: u32,
    pub field_size: Vec2,
    pub area: Rect,
}

/// Maps field-pixel coordinates onto a rectangle of terminal cells.
struct FieldProjection {
    area: Rect,
    scale: Vec2,
}

impl FieldProjection {
    fn new(field_size: Vec2, area: Rect) -> Self {
        Self {
            area,
            scale: Vec2::new(
                area.width as f32 / field_size.x,
                area.height as f32 / field_size.y,
            ),
        }
    }

    /// Cell for a field position. May land outside the drawable area (an
    /// enemy easing in from above the field, say); drawing clips per cell.
    fn cell(&self, pos: Vec2) -> (i32, i32) {
        (
            self.area.x as i32 + (pos.x * self.scale.x).floor() as i32,
            self.area.y as i32 + (pos.y * self.scale.y).floor() as i32,
        )
    }
}

/// Writes a clipped string into the buffer, treating spaces as transparent
/// so overlapping sprites do not punch holes in each other.
fn put_str(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < bounds.top() as i32 || y >= bounds.bottom() as i32 {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if ch == ' ' || cx < bounds.left() as i32 || cx >= bounds.right() as i32 {
            continue;
        }
        if let Some(cell) = buffer.cell_mut(Position::new(cx as u16, y as u16)) {
            cell.set_char(ch);
            cell.set_style(style);
        }
    }
}

fn draw_sprite(
    buffer: &mut Buffer,
    projection: &FieldProjection,
    pos: Vec2,
    lines: &[&str],
    style: Style,
) {
    let (x, y) = projection.cell(pos);
    for (row, line) in lines.iter().enumerate() {
        put_str(buffer, projection.area, x, y + row as i32, line, style);
    }
}

fn draw_trail(buffer: &mut Buffer, projection: &FieldProjection, trail: &[Particle]) {
    for particle in trail {
        // Fade by remapping opacity onto the terminal's gray ramp
        let opacity = particle.opacity();
        let color = if opacity > 0.45 {
            Color::White
        } else if opacity > 0.25 {
            Color::Gray
        } else {
            Color::DarkGray
        };
        let (x, y) = projection.cell(particle.pos);
        put_str(buffer, projection.area, x, y, ".", Style::default().fg(color));
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches on the session state
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::Playing => self.render_game(frame, view),
            GameState::GameOver => {
                // Keep the field visible underneath so leftover enemies
                // drain and the final explosion plays out
                self.render_game(frame, view);
                self.render_game_over_overlay(frame, view);
            }
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let field_outer = Rect {
            x: area.x,
            y: area.y,
            width: area.width.saturating_sub(PANEL_WIDTH),
            height: area.height,
        };
        let panel_area = Rect {
            x: field_outer.right(),
            y: area.y,
            width: area.width - field_outer.width,
            height: area.height,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let field_area = block.inner(field_outer);
        frame.render_widget(block, field_outer);
        self.render_stats_panel(frame, view, panel_area);

        if field_area.width == 0 || field_area.height == 0 {
            return;
        }
        let projection = FieldProjection::new(view.field_size, field_area);
        let buffer = frame.buffer_mut();

        // Twinkling starfield backdrop
        if view.frame_count % 10 < 5 {
            let mut rng = rand::rng();
            for row in 0..field_area.height {
                let stars: String = (0..field_area.width)
                    .map(|_| if rng.random_bool(0.02) { '.' } else { ' ' })
                    .collect();
                put_str(
                    buffer,
                    field_area,
                    field_area.x as i32,
                    (field_area.y + row) as i32,
                    &stars,
                    Style::default().fg(Color::DarkGray),
                );
            }
        }

        // Player and exhaust trail
        draw_trail(buffer, &projection, &view.player.trail);
        if view.player.is_alive() {
            draw_sprite(
                buffer,
                &projection,
                view.player.pos,
                &view.player.get_sprite_lines(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            );
        }

        // Enemies and their trails
        for enemy in view.enemies {
            draw_trail(buffer, &projection, &enemy.trail);
            draw_sprite(
                buffer,
                &projection,
                enemy.pos,
                &enemy.get_sprite_lines(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }

        // Lasers take the player's current palette
        let laser_color = match view.player.laser_color {
            LaserColor::Standard => Color::LightGreen,
            LaserColor::Boosted => Color::Blue,
        };
        for laser in view.lasers {
            let (x, y) = projection.cell(laser.pos);
            put_str(
                buffer,
                field_area,
                x,
                y,
                "|",
                Style::default()
                    .fg(laser_color)
                    .add_modifier(Modifier::BOLD),
            );
        }

        for powerup in view.powerups {
            let color = match powerup.kind {
                PowerupKind::Bomb => Color::LightRed,
                PowerupKind::Speed => Color::Cyan,
            };
            let (x, y) = projection.cell(powerup.pos);
            put_str(
                buffer,
                field_area,
                x,
                y,
                &powerup.symbol().to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        // Destruction effects render last so they sit on top; the art is
        // centered inside the animation's projected rectangle
        for animation in view.animations {
            let art = animation.art();
            let (x0, y0) = projection.cell(animation.pos);
            let cells_w = (animation.size.x * projection.scale.x) as i32;
            let cells_h = (animation.size.y * projection.scale.y) as i32;
            let art_w = art.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
            let art_h = art.len() as i32;
            let x = x0 + (cells_w - art_w) / 2;
            let y = y0 + (cells_h - art_h) / 2;
            for (row, line) in art.iter().enumerate() {
                put_str(
                    buffer,
                    field_area,
                    x,
                    y + row as i32,
                    line,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [B: Bomb] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: field_area.x,
            y: field_area.bottom().saturating_sub(1),
            width: field_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(controls).alignment(Alignment::Center),
            controls_area,
        );
    }

    fn render_stats_panel(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        if area.width < 3 {
            return;
        }

        let label = Style::default().fg(Color::DarkGray);
        let hp_style = if view.player.health > 25 {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else if view.player.health > 10 {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("HP      ", label),
                Span::styled(format!("{}", view.player.health), hp_style),
            ]),
            Line::from(vec![
                Span::styled("Bombs   ", label),
                Span::styled(
                    format!("{}", view.player.bombs),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Kills   ", label),
                Span::styled(
                    format!("{}", view.kills),
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Enemies ", label),
                Span::styled(
                    format!("{}", view.enemies.len()),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Time    ", label),
                Span::styled(
                    format!("{:02}:{:02}", view.elapsed_minutes, view.elapsed_seconds),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Score   ", label),
                Span::styled(
                    format!("{}", view.score),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("FPS     ", label),
                Span::styled(format!("{}", view.fps), Style::default().fg(Color::White)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_game_over_overlay(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let text = vec![
            Line::from(""),
            Line::from("GAME OVER").red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score)).yellow().bold(),
            Line::from(format!("Kills: {}", view.kills)).cyan(),
            Line::from(format!(
                "Time Survived: {:02}:{:02}",
                view.elapsed_minutes, view.elapsed_seconds
            ))
            .cyan(),
            Line::from(""),
            Line::from("Press R to retry").white(),
            Line::from("Press Q to quit").white(),
        ];

        let width = 36.min(area.width);
        let height = 11.min(area.height);
        let overlay_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            overlay_area,
        );
    }
}
