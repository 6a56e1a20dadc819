use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::entities::GameState;

/// Held levels and press edges for one frame, handed to the simulation as a
/// plain value.
///
/// Movement and fire are levels (true while the key is down); bomb, restart,
/// and quit are edges, registered on the down transition and held pending
/// until a simulation tick consumes them. The bomb key in particular must
/// not retrigger every tick while held, so the edge is detected here, not in
/// the simulation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
    pub bomb: bool,
    pub restart: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// Clears the press edges. Called between catch-up ticks so a frame
    /// that runs several ticks cannot fire the same edge twice.
    pub fn consume_edges(&mut self) {
        self.bomb = false;
        self.restart = false;
    }
}

/// Tracks which movement keys are currently held down
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
    bomb: bool,
}

/// Edges waiting for a simulation tick to consume them
#[derive(Debug, Default)]
struct PendingEdges {
    bomb: bool,
    restart: bool,
    quit: bool,
}

/// Polls raw terminal events and condenses them into per-frame snapshots
pub struct InputManager {
    key_state: KeyState,
    pending: PendingEdges,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            key_state: KeyState::default(),
            pending: PendingEdges::default(),
        }
    }

    /// Drains all available terminal events without blocking. Call once per
    /// frame, before taking the snapshot.
    pub fn poll_events(&mut self, game_state: GameState) -> color_eyre::Result<()> {
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key_event) => {
                    self.handle_key_event(key_event, game_state);
                }
                Event::Mouse(_) => {
                    // Mouse events currently ignored
                }
                Event::Resize(_, _) => {
                    // The renderer rescales from the frame area every draw
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Takes the frame's snapshot. Pending edges stay registered: a fast
    /// frame can poll a press but run zero simulation ticks, and the edge
    /// must survive into the next frame rather than vanish unseen. The run
    /// loop calls [`InputManager::consume_edges`] once a tick has seen it.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.key_state.left,
            right: self.key_state.right,
            up: self.key_state.up,
            down: self.key_state.down,
            fire: self.key_state.fire,
            bomb: self.pending.bomb,
            restart: self.pending.restart,
            quit: self.pending.quit,
        }
    }

    /// Forgets the pending edges. Called when a simulation tick (or a
    /// frame-level action like restart) has consumed the snapshot.
    pub fn consume_edges(&mut self) {
        self.pending = PendingEdges::default();
    }

    fn handle_key_event(&mut self, key_event: KeyEvent, game_state: GameState) {
        match key_event.kind {
            KeyEventKind::Press => {
                self.handle_key_press(key_event, game_state);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: GameState) {
        // Quit keys work in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.pending.quit = true;
            return;
        }

        // Retry only means something on the game-over screen
        if game_state == GameState::GameOver {
            if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                self.pending.restart = true;
            }
            return;
        }

        match key_event.code {
            // Movement keys - WASD or arrows; pressing one side of an axis
            // clears the other so terminals without release events stay
            // steerable
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = true;
                self.key_state.down = false;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = true;
                self.key_state.up = false;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
            }
            // Terminals without the keyboard enhancement send no release
            // events, so fire latches on after the first press there.
            // Held fire is the normal way to play, so the latch stands;
            // movement gets the opposite-key mitigation above instead
            KeyCode::Char(' ') => {
                self.key_state.fire = true;
            }
            // Bomb registers an edge only on the down transition; key
            // auto-repeat arrives as further presses while held and must
            // not count
            KeyCode::Char('b') | KeyCode::Char('B') => {
                if !self.key_state.bomb {
                    self.pending.bomb = true;
                }
                self.key_state.bomb = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = false;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = false;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.key_state.bomb = false;
            }
            _ => {}
        }
    }
}
