/// Top-level state machine for a session.
///
/// `Playing` becomes `GameOver` when the player's health reaches zero;
/// the only way back is the explicit retry action, which rebuilds the
/// session from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    GameOver,
}
