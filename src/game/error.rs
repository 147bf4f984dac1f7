use thiserror::Error;

/// Faults raised by the game core.
///
/// Losing is not one of them: a finished game is reported through
/// [`GameStatus::GameOver`](super::GameStatus::GameOver).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Every cell of the grid is occupied, nothing more can be placed
    #[error("no free cell available on the grid")]
    NoSpaceAvailable,

    /// The configuration cannot produce a playable game
    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}
