use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine layout does not match the board configuration")]
    InvalidMineLayout,
    #[error("Game is over, the field is locked until a new game")]
    FieldLocked,
    #[error("Marks can only be changed while a game is in progress")]
    NotInProgress,
    #[error("Cell is already revealed")]
    AlreadyRevealed,
    #[error("Cell is not marked")]
    NotMarked,
}

pub type Result<T> = core::result::Result<T, GameError>;
