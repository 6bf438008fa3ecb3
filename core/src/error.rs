use thiserror::Error;

use crate::{CellCount, Coord2};

/// Errors raised while building a game, never by a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates {0:?}")]
    InvalidCoords(Coord2),
    #[error("Too many mines, requested {requested} but the board only fits {capacity}")]
    TooManyMines {
        requested: CellCount,
        capacity: CellCount,
    },
    #[error("Board must be at least one cell wide and tall")]
    EmptyBoard,
    #[error("Invalid value for {name}: {value:?}")]
    InvalidOption { name: &'static str, value: String },
}

pub type Result<T> = core::result::Result<T, GameError>;
