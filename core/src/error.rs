use thiserror::Error;

use crate::types::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid configuration: {mines} mines do not fit a {width}x{height} board")]
    InvalidConfiguration {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("coordinates outside the board")]
    InvalidCoordinates,
}

pub type Result<T> = core::result::Result<T, GameError>;
