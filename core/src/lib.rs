//! Core of a single-player tile-revealing puzzle game: board generation,
//! flood reveal, first-click re-roll, and win/loss detection. Rendering and
//! input decoding live in a presentation adapter that consumes [`TileView`],
//! [`FaceState`], and the counter accessors, and produces [`Action`]s.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod session;
mod tile;
mod types;

/// Validated board parameters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Rejects zero-sized boards and mine counts outside `[0, width*height)`.
    /// A fully mined board is forbidden outright: the first-click re-roll
    /// could never find a safe permutation of it.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (width, height) = size;
        if width == 0 || height == 0 || mines >= total(width, height) {
            return Err(GameError::InvalidConfiguration {
                width,
                height,
                mines,
            });
        }
        Ok(Self { size, mines })
    }

    pub const fn total_cells(&self) -> CellCount {
        total(self.size.0, self.size.1)
    }

    pub const fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_mineless_single_cell_board() {
        let config = GameConfig::new((1, 1), 0).unwrap();
        assert_eq!(config.total_cells(), 1);
        assert_eq!(config.safe_cell_count(), 1);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(GameConfig::new((0, 9), 0).is_err());
        assert!(GameConfig::new((9, 0), 0).is_err());
    }

    #[test]
    fn rejects_mine_counts_that_fill_or_overflow_the_board() {
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((3, 3), 9).is_err());
        assert!(GameConfig::new((3, 3), 10).is_err());
    }
}
