use std::collections::{HashSet, VecDeque};

use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::tile::{Annotation, Tile, TileView};
use crate::types::{CellCount, Coord2, ToNdIndex, neighbors};
use crate::GameConfig;

/// Outcome of a reveal action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have changed anything a renderer shows.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The playing field: an owned 2-D arena of tiles indexed `(x, y)`.
///
/// Holds exactly `mines` mine tiles at all times after generation. The board
/// regenerates itself wholesale while the first revealed tile would be a mine,
/// so the first click of a randomly generated game is never a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    size: Coord2,
    mines: CellCount,
    cells: Array2<Tile>,
    started: bool,
    seed: u64,
}

impl Board {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let size = config.size;
        let mut board = Self {
            size,
            mines: config.mines,
            cells: Array2::default((size.0 as usize, size.1 as usize)),
            started: false,
            seed,
        };
        board.generate();
        board
    }

    /// Builds a board from an explicit mine layout. Duplicate coordinates
    /// collapse into one mine. Boards built this way count as already started,
    /// so the given layout is never re-rolled away.
    pub fn with_mines(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mask: Array2<bool> = Array2::default((size.0 as usize, size.1 as usize));
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoordinates);
            }
            mask[coords.to_nd_index()] = true;
        }

        let mines = mask.iter().filter(|&&mine| mine).count() as CellCount;
        let mut board = Self {
            size,
            mines,
            cells: mask.mapv(Tile::with_mine),
            started: true,
            seed: 0,
        };
        board.compute_adjacency();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// # Panics
    ///
    /// Panics when `coords` lies outside the board. Mutating operations
    /// tolerate out-of-range input; the read accessors expect callers to
    /// iterate within [`Board::size`].
    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.cells[coords.to_nd_index()].is_mine()
    }

    /// # Panics
    ///
    /// Panics when `coords` lies outside the board, like [`Board::has_mine_at`].
    pub fn tile_at(&self, coords: Coord2) -> TileView {
        self.cells[coords.to_nd_index()].view()
    }

    /// Repopulates every cell: the first `mines` tiles of a flat run are mined,
    /// a uniform Fisher-Yates shuffle permutes them, and the run is split into
    /// `width` columns of `height`. Uniform by drawing each swap partner from
    /// the shrinking suffix; the reference implementation sampled the full
    /// range, which is not a uniform shuffle and is deliberately not kept.
    fn generate(&mut self) {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        self.seed = rng.random();

        let mut flat: Vec<Tile> = (0..self.cells.len())
            .map(|i| Tile::with_mine(i < usize::from(self.mines)))
            .collect();
        for i in (1..flat.len()).rev() {
            let j = rng.random_range(0..=i);
            flat.swap(i, j);
        }

        self.cells = Array2::from_shape_vec((self.size.0 as usize, self.size.1 as usize), flat)
            .expect("flat tile run matches the board area");
        self.compute_adjacency();
        log::debug!(
            "generated {}x{} board with {} mines",
            self.size.0,
            self.size.1,
            self.mines
        );
    }

    fn compute_adjacency(&mut self) {
        for x in 0..self.size.0 {
            for y in 0..self.size.1 {
                if self.cells[(x, y).to_nd_index()].is_mine() {
                    continue;
                }
                let count = neighbors((x, y), self.size)
                    .filter(|&pos| self.cells[pos.to_nd_index()].is_mine())
                    .count() as u8;
                self.cells[(x, y).to_nd_index()].set_adjacent_mines(count);
            }
        }
    }

    /// Reveals the tile at `coords`, cascading through connected zero-count
    /// tiles and their numbered border. Out-of-range, already-revealed, and
    /// flagged targets are tolerated as no-ops.
    pub fn reveal_at(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if !self.in_bounds(coords) {
            return NoChange;
        }
        let target = &self.cells[coords.to_nd_index()];
        if target.is_revealed() || target.annotation() == Annotation::Flag {
            return NoChange;
        }

        if !self.started {
            self.started = true;
            while self.cells[coords.to_nd_index()].is_mine() {
                log::debug!("first reveal at {:?} would hit a mine, re-rolling", coords);
                self.generate();
            }
        }

        // Explicit work queue instead of call recursion so a large empty
        // region cannot overflow the stack.
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::from([coords]);
        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }

            let tile = &mut self.cells[visit.to_nd_index()];
            if tile.is_revealed() {
                continue;
            }

            // Only the clicked target can be a mine here: the cascade expands
            // from zero-count tiles, whose neighbors are never mines. Reveal
            // it with game-over context so it resolves to the plain explosion
            // rather than the neutral win-sweep decoration.
            if tile.is_mine() {
                tile.reveal(true);
                self.reveal_all(true);
                return Exploded;
            }

            let view = tile.reveal(false);
            let cascades = tile.adjacent_mines() == 0;
            log::trace!("revealed {:?} as {:?}", visit, view);

            // Flagged tiles in a zero region open too (keeping their flag
            // visual), so the whole region and its border come up at once.
            if cascades {
                to_visit.extend(
                    neighbors(visit, self.size)
                        .filter(|&pos| !self.cells[pos.to_nd_index()].is_revealed())
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }

        if self.is_won() {
            self.reveal_all(false);
            Won
        } else {
            Revealed
        }
    }

    /// Cycles the annotation at `coords`, returning the remaining-flag counter
    /// delta. Out-of-range coordinates are a no-op.
    pub fn cycle_annotation_at(&mut self, coords: Coord2) -> i32 {
        if !self.in_bounds(coords) {
            return 0;
        }
        self.cells[coords.to_nd_index()].cycle_annotation()
    }

    /// Won iff every non-mine tile is revealed.
    pub fn is_won(&self) -> bool {
        self.cells
            .iter()
            .all(|tile| tile.is_mine() || tile.is_revealed())
    }

    fn reveal_all(&mut self, game_over: bool) {
        for tile in self.cells.iter_mut() {
            tile.reveal(game_over);
        }
    }

    fn in_bounds(&self, coords: Coord2) -> bool {
        coords.0 < self.size.0 && coords.1 < self.size.1
    }
}
