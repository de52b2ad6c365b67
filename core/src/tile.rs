use serde::{Deserialize, Serialize};

/// Player-set marker on an unrevealed tile.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Annotation {
    #[default]
    None,
    Flag,
    Question,
}

/// What the presentation adapter should draw for one tile.
///
/// `Exploded { found: true }` is the neutral decoration a mine receives when it
/// is swept open on a win, as opposed to the losing sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Covered,
    Flagged,
    Questioned,
    Revealed(u8),
    Exploded { found: bool },
    WrongFlag,
}

/// Single cell of the board.
///
/// `adjacent_mines` is filled in once when the board is generated and never
/// touched again; tiles are replaced wholesale whenever the board regenerates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    mine: bool,
    revealed: bool,
    adjacent_mines: u8,
    annotation: Annotation,
    // Whether the (first) reveal happened during the game-over sweep; a flag
    // only resolves to "wrong" and a mine only to the bare explosion on that
    // path, so the view cannot be derived without it.
    revealed_on_game_over: bool,
}

impl Tile {
    pub(crate) fn with_mine(mine: bool) -> Self {
        Self {
            mine,
            ..Self::default()
        }
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub fn annotation(&self) -> Annotation {
        self.annotation
    }

    /// Reveals the tile and resolves its view. Already-revealed tiles keep
    /// whatever they resolved to the first time.
    pub fn reveal(&mut self, game_over: bool) -> TileView {
        if !self.revealed {
            self.revealed = true;
            self.revealed_on_game_over = game_over;
        }
        self.view()
    }

    /// Cycles `None -> Flag -> Question -> None` and returns the delta to
    /// apply to the remaining-flag counter. Revealed tiles are left alone.
    pub fn cycle_annotation(&mut self) -> i32 {
        use Annotation::*;

        if self.revealed {
            return 0;
        }

        let (next, delta) = match self.annotation {
            None => (Flag, -1),
            Flag => (Question, 1),
            Question => (None, 0),
        };
        self.annotation = next;
        delta
    }

    pub fn view(&self) -> TileView {
        use TileView::*;

        if !self.revealed {
            return match self.annotation {
                Annotation::None => Covered,
                Annotation::Flag => Flagged,
                Annotation::Question => Questioned,
            };
        }

        if self.annotation == Annotation::Flag {
            // A reveal never clears a flag; it only turns out wrong when the
            // game-over sweep exposes a flagged non-mine.
            if !self.mine && self.revealed_on_game_over {
                WrongFlag
            } else {
                Flagged
            }
        } else if self.mine {
            Exploded {
                found: !self.revealed_on_game_over,
            }
        } else {
            Revealed(self.adjacent_mines)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_cycle_and_counter_deltas() {
        let mut tile = Tile::default();

        assert_eq!(tile.cycle_annotation(), -1);
        assert_eq!(tile.view(), TileView::Flagged);
        assert_eq!(tile.cycle_annotation(), 1);
        assert_eq!(tile.view(), TileView::Questioned);
        assert_eq!(tile.cycle_annotation(), 0);
        assert_eq!(tile.view(), TileView::Covered);
    }

    #[test]
    fn revealed_tile_ignores_annotation_cycle() {
        let mut tile = Tile::default();
        tile.set_adjacent_mines(3);

        assert_eq!(tile.reveal(false), TileView::Revealed(3));
        assert_eq!(tile.cycle_annotation(), 0);
        assert_eq!(tile.view(), TileView::Revealed(3));
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut tile = Tile::with_mine(true);

        assert_eq!(tile.reveal(true), TileView::Exploded { found: false });
        // The later winning-style sweep must not repaint the explosion.
        assert_eq!(tile.reveal(false), TileView::Exploded { found: false });
    }

    #[test]
    fn flagged_mine_survives_both_sweeps() {
        let mut tile = Tile::with_mine(true);
        tile.cycle_annotation();

        assert_eq!(tile.reveal(true), TileView::Flagged);

        let mut tile = Tile::with_mine(true);
        tile.cycle_annotation();
        assert_eq!(tile.reveal(false), TileView::Flagged);
    }

    #[test]
    fn flagged_non_mine_is_wrong_only_at_game_over() {
        let mut tile = Tile::default();
        tile.cycle_annotation();
        assert_eq!(tile.reveal(true), TileView::WrongFlag);

        let mut tile = Tile::default();
        tile.cycle_annotation();
        // Cascade reveal mid-game keeps the flag showing.
        assert_eq!(tile.reveal(false), TileView::Flagged);
    }

    #[test]
    fn mine_found_on_win_gets_neutral_decoration() {
        let mut tile = Tile::with_mine(true);
        assert_eq!(tile.reveal(false), TileView::Exploded { found: true });
    }
}
