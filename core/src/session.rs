use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, RevealOutcome};
use crate::error::Result;
use crate::tile::TileView;
use crate::types::{CellCount, Coord, Coord2};
use crate::GameConfig;

/// Terminal or non-terminal status of a session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// State of the restart-button face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaceState {
    Normal,
    Danger,
    Lost,
    Won,
}

/// Logical input actions, decoupled from whatever surface produced them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Reveal(Coord2),
    CycleAnnotation(Coord2),
    Restart,
    NewGame {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
}

/// One game from start to finish: a board plus the timing and counter state
/// the presentation adapter displays around it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    config: GameConfig,
    board: Board,
    outcome: Outcome,
    remaining_flags: i32,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::with_seed(width, height, mines, rand::rng().random())
    }

    pub fn with_seed(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((width, height), mines)?;
        Ok(Self {
            config,
            board: Board::new(config, seed),
            outcome: Outcome::InProgress,
            remaining_flags: i32::from(mines),
            started_at: Utc::now(),
            ended_at: None,
        })
    }

    /// Reconfigures the session in place. Validation happens first: on
    /// `InvalidConfiguration` the running game is left untouched.
    pub fn start(&mut self, width: Coord, height: Coord, mines: CellCount) -> Result<()> {
        let config = GameConfig::new((width, height), mines)?;
        self.begin(config);
        Ok(())
    }

    /// Starts a fresh game with the stored configuration, discarding the
    /// current board entirely.
    pub fn restart(&mut self) {
        self.begin(self.config);
    }

    fn begin(&mut self, config: GameConfig) {
        self.config = config;
        self.board = Board::new(config, rand::rng().random());
        self.outcome = Outcome::InProgress;
        self.remaining_flags = i32::from(config.mines);
        self.started_at = Utc::now();
        self.ended_at = None;
        log::debug!(
            "session started: {}x{} with {} mines",
            config.size.0,
            config.size.1,
            config.mines
        );
    }

    /// Feeds one logical input action through the session. Only `NewGame` can
    /// fail; everything else tolerates out-of-place input as a no-op.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Reveal((x, y)) => {
                self.reveal(x, y);
                Ok(())
            }
            Action::CycleAnnotation((x, y)) => {
                self.cycle_annotation(x, y);
                Ok(())
            }
            Action::Restart => {
                self.restart();
                Ok(())
            }
            Action::NewGame {
                width,
                height,
                mines,
            } => self.start(width, height, mines),
        }
    }

    /// Reveals a tile; ignored once the session has ended.
    pub fn reveal(&mut self, x: Coord, y: Coord) {
        if self.outcome.is_terminal() {
            return;
        }
        match self.board.reveal_at((x, y)) {
            RevealOutcome::Exploded => self.finish(Outcome::Lost),
            RevealOutcome::Won => self.finish(Outcome::Won),
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
    }

    /// Cycles a tile annotation and applies its delta to the remaining-flag
    /// counter; ignored once the session has ended. The counter mirrors a
    /// physical display: it is never validated and may run negative.
    pub fn cycle_annotation(&mut self, x: Coord, y: Coord) {
        if self.outcome.is_terminal() {
            return;
        }
        self.remaining_flags += self.board.cycle_annotation_at((x, y));
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.ended_at = Some(Utc::now());
        log::debug!("session ended: {:?} after {}s", outcome, self.elapsed_secs());
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn remaining_flags(&self) -> i32 {
        self.remaining_flags
    }

    /// # Panics
    ///
    /// Panics when `(x, y)` lies outside the board; renderers iterate within
    /// [`Session::size`].
    pub fn tile_view(&self, x: Coord, y: Coord) -> TileView {
        self.board.tile_at((x, y))
    }

    /// Whole seconds since the game started, frozen at the moment it ended.
    pub fn elapsed_secs(&self) -> u32 {
        (self.ended_at.unwrap_or_else(Utc::now) - self.started_at)
            .num_seconds()
            .max(0) as u32
    }

    /// `pressing` is true while the player holds a tile down; the presentation
    /// adapter tracks that and the face reflects it.
    pub fn face_state(&self, pressing: bool) -> FaceState {
        match self.outcome {
            Outcome::Won => FaceState::Won,
            Outcome::Lost => FaceState::Lost,
            Outcome::InProgress if pressing => FaceState::Danger,
            Outcome::InProgress => FaceState::Normal,
        }
    }
}
