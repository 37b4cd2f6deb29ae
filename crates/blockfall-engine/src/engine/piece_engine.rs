use std::time::Duration;

use crate::core::{
    grid::{Grid, GridSize},
    piece::{Piece, PieceKind, Shape, to_coord},
};

use super::{GameStats, PieceGenerator, PieceSeed};

/// Horizontal offsets tried, in order, when rotating: in place, one column
/// left, one column right.
const WALL_KICKS: [i32; 3] = [0, -1, 1];

/// The falling-piece state machine.
///
/// Owns the [`Grid`], the current falling piece, the piece generator and the
/// score/level state. The engine owns no clock: a driver calls
/// [`tick`](Self::tick) every [`fall_delay`](Self::fall_delay) and forwards
/// player input to the movement commands.
///
/// A move that would collide is simply not applied. Once the game is over every
/// command is a no-op.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GridSize, PieceEngine};
///
/// let mut engine = PieceEngine::new(GridSize::default());
///
/// engine.move_left();
/// engine.rotate();
/// engine.hard_drop();
///
/// assert_eq!(engine.stats().locked_pieces(), 1);
/// assert!(!engine.is_game_over());
/// ```
#[derive(Debug, Clone)]
pub struct PieceEngine {
    grid: Grid,
    current: Piece,
    generator: PieceGenerator,
    stats: GameStats,
    game_over: bool,
}

impl PieceEngine {
    /// Creates an engine with an empty grid and a randomly seeded generator.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self::with_generator(size, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a fixed seed for the piece sequence.
    #[must_use]
    pub fn with_seed(size: GridSize, seed: PieceSeed) -> Self {
        Self::with_generator(size, PieceGenerator::with_seed(seed))
    }

    fn with_generator(size: GridSize, mut generator: PieceGenerator) -> Self {
        let current = Piece::spawn(generator.pop_next(), size.width());
        let mut this = Self {
            grid: Grid::new(size),
            current,
            generator,
            stats: GameStats::new(),
            game_over: false,
        };
        this.game_over = !this.piece_fits(&this.current);
        this
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn current_piece(&self) -> Piece {
        self.current
    }

    /// Returns the kind the next spawn will install.
    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.generator.peek_next()
    }

    /// Returns where the current piece would lock if hard-dropped now.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        let mut ghost = self.current;
        while self.piece_fits(&ghost.down()) {
            ghost = ghost.down();
        }
        ghost
    }

    /// Returns the seed of the piece sequence, so a game can be replayed.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.generator.seed()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.stats.level()
    }

    #[must_use]
    pub fn fall_delay(&self) -> Duration {
        self.stats.fall_delay()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Returns whether `shape` can sit with its top-left corner at `(col, row)`.
    ///
    /// A placement is rejected when an occupied cell lands left of column 0,
    /// right of the last column, below the last row, or on a locked cell.
    /// Cells above row 0 are accepted.
    #[must_use]
    pub fn fits(&self, shape: &Shape, col: i32, row: i32) -> bool {
        let width = to_coord(self.grid.width());
        let height = to_coord(self.grid.height());
        shape.occupied_offsets().all(|(dx, dy)| {
            let x = col + to_coord(dx);
            let y = row + to_coord(dy);
            if x < 0 || x >= width || y >= height {
                return false;
            }
            match (usize::try_from(x), usize::try_from(y)) {
                (Ok(x), Ok(y)) => !self.grid.is_occupied(x, y),
                // Above the grid there is nothing to collide with
                _ => true,
            }
        })
    }

    fn piece_fits(&self, piece: &Piece) -> bool {
        let position = piece.position();
        self.fits(&piece.shape(), position.x(), position.y())
    }

    /// Replaces the current piece if the candidate fits.
    fn try_place(&mut self, candidate: Piece) -> bool {
        if !self.piece_fits(&candidate) {
            return false;
        }
        self.current = candidate;
        true
    }

    /// Gravity step: moves the piece down one row, or locks it if it cannot.
    pub fn tick(&mut self) {
        self.soft_drop();
    }

    pub fn move_left(&mut self) {
        if self.game_over {
            return;
        }
        self.try_place(self.current.left());
    }

    pub fn move_right(&mut self) {
        if self.game_over {
            return;
        }
        self.try_place(self.current.right());
    }

    /// Moves the piece down one row, or locks it if it cannot descend.
    pub fn soft_drop(&mut self) {
        if self.game_over {
            return;
        }
        if !self.try_place(self.current.down()) {
            self.lock_and_spawn();
        }
    }

    /// Drops the piece as far as it goes and locks it.
    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        self.current = self.ghost_piece();
        self.lock_and_spawn();
    }

    /// Rotates the piece 90° clockwise.
    ///
    /// The rotated piece is tried in place, then one column left, then one
    /// column right. If none fits the piece is left unchanged.
    pub fn rotate(&mut self) {
        if self.game_over {
            return;
        }
        let rotated = self.current.rotated_clockwise();
        for dx in WALL_KICKS {
            if self.try_place(rotated.shifted(dx, 0)) {
                return;
            }
        }
    }

    fn lock_and_spawn(&mut self) {
        self.grid.lock_piece(&self.current);
        let cleared_lines = self.grid.clear_full_rows();
        self.stats.complete_piece_lock(cleared_lines);

        // The new piece is installed even when it collides so that it stays visible
        self.current = Piece::spawn(self.generator.pop_next(), self.grid.width());
        if !self.piece_fits(&self.current) {
            self.game_over = true;
        }
    }
}
