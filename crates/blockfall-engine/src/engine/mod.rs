//! Game engine logic and state management.
//!
//! - [`PieceEngine`] - The falling-piece state machine: movement, rotation,
//!   locking, line clears and spawning
//! - [`GameStats`] - Score, level and fall-delay progression
//! - [`PieceGenerator`] - Uniform random piece supply with one-piece preview
//! - [`PieceSeed`] - Seed for a deterministic piece sequence
//!
//! # Game Flow
//!
//! 1. Create a [`PieceEngine`]; the first piece spawns at the top centre
//! 2. The driver calls [`PieceEngine::tick`] every [`PieceEngine::fall_delay`]
//!    and forwards player moves, rotations and drops
//! 3. A piece that cannot descend locks, full rows clear and the score updates
//! 4. The next piece spawns; if it collides immediately the game is over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{GridSize, PieceEngine};
//!
//! let mut engine = PieceEngine::new(GridSize::new(10, 20).unwrap());
//!
//! while !engine.is_game_over() {
//!     engine.hard_drop();
//! }
//!
//! assert!(engine.stats().locked_pieces() > 0);
//! ```

pub use self::{game_stats::*, piece_engine::*, piece_generator::*};

mod game_stats;
mod piece_engine;
mod piece_generator;
