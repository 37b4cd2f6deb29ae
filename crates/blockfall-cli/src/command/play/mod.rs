use anyhow::Context as _;
use blockfall_engine::{GameStats, GridSize, PieceEngine, PieceSeed};
use serde::Serialize;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of grid columns
    #[clap(long, default_value_t = GridSize::DEFAULT.width())]
    pub(crate) width: usize,
    /// Number of grid rows
    #[clap(long, default_value_t = GridSize::DEFAULT.height())]
    pub(crate) height: usize,
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Hide the landing preview of the falling piece
    #[clap(long, default_value_t = false)]
    pub(crate) no_ghost: bool,
    /// Print the final result as JSON instead of a text line
    #[clap(long, default_value_t = false)]
    pub(crate) json: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            width: GridSize::DEFAULT.width(),
            height: GridSize::DEFAULT.height(),
            seed: None,
            no_ghost: false,
            json: false,
        }
    }
}

/// Final result of a session, printed after the terminal is restored.
#[derive(Debug, Serialize)]
struct GameSummary<'a> {
    seed: PieceSeed,
    width: usize,
    height: usize,
    game_over: bool,
    stats: &'a GameStats,
}

impl<'a> GameSummary<'a> {
    fn new(engine: &'a PieceEngine) -> Self {
        Self {
            seed: engine.seed(),
            width: engine.grid().width(),
            height: engine.grid().height(),
            game_over: engine.is_game_over(),
            stats: engine.stats(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        width,
        height,
        seed,
        no_ghost,
        json,
    } = arg;

    let size = GridSize::new(*width, *height)
        .with_context(|| format!("invalid grid size {width}x{height}"))?;
    let engine = match seed {
        Some(seed) => PieceEngine::with_seed(size, *seed),
        None => PieceEngine::new(size),
    };

    let mut app = PlayApp::new(engine, !*no_ghost);
    Tui::new().run(&mut app)?;

    let summary = GameSummary::new(app.engine());
    if *json {
        let summary =
            serde_json::to_string_pretty(&summary).context("failed to serialize game result")?;
        println!("{summary}");
    } else {
        println!(
            "Score: {}  Level: {}  Lines: {}  Seed: {}",
            summary.stats.score(),
            summary.stats.level(),
            summary.stats.cleared_lines(),
            summary.seed,
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_summary_json() {
        let seed: PieceSeed = SEED.parse().unwrap();
        let mut engine = PieceEngine::with_seed(GridSize::new(10, 20).unwrap(), seed);
        engine.hard_drop();

        let json = serde_json::to_value(GameSummary::new(&engine)).unwrap();
        assert_eq!(json["seed"], SEED);
        assert_eq!(json["width"], 10);
        assert_eq!(json["height"], 20);
        assert_eq!(json["game_over"], false);
        assert_eq!(json["stats"]["locked_pieces"], 1);
        assert_eq!(json["stats"]["score"], 0);
    }
}
