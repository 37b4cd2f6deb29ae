use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_else(|| Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());

        let args =
            CommandArgs::try_parse_from(["blockfall", "play", "--width", "10", "--no-ghost"])
                .unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert_eq!(arg.width, 10);
        assert_eq!(arg.height, 20);
        assert!(arg.no_ghost);
        assert!(arg.seed.is_none());
        assert!(!arg.json);

        let args = CommandArgs::try_parse_from(["blockfall", "play", "--json"]).unwrap();
        let Some(Mode::Play(arg)) = args.mode else {
            panic!("expected play mode");
        };
        assert!(arg.json);
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]).is_err());
    }
}
