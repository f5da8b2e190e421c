use std::path::PathBuf;

use blockfall_engine::PieceSeed;
use clap::{Parser, Subcommand};

use crate::{
    logging::{self, LogOutput},
    store::DataStore,
};

use self::saves::SavesArg;

mod leaderboard;
mod play;
mod saves;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Directory holding settings, saved games, and the leaderboard
    #[clap(long, global = true, default_value = "./data/")]
    data_dir: PathBuf,
    /// Append log records to this file (the game logs nothing otherwise)
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Fixed piece seed (32 hex digits) for reproducible games
    #[clap(long, global = true)]
    seed: Option<PieceSeed>,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play the game (default)
    Play,
    /// Print the leaderboard
    Leaderboard,
    /// List or delete saved games
    Saves(#[clap(flatten)] SavesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let mode = args.mode.unwrap_or(Mode::Play);

    let log_output = match (&mode, &args.log_file) {
        (_, Some(path)) => LogOutput::File(path),
        (Mode::Play, None) => LogOutput::Off,
        (_, None) => LogOutput::Stderr,
    };
    logging::init(log_output)?;

    let store = DataStore::new(args.data_dir);
    match mode {
        Mode::Play => play::run(store, args.seed)?,
        Mode::Leaderboard => leaderboard::run(&store)?,
        Mode::Saves(arg) => saves::run(&store, &arg)?,
    }
    Ok(())
}
