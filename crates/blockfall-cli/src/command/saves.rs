use std::io;

use anyhow::Context;

use crate::store::{DataStore, MAX_SAVES, SaveSlot};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SavesArg {
    #[command(subcommand)]
    action: Option<SavesAction>,
}

#[derive(Debug, Clone, clap::Subcommand)]
enum SavesAction {
    /// List saved games (default)
    List,
    /// Delete the saved game in a slot
    Delete {
        /// Slot number, 1 to 5
        #[clap(value_parser = clap::value_parser!(u8).range(1..=5))]
        slot: u8,
    },
}

pub(crate) fn run(store: &DataStore, arg: &SavesArg) -> anyhow::Result<()> {
    match arg.action.as_ref().unwrap_or(&SavesAction::List) {
        SavesAction::List => {
            let saves = store.list_saves()?;
            let mut out = io::stdout().lock();
            write_list(&mut out, &saves)?;
        }
        SavesAction::Delete { slot } => {
            store
                .delete_game(usize::from(*slot))
                .with_context(|| format!("No saved game in slot {slot}"))?;
            println!("Saved Game has been deleted!");
        }
    }
    Ok(())
}

fn write_list<W>(out: &mut W, saves: &[SaveSlot]) -> io::Result<()>
where
    W: io::Write,
{
    if saves.is_empty() {
        writeln!(out, "There are no saved games")?;
        return Ok(());
    }
    for save in saves {
        match &save.game {
            Ok(game) => writeln!(
                out,
                "[{}/{MAX_SAVES}] {:<20} Score: {} Level: {}  ({})",
                save.slot,
                game.display_name(),
                game.session.score,
                game.session.level,
                game.saved_at.format("%Y-%m-%d %H:%M")
            )?,
            Err(err) => writeln!(
                out,
                "[{}/{MAX_SAVES}] {:<20} {err}",
                save.slot, "(unreadable)"
            )?,
        }
    }
    out.flush()
}
