use std::io;

use crate::{model::leaderboard::Leaderboard, store::DataStore};

pub(crate) fn run(store: &DataStore) -> anyhow::Result<()> {
    let leaderboard = store.load_leaderboard()?;
    let mut out = io::stdout().lock();
    write_table(&mut out, &leaderboard)?;
    Ok(())
}

fn write_table<W>(out: &mut W, leaderboard: &Leaderboard) -> io::Result<()>
where
    W: io::Write,
{
    if leaderboard.entries().is_empty() {
        writeln!(out, "No scores yet")?;
        return Ok(());
    }
    writeln!(out, "{:>4}  {:<8}  {:>8}  {:>5}", "#", "Initials", "Score", "Level")?;
    for (rank, entry) in leaderboard.entries().iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<8}  {:>8}  {:>5}",
            rank + 1,
            entry.initials,
            entry.score,
            entry.level
        )?;
    }
    out.flush()
}
