use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    RestoreError,
    core::{
        grid::Grid,
        piece::{CellPosition, Piece, PieceColor},
    },
};

use super::CheatSet;

/// The surviving cells of one locked piece.
///
/// A record starts with the four cells of the piece at lock time and loses
/// cells as the rows they sit in are cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedPiece {
    pub id: usize,
    pub color: PieceColor,
    pub cells: ArrayVec<CellPosition, 4>,
}

impl LockedPiece {
    #[must_use]
    pub fn from_piece(id: usize, piece: &Piece) -> Self {
        Self {
            id,
            color: piece.color(),
            cells: piece.cells().iter().copied().collect(),
        }
    }
}

/// Updates locked-piece records after `cleared_rows` (pre-clear indices) were
/// removed from the grid.
///
/// Cells in a cleared row are dropped, every other cell moves down by the
/// number of cleared rows beneath it, and records left without cells are
/// removed.
pub fn apply_row_clear(records: &mut Vec<LockedPiece>, cleared_rows: &[usize]) {
    if cleared_rows.is_empty() {
        return;
    }
    for record in records.iter_mut() {
        record
            .cells
            .retain(|cell| !usize::try_from(cell.y).is_ok_and(|y| cleared_rows.contains(&y)));
        for cell in &mut record.cells {
            let below = cleared_rows
                .iter()
                .filter(|&&row| i64::try_from(row).is_ok_and(|row| row > i64::from(cell.y)))
                .count();
            cell.y += i32::try_from(below).unwrap_or(i32::MAX);
        }
    }
    records.retain(|record| !record.cells.is_empty());
}

/// Replays locked-piece records onto an empty `grid`.
pub fn replay_records(grid: &mut Grid, records: &[LockedPiece]) -> Result<(), RestoreError> {
    for record in records {
        for &cell in &record.cells {
            let CellPosition { x, y } = cell;
            match grid.block(cell) {
                None => return Err(RestoreError::OutOfBounds { id: record.id, x, y }),
                Some(block) if !block.is_empty() => {
                    return Err(RestoreError::Overlap { id: record.id, x, y });
                }
                Some(_) => grid.fill(cell, record.color),
            }
        }
    }
    Ok(())
}

/// Everything needed to resume a session: the part of a save file owned by the
/// engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub cheats: CheatSet,
    pub score: usize,
    pub level: usize,
    pub locked_pieces: Vec<LockedPiece>,
}
