use super::piece::{CellPosition, Piece, PieceColor};

/// Size of one grid cell in window pixels.
pub const CELL_SIZE: u16 = 20;

/// Default window dimensions in pixels (300×500, i.e. a 15×25 grid).
pub const WINDOW_WIDTH: u16 = 300;
pub const WINDOW_HEIGHT: u16 = 500;

/// A single cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Settled cell left by a locked piece.
    Filled(PieceColor),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

/// Occupancy matrix of settled cells.
///
/// The grid has fixed dimensions chosen at construction. Rows are indexed from
/// the top (row 0) to the bottom (`rows - 1`). Cells only go from filled back
/// to empty through [`Grid::clear_completed_rows`].
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::default();
/// let mut piece = Piece::spawn(PieceKind::I, &grid);
/// while piece.move_by(0, 1, &grid) {}
/// grid.lock(&piece);
/// assert_eq!(grid.clear_completed_rows(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: u16,
    rows: u16,
    cells: Vec<Vec<Block>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::from_window(WINDOW_WIDTH, WINDOW_HEIGHT)
    }
}

impl Grid {
    pub const MIN_COLS: u16 = 4;
    pub const MIN_ROWS: u16 = 2;

    /// Creates an empty grid of `cols × rows` cells.
    #[must_use]
    pub fn new(cols: u16, rows: u16) -> Self {
        assert!(cols >= Self::MIN_COLS, "grid needs at least {} columns", Self::MIN_COLS);
        assert!(rows >= Self::MIN_ROWS, "grid needs at least {} rows", Self::MIN_ROWS);
        Self {
            cols,
            rows,
            cells: vec![Self::empty_row(cols); usize::from(rows)],
        }
    }

    /// Creates an empty grid covering a window of the given pixel size.
    #[must_use]
    pub fn from_window(width: u16, height: u16) -> Self {
        Self::new(width / CELL_SIZE, height / CELL_SIZE)
    }

    fn empty_row(cols: u16) -> Vec<Block> {
        vec![Block::Empty; usize::from(cols)]
    }

    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Column where the template origin of a new piece is placed.
    #[must_use]
    pub fn spawn_column(&self) -> i32 {
        (i32::from(self.cols) - 1) / 2
    }

    fn index(&self, pos: CellPosition) -> Option<(usize, usize)> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        (x < usize::from(self.cols) && y < usize::from(self.rows)).then_some((x, y))
    }

    #[must_use]
    pub fn contains(&self, pos: CellPosition) -> bool {
        self.index(pos).is_some()
    }

    /// Returns the cell at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn block(&self, pos: CellPosition) -> Option<Block> {
        let (x, y) = self.index(pos)?;
        Some(self.cells[y][x])
    }

    /// Returns `true` if `pos` is inside the grid and empty.
    #[must_use]
    pub fn is_free(&self, pos: CellPosition) -> bool {
        self.block(pos).is_some_and(Block::is_empty)
    }

    /// Returns `true` if every cell of `piece` is free.
    #[must_use]
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&pos| self.is_free(pos))
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Block]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Iterates over the positions and colors of all filled cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (CellPosition, PieceColor)> + '_ {
        self.cells.iter().zip(0..).flat_map(|(row, y)| {
            row.iter().zip(0..).filter_map(move |(block, x)| match block {
                Block::Empty => None,
                Block::Filled(color) => Some((CellPosition::new(x, y), *color)),
            })
        })
    }

    /// Fills a single cell.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid.
    pub fn fill(&mut self, pos: CellPosition, color: PieceColor) {
        let (x, y) = self
            .index(pos)
            .unwrap_or_else(|| panic!("cell ({}, {}) is outside the grid", pos.x, pos.y));
        self.cells[y][x] = Block::Filled(color);
    }

    /// Marks the piece's cells as settled with the piece's color.
    ///
    /// This is called when a piece is locked into position.
    pub fn lock(&mut self, piece: &Piece) {
        for &pos in piece.cells() {
            self.fill(pos, piece.color());
        }
    }

    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.cells
            .get(y)
            .is_some_and(|row| row.iter().all(|b| !b.is_empty()))
    }

    /// Indices of all complete rows, top to bottom.
    #[must_use]
    pub fn completed_rows(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&y| self.is_row_complete(y))
            .collect()
    }

    /// Clears complete rows and returns the number of rows cleared.
    pub fn clear_completed_rows(&mut self) -> usize {
        self.clear_completed_rows_indexed().len()
    }

    /// Clears complete rows and returns their indices in the pre-clear grid.
    ///
    /// All complete rows are collected before anything is removed. Each removed
    /// row is replaced by an empty row at the top, so every row above a cleared
    /// row moves down by one per cleared row beneath it.
    pub fn clear_completed_rows_indexed(&mut self) -> Vec<usize> {
        let cleared = self.completed_rows();
        if cleared.is_empty() {
            return cleared;
        }
        let mut kept = Vec::with_capacity(self.cells.len());
        kept.extend(std::iter::repeat_n(Self::empty_row(self.cols), cleared.len()));
        kept.extend(
            std::mem::take(&mut self.cells)
                .into_iter()
                .enumerate()
                .filter(|(y, _)| cleared.binary_search(y).is_err())
                .map(|(_, row)| row),
        );
        self.cells = kept;
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::PieceKind;

    fn pos(x: i32, y: i32) -> CellPosition {
        CellPosition::new(x, y)
    }

    fn fill_row(grid: &mut Grid, y: i32, except: &[i32]) {
        for x in 0..i32::from(grid.cols()) {
            if !except.contains(&x) {
                grid.fill(pos(x, y), PieceColor::Blue);
            }
        }
    }

    #[test]
    fn test_default_grid_from_window() {
        let grid = Grid::default();
        assert_eq!(grid.cols(), 15);
        assert_eq!(grid.rows(), 25);
        assert!(grid.rows_iter().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_block_outside_grid() {
        let grid = Grid::new(5, 5);
        assert_eq!(grid.block(pos(-1, 0)), None);
        assert_eq!(grid.block(pos(0, -1)), None);
        assert_eq!(grid.block(pos(5, 0)), None);
        assert_eq!(grid.block(pos(0, 5)), None);
        assert_eq!(grid.block(pos(4, 4)), Some(Block::Empty));
        assert!(!grid.is_free(pos(5, 4)));
    }

    #[test]
    fn test_lock_fills_piece_cells() {
        let mut grid = Grid::new(6, 6);
        let piece = Piece::at(PieceKind::S, pos(1, 2));
        grid.lock(&piece);

        for &cell in piece.cells() {
            assert_eq!(grid.block(cell), Some(Block::Filled(PieceColor::Green)));
        }
        assert_eq!(grid.filled_cells().count(), 4);
    }

    #[test]
    fn test_clear_without_complete_rows_is_noop() {
        let mut grid = Grid::new(5, 4);
        fill_row(&mut grid, 3, &[2]);
        fill_row(&mut grid, 2, &[0, 4]);
        let before = grid.clone();

        assert_eq!(grid.clear_completed_rows(), 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_lock_completing_one_row_clears_it() {
        let mut grid = Grid::new(6, 5);
        // Bottom row full except the two cells the O piece will cover.
        fill_row(&mut grid, 4, &[2, 3]);
        grid.fill(pos(0, 3), PieceColor::Red);
        grid.fill(pos(5, 2), PieceColor::Orange);

        let piece = Piece::at(PieceKind::O, pos(2, 3));
        grid.lock(&piece);
        assert_eq!(grid.clear_completed_rows(), 1);

        // Everything above shifted down by one.
        assert_eq!(grid.block(pos(0, 4)), Some(Block::Filled(PieceColor::Red)));
        assert_eq!(grid.block(pos(2, 4)), Some(Block::Filled(PieceColor::Yellow)));
        assert_eq!(grid.block(pos(3, 4)), Some(Block::Filled(PieceColor::Yellow)));
        assert_eq!(grid.block(pos(5, 3)), Some(Block::Filled(PieceColor::Orange)));
        assert_eq!(grid.filled_cells().count(), 4);
        assert!(grid.rows_iter().next().unwrap().iter().all(|b| b.is_empty()));
    }

    #[test]
    fn test_clear_non_adjacent_rows_in_one_pass() {
        let mut grid = Grid::new(4, 6);
        fill_row(&mut grid, 5, &[]);
        fill_row(&mut grid, 4, &[1]);
        fill_row(&mut grid, 3, &[]);
        grid.fill(pos(3, 2), PieceColor::Purple);

        assert_eq!(grid.clear_completed_rows_indexed(), vec![3, 5]);

        // Row 4 dropped one row (one cleared row beneath it), row 2 dropped two.
        assert!(grid.is_free(pos(1, 5)));
        assert_eq!(grid.block(pos(0, 5)), Some(Block::Filled(PieceColor::Blue)));
        assert_eq!(grid.block(pos(3, 4)), Some(Block::Filled(PieceColor::Purple)));
        assert_eq!(grid.filled_cells().count(), 4);
        assert!(grid.completed_rows().is_empty());
    }

    #[test]
    fn test_clear_all_rows() {
        let mut grid = Grid::new(4, 3);
        for y in 0..3 {
            fill_row(&mut grid, y, &[]);
        }
        assert_eq!(grid.clear_completed_rows(), 3);
        assert_eq!(grid, Grid::new(4, 3));
    }

    #[test]
    fn test_spawn_column_for_even_width() {
        assert_eq!(Grid::new(10, 20).spawn_column(), 4);
    }
}
