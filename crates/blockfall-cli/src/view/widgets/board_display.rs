use std::iter;

use blockfall_engine::{Block, Grid, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::BlockDisplay;

/// The grid's settled cells with the falling piece drawn on top.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    grid: &'a Grid,
    falling_piece: Option<&'a Piece>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            falling_piece: None,
            block: None,
        }
    }

    pub fn falling_piece(self, piece: &'a Piece) -> Self {
        Self {
            falling_piece: Some(piece),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        self.grid.cols() * BlockDisplay::width() + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        self.grid.rows() * BlockDisplay::height() + super::block_vertical_margin(self.block.as_ref())
    }

    /// Settled cells plus the falling piece, row by row.
    fn compose(&self) -> Vec<Vec<Block>> {
        let mut rows: Vec<Vec<Block>> = self.grid.rows_iter().map(<[Block]>::to_vec).collect();
        if let Some(piece) = self.falling_piece {
            for cell in piece.cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(cell.x), usize::try_from(cell.y)) else {
                    continue;
                };
                if let Some(block) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *block = Block::Filled(piece.color());
                }
            }
        }
        rows
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let col_constraints =
            (0..self.grid.cols()).map(|_| Constraint::Length(BlockDisplay::width()));
        let row_constraints =
            (0..self.grid.rows()).map(|_| Constraint::Length(BlockDisplay::height()));
        let horizontal = Layout::horizontal(col_constraints).flex(Flex::Center);
        let vertical = Layout::vertical(row_constraints);

        let row_areas = vertical.split(area);
        for (row_area, row) in iter::zip(row_areas.iter(), self.compose()) {
            let cell_areas = horizontal.split(*row_area);
            for (cell_area, block) in iter::zip(cell_areas.iter(), row) {
                BlockDisplay::from_block(block).render(*cell_area, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{CellPosition, PieceColor, PieceKind};

    use super::*;

    #[test]
    fn test_compose_overlays_falling_piece() {
        let mut grid = Grid::new(6, 4);
        grid.fill(CellPosition::new(0, 3), PieceColor::Red);
        let piece = Piece::at(PieceKind::O, CellPosition::new(2, 0));

        let rows = BoardDisplay::new(&grid).falling_piece(&piece).compose();

        assert_eq!(rows[3][0], Block::Filled(PieceColor::Red));
        for cell in piece.cells() {
            let (x, y) = (usize::try_from(cell.x).unwrap(), usize::try_from(cell.y).unwrap());
            assert_eq!(rows[y][x], Block::Filled(PieceColor::Yellow));
        }
        assert_eq!(rows.iter().flatten().filter(|b| !b.is_empty()).count(), 5);
        // The grid itself is untouched.
        assert_eq!(grid.filled_cells().count(), 1);
    }

    #[test]
    fn test_size_includes_border() {
        let grid = Grid::default();
        let display = BoardDisplay::new(&grid).block(BlockWidget::bordered());
        assert_eq!(display.width(), 15 * 2 + 2);
        assert_eq!(display.height(), 25 + 2);
    }
}
