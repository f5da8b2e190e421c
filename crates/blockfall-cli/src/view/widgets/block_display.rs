use blockfall_engine::{Block, PieceColor};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One grid cell drawn two terminal columns wide.
#[derive(Debug)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn width() -> u16 {
        2
    }

    pub const fn height() -> u16 {
        1
    }

    pub fn from_color(color: PieceColor) -> Self {
        let style = match color {
            PieceColor::Yellow => style::YELLOW_BLOCK,
            PieceColor::LightBlue => style::LIGHT_BLUE_BLOCK,
            PieceColor::Orange => style::ORANGE_BLOCK,
            PieceColor::Blue => style::BLUE_BLOCK,
            PieceColor::Green => style::GREEN_BLOCK,
            PieceColor::Red => style::RED_BLOCK,
            PieceColor::Purple => style::PURPLE_BLOCK,
        };
        Self::new(style, "")
    }

    pub fn from_block(block: Block) -> Self {
        match block {
            Block::Empty => Self::new(style::EMPTY_DOT, "."),
            Block::Filled(color) => Self::from_color(color),
        }
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Paragraph fills the whole area, not just the cells under the symbol.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}
