use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt, Widget},
};

use super::style;

/// A vertical list of items with one highlighted.
#[derive(Debug)]
pub struct MenuDisplay<'a> {
    items: Vec<Line<'a>>,
    selected: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MenuDisplay<'a> {
    pub fn new<I, L>(items: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line<'a>>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            selected: None,
            block: None,
        }
    }

    pub fn selected(self, index: usize) -> Self {
        Self {
            selected: Some(index),
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.items.len()).unwrap_or(u16::MAX)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for MenuDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = Layout::vertical(self.items.iter().map(|_| Constraint::Length(1))).split(area);
        for (i, (item, row)) in self.items.into_iter().zip(rows.iter()).enumerate() {
            let style = if self.selected == Some(i) {
                style::SELECTED
            } else {
                style::DEFAULT
            };
            item.centered().style(style).render(*row, buf);
        }
    }
}
