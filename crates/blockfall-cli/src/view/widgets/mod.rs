use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, menu_display::*,
    session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod menu_display;
mod session_stats_display;

mod color {
    use ratatui::style::Color;

    pub const LIGHT_BLUE: Color = Color::Rgb(102, 204, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const RED: Color = Color::Rgb(230, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 64, 255);
    pub const ORANGE: Color = Color::Rgb(255, 140, 0);
    pub const PURPLE: Color = Color::Rgb(150, 50, 200);
    pub const GRAY: Color = Color::Rgb(90, 90, 90);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const SELECTED: Style = fg_bg(color::BLACK, color::WHITE).add_modifier(Modifier::BOLD);
    pub const MESSAGE: Style = Style::new().fg(color::YELLOW);
    pub const ERROR: Style = Style::new().fg(color::RED);

    pub const LIGHT_BLUE_BLOCK: Style = bg_only(color::LIGHT_BLUE);
    pub const YELLOW_BLOCK: Style = bg_only(color::YELLOW);
    pub const GREEN_BLOCK: Style = bg_only(color::GREEN);
    pub const RED_BLOCK: Style = bg_only(color::RED);
    pub const BLUE_BLOCK: Style = bg_only(color::BLUE);
    pub const ORANGE_BLOCK: Style = bg_only(color::ORANGE);
    pub const PURPLE_BLOCK: Style = bg_only(color::PURPLE);
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
