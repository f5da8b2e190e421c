use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys shown for one entry of a help line, with what they do.
#[derive(Debug, Clone)]
pub struct KeyHint {
    keys: Vec<String>,
    description: &'static str,
}

impl KeyHint {
    pub fn new<I, K>(keys: I, description: &'static str) -> Self
    where
        I: IntoIterator<Item = K>,
        K: ToString,
    {
        Self {
            keys: keys.into_iter().map(|k| k.to_string()).collect(),
            description,
        }
    }
}

/// A one-line help bar: `key/key Description | key Description`.
#[derive(Debug)]
pub struct KeyBindingDisplay<'a> {
    hints: &'a [KeyHint],
}

impl<'a> KeyBindingDisplay<'a> {
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self { hints }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const KEY_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::White);
const ITEM_SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

impl Widget for KeyBindingDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", ITEM_SEPARATOR_STYLE));
            }
            for (j, key) in hint.keys.iter().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", KEY_SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key.as_str(), KEY_STYLE));
            }
            spans.push(Span::from(" "));
            spans.push(Span::styled(hint.description, DESCRIPTION_STYLE));
        }

        Line::from(spans).centered().render(area, buf);
    }
}
