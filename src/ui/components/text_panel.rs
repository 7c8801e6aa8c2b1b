use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::ui::theme::Theme;

/// Bordered, wrapped block of prose: the question, its passage, or the
/// explanation.
pub struct TextPanel<'a> {
    pub title: String,
    pub body: &'a str,
    pub emphasized: bool,
    pub theme: &'a Theme,
}

impl<'a> TextPanel<'a> {
    pub fn new(title: impl Into<String>, body: &'a str, theme: &'a Theme) -> Self {
        Self {
            title: title.into(),
            body,
            emphasized: false,
            theme,
        }
    }

    pub fn emphasized(mut self, emphasized: bool) -> Self {
        self.emphasized = emphasized;
        self
    }
}

impl Widget for TextPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.emphasized {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(colors.bg()));

        let body_style = if self.emphasized {
            Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.fg())
        };
        let lines: Vec<Line> = self
            .body
            .lines()
            .map(|l| Line::from(Span::styled(l, body_style)))
            .collect();

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
