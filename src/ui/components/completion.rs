use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::components::progress_bar::progress_label;
use crate::ui::theme::Theme;

/// Shown once every question in the catalog is solved.
pub struct Completion<'a> {
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> Completion<'a> {
    pub fn new(total: usize, theme: &'a Theme) -> Self {
        Self { total, theme }
    }
}

impl Widget for Completion<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" All Done ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Every question is solved 🎉",
            Style::default()
                .fg(colors.correct())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[1], buf);

        Paragraph::new(Line::from(Span::styled(
            progress_label(self.total, self.total),
            Style::default().fg(colors.fg()),
        )))
        .alignment(Alignment::Center)
        .render(layout[2], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("[r] Start over  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]))
        .alignment(Alignment::Center)
        .render(layout[4], buf);
    }
}
