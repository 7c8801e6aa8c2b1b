use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::quiz::round::{AnswerOutcome, ShuffledChoice};
use crate::ui::theme::Theme;

pub struct ChoiceList<'a> {
    pub choices: &'a [ShuffledChoice],
    pub selected: usize,
    pub outcome: Option<AnswerOutcome>,
    pub theme: &'a Theme,
}

impl<'a> ChoiceList<'a> {
    pub fn new(
        choices: &'a [ShuffledChoice],
        selected: usize,
        outcome: Option<AnswerOutcome>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            choices,
            selected,
            outcome,
            theme,
        }
    }
}

impl Widget for ChoiceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Choices ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));

        let mut lines: Vec<Line> = Vec::with_capacity(self.choices.len() * 2);
        for (i, choice) in self.choices.iter().enumerate() {
            let number = i + 1;
            let (marker, style) = match self.outcome {
                // Locked: reveal the answer, flag a wrong pick
                Some(outcome) => {
                    if choice.is_correct {
                        (
                            "✓",
                            Style::default()
                                .fg(colors.correct())
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if outcome.picked == number {
                        ("✗", Style::default().fg(colors.incorrect()))
                    } else {
                        (" ", Style::default().fg(colors.muted()))
                    }
                }
                None if i == self.selected => (
                    ">",
                    Style::default()
                        .fg(colors.accent())
                        .bg(colors.selected_bg())
                        .add_modifier(Modifier::BOLD),
                ),
                None => (" ", Style::default().fg(colors.fg())),
            };

            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} [{number}] "), style),
                Span::styled(choice.text.as_str(), style),
            ]));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
