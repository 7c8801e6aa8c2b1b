use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::quiz::round::AnswerOutcome;
use crate::ui::components::text_panel::TextPanel;
use crate::ui::theme::Theme;

/// Verdict line plus the explanation, shown once a round is answered.
pub struct Feedback<'a> {
    pub outcome: AnswerOutcome,
    pub explanation: &'a str,
    pub theme: &'a Theme,
}

impl<'a> Feedback<'a> {
    pub fn new(outcome: AnswerOutcome, explanation: &'a str, theme: &'a Theme) -> Self {
        Self {
            outcome,
            explanation,
            theme,
        }
    }
}

pub fn verdict_text(outcome: &AnswerOutcome) -> String {
    if outcome.is_correct {
        "Correct ✅".to_string()
    } else {
        format!("Wrong ❌ (the answer is {})", outcome.correct_number)
    }
}

impl Widget for Feedback<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let verdict_color = if self.outcome.is_correct {
            colors.correct()
        } else {
            colors.incorrect()
        };
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", verdict_text(&self.outcome)),
            Style::default()
                .fg(verdict_color)
                .add_modifier(Modifier::BOLD),
        )))
        .render(layout[0], buf);

        TextPanel::new("Explanation", self.explanation, self.theme).render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_text() {
        let right = AnswerOutcome {
            picked: 2,
            correct_number: 2,
            is_correct: true,
        };
        assert_eq!(verdict_text(&right), "Correct ✅");

        let wrong = AnswerOutcome {
            picked: 1,
            correct_number: 3,
            is_correct: false,
        };
        assert_eq!(verdict_text(&wrong), "Wrong ❌ (the answer is 3)");
    }
}
