use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Widget};

use crate::ui::theme::Theme;

/// Solved/total gauge with a `"{solved}/{total} done"` caption.
pub struct ProgressBar<'a> {
    pub solved: usize,
    pub total: usize,
    pub theme: &'a Theme,
}

impl<'a> ProgressBar<'a> {
    pub fn new(solved: usize, total: usize, theme: &'a Theme) -> Self {
        Self {
            solved,
            total,
            theme,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.solved as f64 / self.total as f64).clamp(0.0, 1.0)
    }
}

pub fn progress_label(solved: usize, total: usize) -> String {
    format!("{solved}/{total} done")
}

impl Widget for ProgressBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Progress ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let filled_width = (self.ratio() * inner.width as f64) as u16;
        let label = progress_label(self.solved, self.total);

        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(colors.bar_filled())
            } else {
                Style::default().fg(colors.fg()).bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let label_x = inner.x + (inner.width.saturating_sub(label.len() as u16)) / 2;
        buf.set_string(label_x, inner.y, &label, Style::default().fg(colors.fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_and_label() {
        let theme = Theme::default();
        assert_eq!(ProgressBar::new(0, 0, &theme).ratio(), 0.0);
        assert_eq!(ProgressBar::new(1, 4, &theme).ratio(), 0.25);
        assert_eq!(ProgressBar::new(9, 4, &theme).ratio(), 1.0);
        assert_eq!(progress_label(3, 10), "3/10 done");
    }

    #[test]
    fn test_renders_label_into_buffer() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        ProgressBar::new(2, 5, &theme).render(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("2/5 done"), "row = {row:?}");
    }
}
