use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

const KEY_COLUMN_WIDTH: usize = 16;

static BINDINGS: &[(&str, &str)] = &[
    ("h, l, j, k", "Move the cursor by a day or a week"),
    ("ARROW KEYS", "Move the cursor by a day or a week"),
    ("ENTER, SPACE", "Select the day under the cursor"),
    ("[, PAGE UP", "Swipe to the previous page"),
    ("], PAGE DOWN", "Swipe to the next page"),
    ("p, n", "Scroll to the previous/next period"),
    ("g", "Jump to a date"),
    ("0, HOME", "Jump to today"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

/// Overlay listing the key bindings
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text(self) -> Text<'static> {
        let key_style = self.0.add_modifier(Modifier::BOLD);
        let mut lines = BINDINGS
            .iter()
            .map(|&(keys, action)| {
                Line::from_iter([
                    Span::styled(format!("{keys:KEY_COLUMN_WIDTH$}"), key_style),
                    Span::raw(action),
                ])
            })
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        // Leave a column of padding on either side of the border
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        }
        .intersection(area);
        Clear.render(outer_area, buf);
        Block::new().style(self.0).render(outer_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text() {
        let text = Help(Style::new()).text();
        assert_eq!(text.height(), BINDINGS.len() + 2);
        let first = &text.lines[0];
        assert_eq!(first.spans[0].content, "h, l, j, k      ");
        assert!(first.spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_render_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        Help(Style::new()).render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert!(rows.iter().any(|r| r.contains(" Commands ")));
        assert!(rows.iter().any(|r| r.contains("Jump to today")));
    }
}
