use crate::marking::Marking;
use crate::theme::CalendarTheme;
use ratatui::{
    style::Style,
    text::{Line, Span},
};
use time::Date;

/// One pressable day on a calendar page
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DayCell<'a> {
    pub date: Date,
    /// `false` for the neighbouring months' days shown on a month page
    pub in_period: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_cursor: bool,
    /// Outside the calendar's range or date bounds
    pub disabled: bool,
    pub marking: Option<&'a Marking>,
}

impl DayCell<'_> {
    /// Columns taken up by a rendered cell
    pub const WIDTH: u16 = 4;

    pub fn is_disabled(&self) -> bool {
        self.disabled || self.marking.is_some_and(|m| m.disabled)
    }

    /// Returns the date to report for a press on this cell, or `None` if the
    /// cell is disabled
    pub fn press(&self) -> Option<Date> {
        (!self.is_disabled()).then_some(self.date)
    }

    pub fn style(&self, theme: &CalendarTheme) -> Style {
        let mut style = if self.in_period {
            theme.day
        } else {
            theme.outside
        };
        if self.is_today {
            style = style.patch(theme.today);
        }
        if let Some(m) = self.marking {
            style = style.patch(theme.marked);
            if let Some(spec) = m.style {
                style = style.patch(Style::from(spec));
            }
        }
        if self.is_selected || self.marking.is_some_and(|m| m.selected) {
            style = style.patch(theme.selected);
        }
        if self.is_disabled() {
            style = style.patch(theme.disabled);
        }
        if self.is_cursor {
            style = style.patch(theme.cursor);
        }
        style
    }

    /// Renders the cell as ` dd ` (or `[dd]` for today), with a dot in the
    /// last column for marked days
    pub fn to_line(&self, theme: &CalendarTheme) -> Line<'static> {
        let style = self.style(theme);
        let (left, right) = if self.is_today {
            ("[", "]")
        } else {
            (" ", " ")
        };
        let right = match self.marking.filter(|m| m.marked && !self.is_today) {
            Some(m) => {
                let mut dot_style = style.patch(theme.dot);
                if let Some(color) = m.dot_color {
                    dot_style = dot_style.fg(color);
                }
                Span::styled("•", dot_style)
            }
            None => Span::styled(right, style),
        };
        Line::from(vec![
            Span::styled(left, style),
            Span::styled(format!("{:2}", self.date.day()), style),
            right,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};
    use time::macros::date;

    fn cell(date: Date) -> DayCell<'static> {
        DayCell {
            date,
            in_period: true,
            is_today: false,
            is_selected: false,
            is_cursor: false,
            disabled: false,
            marking: None,
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_plain() {
        let theme = CalendarTheme::DEFAULT;
        let line = cell(date!(2024 - 03 - 05)).to_line(&theme);
        assert_eq!(text(&line), "  5 ");
        assert_eq!(line.width(), usize::from(DayCell::WIDTH));
        assert_eq!(cell(date!(2024 - 03 - 15)).style(&theme), theme.day);
    }

    #[test]
    fn test_today() {
        let theme = CalendarTheme::DEFAULT;
        let c = DayCell {
            is_today: true,
            ..cell(date!(2024 - 03 - 15))
        };
        assert_eq!(text(&c.to_line(&theme)), "[15]");
        assert!(c.style(&theme).add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_marked_dot() {
        let theme = CalendarTheme::DEFAULT;
        let marking = Marking {
            marked: true,
            dot_color: Some(Color::Red),
            ..Marking::default()
        };
        let c = DayCell {
            marking: Some(&marking),
            ..cell(date!(2024 - 03 - 15))
        };
        let line = c.to_line(&theme);
        assert_eq!(text(&line), " 15•");
        assert_eq!(line.spans[2].style.fg, Some(Color::Red));
    }

    #[test]
    fn test_selected_by_marking() {
        let theme = CalendarTheme::DEFAULT;
        let marking = Marking {
            selected: true,
            ..Marking::default()
        };
        let c = DayCell {
            marking: Some(&marking),
            ..cell(date!(2024 - 03 - 15))
        };
        assert_eq!(c.style(&theme).bg, theme.selected.bg);
    }

    #[test]
    fn test_press() {
        let date = date!(2024 - 03 - 15);
        assert_eq!(cell(date).press(), Some(date));
        let c = DayCell {
            disabled: true,
            ..cell(date)
        };
        assert_eq!(c.press(), None);
        let marking = Marking {
            disabled: true,
            ..Marking::default()
        };
        let c = DayCell {
            marking: Some(&marking),
            ..cell(date)
        };
        assert_eq!(c.press(), None);
        assert!(c
            .style(&CalendarTheme::DEFAULT)
            .add_modifier
            .contains(Modifier::CROSSED_OUT));
    }

    #[test]
    fn test_outside_period() {
        let theme = CalendarTheme::DEFAULT;
        let c = DayCell {
            in_period: false,
            ..cell(date!(2024 - 02 - 29))
        };
        assert_eq!(c.style(&theme).fg, Some(Color::DarkGray));
        assert_eq!(c.press(), Some(date!(2024 - 02 - 29)));
    }
}
