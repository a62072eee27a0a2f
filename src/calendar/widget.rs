use super::day::DayCell;
use super::{CalendarPager, SelectionHandler};
use crate::pages::PageMode;
use crate::period::{PageKey, PeriodKind, DAYS_IN_WEEK};
use crate::theme::CalendarTheme;
use ratatui::{layout::Flex, prelude::*, widgets::*};
use std::marker::PhantomData;

/// Width of one page in columns
const PAGE_WIDTH: u16 = DayCell::WIDTH * 7;

/// Columns between neighbouring pages
const PAGE_GAP: u16 = 2;

/// Row on which page titles are drawn
const TITLE_ROW: u16 = 0;

/// Row on which weekday names (or the header override) are drawn
const HEADER_ROW: u16 = 1;

const RULE_ROW: u16 = 2;

/// First row of the day grid
const GRID_TOP: u16 = 3;

/// Grid row on which placeholder and loading text is centred
const PLACEHOLDER_ROW: u16 = GRID_TOP + 2;

const ACS_HLINE: char = '─';

/// Draws a [`CalendarPager`] as a strip of pages centred on the visible one.
///
/// As many pages are shown as fit in the calendar's width, always an odd
/// number so that the visible page sits in the middle.  Pages too far from
/// the current one to have been drawn yet are shown as placeholders.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarView<'a, H> {
    header: Option<Line<'a>>,
    loading: Option<Text<'a>>,
    _handler: PhantomData<H>,
}

impl<'a, H> CalendarView<'a, H> {
    pub fn new() -> CalendarView<'a, H> {
        CalendarView {
            header: None,
            loading: None,
            _handler: PhantomData,
        }
    }

    /// Draw `line` in place of the weekday names
    pub fn header<L: Into<Line<'a>>>(mut self, line: L) -> CalendarView<'a, H> {
        self.header = Some(line.into());
        self
    }

    /// Draw `text` instead of the default placeholder while the calendar's
    /// range is empty
    pub fn loading<T: Into<Text<'a>>>(mut self, text: T) -> CalendarView<'a, H> {
        self.loading = Some(text.into());
        self
    }
}

impl<H> Default for CalendarView<'_, H> {
    fn default() -> Self {
        CalendarView::new()
    }
}

impl<H: SelectionHandler> StatefulWidget for CalendarView<'_, H> {
    type State = CalendarPager<H>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let width = state
            .options()
            .width
            .map_or(area.width, |w| w.min(area.width));
        let slots = page_slots(width);
        let strip_width = (slots * PAGE_WIDTH + (slots - 1) * PAGE_GAP).min(area.width);
        let [area] = Layout::horizontal([strip_width])
            .flex(Flex::Center)
            .areas(area);
        let theme = *state.theme();
        let names = state
            .periods()
            .weekdays()
            .map(|wd| format!("{:^4}", state.options().day_name(wd)));
        let mut canvas = BufferCanvas::new(area, buf, &theme);
        let show_weekdays = self.header.is_none();
        if let Some(header) = self.header {
            canvas.print_line(HEADER_ROW, 0, header);
        }
        let draw_weekdays = |canvas: &mut BufferCanvas<'_>, x: u16| {
            if show_weekdays {
                for (col, name) in std::iter::zip(0u16.., &names) {
                    canvas.print(HEADER_ROW, x + col * DayCell::WIDTH, name, theme.header);
                }
            }
            canvas.hline(RULE_ROW, x, PAGE_WIDTH, theme.rule);
        };

        if state.is_loading() {
            let x = (slots / 2) * (PAGE_WIDTH + PAGE_GAP);
            draw_weekdays(&mut canvas, x);
            let anchor = state.selected().unwrap_or_else(|| state.today());
            let text = self.loading.unwrap_or_else(|| {
                Text::styled(
                    format!("{:02}-{:04}", u8::from(anchor.month()), anchor.year()),
                    theme.placeholder,
                )
            });
            canvas.draw_loading(text);
            return;
        }

        let centre = state.visible_index();
        let half = usize::from(slots / 2);
        for slot in 0..slots {
            let Some(index) = (centre + usize::from(slot)).checked_sub(half) else {
                continue;
            };
            let Some(key) = state.range().get(index) else {
                continue;
            };
            let x = slot * (PAGE_WIDTH + PAGE_GAP);
            draw_weekdays(&mut canvas, x);
            match state.page_mode(index) {
                PageMode::Full => {
                    canvas.print_centered(
                        TITLE_ROW,
                        x,
                        PAGE_WIDTH,
                        Line::styled(page_title(state.periods().kind(), key), theme.title),
                    );
                    let dates = state.page_dates(index);
                    for (row, week) in std::iter::zip(0u16.., dates.chunks(DAYS_IN_WEEK)) {
                        for (col, &date) in std::iter::zip(0u16.., week) {
                            let cell = state.day_cell(index, date);
                            canvas.print_line(
                                GRID_TOP + row,
                                x + col * DayCell::WIDTH,
                                cell.to_line(&theme),
                            );
                        }
                    }
                }
                PageMode::Placeholder => {
                    let row = match state.periods().kind() {
                        PeriodKind::Month => PLACEHOLDER_ROW,
                        PeriodKind::Week => GRID_TOP,
                    };
                    canvas.print_centered(
                        row,
                        x,
                        PAGE_WIDTH,
                        Line::styled(
                            placeholder_label(state.periods().kind(), key),
                            theme.placeholder,
                        ),
                    );
                }
            }
        }
    }
}

/// Number of pages that fit in `width` columns, rounded down to an odd number
fn page_slots(width: u16) -> u16 {
    let n = (width.saturating_add(PAGE_GAP) / (PAGE_WIDTH + PAGE_GAP)).max(1);
    if n % 2 == 0 {
        n - 1
    } else {
        n
    }
}

fn page_title(kind: PeriodKind, key: PageKey) -> String {
    let date = key.date();
    match kind {
        PeriodKind::Month => format!("{} {}", date.month(), date.year()),
        PeriodKind::Week => format!("Week of {date}"),
    }
}

fn placeholder_label(kind: PeriodKind, key: PageKey) -> String {
    let date = key.date();
    let sep = match kind {
        PeriodKind::Month => '-',
        PeriodKind::Week => '/',
    };
    format!("{:02}{sep}{:04}", u8::from(date.month()), date.year())
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    theme: &'a CalendarTheme,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, theme: &'a CalendarTheme) -> Self {
        Self { area, buf, theme }
    }

    fn draw_loading(&mut self, text: Text<'_>) {
        if PLACEHOLDER_ROW < self.area.height {
            let height = u16::try_from(text.height())
                .unwrap_or(u16::MAX)
                .min(self.area.height - PLACEHOLDER_ROW);
            Paragraph::new(text)
                .style(self.theme.placeholder)
                .alignment(Alignment::Center)
                .render(
                    Rect {
                        x: self.area.x,
                        y: self.area.y + PLACEHOLDER_ROW,
                        width: self.area.width,
                        height,
                    },
                    self.buf,
                );
        }
    }

    fn print_centered(&mut self, y: u16, x: u16, width: u16, line: Line<'_>) {
        let line_width = u16::try_from(line.width()).unwrap_or(u16::MAX);
        self.print_line(y, x + width.saturating_sub(line_width) / 2, line);
    }

    fn print(&mut self, y: u16, x: u16, s: &str, style: Style) {
        self.print_line(y, x, Line::styled(s, style));
    }

    fn print_line(&mut self, y: u16, x: u16, line: Line<'_>) {
        if y < self.area.height && x < self.area.width {
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(line).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, length: u16, style: Style) {
        self.print(y, x, &String::from(ACS_HLINE).repeat(length.into()), style);
    }
}
