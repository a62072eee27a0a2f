mod day;
mod widget;
pub use self::day::DayCell;
pub use self::widget::CalendarView;
use crate::carousel::{Carousel, Direction, ScrollOptions};
use crate::marking::MarkedDates;
use crate::options::CalendarOptions;
use crate::pages::{PageMode, PagedView};
use crate::period::{PageKey, PeriodKind, Periods, DAYS_IN_WEEK};
use crate::range::PageRange;
use crate::sync::{SelectSource, SelectionSync, SyncState};
use crate::theme::CalendarTheme;
use std::time::Instant;
use thiserror::Error;
use time::Date;

/// Month pages other than the current one show at most this many weeks
const NONCURRENT_MONTH_ROWS: usize = 5;

/// Receives the selections and page changes a calendar produces
pub trait SelectionHandler {
    fn select_date(&mut self, date: Date, source: SelectSource);

    /// Called when the calendar settles on a different period
    fn period_changed(&mut self, _period: PageKey) {}
}

impl<T: SelectionHandler + ?Sized> SelectionHandler for &mut T {
    fn select_date(&mut self, date: Date, source: SelectSource) {
        (**self).select_date(date, source);
    }

    fn period_changed(&mut self, period: PageKey) {
        (**self).period_changed(period);
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CalendarEvent {
    Selected { date: Date, source: SelectSource },
    PeriodChanged(PageKey),
}

/// A [`SelectionHandler`] that records everything it is told
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SelectionLog(Vec<CalendarEvent>);

impl SelectionLog {
    pub fn new() -> SelectionLog {
        SelectionLog::default()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.0
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, CalendarEvent> {
        self.0.drain(..)
    }

    /// Just the selections, in order
    pub fn selections(&self) -> impl Iterator<Item = (Date, SelectSource)> + '_ {
        self.0.iter().filter_map(|ev| match *ev {
            CalendarEvent::Selected { date, source } => Some((date, source)),
            CalendarEvent::PeriodChanged(_) => None,
        })
    }
}

impl SelectionHandler for SelectionLog {
    fn select_date(&mut self, date: Date, source: SelectSource) {
        self.0.push(CalendarEvent::Selected { date, source });
    }

    fn period_changed(&mut self, period: PageKey) {
        self.0.push(CalendarEvent::PeriodChanged(period));
    }
}

/// A paged month or week calendar.
///
/// The calendar shows one page per period of its range.  Paging happens
/// either through user gestures ([`swipe_forwards()`](Self::swipe_forwards)
/// and friends), which settle after a debounce delay and may auto-select a
/// date, or through the `scroll_to_*` methods, whose resulting settle never
/// auto-selects.  Settles are delivered by [`tick()`](Self::tick), which the
/// event loop should call no later than [`next_deadline()`](Self::next_deadline).
#[derive(Clone, Debug)]
pub struct CalendarPager<H> {
    today: Date,
    selected: Option<Date>,
    options: CalendarOptions,
    periods: Periods,
    range: PageRange,
    /// Index of the page the calendar last settled on
    current: usize,
    /// Last page reported to `period_changed()`
    reported: Option<usize>,
    pages: PagedView,
    carousel: Carousel,
    sync: SelectionSync,
    marked: MarkedDates,
    theme: CalendarTheme,
    cursor: Option<Date>,
    handler: H,
}

impl<H: SelectionHandler> CalendarPager<H> {
    pub fn new(
        today: Date,
        selected: Option<Date>,
        options: CalendarOptions,
        handler: H,
    ) -> CalendarPager<H> {
        let periods = Periods::new(options.kind, options.first_day);
        let anchor = selected.unwrap_or(today);
        let range = PageRange::build(
            &periods,
            anchor,
            options.min_date,
            options.max_date,
            options.page_count,
        );
        let current = range.position_of(&periods, anchor).unwrap_or_default();
        tracing::debug!(
            pages = range.len(),
            first = ?range.first(),
            last = ?range.last(),
            current,
            "built calendar range"
        );
        let mut this = CalendarPager {
            today,
            selected,
            periods,
            current,
            reported: (!range.is_empty()).then_some(current),
            pages: PagedView::new(range.len(), options.render_budget),
            carousel: Carousel::new(range.len(), current, options.debounce),
            range,
            options,
            sync: SelectionSync::new(),
            marked: MarkedDates::new(),
            theme: CalendarTheme::default(),
            cursor: None,
            handler,
        };
        this.reset_cursor();
        this
    }

    pub fn with_marked_dates(mut self, marked: MarkedDates) -> CalendarPager<H> {
        self.marked = marked;
        self
    }

    pub fn with_theme(mut self, theme: CalendarTheme) -> CalendarPager<H> {
        self.theme = theme;
        self
    }

    pub fn set_selected(&mut self, date: Option<Date>) {
        self.selected = date;
    }

    pub fn set_marked_dates(&mut self, marked: MarkedDates) {
        self.marked = marked;
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn selected(&self) -> Option<Date> {
        self.selected
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn periods(&self) -> &Periods {
        &self.periods
    }

    pub fn range(&self) -> &PageRange {
        &self.range
    }

    pub fn marked_dates(&self) -> &MarkedDates {
        &self.marked
    }

    pub fn theme(&self) -> &CalendarTheme {
        &self.theme
    }

    /// `true` while the range is empty, i.e., the bounds exclude the
    /// selected date
    pub fn is_loading(&self) -> bool {
        self.range.is_empty()
    }

    /// The period the calendar last settled on
    pub fn current_period(&self) -> Option<PageKey> {
        self.range.get(self.current)
    }

    /// The period on screen, which runs ahead of `current_period()` until
    /// the next settle
    pub fn visible_period(&self) -> Option<PageKey> {
        self.range.get(self.carousel.index())
    }

    pub fn cursor(&self) -> Option<Date> {
        self.cursor
    }

    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    /// When the next settle is due, if one is pending
    pub fn next_deadline(&self) -> Option<Instant> {
        self.carousel.deadline()
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    /// Whether a press on `date` is ignored: it lies outside the range or
    /// the date bounds, or its marking disables it
    pub fn is_disabled(&self, date: Date) -> bool {
        self.day_cell(self.carousel.index(), date).is_disabled()
    }

    pub fn swipe_forwards(&mut self, now: Instant) -> Result<(), EndOfRangeError> {
        self.swipe(Direction::Forwards, now)
    }

    pub fn swipe_backwards(&mut self, now: Instant) -> Result<(), EndOfRangeError> {
        self.swipe(Direction::Backwards, now)
    }

    fn swipe(&mut self, direction: Direction, now: Instant) -> Result<(), EndOfRangeError> {
        if self.carousel.swipe(direction, now) {
            self.reset_cursor();
            Ok(())
        } else {
            Err(EndOfRangeError)
        }
    }

    /// Presses the day cell for `date`.  Fires `select_date()` with
    /// [`SelectSource::DayPress`] and, if the date belongs to a page other
    /// than the one on screen, pages to it.  Returns `false` if the day is
    /// disabled.
    pub fn press_day(&mut self, date: Date, now: Instant) -> bool {
        let visible = self.carousel.index();
        let Some(date) = self.day_cell(visible, date).press() else {
            tracing::debug!(%date, "ignoring press of disabled day");
            return false;
        };
        if let Some(target) = self
            .range
            .position_of(&self.periods, date)
            .filter(|&i| i != visible)
        {
            tracing::debug!(%date, from = visible, to = target, "day press changes page");
            self.current = target;
            if self.carousel.snap_to(target, ScrollOptions::default(), now) {
                self.sync.begin_navigation();
            }
        }
        self.cursor = Some(date);
        self.handler.select_date(date, SelectSource::DayPress);
        true
    }

    pub fn press_cursor(&mut self, now: Instant) -> bool {
        let Some(date) = self.cursor else {
            return false;
        };
        self.press_day(date, now)
    }

    /// Moves the cursor by `days`, staying on the visible page.  Returns
    /// `false` if that would leave the page.
    pub fn move_cursor(&mut self, days: i64) -> bool {
        let Some(target) = self
            .cursor
            .and_then(|d| d.checked_add(time::Duration::days(days)))
        else {
            return false;
        };
        if self.page_dates(self.carousel.index()).contains(&target) {
            self.cursor = Some(target);
            true
        } else {
            false
        }
    }

    /// Pages to the period containing `date` and fires `select_date()` with
    /// [`SelectSource::Programmatic`].  Returns `false`, doing nothing, if
    /// `date` is outside the range.
    pub fn scroll_to_date(&mut self, date: Date, opts: ScrollOptions, now: Instant) -> bool {
        let Some(index) = self.range.position_of(&self.periods, date) else {
            tracing::debug!(%date, "scroll target outside range; ignoring");
            return false;
        };
        self.navigate(index, opts, now);
        self.cursor = Some(date);
        self.handler.select_date(date, SelectSource::Programmatic);
        true
    }

    /// Pages to the period containing `date` without selecting anything
    pub fn scroll_to_period(&mut self, date: Date, opts: ScrollOptions, now: Instant) -> bool {
        let Some(index) = self.range.position_of(&self.periods, date) else {
            tracing::debug!(%date, "scroll target outside range; ignoring");
            return false;
        };
        self.navigate(index, opts, now);
        true
    }

    /// Pages one period forwards from the page on screen, which may be ahead
    /// of [`current_period()`](CalendarPager::current_period) while a swipe
    /// has yet to settle
    pub fn scroll_to_next_period(&mut self, opts: ScrollOptions, now: Instant) -> bool {
        let Some(index) = Some(self.carousel.index() + 1).filter(|&i| i < self.range.len()) else {
            return false;
        };
        self.navigate(index, opts, now);
        true
    }

    /// Pages one period backwards from the page on screen
    pub fn scroll_to_prev_period(&mut self, opts: ScrollOptions, now: Instant) -> bool {
        let Some(index) = self.carousel.index().checked_sub(1) else {
            return false;
        };
        self.navigate(index, opts, now);
        true
    }

    fn navigate(&mut self, index: usize, opts: ScrollOptions, now: Instant) {
        let before = self.carousel.index();
        if self.carousel.snap_to(index, opts, now) {
            self.sync.begin_navigation();
        } else {
            // No settle is coming, so adopt the new page quietly
            self.sync.cancel();
            self.current = self.carousel.index();
            self.pages.mark_rendered(self.current);
        }
        if self.carousel.index() != before {
            self.reset_cursor();
        }
    }

    /// Delivers a pending settle if it is due.  Returns `true` if one was
    /// processed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(index) = self.carousel.poll(now) else {
            return false;
        };
        let Some(key) = self.range.get(index) else {
            return false;
        };
        if index == self.current && self.sync.state() == SyncState::Idle {
            tracing::debug!(%key, "settled back on the current page");
            return false;
        }
        self.current = index;
        self.pages.mark_rendered(index);
        self.reset_cursor();
        if self.reported != Some(index) {
            self.reported = Some(index);
            self.handler.period_changed(key);
        }
        if self.sync.settle() {
            tracing::debug!(%key, "settle followed programmatic navigation; not auto-selecting");
        } else if let Some(date) = self
            .options
            .auto_select
            .pick(&self.periods, &self.marked, key)
        {
            tracing::debug!(%key, %date, "auto-selecting");
            self.handler.select_date(date, SelectSource::PageScroll);
        }
        true
    }

    fn reset_cursor(&mut self) {
        self.cursor = self.visible_period().map(|key| {
            self.selected
                .filter(|&d| self.periods.contains(key, d))
                .unwrap_or_else(|| key.date())
        });
    }
}

impl<H> CalendarPager<H> {
    pub(crate) fn visible_index(&self) -> usize {
        self.carousel.index()
    }

    pub(crate) fn page_mode(&mut self, index: usize) -> PageMode {
        self.pages.mode(index, self.current)
    }

    /// The dates drawn on page `index`, in rows of seven
    pub(crate) fn page_dates(&self, index: usize) -> Vec<Date> {
        let Some(key) = self.range.get(index) else {
            return Vec::new();
        };
        let mut dates = self.periods.grid(key);
        if self.periods.kind() == PeriodKind::Month && index != self.current {
            dates.truncate(NONCURRENT_MONTH_ROWS * DAYS_IN_WEEK);
        }
        dates
    }

    pub(crate) fn day_cell(&self, index: usize, date: Date) -> DayCell<'_> {
        let in_period = self
            .range
            .get(index)
            .is_some_and(|key| self.periods.contains(key, date));
        DayCell {
            date,
            in_period,
            is_today: date == self.today,
            is_selected: self.selected == Some(date),
            is_cursor: index == self.carousel.index() && self.cursor == Some(date),
            disabled: self.out_of_bounds(date),
            marking: self.marked.get(date),
        }
    }

    fn out_of_bounds(&self, date: Date) -> bool {
        let Some((first, last)) = self.range.span(&self.periods) else {
            return true;
        };
        date < first
            || date > last
            || self.options.min_date.is_some_and(|min| date < min)
            || self.options.max_date.is_some_and(|max| date > max)
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of the calendar")]
pub struct EndOfRangeError;
