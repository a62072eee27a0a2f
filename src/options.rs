use crate::debounce::DEFAULT_DEBOUNCE;
use crate::period::PeriodKind;
use crate::sync::AutoSelect;
use std::time::Duration;
use time::{Date, Weekday};

static DEFAULT_DAY_NAMES: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

/// Configuration of a [`CalendarPager`](crate::CalendarPager)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarOptions {
    pub kind: PeriodKind,
    /// Number of pages on either side of the initially selected page
    pub page_count: usize,
    pub min_date: Option<Date>,
    pub max_date: Option<Date>,
    pub first_day: Weekday,
    /// Columns the calendar may occupy; defaults to the whole render area
    pub width: Option<u16>,
    pub auto_select: AutoSelect,
    /// Pages this close to the current page are always drawn in full
    pub render_budget: usize,
    pub debounce: Duration,
    /// Weekday names, Sunday first
    pub day_names: Option<[String; 7]>,
}

impl CalendarOptions {
    pub fn new(kind: PeriodKind) -> CalendarOptions {
        CalendarOptions {
            kind,
            page_count: kind.default_page_count(),
            min_date: None,
            max_date: None,
            first_day: Weekday::Monday,
            width: None,
            auto_select: AutoSelect::None,
            render_budget: 1,
            debounce: DEFAULT_DEBOUNCE,
            day_names: None,
        }
    }

    pub fn month() -> CalendarOptions {
        CalendarOptions::new(PeriodKind::Month)
    }

    pub fn week() -> CalendarOptions {
        CalendarOptions::new(PeriodKind::Week)
    }

    pub fn page_count(mut self, page_count: usize) -> CalendarOptions {
        self.page_count = page_count;
        self
    }

    pub fn min_date(mut self, date: Date) -> CalendarOptions {
        self.min_date = Some(date);
        self
    }

    pub fn max_date(mut self, date: Date) -> CalendarOptions {
        self.max_date = Some(date);
        self
    }

    pub fn first_day(mut self, wd: Weekday) -> CalendarOptions {
        self.first_day = wd;
        self
    }

    pub fn width(mut self, width: u16) -> CalendarOptions {
        self.width = Some(width);
        self
    }

    pub fn auto_select(mut self, mode: AutoSelect) -> CalendarOptions {
        self.auto_select = mode;
        self
    }

    pub fn render_budget(mut self, budget: usize) -> CalendarOptions {
        self.render_budget = budget;
        self
    }

    pub fn debounce(mut self, delay: Duration) -> CalendarOptions {
        self.debounce = delay;
        self
    }

    pub fn day_names(mut self, names: [String; 7]) -> CalendarOptions {
        self.day_names = Some(names);
        self
    }

    pub fn day_name(&self, wd: Weekday) -> &str {
        let i = usize::from(wd.number_days_from_sunday());
        self.day_names
            .as_ref()
            .map_or(DEFAULT_DAY_NAMES[i], |names| names[i].as_str())
    }
}

impl Default for CalendarOptions {
    fn default() -> CalendarOptions {
        CalendarOptions::month()
    }
}
