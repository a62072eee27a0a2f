use serde::Deserialize;
use std::fmt;
use std::iter::successors;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Whether a calendar pages by month or by week
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    #[default]
    Month,
    Week,
}

impl PeriodKind {
    /// Number of periods on either side of the anchor period that a range
    /// covers when the caller does not say otherwise
    pub fn default_page_count(self) -> usize {
        match self {
            PeriodKind::Month => 12,
            PeriodKind::Week => 12 * 4,
        }
    }
}

/// The first day of a month or week, identifying one page of a calendar
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PageKey(Date);

impl PageKey {
    pub fn date(self) -> Date {
        self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Period arithmetic for one kind of period and one choice of first weekday
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Periods {
    kind: PeriodKind,
    first_day: Weekday,
}

impl Periods {
    pub fn new(kind: PeriodKind, first_day: Weekday) -> Periods {
        Periods { kind, first_day }
    }

    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    pub fn first_day(&self) -> Weekday {
        self.first_day
    }

    /// Returns the key of the period containing `date`.
    ///
    /// A week that would begin before the earliest representable date is
    /// clamped to `Date::MIN`.
    pub fn start_of(&self, date: Date) -> PageKey {
        match self.kind {
            PeriodKind::Month => PageKey(first_of_month(date)),
            PeriodKind::Week => PageKey(self.week_start(date)),
        }
    }

    /// Returns the last date in the period identified by `key`
    pub fn end_of(&self, key: PageKey) -> Date {
        match self.kind {
            PeriodKind::Month => self
                .offset(key, 1)
                .and_then(|next| next.0.previous_day())
                .unwrap_or(Date::MAX),
            PeriodKind::Week => iter_days_from(key.0)
                .take(DAYS_IN_WEEK)
                .last()
                .unwrap_or(key.0),
        }
    }

    pub fn contains(&self, key: PageKey, date: Date) -> bool {
        self.start_of(date) == key
    }

    /// Returns the key `n` periods after `key` (before, if `n` is negative),
    /// or `None` if that period is not representable
    pub fn offset(&self, key: PageKey, n: i64) -> Option<PageKey> {
        match self.kind {
            PeriodKind::Month => {
                let date = key.0;
                let total = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1 + n;
                let year = i32::try_from(total.div_euclid(12)).ok()?;
                let month = u8::try_from(total.rem_euclid(12) + 1).ok()?;
                let month = Month::try_from(month).ok()?;
                Date::from_calendar_date(year, month, 1).ok().map(PageKey)
            }
            PeriodKind::Week => key
                .0
                .checked_add(time::Duration::weeks(n))
                .map(PageKey),
        }
    }

    /// Number of periods from `from` to `to`; negative if `to` is earlier
    pub fn distance(&self, from: PageKey, to: PageKey) -> i64 {
        match self.kind {
            PeriodKind::Month => {
                let months = |d: Date| i64::from(d.year()) * 12 + i64::from(u8::from(d.month()));
                months(to.0) - months(from.0)
            }
            PeriodKind::Week => (to.0 - from.0).whole_weeks(),
        }
    }

    /// The dates laid out on the page for `key`, in rows of seven.
    ///
    /// For a week this is just the week.  For a month it is every week that
    /// touches the month, so the first and last rows usually include days of
    /// the neighbouring months.
    pub fn grid(&self, key: PageKey) -> Vec<Date> {
        let start = self.week_start(key.0);
        let end = match self.kind {
            PeriodKind::Month => self.end_of(key),
            PeriodKind::Week => key.0,
        };
        let mut dates = Vec::with_capacity(DAYS_IN_WEEK * 6);
        let mut row_start = Some(start);
        while let Some(d) = row_start.filter(|&d| d <= end) {
            dates.extend(iter_days_from(d).take(DAYS_IN_WEEK));
            row_start = dates.last().copied().and_then(Date::next_day);
        }
        dates
    }

    /// The seven weekdays in column order
    pub fn weekdays(&self) -> [Weekday; DAYS_IN_WEEK] {
        let mut wd = self.first_day;
        std::array::from_fn(|_| {
            let this = wd;
            wd = wd.next();
            this
        })
    }

    fn week_start(&self, date: Date) -> Date {
        let back = (date.weekday().number_days_from_sunday() + 7
            - self.first_day.number_days_from_sunday())
            % 7;
        date.checked_sub(time::Duration::days(back.into()))
            .unwrap_or(Date::MIN)
    }
}

/// Converts a 0-6 day number (0 = Sunday) to a `Weekday`
pub fn weekday_from_index(n: u8) -> Option<Weekday> {
    (n < 7).then(|| Weekday::Sunday.nth_next(n))
}

fn first_of_month(date: Date) -> Date {
    date.replace_day(1)
        .expect("every month should have a first day")
}

fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_month_start_and_end() {
        let p = Periods::new(PeriodKind::Month, Monday);
        let key = p.start_of(date!(2024 - 02 - 17));
        assert_eq!(key.date(), date!(2024 - 02 - 01));
        assert_eq!(p.end_of(key), date!(2024 - 02 - 29));
        assert!(p.contains(key, date!(2024 - 02 - 29)));
        assert!(!p.contains(key, date!(2024 - 03 - 01)));
    }

    #[test]
    fn test_week_start_respects_first_day() {
        let date = date!(2023 - 11 - 16); // Thursday
        let sunday = Periods::new(PeriodKind::Week, Sunday);
        assert_eq!(sunday.start_of(date).date(), date!(2023 - 11 - 12));
        let monday = Periods::new(PeriodKind::Week, Monday);
        assert_eq!(monday.start_of(date).date(), date!(2023 - 11 - 13));
        let friday = Periods::new(PeriodKind::Week, Friday);
        assert_eq!(friday.start_of(date).date(), date!(2023 - 11 - 10));
        assert_eq!(
            monday.end_of(monday.start_of(date)),
            date!(2023 - 11 - 19)
        );
    }

    #[test]
    fn test_week_start_on_first_day() {
        let p = Periods::new(PeriodKind::Week, Monday);
        assert_eq!(
            p.start_of(date!(2023 - 11 - 13)).date(),
            date!(2023 - 11 - 13)
        );
    }

    #[test]
    fn test_month_offset_across_years() {
        let p = Periods::new(PeriodKind::Month, Monday);
        let key = p.start_of(date!(2024 - 11 - 30));
        assert_eq!(p.offset(key, 2).map(PageKey::date), Some(date!(2025 - 01 - 01)));
        assert_eq!(p.offset(key, -11).map(PageKey::date), Some(date!(2023 - 12 - 01)));
        assert_eq!(p.offset(key, 0), Some(key));
    }

    #[test]
    fn test_offset_past_end_of_time() {
        let p = Periods::new(PeriodKind::Month, Monday);
        let key = p.start_of(Date::MAX);
        assert_eq!(p.offset(key, 1), None);
        assert_eq!(p.end_of(key), Date::MAX);
    }

    #[test]
    fn test_distance() {
        let months = Periods::new(PeriodKind::Month, Monday);
        let a = months.start_of(date!(2023 - 10 - 05));
        let b = months.start_of(date!(2024 - 03 - 05));
        assert_eq!(months.distance(a, b), 5);
        assert_eq!(months.distance(b, a), -5);
        let weeks = Periods::new(PeriodKind::Week, Monday);
        let a = weeks.start_of(date!(2024 - 03 - 05));
        let b = weeks.start_of(date!(2024 - 03 - 27));
        assert_eq!(weeks.distance(a, b), 3);
    }

    #[test]
    fn test_month_grid() {
        let p = Periods::new(PeriodKind::Month, Monday);
        let grid = p.grid(p.start_of(date!(2024 - 03 - 10)));
        assert_eq!(grid.len(), 35);
        assert_eq!(grid.first(), Some(&date!(2024 - 02 - 26)));
        assert_eq!(grid.last(), Some(&date!(2024 - 03 - 31)));
    }

    #[test]
    fn test_month_grid_six_rows() {
        let p = Periods::new(PeriodKind::Month, Monday);
        let grid = p.grid(p.start_of(date!(2024 - 09 - 01)));
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.first(), Some(&date!(2024 - 08 - 26)));
        assert_eq!(grid.last(), Some(&date!(2024 - 10 - 06)));
    }

    #[test]
    fn test_month_grid_four_rows() {
        let p = Periods::new(PeriodKind::Month, Sunday);
        let grid = p.grid(p.start_of(date!(2015 - 02 - 14)));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid.first(), Some(&date!(2015 - 02 - 01)));
    }

    #[test]
    fn test_week_grid() {
        let p = Periods::new(PeriodKind::Week, Sunday);
        let grid = p.grid(p.start_of(date!(2023 - 11 - 16)));
        assert_eq!(
            grid,
            vec![
                date!(2023 - 11 - 12),
                date!(2023 - 11 - 13),
                date!(2023 - 11 - 14),
                date!(2023 - 11 - 15),
                date!(2023 - 11 - 16),
                date!(2023 - 11 - 17),
                date!(2023 - 11 - 18),
            ]
        );
    }

    #[test]
    fn test_weekdays() {
        let p = Periods::new(PeriodKind::Month, Wednesday);
        assert_eq!(
            p.weekdays(),
            [Wednesday, Thursday, Friday, Saturday, Sunday, Monday, Tuesday]
        );
    }

    #[test]
    fn test_weekday_from_index() {
        assert_eq!(weekday_from_index(0), Some(Sunday));
        assert_eq!(weekday_from_index(1), Some(Monday));
        assert_eq!(weekday_from_index(6), Some(Saturday));
        assert_eq!(weekday_from_index(7), None);
    }

    #[test]
    fn test_page_key_display() {
        let p = Periods::new(PeriodKind::Month, Monday);
        assert_eq!(p.start_of(date!(2024 - 03 - 05)).to_string(), "2024-03-01");
    }
}
