use crate::marking::MarkedDates;
use crate::period::{PageKey, Periods};
use serde::Deserialize;
use time::Date;

/// What, if anything, gets selected when the user pages to a new period
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum AutoSelect {
    #[default]
    None,
    /// The first day of the period
    FirstDay,
    /// The earliest marked date in the period, else its first day
    MarkedDate,
}

impl AutoSelect {
    /// The date to select on settling on the page `key`, if any
    pub fn pick(self, periods: &Periods, marked: &MarkedDates, key: PageKey) -> Option<Date> {
        match self {
            AutoSelect::None => None,
            AutoSelect::FirstDay => Some(key.date()),
            AutoSelect::MarkedDate => {
                Some(marked.first_in(periods, key).unwrap_or_else(|| key.date()))
            }
        }
    }
}

/// Why a date was selected
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SelectSource {
    DayPress,
    PageScroll,
    /// `scroll_to_date()` was called
    Programmatic,
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SyncState {
    #[default]
    Idle,
    /// The calendar was moved by something other than the user paging, and
    /// the settle event that move produces must not auto-select
    NavigationPending,
}

/// Keeps programmatic navigation from re-firing the selection callback via
/// auto-select
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SelectionSync {
    state: SyncState,
}

impl SelectionSync {
    pub fn new() -> SelectionSync {
        SelectionSync::default()
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Call whenever a programmatic move will produce a settle event
    pub fn begin_navigation(&mut self) {
        self.state = SyncState::NavigationPending;
    }

    /// Call when a pending settle is dropped without being delivered
    pub fn cancel(&mut self) {
        self.state = SyncState::Idle;
    }

    /// Consumes a settle event.  Returns `true` if auto-select must be
    /// suppressed for it.
    pub fn settle(&mut self) -> bool {
        std::mem::take(&mut self.state) == SyncState::NavigationPending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marking::Marking;
    use crate::period::PeriodKind;
    use time::macros::date;
    use time::Weekday::Monday;

    #[test]
    fn test_settle_suppresses_exactly_once() {
        let mut sync = SelectionSync::new();
        assert!(!sync.settle());
        sync.begin_navigation();
        assert_eq!(sync.state(), SyncState::NavigationPending);
        assert!(sync.settle());
        assert_eq!(sync.state(), SyncState::Idle);
        assert!(!sync.settle());
    }

    #[test]
    fn test_repeated_navigation_still_one_suppression() {
        let mut sync = SelectionSync::new();
        sync.begin_navigation();
        sync.begin_navigation();
        assert!(sync.settle());
        assert!(!sync.settle());
    }

    #[test]
    fn test_pick_marked_date() {
        let periods = Periods::new(PeriodKind::Month, Monday);
        let marked = MarkedDates::from_strings([(
            "2024-03-05",
            Marking {
                marked: true,
                ..Marking::default()
            },
        )])
        .unwrap();
        let march = periods.start_of(date!(2024 - 03 - 20));
        let april = periods.start_of(date!(2024 - 04 - 20));
        assert_eq!(
            AutoSelect::MarkedDate.pick(&periods, &marked, march),
            Some(date!(2024 - 03 - 05))
        );
        assert_eq!(
            AutoSelect::MarkedDate.pick(&periods, &marked, april),
            Some(date!(2024 - 04 - 01))
        );
        assert_eq!(
            AutoSelect::FirstDay.pick(&periods, &marked, march),
            Some(date!(2024 - 03 - 01))
        );
        assert_eq!(AutoSelect::None.pick(&periods, &marked, march), None);
    }

    #[test]
    fn test_deserialize_auto_select() {
        #[derive(Deserialize)]
        struct Wrapper {
            auto_select: AutoSelect,
        }
        let w = toml::from_str::<Wrapper>(r#"auto_select = "marked-date""#).unwrap();
        assert_eq!(w.auto_select, AutoSelect::MarkedDate);
        let w = toml::from_str::<Wrapper>(r#"auto_select = "first-day""#).unwrap();
        assert_eq!(w.auto_select, AutoSelect::FirstDay);
        assert!(toml::from_str::<Wrapper>(r#"auto_select = "firstday""#).is_err());
    }
}
