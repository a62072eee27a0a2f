use crate::period::{PageKey, Periods};
use crate::theme::StyleSpec;
use ratatui::style::Color;
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

pub(crate) static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Display metadata attached to a single date
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Marking {
    /// Draw a dot beside the day number
    pub marked: bool,
    pub dot_color: Option<Color>,
    /// Style the day as selected even if it is not the selected date
    pub selected: bool,
    /// The day cannot be pressed and is never auto-selected
    pub disabled: bool,
    pub style: Option<StyleSpec>,
}

/// Markings keyed by date
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarkedDates(BTreeMap<Date, Marking>);

impl MarkedDates {
    pub fn new() -> MarkedDates {
        MarkedDates::default()
    }

    /// Builds a map from `YYYY-MM-DD` keys
    pub fn from_strings<I, S>(iter: I) -> Result<MarkedDates, MarkingKeyError>
    where
        I: IntoIterator<Item = (S, Marking)>,
        S: AsRef<str>,
    {
        iter.into_iter()
            .map(|(key, marking)| parse_ymd(key.as_ref()).map(|date| (date, marking)))
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(MarkedDates)
    }

    pub fn insert(&mut self, date: Date, marking: Marking) -> Option<Marking> {
        self.0.insert(date, marking)
    }

    pub fn get(&self, date: Date) -> Option<&Marking> {
        self.0.get(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Earliest date in the given period that has a marking and is not
    /// disabled
    pub fn first_in(&self, periods: &Periods, key: PageKey) -> Option<Date> {
        self.0
            .range(key.date()..=periods.end_of(key))
            .find(|(_, m)| !m.disabled)
            .map(|(&d, _)| d)
    }
}

impl FromIterator<(Date, Marking)> for MarkedDates {
    fn from_iter<I: IntoIterator<Item = (Date, Marking)>>(iter: I) -> MarkedDates {
        MarkedDates(iter.into_iter().collect())
    }
}

pub(crate) fn parse_ymd(s: &str) -> Result<Date, MarkingKeyError> {
    Date::parse(s, &YMD_FMT).map_err(|source| MarkingKeyError {
        key: s.to_owned(),
        source,
    })
}

#[derive(Debug, Error)]
#[error("invalid date {key:?}; expected YYYY-MM-DD")]
pub struct MarkingKeyError {
    key: String,
    source: time::error::Parse,
}

impl MarkingKeyError {
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodKind;
    use time::macros::date;
    use time::Weekday::Monday;

    fn marked() -> Marking {
        Marking {
            marked: true,
            ..Marking::default()
        }
    }

    #[test]
    fn test_from_strings() {
        let dates =
            MarkedDates::from_strings([("2024-03-05", marked()), ("2024-03-01", Marking::default())])
                .unwrap();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates.get(date!(2024 - 03 - 05)), Some(&marked()));
        assert_eq!(dates.get(date!(2024 - 03 - 06)), None);
    }

    #[test]
    fn test_from_strings_bad_key() {
        let e = MarkedDates::from_strings([("2024-3-5", marked())]).unwrap_err();
        assert_eq!(e.key(), "2024-3-5");
        assert_eq!(e.to_string(), r#"invalid date "2024-3-5"; expected YYYY-MM-DD"#);
        assert!(MarkedDates::from_strings([("2024-02-30", marked())]).is_err());
    }

    #[test]
    fn test_first_in_month() {
        let periods = Periods::new(PeriodKind::Month, Monday);
        let dates = [
            (date!(2024 - 02 - 29), marked()),
            (date!(2024 - 03 - 20), marked()),
            (date!(2024 - 03 - 05), marked()),
            (date!(2024 - 04 - 01), marked()),
        ]
        .into_iter()
        .collect::<MarkedDates>();
        let march = periods.start_of(date!(2024 - 03 - 15));
        assert_eq!(dates.first_in(&periods, march), Some(date!(2024 - 03 - 05)));
        let may = periods.start_of(date!(2024 - 05 - 15));
        assert_eq!(dates.first_in(&periods, may), None);
    }

    #[test]
    fn test_first_in_week_skips_disabled() {
        let periods = Periods::new(PeriodKind::Week, Monday);
        let mut dates = MarkedDates::new();
        dates.insert(
            date!(2024 - 03 - 04),
            Marking {
                disabled: true,
                ..marked()
            },
        );
        dates.insert(date!(2024 - 03 - 10), marked());
        let week = periods.start_of(date!(2024 - 03 - 06));
        assert_eq!(dates.first_in(&periods, week), Some(date!(2024 - 03 - 10)));
    }
}
