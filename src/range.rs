use crate::period::{PageKey, Periods};
use std::iter::successors;
use time::Date;

/// The ordered, contiguous sequence of pages a calendar can show
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PageRange {
    // Invariant: ascending, contiguous, no duplicates
    keys: Vec<PageKey>,
}

impl PageRange {
    /// Builds the pages from `page_count` periods before the period
    /// containing `anchor` through `page_count` periods after it, clipped to
    /// the periods containing `min` and `max`.
    ///
    /// The range is empty if the anchor's period falls outside the bounds.
    pub fn build(
        periods: &Periods,
        anchor: Date,
        min: Option<Date>,
        max: Option<Date>,
        page_count: usize,
    ) -> PageRange {
        let anchor = periods.start_of(anchor);
        let min = min.map(|d| periods.start_of(d));
        let max = max.map(|d| periods.start_of(d));
        if min.is_some_and(|m| anchor < m) || max.is_some_and(|m| anchor > m) {
            tracing::debug!(%anchor, ?min, ?max, "anchor period lies outside bounds; range is empty");
            return PageRange::default();
        }
        let within = |k: &PageKey| min.is_none_or(|m| *k >= m) && max.is_none_or(|m| *k <= m);
        let mut keys = successors(Some(anchor), |&k| periods.offset(k, -1))
            .skip(1)
            .take(page_count)
            .take_while(within)
            .collect::<Vec<_>>();
        keys.reverse();
        keys.push(anchor);
        keys.extend(
            successors(Some(anchor), |&k| periods.offset(k, 1))
                .skip(1)
                .take(page_count)
                .take_while(within),
        );
        PageRange { keys }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<PageKey> {
        self.keys.get(index).copied()
    }

    pub fn first(&self) -> Option<PageKey> {
        self.keys.first().copied()
    }

    pub fn last(&self) -> Option<PageKey> {
        self.keys.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = PageKey> + '_ {
        self.keys.iter().copied()
    }

    /// Index of the page containing `date`, if it is in the range
    pub fn position_of(&self, periods: &Periods, date: Date) -> Option<usize> {
        self.keys.binary_search(&periods.start_of(date)).ok()
    }

    /// First and last dates covered by the range
    pub fn span(&self, periods: &Periods) -> Option<(Date, Date)> {
        Some((self.first()?.date(), periods.end_of(self.last()?)))
    }
}
