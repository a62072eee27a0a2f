//! Paged month and week calendar widgets for [`ratatui`].
//!
//! A [`CalendarPager`] holds the state of one calendar: the range of pages
//! it can show, which page is on screen, the selected date, and any
//! [`MarkedDates`].  It reports selections and page changes to a
//! [`SelectionHandler`].  Draw it with [`CalendarView`].
//!
//! Paging is debounced: after a swipe or a `scroll_to_*` call the calendar
//! only "settles" on the new page once [`CalendarPager::tick()`] is called at
//! or after [`CalendarPager::next_deadline()`].  Settling after a swipe may
//! auto-select a date in the new page (see [`AutoSelect`]); settling after
//! programmatic navigation never does.
//!
//! ```no_run
//! use calpager::{CalendarOptions, CalendarPager, ScrollOptions, SelectionLog};
//! use std::time::Instant;
//! use time::macros::date;
//!
//! let mut cal = CalendarPager::new(
//!     date!(2024 - 03 - 06),
//!     None,
//!     CalendarOptions::month(),
//!     SelectionLog::new(),
//! );
//! cal.scroll_to_date(date!(2024 - 05 - 15), ScrollOptions::new(), Instant::now());
//! for event in cal.handler_mut().drain() {
//!     println!("{event:?}");
//! }
//! ```

mod calendar;
mod carousel;
mod config;
mod debounce;
mod marking;
mod options;
mod pages;
mod period;
mod range;
mod sync;
mod theme;

pub use crate::calendar::{
    CalendarEvent, CalendarPager, CalendarView, DayCell, EndOfRangeError, SelectionHandler,
    SelectionLog,
};
pub use crate::carousel::ScrollOptions;
pub use crate::config::{Config, ConfigError};
pub use crate::debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use crate::marking::{MarkedDates, Marking, MarkingKeyError};
pub use crate::options::CalendarOptions;
pub use crate::pages::{PageMode, PagedView};
pub use crate::period::{weekday_from_index, PageKey, PeriodKind, Periods};
pub use crate::range::PageRange;
pub use crate::sync::{AutoSelect, SelectSource, SelectionSync, SyncState};
pub use crate::theme::{CalendarTheme, StyleSpec, ThemeConfig};
