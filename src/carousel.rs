use crate::debounce::Debouncer;
use std::time::{Duration, Instant};

/// Flags accepted by the programmatic scrolling methods
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ScrollOptions {
    /// Settle after the debounce delay rather than on the next poll
    pub animated: bool,
    /// Deliver a settle event for the new page.  Without one, the page
    /// changes silently and no callbacks fire.
    pub fire_callback: bool,
    /// Deliver a settle event even if the target is already the visible page
    pub force: bool,
}

impl ScrollOptions {
    pub fn new() -> ScrollOptions {
        ScrollOptions::default()
    }

    pub fn animated(mut self, yes: bool) -> ScrollOptions {
        self.animated = yes;
        self
    }

    pub fn fire_callback(mut self, yes: bool) -> ScrollOptions {
        self.fire_callback = yes;
        self
    }

    pub fn force(mut self, yes: bool) -> ScrollOptions {
        self.force = yes;
        self
    }
}

impl Default for ScrollOptions {
    fn default() -> ScrollOptions {
        ScrollOptions {
            animated: true,
            fire_callback: true,
            force: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Backwards,
    Forwards,
}

/// The paging strip underlying a calendar: which page is on screen, and the
/// debounced "index changed" notifications it emits
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Carousel {
    len: usize,
    index: usize,
    settle: Debouncer<usize>,
}

impl Carousel {
    pub(crate) fn new(len: usize, index: usize, delay: Duration) -> Carousel {
        Carousel {
            len,
            index: index.min(len.saturating_sub(1)),
            settle: Debouncer::new(delay),
        }
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    /// User gesture: move one page.  Returns `false` at either end.
    pub(crate) fn swipe(&mut self, direction: Direction, now: Instant) -> bool {
        let target = match direction {
            Direction::Backwards => self.index.checked_sub(1),
            Direction::Forwards => Some(self.index + 1).filter(|&i| i < self.len),
        };
        let Some(target) = target else {
            return false;
        };
        self.index = target;
        self.settle.schedule(target, now);
        true
    }

    /// Programmatic move.  Returns whether a settle event will follow, either
    /// newly scheduled or one already pending for the target page.
    pub(crate) fn snap_to(&mut self, index: usize, opts: ScrollOptions, now: Instant) -> bool {
        if index >= self.len {
            return false;
        }
        let moved = index != self.index;
        self.index = index;
        if opts.fire_callback && (moved || opts.force) {
            if opts.animated {
                self.settle.schedule(index, now);
            } else {
                self.settle.schedule_at(index, now);
            }
            true
        } else if opts.fire_callback && self.settle.is_pending() {
            true
        } else {
            // A silent move supersedes any swipe still waiting to settle
            self.settle.cancel();
            false
        }
    }

    pub(crate) fn poll(&mut self, now: Instant) -> Option<usize> {
        self.settle.poll(now)
    }

    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }
}
