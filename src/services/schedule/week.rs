//! Bounded week paging.

use chrono::{Duration, NaiveDate};

use crate::utils::date::get_week_start;

/// Navigation is clamped to this many weeks either side of today.
pub const MAX_WEEK_OFFSET: i32 = 2;

/// The visible 7-day window: an integer week offset from the week
/// containing today. Paging clamps at the bounds rather than wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeekWindow {
    offset: i32,
}

impl WeekWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn is_current(&self) -> bool {
        self.offset == 0
    }

    pub fn at_first(&self) -> bool {
        self.offset == -MAX_WEEK_OFFSET
    }

    pub fn at_last(&self) -> bool {
        self.offset == MAX_WEEK_OFFSET
    }

    pub fn next(&mut self) {
        self.offset = (self.offset + 1).min(MAX_WEEK_OFFSET);
    }

    pub fn previous(&mut self) {
        self.offset = (self.offset - 1).max(-MAX_WEEK_OFFSET);
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// First date of the window anchored at `today`.
    pub fn start_date(&self, today: NaiveDate, first_day_of_week: u8) -> NaiveDate {
        get_week_start(today, first_day_of_week) + Duration::weeks(self.offset.into())
    }

    /// The 7 consecutive dates of the window.
    pub fn dates(&self, today: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
        let start = self.start_date(today, first_day_of_week);
        (0..7).map(|i| start + Duration::days(i)).collect()
    }
}
