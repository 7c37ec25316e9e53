//! Temporal layout engine.
//!
//! Bidirectional, stateless mapping between time-of-day and the board's
//! vertical pixel axis, and between horizontal pixels and day columns.
//! The inverse mapping is quantized to the 15-minute slot grid.

use chrono::{NaiveTime, Timelike};

/// Slot quantization step in minutes.
pub const SLOT_MINUTES: i64 = 15;
/// Rendered height of one 15-minute slot.
pub const SLOT_HEIGHT: f32 = 30.0;
/// Width of the time-axis gutter on the left of the grid.
pub const TIME_LABEL_WIDTH: f32 = 50.0;
/// Gap between day columns.
pub const COLUMN_SPACING: f32 = 1.0;
/// Days per board window.
pub const DAYS_PER_WEEK: usize = 7;

/// Round minutes-since-midnight to the nearest slot boundary.
pub fn snap_minutes(minutes: i64) -> i64 {
    let half = SLOT_MINUTES / 2;
    ((minutes + half).div_euclid(SLOT_MINUTES)) * SLOT_MINUTES
}

/// Pure mapping between calendar time and grid coordinates for one
/// configured visible hour range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGridLayout {
    /// First visible hour (inclusive).
    pub start_hour: u32,
    /// Last visible hour (exclusive); 24 means the grid runs to midnight.
    pub end_hour: u32,
}

impl TimeGridLayout {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        let end_hour = end_hour.clamp(1, 24);
        let start_hour = start_hour.min(end_hour - 1);
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn full_day() -> Self {
        Self::new(0, 24)
    }

    pub fn visible_minutes(&self) -> i64 {
        i64::from(self.end_hour - self.start_hour) * 60
    }

    pub fn slot_count(&self) -> i64 {
        self.visible_minutes() / SLOT_MINUTES
    }

    pub fn grid_height(&self) -> f32 {
        self.slot_count() as f32 * SLOT_HEIGHT
    }

    pub fn pixels_per_minute(&self) -> f32 {
        SLOT_HEIGHT / SLOT_MINUTES as f32
    }

    fn range_start_minutes(&self) -> i64 {
        i64::from(self.start_hour) * 60
    }

    /// Vertical offset of a time-of-day from the top of the grid.
    /// Times outside the visible range clamp to the grid edges.
    pub fn y_for_time(&self, time: NaiveTime) -> f32 {
        let minutes = i64::from(time.hour()) * 60 + i64::from(time.minute())
            - self.range_start_minutes();
        let clamped = minutes.clamp(0, self.visible_minutes());
        clamped as f32 * self.pixels_per_minute()
    }

    /// Inverse of [`y_for_time`], snapped to the nearest 15-minute slot.
    ///
    /// [`y_for_time`]: TimeGridLayout::y_for_time
    pub fn time_for_y(&self, y: f32) -> NaiveTime {
        let raw_minutes = (y / self.pixels_per_minute()).round() as i64;
        let snapped = snap_minutes(raw_minutes).clamp(0, self.visible_minutes());
        let total = snapped + self.range_start_minutes();
        // The exclusive end of a 24h grid is not a representable time of day.
        let total = total.min(24 * 60 - SLOT_MINUTES);
        NaiveTime::from_hms_opt((total / 60) as u32, (total % 60) as u32, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    /// Height in pixels of a block `duration_minutes` long, clipped to the
    /// part of it that is visible from `start`.
    pub fn height_for_duration(&self, start: NaiveTime, duration_minutes: i64) -> f32 {
        let top = self.y_for_time(start);
        let end_minutes = i64::from(start.hour()) * 60
            + i64::from(start.minute())
            + duration_minutes.max(0)
            - self.range_start_minutes();
        let bottom = end_minutes.clamp(0, self.visible_minutes()) as f32
            * self.pixels_per_minute();
        (bottom - top).max(0.0)
    }

    /// Map a horizontal pixel position to a day column index in `[0, 6]`.
    pub fn day_index_for_x(&self, x: f32, col_width: f32) -> usize {
        let offset = x - TIME_LABEL_WIDTH - COLUMN_SPACING;
        if offset <= 0.0 || col_width <= 0.0 {
            return 0;
        }
        let index = (offset / (col_width + COLUMN_SPACING)).floor() as usize;
        index.min(DAYS_PER_WEEK - 1)
    }

    /// Left edge of a day column.
    pub fn x_for_day(&self, day_index: usize, col_width: f32) -> f32 {
        TIME_LABEL_WIDTH + COLUMN_SPACING + day_index as f32 * (col_width + COLUMN_SPACING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_y_is_linear_in_minutes() {
        let layout = TimeGridLayout::full_day();
        assert_eq!(layout.y_for_time(t(0, 0)), 0.0);
        assert_eq!(layout.y_for_time(t(0, 15)), SLOT_HEIGHT);
        assert_eq!(layout.y_for_time(t(1, 0)), 4.0 * SLOT_HEIGHT);
    }

    #[test]
    fn test_offset_range_shifts_origin() {
        let layout = TimeGridLayout::new(6, 23);
        assert_eq!(layout.y_for_time(t(6, 0)), 0.0);
        assert_eq!(layout.y_for_time(t(7, 30)), 6.0 * SLOT_HEIGHT);
        // Before the visible range clamps to the top edge.
        assert_eq!(layout.y_for_time(t(4, 0)), 0.0);
    }

    #[test]
    fn test_distinct_slots_map_to_distinct_y() {
        let layout = TimeGridLayout::new(6, 23);
        let mut last = -1.0_f32;
        for slot in 0..layout.slot_count() {
            let minutes = slot * SLOT_MINUTES + 6 * 60;
            let y = layout.y_for_time(t((minutes / 60) as u32, (minutes % 60) as u32));
            assert!(y > last, "slot {} collided", slot);
            last = y;
        }
    }

    #[test]
    fn test_time_for_y_snaps_to_quarter_hours() {
        let layout = TimeGridLayout::full_day();
        // 7 minutes of pixels rounds down, 8 rounds up.
        let ppm = layout.pixels_per_minute();
        assert_eq!(layout.time_for_y(7.0 * ppm), t(0, 0));
        assert_eq!(layout.time_for_y(8.0 * ppm), t(0, 15));
        assert_eq!(layout.time_for_y(630.0 * ppm), t(10, 30));
    }

    #[test]
    fn test_round_trip_is_exact_on_slot_boundaries() {
        let layout = TimeGridLayout::new(6, 23);
        for slot in 0..layout.slot_count() {
            let minutes = slot * SLOT_MINUTES + 6 * 60;
            let time = t((minutes / 60) as u32, (minutes % 60) as u32);
            assert_eq!(layout.time_for_y(layout.y_for_time(time)), time);
        }
    }

    #[test]
    fn test_last_slot_of_full_day_is_representable() {
        let layout = TimeGridLayout::full_day();
        assert_eq!(layout.time_for_y(layout.grid_height()), t(23, 45));
    }

    #[test]
    fn test_height_for_duration() {
        let layout = TimeGridLayout::full_day();
        assert_eq!(layout.height_for_duration(t(10, 0), 45), 3.0 * SLOT_HEIGHT);
        assert_eq!(layout.height_for_duration(t(10, 0), 0), 0.0);
    }

    #[test]
    fn test_height_clips_at_grid_bottom() {
        let layout = TimeGridLayout::new(6, 23);
        // 22:00 + 3h clips at 23:00.
        assert_eq!(layout.height_for_duration(t(22, 0), 180), 4.0 * SLOT_HEIGHT);
    }

    #[test]
    fn test_day_index_for_x_maps_columns() {
        let layout = TimeGridLayout::full_day();
        let col_width = 120.0;

        let first = layout.x_for_day(0, col_width);
        assert_eq!(layout.day_index_for_x(first + 1.0, col_width), 0);

        let fourth = layout.x_for_day(3, col_width);
        assert_eq!(layout.day_index_for_x(fourth + col_width / 2.0, col_width), 3);
    }

    #[test]
    fn test_day_index_for_x_clamps() {
        let layout = TimeGridLayout::full_day();
        assert_eq!(layout.day_index_for_x(-50.0, 120.0), 0);
        assert_eq!(layout.day_index_for_x(10.0, 120.0), 0); // inside the gutter
        assert_eq!(layout.day_index_for_x(10_000.0, 120.0), 6);
    }

    #[test]
    fn test_snap_minutes_rounds_to_nearest() {
        assert_eq!(snap_minutes(0), 0);
        assert_eq!(snap_minutes(7), 0);
        assert_eq!(snap_minutes(8), 15);
        assert_eq!(snap_minutes(22), 15);
        assert_eq!(snap_minutes(23), 30);
        assert_eq!(snap_minutes(-7), 0);
    }

    #[test]
    fn test_degenerate_range_is_widened() {
        let layout = TimeGridLayout::new(12, 12);
        assert!(layout.slot_count() > 0);
    }
}
