// Settings module
// Persisted board preferences

/// Board preferences persisted in the settings table.
pub struct BoardSettings {
    pub id: Option<i64>,
    /// "system", "light" or "dark"
    pub theme: String,
    pub first_day_of_week: u8,
    pub time_format: String,
    /// First visible hour of the time grid (inclusive).
    pub day_start_hour: u32,
    /// Last visible hour of the time grid (exclusive).
    pub day_end_hour: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            id: Some(1),
            theme: "system".to_string(),
            first_day_of_week: 1, // Monday
            time_format: "24h".to_string(),
            day_start_hour: 0,
            day_end_hour: 24,
        }
    }
}
