use crate::models::settings::BoardSettings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current settings
    pub fn get(&self) -> Result<BoardSettings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, theme, first_day_of_week, time_format,
                        day_start_hour, day_end_hour
                 FROM settings WHERE id = 1",
                [],
                |row| {
                    Ok(BoardSettings {
                        id: Some(row.get(0)?),
                        theme: row.get(1)?,
                        first_day_of_week: row.get::<_, i64>(2)? as u8,
                        time_format: row.get(3)?,
                        day_start_hour: row.get::<_, i64>(4)? as u32,
                        day_end_hour: row.get::<_, i64>(5)? as u32,
                    })
                },
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &BoardSettings) -> Result<()> {
        validate(settings).map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET theme = ?1, \
                 first_day_of_week = ?2, \
                 time_format = ?3, \
                 day_start_hour = ?4, \
                 day_end_hour = ?5, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            (
                &settings.theme,
                settings.first_day_of_week,
                &settings.time_format,
                settings.day_start_hour,
                settings.day_end_hour,
            ),
        )
        .context("Failed to update settings")?;

        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&BoardSettings::default())
    }
}

fn validate(settings: &BoardSettings) -> Result<(), String> {
    if !matches!(settings.theme.as_str(), "system" | "light" | "dark") {
        return Err(format!("Unknown theme '{}'", settings.theme));
    }
    if settings.first_day_of_week > 6 {
        return Err("First day of week must be 0-6".to_string());
    }
    if !matches!(settings.time_format.as_str(), "12h" | "24h") {
        return Err(format!("Unknown time format '{}'", settings.time_format));
    }
    if settings.day_end_hour > 24 || settings.day_start_hour >= settings.day_end_hour {
        return Err("Visible hour range must satisfy start < end <= 24".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::database::Database;

    fn setup_test_db() -> Database {
        let db = Database::new(":memory:").unwrap();
        db.initialize_schema().unwrap();
        db
    }

    #[test]
    fn test_get_default_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let settings = service.get().unwrap();
        assert_eq!(settings.theme, "system");
        assert_eq!(settings.first_day_of_week, 1);
        assert_eq!(settings.day_start_hour, 0);
        assert_eq!(settings.day_end_hour, 24);
    }

    #[test]
    fn test_update_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "dark".to_string();
        settings.day_start_hour = 6;
        settings.day_end_hour = 23;

        service.update(&settings).unwrap();

        let updated = service.get().unwrap();
        assert_eq!(updated.theme, "dark");
        assert_eq!(updated.day_start_hour, 6);
        assert_eq!(updated.day_end_hour, 23);
    }

    #[test]
    fn test_update_rejects_unknown_theme() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "solarized".to_string();

        assert!(service.update(&settings).is_err());
    }

    #[test]
    fn test_update_rejects_inverted_hour_range() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.day_start_hour = 20;
        settings.day_end_hour = 8;

        assert!(service.update(&settings).is_err());
    }

    #[test]
    fn test_reset_settings() {
        let db = setup_test_db();
        let service = SettingsService::new(&db);

        let mut settings = service.get().unwrap();
        settings.theme = "light".to_string();
        settings.first_day_of_week = 0;
        service.update(&settings).unwrap();

        service.reset().unwrap();

        let reset_settings = service.get().unwrap();
        let defaults = BoardSettings::default();
        assert_eq!(reset_settings.theme, defaults.theme);
        assert_eq!(reset_settings.first_day_of_week, defaults.first_day_of_week);
    }
}
