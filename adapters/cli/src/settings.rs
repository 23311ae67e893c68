//! TOML overrides for the default game settings.

use std::path::Path;
use std::time::Duration;

use garden_defence_core::GameSettings;
use serde::Deserialize;
use thiserror::Error;

/// Overlay file: every field is optional and falls back to the default
/// catalog value.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    initial_sun: Option<u32>,
    initial_materials: Option<u32>,
    base_health: Option<f32>,
    day_duration_secs: Option<f32>,
    night_duration_secs: Option<f32>,
    wave_interval_secs: Option<f32>,
    max_waves: Option<u32>,
    world_size: Option<u32>,
}

/// Failures while loading a settings override file.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The file could not be read from disk.
    #[error("failed to read settings file {path}")]
    Read {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for the settings schema.
    #[error("failed to parse settings file {path}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
    /// A numeric override is out of range.
    #[error("{field} must be positive")]
    NonPositive {
        /// Offending field name.
        field: &'static str,
    },
}

/// Loads game settings with overrides from the provided TOML file.
pub fn load(path: &Path) -> Result<GameSettings, SettingsError> {
    let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let file: SettingsFile = toml::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    overlay(GameSettings::default(), file)
}

fn overlay(mut settings: GameSettings, file: SettingsFile) -> Result<GameSettings, SettingsError> {
    if let Some(initial_sun) = file.initial_sun {
        settings.initial_sun = initial_sun;
    }
    if let Some(initial_materials) = file.initial_materials {
        settings.initial_materials = initial_materials;
    }
    if let Some(base_health) = file.base_health {
        if base_health <= 0.0 {
            return Err(SettingsError::NonPositive {
                field: "base_health",
            });
        }
        settings.base_health = base_health;
    }
    if let Some(secs) = file.day_duration_secs {
        settings.day_duration = positive_duration("day_duration_secs", secs)?;
    }
    if let Some(secs) = file.night_duration_secs {
        settings.night_duration = positive_duration("night_duration_secs", secs)?;
    }
    if let Some(secs) = file.wave_interval_secs {
        settings.wave_interval = positive_duration("wave_interval_secs", secs)?;
    }
    if let Some(max_waves) = file.max_waves {
        if max_waves == 0 {
            return Err(SettingsError::NonPositive { field: "max_waves" });
        }
        settings.max_waves = max_waves;
    }
    if let Some(world_size) = file.world_size {
        if world_size == 0 {
            return Err(SettingsError::NonPositive { field: "world_size" });
        }
        settings.world_size = world_size;
    }

    Ok(settings)
}

fn positive_duration(field: &'static str, secs: f32) -> Result<Duration, SettingsError> {
    if secs <= 0.0 || !secs.is_finite() {
        return Err(SettingsError::NonPositive { field });
    }
    Ok(Duration::from_secs_f32(secs))
}
