// Trainer settings as persisted by the host application.
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::SpeedProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrainerSettings {
    /// Koch lesson, 1-based.
    pub lesson: u32,
    pub wpm: f64,
    pub effective_wpm: f64,
    pub frequency_hz: f64,
    /// Target exercise length in seconds.
    pub duration_secs: f64,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            lesson: 1,
            wpm: 20.0,
            effective_wpm: 15.0,
            frequency_hz: 800.0,
            duration_secs: 60.0,
        }
    }
}

impl TrainerSettings {
    /// Parse settings from JSON. Missing keys keep their defaults and an
    /// empty document yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Speed profile for these settings, with the effective speed clamped
    /// to the character speed.
    pub fn speed_profile(&self) -> Result<SpeedProfile> {
        SpeedProfile::clamped(self.wpm, self.effective_wpm, self.frequency_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MorseError;

    #[test]
    fn test_settings_defaults() {
        for json in ["", "  ", "{}"] {
            assert_eq!(
                TrainerSettings::from_json(json).unwrap(),
                TrainerSettings::default()
            );
        }
    }

    #[test]
    fn test_partial_settings_merge_with_defaults() {
        let settings =
            TrainerSettings::from_json(r#"{"lesson": 7, "effectiveWpm": 10}"#).unwrap();
        assert_eq!(settings.lesson, 7);
        assert_eq!(settings.effective_wpm, 10.0);
        assert_eq!(settings.wpm, 20.0);
        assert_eq!(settings.duration_secs, 60.0);
    }

    #[test]
    fn test_malformed_settings() {
        assert!(matches!(
            TrainerSettings::from_json("{\"wpm\": \"fast\"}"),
            Err(MorseError::Config(_))
        ));
    }

    #[test]
    fn test_settings_round_trip_and_profile() {
        let settings = TrainerSettings {
            effective_wpm: 30.0,
            ..Default::default()
        };
        let parsed = TrainerSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
        assert_eq!(settings.speed_profile().unwrap().effective_wpm, 20.0);
    }
}
