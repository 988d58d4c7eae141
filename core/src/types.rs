use serde::{Deserialize, Serialize};

use crate::error::{MorseError, Result};
use crate::patterns::is_supported;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MorseSymbol {
    Dit,
    Dah,
    IntraLetterGap,
    InterLetterGap,
    InterWordGap,
}

impl MorseSymbol {
    /// True for the keyed elements (dit and dah).
    pub fn is_tone(&self) -> bool {
        matches!(self, MorseSymbol::Dit | MorseSymbol::Dah)
    }
}

/// Sending speed, Farnsworth receiving speed and sidetone pitch.
///
/// `effective_wpm` never exceeds `wpm`: Farnsworth spacing only ever
/// stretches the silences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeedProfile {
    pub wpm: f64,
    pub effective_wpm: f64,
    pub frequency_hz: f64,
}

impl Default for SpeedProfile {
    fn default() -> Self {
        Self {
            wpm: 20.0,
            effective_wpm: 15.0,
            frequency_hz: 800.0,
        }
    }
}

impl SpeedProfile {
    pub fn new(wpm: f64, effective_wpm: f64, frequency_hz: f64) -> Result<Self> {
        let profile = Self {
            wpm,
            effective_wpm,
            frequency_hz,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Like [`SpeedProfile::new`], but pulls an effective speed above the
    /// character speed down to it instead of rejecting it.
    pub fn clamped(wpm: f64, effective_wpm: f64, frequency_hz: f64) -> Result<Self> {
        Self::new(wpm, effective_wpm.min(wpm), frequency_hz)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.wpm.is_finite() && self.wpm > 0.0) {
            return Err(MorseError::invalid_profile(format!(
                "wpm must be positive, got {}",
                self.wpm
            )));
        }
        if !(self.effective_wpm.is_finite() && self.effective_wpm > 0.0) {
            return Err(MorseError::invalid_profile(format!(
                "effective wpm must be positive, got {}",
                self.effective_wpm
            )));
        }
        if self.effective_wpm > self.wpm {
            return Err(MorseError::invalid_profile(format!(
                "effective wpm {} exceeds character speed {}",
                self.effective_wpm, self.wpm
            )));
        }
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(MorseError::invalid_profile(format!(
                "tone frequency must be positive, got {}",
                self.frequency_hz
            )));
        }
        Ok(())
    }
}

/// Exercise text: supported characters separated by literal spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MorseText {
    text: String,
}

impl MorseText {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if let Some(ch) = text.chars().find(|&c| c != ' ' && !is_supported(c)) {
            return Err(MorseError::UnsupportedCharacter(ch));
        }
        Ok(Self { text })
    }

    /// Appends a space and then `word`. The leading space gives the
    /// listener a word gap of lead-in before the first group.
    pub fn push_word(&mut self, word: &str) -> Result<()> {
        if let Some(ch) = word.chars().find(|&c| !is_supported(c)) {
            return Err(MorseError::UnsupportedCharacter(ch));
        }
        self.text.push(' ');
        self.text.push_str(word);
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl TryFrom<String> for MorseText {
    type Error = MorseError;

    fn try_from(text: String) -> Result<Self> {
        Self::new(text)
    }
}

impl From<MorseText> for String {
    fn from(text: MorseText) -> Self {
        text.text
    }
}

impl AsRef<str> for MorseText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Mono audio at a fixed sample rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Consecutive `block_size` slices; the last one may be shorter.
    pub fn blocks(&self, block_size: usize) -> std::slice::Chunks<'_, f32> {
        self.samples.chunks(block_size.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_from_json() {
        let profile: SpeedProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, SpeedProfile::default());

        let profile: SpeedProfile =
            serde_json::from_str(r#"{"wpm": 25, "effectiveWpm": 10}"#).unwrap();
        assert_eq!(profile.wpm, 25.0);
        assert_eq!(profile.effective_wpm, 10.0);
        assert_eq!(profile.frequency_hz, 800.0);
    }

    #[test]
    fn test_profile_rejects_invalid_speeds() {
        assert!(matches!(
            SpeedProfile::new(0.0, 0.0, 800.0),
            Err(MorseError::InvalidProfile(_))
        ));
        assert!(matches!(
            SpeedProfile::new(20.0, 25.0, 800.0),
            Err(MorseError::InvalidProfile(_))
        ));
        assert!(matches!(
            SpeedProfile::new(20.0, 15.0, -1.0),
            Err(MorseError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_profile_clamps_effective_speed() {
        let profile = SpeedProfile::clamped(20.0, 25.0, 800.0).unwrap();
        assert_eq!(profile.effective_wpm, 20.0);
    }

    #[test]
    fn test_morse_text_push_word() {
        let mut text = MorseText::default();
        text.push_word("KMKMR").unwrap();
        text.push_word("MMK").unwrap();
        assert_eq!(text.as_str(), " KMKMR MMK");
        assert_eq!(text.words().collect::<Vec<_>>(), vec!["KMKMR", "MMK"]);
        assert!(matches!(
            text.push_word("A#"),
            Err(MorseError::UnsupportedCharacter('#'))
        ));
    }

    #[test]
    fn test_morse_text_json_is_validated() {
        let text: MorseText = serde_json::from_str(r#"" KMR MMK""#).unwrap();
        assert_eq!(text.as_str(), " KMR MMK");
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"" KMR MMK""#);
        assert!(serde_json::from_str::<MorseText>(r#""KM#""#).is_err());
    }

    #[test]
    fn test_sample_buffer_blocks() {
        let buffer = SampleBuffer::new(vec![0.0; 2500], 1000);
        let sizes: Vec<usize> = buffer.blocks(1024).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![1024, 1024, 452]);
        assert_eq!(buffer.duration_seconds(), 2.5);
    }
}
