use crate::encoder::encode;
use crate::error::Result;
use crate::types::{MorseSymbol, SpeedProfile};

// ITU timing constants
const DOT_LENGTH_WPM: f64 = 1.2; // Standard ITU timing formula: dot duration = 1.2 / WPM seconds
const DOTS_PER_DASH: f64 = 3.0; // ITU-R M.1677: dash = 3 dot durations
const DOTS_PER_CHAR_GAP: f64 = 3.0; // ITU-R M.1677: inter-character gap = 3 dot durations
const DOTS_PER_WORD_GAP: f64 = 7.0; // ITU-R M.1677: inter-word gap = 7 dot durations

// Farnsworth spacing (ARRL): below this effective speed the letter and
// word gaps are stretched from the per-character delay.
const FARNSWORTH_THRESHOLD_WPM: f64 = 18.0;
const FARNSWORTH_GAP_UNITS: f64 = 19.0;

/// Durations in seconds of every symbol kind for one speed profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub dit: f64,
    pub dah: f64,
    pub intra_letter_gap: f64,
    pub inter_letter_gap: f64,
    pub inter_word_gap: f64,
}

impl Timing {
    pub fn from_profile(profile: &SpeedProfile) -> Result<Self> {
        profile.validate()?;

        let wpm = profile.wpm;
        let effective = profile.effective_wpm;
        let dit = DOT_LENGTH_WPM / wpm;

        let (inter_letter_gap, inter_word_gap) = if effective >= FARNSWORTH_THRESHOLD_WPM {
            (DOTS_PER_CHAR_GAP * dit, DOTS_PER_WORD_GAP * dit)
        } else {
            let delay = farnsworth_delay(wpm, effective);
            (
                DOTS_PER_CHAR_GAP * delay / FARNSWORTH_GAP_UNITS,
                DOTS_PER_WORD_GAP * delay / FARNSWORTH_GAP_UNITS,
            )
        };

        Ok(Self {
            dit,
            dah: DOTS_PER_DASH * dit,
            intra_letter_gap: dit,
            inter_letter_gap,
            inter_word_gap,
        })
    }

    pub fn duration(&self, symbol: MorseSymbol) -> f64 {
        match symbol {
            MorseSymbol::Dit => self.dit,
            MorseSymbol::Dah => self.dah,
            MorseSymbol::IntraLetterGap => self.intra_letter_gap,
            MorseSymbol::InterLetterGap => self.inter_letter_gap,
            MorseSymbol::InterWordGap => self.inter_word_gap,
        }
    }

    /// Total length of an already encoded stream.
    pub fn tally(&self, symbols: &[MorseSymbol]) -> f64 {
        symbols.iter().map(|&s| self.duration(s)).sum()
    }
}

// Total delay spread over the 19 gap units of "PARIS " at the effective speed.
fn farnsworth_delay(wpm: f64, effective_wpm: f64) -> f64 {
    (60.0 * wpm - 37.2 * effective_wpm) / (wpm * effective_wpm)
}

/// Length in seconds that `text` takes to send, without synthesizing it.
pub fn tally_duration(text: &str, profile: &SpeedProfile) -> Result<f64> {
    let timing = Timing::from_profile(profile)?;
    let symbols = encode(text)?;
    Ok(timing.tally(&symbols))
}
