use crate::encoder::encode;
use crate::error::{MorseError, Result};
use crate::timing::Timing;
use crate::types::{MorseSymbol, SampleBuffer, SpeedProfile};
use std::f64::consts::PI;

// Audio constants
pub const SAMPLE_RATE: u32 = 44100;
const BANDWIDTH_PER_WPM: f64 = 4.0; // Rule of thumb: a CW signal occupies about 4 * WPM Hz

// First-order Butterworth band-pass, digitized with the pre-warped bilinear
// transform. One analog pole pair becomes a 2-pole / 2-zero section.
#[derive(Clone, Debug, Default)]
struct BandPassFilter {
    b0: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64,
    z2: f64,
}

impl BandPassFilter {
    fn new(center_freq: f64, bandwidth: f64, sample_rate: f64) -> Result<Self> {
        let low = center_freq - bandwidth / 2.0;
        let high = center_freq + bandwidth / 2.0;
        let nyquist = sample_rate / 2.0;
        if low <= 0.0 || high >= nyquist {
            return Err(MorseError::invalid_profile(format!(
                "pass band {low:.1}-{high:.1} Hz does not fit below {nyquist:.1} Hz"
            )));
        }

        let wl = (PI * low / sample_rate).tan();
        let wh = (PI * high / sample_rate).tan();
        let bw = wh - wl;
        let w0_sq = wl * wh;
        let norm = 1.0 + bw + w0_sq;

        Ok(Self {
            b0: bw / norm,
            b2: -bw / norm,
            a1: 2.0 * (w0_sq - 1.0) / norm,
            a2: (1.0 - bw + w0_sq) / norm,
            ..Default::default()
        })
    }

    // Direct form II transposed; b1 is zero for this band-pass.
    fn process(&mut self, input: f64) -> f64 {
        let output = self.b0 * input + self.z1;
        self.z1 = self.z2 - self.a1 * output;
        self.z2 = self.b2 * input - self.a2 * output;
        output
    }
}

fn sample_count(duration: f64, sample_rate: u32) -> usize {
    let count = duration * sample_rate as f64;
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

fn push_tone(samples: &mut Vec<f64>, count: usize, frequency: f64, sample_rate: u32) {
    let factor = frequency * 2.0 * PI / sample_rate as f64;
    samples.extend((0..count).map(|n| (n as f64 * factor).sin()));
}

/// Generate filtered Morse audio from a symbol stream at [`SAMPLE_RATE`].
pub fn synthesize(symbols: &[MorseSymbol], profile: &SpeedProfile) -> Result<SampleBuffer> {
    synthesize_at(symbols, profile, SAMPLE_RATE)
}

/// Generate filtered Morse audio from a symbol stream.
///
/// Tones restart at phase zero for every dit and dah. The band-pass runs
/// once over the whole concatenated signal so its state carries across
/// tone edges.
pub fn synthesize_at(
    symbols: &[MorseSymbol],
    profile: &SpeedProfile,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    if sample_rate == 0 {
        return Err(MorseError::invalid_profile("sample rate must be positive"));
    }
    let timing = Timing::from_profile(profile)?;
    let mut filter = BandPassFilter::new(
        profile.frequency_hz,
        BANDWIDTH_PER_WPM * profile.wpm,
        sample_rate as f64,
    )?;

    if symbols.is_empty() {
        return Ok(SampleBuffer::new(Vec::new(), sample_rate));
    }

    let total = sample_count(timing.tally(symbols), sample_rate) + symbols.len();
    let mut raw = Vec::with_capacity(total);

    for &symbol in symbols {
        let count = sample_count(timing.duration(symbol), sample_rate);
        if count == 0 {
            return Err(MorseError::invalid_profile(format!(
                "{symbol:?} is shorter than one sample at {sample_rate} Hz"
            )));
        }

        if symbol.is_tone() {
            push_tone(&mut raw, count, profile.frequency_hz, sample_rate);
        } else {
            raw.resize(raw.len() + count, 0.0);
        }
    }

    let samples: Vec<f32> = raw
        .into_iter()
        .map(|x| filter.process(x) as f32)
        .collect();

    log::debug!(
        "synthesized {} symbols into {} samples ({:.2}s)",
        symbols.len(),
        samples.len(),
        samples.len() as f64 / sample_rate as f64
    );

    Ok(SampleBuffer::new(samples, sample_rate))
}

/// Encode `text` and synthesize it in one step.
pub fn encode_and_synthesize(text: &str, profile: &SpeedProfile) -> Result<SampleBuffer> {
    let symbols = encode(text)?;
    synthesize(&symbols, profile)
}

/// Number of samples `symbols` would produce, without generating audio.
pub fn synthesized_len(
    symbols: &[MorseSymbol],
    profile: &SpeedProfile,
    sample_rate: u32,
) -> Result<usize> {
    let timing = Timing::from_profile(profile)?;
    Ok(symbols
        .iter()
        .map(|&s| sample_count(timing.duration(s), sample_rate))
        .sum())
}
