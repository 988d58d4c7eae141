// Morse receive trainer engine
// Text to Farnsworth-timed Morse audio, background playback, and
// alignment-based scoring of the trainee's transcription.

pub mod align;
pub mod audio;
pub mod config;
#[cfg(feature = "device")]
pub mod device;
pub mod distance;
pub mod encoder;
pub mod error;
pub mod exercise;
pub mod patterns;
pub mod playback;
pub mod score;
pub mod timing;
pub mod types;

// Re-export main public API
pub use align::{align, Alignment, EditOp};
pub use audio::{encode_and_synthesize, synthesize, SAMPLE_RATE};
pub use config::TrainerSettings;
pub use distance::edit_distance;
pub use encoder::encode;
pub use error::{MorseError, Result};
pub use exercise::{ExerciseGenerator, KOCH_LETTERS};
pub use patterns::encode_char;
pub use playback::{PlaybackOutcome, PlaybackSession, Player, SampleSink, BLOCK_SIZE};
pub use score::{score_texts, score_transcription, TranscriptionScore, WordComparison};
pub use timing::{tally_duration, Timing};
pub use types::*;

/// Seconds needed to send `text`; used to size exercises.
pub fn encode_and_tally(text: &str, profile: &SpeedProfile) -> Result<f64> {
    tally_duration(text, profile)
}

/// Start playing `buffer` in the background on the sink that `open_sink`
/// opens.
pub fn play<F, S>(buffer: SampleBuffer, open_sink: F) -> Result<PlaybackSession>
where
    F: FnOnce(u32) -> Result<S> + Send + 'static,
    S: SampleSink,
{
    playback::start(buffer, open_sink)
}

/// Start playing `buffer` on the default output device.
#[cfg(feature = "device")]
pub fn play_default(buffer: SampleBuffer) -> Result<PlaybackSession> {
    playback::start(buffer, device::CpalSink::open)
}

/// Stop a session; no further samples are written once this returns.
pub fn stop(session: PlaybackSession) -> Result<PlaybackOutcome> {
    session.stop()
}
