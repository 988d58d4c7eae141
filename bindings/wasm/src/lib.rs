// WebAssembly bindings for the trainer UI
use js_sys::Array;
use morse_trainer_core::timing::Timing;
use morse_trainer_core::{
    encode, encode_and_synthesize, encode_and_tally, exercise, Alignment, ExerciseGenerator,
    SampleBuffer, SpeedProfile, TrainerSettings,
};
use wasm_bindgen::prelude::*;

mod support;

// Console logging for debugging
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// Macro to generate wasm_bindgen wrapper enums that mirror core enums
macro_rules! wasm_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident = $value:expr),* $(,)?
        }
        from $core_type:ty
    ) => {
        #[wasm_bindgen]
        $(#[$meta])*
        $vis enum $name {
            $($variant = $value),*
        }

        impl From<$core_type> for $name {
            fn from(value: $core_type) -> Self {
                match value {
                    $(<$core_type>::$variant => $name::$variant),*
                }
            }
        }

        impl From<$name> for $core_type {
            fn from(value: $name) -> Self {
                match value {
                    $($name::$variant => <$core_type>::$variant),*
                }
            }
        }
    };
}

wasm_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MorseSymbol {
        Dit = 0,
        Dah = 1,
        IntraLetterGap = 2,
        InterLetterGap = 3,
        InterWordGap = 4,
    }
    from morse_trainer_core::MorseSymbol
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// JavaScript-compatible result types
#[wasm_bindgen]
pub struct MorseEncodingResult {
    symbols: Vec<morse_trainer_core::MorseSymbol>,
    timing: Timing,
}

#[wasm_bindgen]
impl MorseEncodingResult {
    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.symbols.len()
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.timing.tally(&self.symbols)
    }

    #[wasm_bindgen(getter)]
    pub fn elements(&self) -> Result<Array, JsValue> {
        let array = Array::new();
        for &symbol in &self.symbols {
            let obj = js_sys::Object::new();
            let kind = MorseSymbol::from(symbol) as u32;
            js_sys::Reflect::set(&obj, &"type".into(), &kind.into())?;
            js_sys::Reflect::set(
                &obj,
                &"durationSeconds".into(),
                &self.timing.duration(symbol).into(),
            )?;
            array.push(&obj);
        }
        Ok(array)
    }
}

#[wasm_bindgen]
pub struct MorseAudioResult {
    audio_data: Vec<f32>,
    sample_rate: u32,
    duration: f64,
}

impl From<SampleBuffer> for MorseAudioResult {
    fn from(buffer: SampleBuffer) -> Self {
        Self {
            duration: buffer.duration_seconds(),
            sample_rate: buffer.sample_rate,
            audio_data: buffer.samples,
        }
    }
}

#[wasm_bindgen]
impl MorseAudioResult {
    #[wasm_bindgen(getter)]
    pub fn audio_data(&self) -> Vec<f32> {
        self.audio_data.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

#[wasm_bindgen]
pub struct AlignmentResult {
    score: i32,
    solution_row: String,
    input_row: String,
}

impl From<Alignment> for AlignmentResult {
    fn from(alignment: Alignment) -> Self {
        Self {
            score: alignment.score,
            solution_row: alignment.solution_row,
            input_row: alignment.input_row,
        }
    }
}

#[wasm_bindgen]
impl AlignmentResult {
    #[wasm_bindgen(getter)]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[wasm_bindgen(getter)]
    pub fn solution_row(&self) -> String {
        self.solution_row.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn input_row(&self) -> String {
        self.input_row.clone()
    }
}

// Main JavaScript API functions

#[wasm_bindgen]
pub fn encode_morse(text: &str, config_json: &str) -> Result<MorseEncodingResult, JsValue> {
    let profile = support::parse_with_defaults::<SpeedProfile>(config_json);
    let timing = Timing::from_profile(&profile).map_err(js_error)?;
    let symbols = encode(text).map_err(js_error)?;
    Ok(MorseEncodingResult { symbols, timing })
}

wasm_fn! {
    /// Seconds needed to send `text` at the configured speed.
    pub fn tally_seconds(text: &str, config_json: &str) -> Result<f64, JsValue>
    with encode_and_tally, SpeedProfile, |seconds| seconds
}

wasm_fn! {
    pub fn synthesize_morse(text: &str, config_json: &str) -> Result<MorseAudioResult, JsValue>
    with encode_and_synthesize, SpeedProfile, MorseAudioResult::from
}

#[wasm_bindgen]
pub fn align_words(solution: &str, input: &str) -> AlignmentResult {
    morse_trainer_core::align(solution, input).into()
}

#[wasm_bindgen]
pub fn edit_distance(a: &str, b: &str) -> usize {
    morse_trainer_core::edit_distance(a, b)
}

/// Score the whole transcription. Returns `{ errorPercentage, words: [...] }`
/// with one aligned entry per solution group.
#[wasm_bindgen]
pub fn score_transcription(solution_text: &str, input_text: &str) -> Result<JsValue, JsValue> {
    let score = morse_trainer_core::score_texts(solution_text, input_text);
    serde_wasm_bindgen::to_value(&score).map_err(js_error)
}

/// Error percentage only, for UIs that render their own diff.
#[wasm_bindgen]
pub fn error_percentage(solution_text: &str, input_text: &str) -> f64 {
    morse_trainer_core::score_texts(solution_text, input_text).error_percentage
}

#[wasm_bindgen]
pub fn lesson_letters(lesson: u32) -> Result<String, JsValue> {
    exercise::lesson_alphabet(lesson)
        .map(|letters| letters.into_iter().collect())
        .map_err(js_error)
}

/// Generate exercise text for the lesson and duration in `settings_json`.
#[wasm_bindgen]
pub fn generate_exercise(settings_json: &str, seed: u32) -> Result<String, JsValue> {
    let settings = support::parse_with_defaults::<TrainerSettings>(settings_json);
    let profile = settings.speed_profile().map_err(js_error)?;
    let text = ExerciseGenerator::new(seed)
        .generate(settings.lesson, &profile, settings.duration_secs)
        .map_err(js_error)?;
    console_log!(
        "generated lesson {} exercise ({} groups)",
        settings.lesson,
        text.words().count()
    );
    Ok(text.as_str().to_string())
}
