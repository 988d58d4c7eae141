//! Browser-side checks, run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use morse_trainer_wasm::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn encodes_elements_with_durations() {
    let result = encode_morse("ET", r#"{"wpm": 20, "effectiveWpm": 20}"#).unwrap();
    // dit, letter gap, dah, letter gap
    assert_eq!(result.length(), 4);
    assert_eq!(result.elements().unwrap().length(), 4);
    assert!((result.duration() - (0.06 + 0.18 + 0.18 + 0.18)).abs() < 1e-9);
}

#[wasm_bindgen_test]
fn rejects_unsupported_text() {
    assert!(encode_morse("#", "").is_err());
    assert!(tally_seconds("A#", "").is_err());
}

#[wasm_bindgen_test]
fn scores_transcription_as_object() {
    let value = score_transcription("KMR MMK", "KMR MK").unwrap();
    assert!(value.is_object());
}

#[wasm_bindgen_test]
fn generates_exercise_for_lesson() {
    let text = generate_exercise(r#"{"lesson": 2, "durationSecs": 10}"#, 7).unwrap();
    assert!(text.chars().all(|c| c == ' ' || "KMU".contains(c)));
    assert!(!text.trim().is_empty());
}
