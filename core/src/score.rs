use serde::{Deserialize, Serialize};

use crate::align::{align, Alignment};
use crate::distance::edit_distance;

/// Below this error rate the trainee is ready for the next Koch lesson.
pub const PASS_THRESHOLD_PERCENT: f64 = 10.0;

/// One solution group compared with what the trainee typed in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordComparison {
    pub solution: String,
    pub input: String,
    pub distance: usize,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionScore {
    pub error_percentage: f64,
    pub words: Vec<WordComparison>,
}

impl TranscriptionScore {
    pub fn passed(&self) -> bool {
        self.error_percentage < PASS_THRESHOLD_PERCENT
    }

    pub fn total_errors(&self) -> usize {
        self.words.iter().map(|w| w.distance).sum()
    }
}

/// Score a transcription group by group.
///
/// Word `k` of the input is compared with word `k` of the solution; a
/// missing input word counts as an empty string, so all of its letters are
/// errors. Input words past the end of the solution are ignored.
pub fn score_transcription<S, I>(solution_words: &[S], input_words: &[I]) -> TranscriptionScore
where
    S: AsRef<str>,
    I: AsRef<str>,
{
    let mut letters = 0usize;
    let mut errors = 0usize;

    let words: Vec<WordComparison> = solution_words
        .iter()
        .enumerate()
        .map(|(idx, solution)| {
            let solution = solution.as_ref();
            let input = input_words.get(idx).map_or("", |w| w.as_ref());
            let distance = edit_distance(solution, input);

            letters += solution.chars().count();
            errors += distance;

            WordComparison {
                solution: solution.to_string(),
                input: input.to_string(),
                distance,
                alignment: align(solution, input),
            }
        })
        .collect();

    if input_words.len() > solution_words.len() {
        log::debug!(
            "ignoring {} input words past the end of the solution",
            input_words.len() - solution_words.len()
        );
    }

    let error_percentage = if letters == 0 {
        0.0
    } else {
        errors as f64 / letters as f64 * 100.0
    };

    TranscriptionScore {
        error_percentage,
        words,
    }
}

/// Score free text: both sides are split on whitespace and the input is
/// upper-cased first, since exercises are generated in upper case.
pub fn score_texts(solution_text: &str, input_text: &str) -> TranscriptionScore {
    let input = input_text.to_uppercase();
    let solution_words: Vec<&str> = solution_text.split_whitespace().collect();
    let input_words: Vec<&str> = input.split_whitespace().collect();
    score_transcription(&solution_words, &input_words)
}
