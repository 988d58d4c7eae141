use crate::encoder::encode;
use crate::error::{MorseError, Result};
use crate::timing::Timing;
use crate::types::{MorseText, SpeedProfile};
use std::time::{SystemTime, UNIX_EPOCH};

/// Koch method teaching order. Lesson `n` drills the first `n + 1` characters.
pub const KOCH_LETTERS: &str = "KMURESNAPTLWI.JZ=FOY,VG5/Q92H38B?47C1D60X";
pub const GROUP_LENGTH: usize = 5;
/// Longest exercise `generate` will build.
pub const MAX_EXERCISE_SECONDS: f64 = 3600.0;

pub fn lesson_count() -> u32 {
    KOCH_LETTERS.chars().count() as u32 - 1
}

/// Characters drilled in `lesson` (1-based).
pub fn lesson_alphabet(lesson: u32) -> Result<Vec<char>> {
    if lesson == 0 || lesson > lesson_count() {
        return Err(MorseError::InvalidLesson(lesson));
    }
    Ok(KOCH_LETTERS.chars().take(lesson as usize + 1).collect())
}

// Simple PRNG state for group generation - we need deterministic randomness
struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    fn new(seed: u32) -> Self {
        // Use current time if seed is 0
        let actual_seed = if seed == 0 {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs() as u32
        } else {
            seed
        };
        Self {
            state: actual_seed.wrapping_add(1), // Ensure non-zero
        }
    }

    fn next_index(&mut self, len: usize) -> usize {
        // Simple LCG (Linear Congruential Generator) - matches C rand() behavior roughly
        self.state = self.state.wrapping_mul(1103515245).wrapping_add(12345);
        ((self.state >> 16) as usize) % len
    }
}

/// Builds random five-character groups from a Koch lesson until the text
/// fills the requested playing time.
pub struct ExerciseGenerator {
    rng: SimpleRng,
}

impl ExerciseGenerator {
    /// Seed 0 seeds from the clock; any other seed is reproducible.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn random_group(&mut self, alphabet: &[char]) -> String {
        if alphabet.is_empty() {
            return String::new();
        }
        (0..GROUP_LENGTH)
            .map(|_| alphabet[self.rng.next_index(alphabet.len())])
            .collect()
    }

    /// Append groups while the exercise is shorter than `target_seconds`.
    ///
    /// Each group adds the tally of `" " + group`, which equals re-tallying
    /// the whole text since encoding is per character.
    pub fn generate(
        &mut self,
        lesson: u32,
        profile: &SpeedProfile,
        target_seconds: f64,
    ) -> Result<MorseText> {
        if !target_seconds.is_finite() || target_seconds > MAX_EXERCISE_SECONDS {
            return Err(MorseError::invalid_profile(format!(
                "exercise length {target_seconds}s outside 0-{MAX_EXERCISE_SECONDS}s"
            )));
        }
        let alphabet = lesson_alphabet(lesson)?;
        let timing = Timing::from_profile(profile)?;

        let mut text = MorseText::default();
        let mut length = 0.0;
        while length < target_seconds {
            let group = self.random_group(&alphabet);
            length += timing.tally(&encode(&format!(" {group}"))?);
            text.push_word(&group)?;
        }

        log::debug!(
            "generated lesson {lesson} exercise: {} groups, {length:.1}s",
            text.words().count()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::tally_duration;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lesson_alphabet() {
        assert_eq!(lesson_alphabet(1).unwrap(), vec!['K', 'M']);
        assert_eq!(lesson_alphabet(3).unwrap(), vec!['K', 'M', 'U', 'R']);
        assert_eq!(lesson_alphabet(lesson_count()).unwrap().len(), 41);
        assert!(matches!(lesson_alphabet(0), Err(MorseError::InvalidLesson(0))));
        assert!(matches!(
            lesson_alphabet(41),
            Err(MorseError::InvalidLesson(41))
        ));
    }

    #[test]
    fn test_generated_text_fills_duration() {
        let profile = SpeedProfile::new(20.0, 15.0, 800.0).unwrap();
        let text = ExerciseGenerator::new(42).generate(2, &profile, 30.0).unwrap();

        let total = tally_duration(text.as_str(), &profile).unwrap();
        assert!(total >= 30.0);

        // Dropping the last group must leave it short of the target.
        let words: Vec<&str> = text.words().collect();
        let shorter = format!(" {}", words[..words.len() - 1].join(" "));
        assert!(tally_duration(&shorter, &profile).unwrap() < 30.0);

        for word in words {
            assert_eq!(word.chars().count(), GROUP_LENGTH);
            assert!(word.chars().all(|c| "KMU".contains(c)));
        }
    }

    #[test]
    fn test_incremental_tally_matches_full_tally() {
        let profile = SpeedProfile::default();
        let timing = Timing::from_profile(&profile).unwrap();
        let mut generator = ExerciseGenerator::new(7);
        let alphabet = lesson_alphabet(10).unwrap();

        let mut text = MorseText::default();
        let mut running = 0.0;
        for _ in 0..12 {
            let group = generator.random_group(&alphabet);
            running += timing.tally(&encode(&format!(" {group}")).unwrap());
            text.push_word(&group).unwrap();
        }
        let full = tally_duration(text.as_str(), &profile).unwrap();
        assert_abs_diff_eq!(running, full, epsilon = 1e-9);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let profile = SpeedProfile::default();
        let a = ExerciseGenerator::new(99).generate(5, &profile, 20.0).unwrap();
        let b = ExerciseGenerator::new(99).generate(5, &profile, 20.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unbounded_target_is_rejected() {
        let profile = SpeedProfile::default();
        for target in [f64::INFINITY, f64::NAN, 1e300, MAX_EXERCISE_SECONDS + 1.0] {
            assert!(matches!(
                ExerciseGenerator::new(1).generate(1, &profile, target),
                Err(MorseError::InvalidProfile(_))
            ));
        }
        assert!(ExerciseGenerator::new(1)
            .generate(1, &profile, MAX_EXERCISE_SECONDS)
            .is_ok());
    }

    #[test]
    fn test_zero_target_is_empty() {
        let text = ExerciseGenerator::new(1)
            .generate(1, &SpeedProfile::default(), 0.0)
            .unwrap();
        assert!(text.is_empty());
    }
}
