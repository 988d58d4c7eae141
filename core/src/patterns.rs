// Morse code pattern lookup table - direct character-to-pattern mapping
use crate::error::{MorseError, Result};
use crate::types::MorseSymbol;

pub type MorsePattern = &'static [MorseSymbol];

const DIT: MorseSymbol = MorseSymbol::Dit;
const DAH: MorseSymbol = MorseSymbol::Dah;

// Letter patterns
const PATTERN_A: MorsePattern = &[DIT, DAH]; // .-
const PATTERN_B: MorsePattern = &[DAH, DIT, DIT, DIT]; // -...
const PATTERN_C: MorsePattern = &[DAH, DIT, DAH, DIT]; // -.-.
const PATTERN_D: MorsePattern = &[DAH, DIT, DIT]; // -..
const PATTERN_E: MorsePattern = &[DIT]; // .
const PATTERN_F: MorsePattern = &[DIT, DIT, DAH, DIT]; // ..-.
const PATTERN_G: MorsePattern = &[DAH, DAH, DIT]; // --.
const PATTERN_H: MorsePattern = &[DIT, DIT, DIT, DIT]; // ....
const PATTERN_I: MorsePattern = &[DIT, DIT]; // ..
const PATTERN_J: MorsePattern = &[DIT, DAH, DAH, DAH]; // .---
const PATTERN_K: MorsePattern = &[DAH, DIT, DAH]; // -.-
const PATTERN_L: MorsePattern = &[DIT, DAH, DIT, DIT]; // .-..
const PATTERN_M: MorsePattern = &[DAH, DAH]; // --
const PATTERN_N: MorsePattern = &[DAH, DIT]; // -.
const PATTERN_O: MorsePattern = &[DAH, DAH, DAH]; // ---
const PATTERN_P: MorsePattern = &[DIT, DAH, DAH, DIT]; // .--.
const PATTERN_Q: MorsePattern = &[DAH, DAH, DIT, DAH]; // --.-
const PATTERN_R: MorsePattern = &[DIT, DAH, DIT]; // .-.
const PATTERN_S: MorsePattern = &[DIT, DIT, DIT]; // ...
const PATTERN_T: MorsePattern = &[DAH]; // -
const PATTERN_U: MorsePattern = &[DIT, DIT, DAH]; // ..-
const PATTERN_V: MorsePattern = &[DIT, DIT, DIT, DAH]; // ...-
const PATTERN_W: MorsePattern = &[DIT, DAH, DAH]; // .--
const PATTERN_X: MorsePattern = &[DAH, DIT, DIT, DAH]; // -..-
const PATTERN_Y: MorsePattern = &[DAH, DIT, DAH, DAH]; // -.--
const PATTERN_Z: MorsePattern = &[DAH, DAH, DIT, DIT]; // --..

// Umlauts
const PATTERN_A_UMLAUT: MorsePattern = &[DIT, DAH, DIT, DAH]; // .-.-
const PATTERN_O_UMLAUT: MorsePattern = &[DAH, DAH, DAH, DIT]; // ---.
const PATTERN_U_UMLAUT: MorsePattern = &[DIT, DIT, DAH, DAH]; // ..--

// Number patterns
const PATTERN_0: MorsePattern = &[DAH, DAH, DAH, DAH, DAH]; // -----
const PATTERN_1: MorsePattern = &[DIT, DAH, DAH, DAH, DAH]; // .----
const PATTERN_2: MorsePattern = &[DIT, DIT, DAH, DAH, DAH]; // ..---
const PATTERN_3: MorsePattern = &[DIT, DIT, DIT, DAH, DAH]; // ...--
const PATTERN_4: MorsePattern = &[DIT, DIT, DIT, DIT, DAH]; // ....-
const PATTERN_5: MorsePattern = &[DIT, DIT, DIT, DIT, DIT]; // .....
const PATTERN_6: MorsePattern = &[DAH, DIT, DIT, DIT, DIT]; // -....
const PATTERN_7: MorsePattern = &[DAH, DAH, DIT, DIT, DIT]; // --...
const PATTERN_8: MorsePattern = &[DAH, DAH, DAH, DIT, DIT]; // ---..
const PATTERN_9: MorsePattern = &[DAH, DAH, DAH, DAH, DIT]; // ----.

// Punctuation patterns
const PATTERN_PERIOD: MorsePattern = &[DIT, DAH, DIT, DAH, DIT, DAH]; // .-.-.-
const PATTERN_COMMA: MorsePattern = &[DAH, DAH, DIT, DIT, DAH, DAH]; // --..--
const PATTERN_QUESTION: MorsePattern = &[DIT, DIT, DAH, DAH, DIT, DIT]; // ..--..
const PATTERN_QUOTE: MorsePattern = &[DIT, DAH, DAH, DAH, DAH, DIT]; // .----.
const PATTERN_EXCLAIM: MorsePattern = &[DAH, DIT, DAH, DIT, DAH, DAH]; // -.-.--
const PATTERN_SLASH: MorsePattern = &[DAH, DIT, DIT, DAH, DIT]; // -..-.
const PATTERN_COLON: MorsePattern = &[DAH, DAH, DAH, DIT, DIT, DIT]; // ---...
const PATTERN_SEMICOLON: MorsePattern = &[DAH, DIT, DAH, DIT, DAH, DIT]; // -.-.-.
const PATTERN_EQUALS: MorsePattern = &[DAH, DIT, DIT, DIT, DAH]; // -...-
const PATTERN_PLUS: MorsePattern = &[DIT, DAH, DIT, DAH, DIT]; // .-.-.
const PATTERN_HYPHEN: MorsePattern = &[DAH, DIT, DIT, DIT, DIT, DAH]; // -....-
const PATTERN_UNDERSCORE: MorsePattern = &[DIT, DIT, DAH, DAH, DIT, DAH]; // ..--.-
const PATTERN_DQUOTE: MorsePattern = &[DIT, DAH, DIT, DIT, DAH, DIT]; // .-..-.
const PATTERN_AT: MorsePattern = &[DIT, DAH, DAH, DIT, DAH, DIT]; // .--.-.

/// Every supported character, uppercase form only.
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZÄÖÜ0123456789.,?'!/:;=+-_\"@";

/// Get morse pattern for a character. Lowercase letters share the
/// uppercase patterns.
pub fn get_morse_pattern(ch: char) -> Option<MorsePattern> {
    let pattern = match ch {
        'A' | 'a' => PATTERN_A,
        'B' | 'b' => PATTERN_B,
        'C' | 'c' => PATTERN_C,
        'D' | 'd' => PATTERN_D,
        'E' | 'e' => PATTERN_E,
        'F' | 'f' => PATTERN_F,
        'G' | 'g' => PATTERN_G,
        'H' | 'h' => PATTERN_H,
        'I' | 'i' => PATTERN_I,
        'J' | 'j' => PATTERN_J,
        'K' | 'k' => PATTERN_K,
        'L' | 'l' => PATTERN_L,
        'M' | 'm' => PATTERN_M,
        'N' | 'n' => PATTERN_N,
        'O' | 'o' => PATTERN_O,
        'P' | 'p' => PATTERN_P,
        'Q' | 'q' => PATTERN_Q,
        'R' | 'r' => PATTERN_R,
        'S' | 's' => PATTERN_S,
        'T' | 't' => PATTERN_T,
        'U' | 'u' => PATTERN_U,
        'V' | 'v' => PATTERN_V,
        'W' | 'w' => PATTERN_W,
        'X' | 'x' => PATTERN_X,
        'Y' | 'y' => PATTERN_Y,
        'Z' | 'z' => PATTERN_Z,
        'Ä' | 'ä' => PATTERN_A_UMLAUT,
        'Ö' | 'ö' => PATTERN_O_UMLAUT,
        'Ü' | 'ü' => PATTERN_U_UMLAUT,
        '0' => PATTERN_0,
        '1' => PATTERN_1,
        '2' => PATTERN_2,
        '3' => PATTERN_3,
        '4' => PATTERN_4,
        '5' => PATTERN_5,
        '6' => PATTERN_6,
        '7' => PATTERN_7,
        '8' => PATTERN_8,
        '9' => PATTERN_9,
        '.' => PATTERN_PERIOD,
        ',' => PATTERN_COMMA,
        '?' => PATTERN_QUESTION,
        '\'' => PATTERN_QUOTE,
        '!' => PATTERN_EXCLAIM,
        '/' => PATTERN_SLASH,
        ':' => PATTERN_COLON,
        ';' => PATTERN_SEMICOLON,
        '=' => PATTERN_EQUALS,
        '+' => PATTERN_PLUS,
        '-' => PATTERN_HYPHEN,
        '_' => PATTERN_UNDERSCORE,
        '"' => PATTERN_DQUOTE,
        '@' => PATTERN_AT,
        _ => return None,
    };
    Some(pattern)
}

/// Dit/dah sequence for one character.
pub fn encode_char(ch: char) -> Result<MorsePattern> {
    get_morse_pattern(ch).ok_or(MorseError::UnsupportedCharacter(ch))
}

pub fn is_supported(ch: char) -> bool {
    get_morse_pattern(ch).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots(pattern: MorsePattern) -> String {
        pattern
            .iter()
            .map(|s| match s {
                MorseSymbol::Dit => '.',
                _ => '-',
            })
            .collect()
    }

    #[test]
    fn test_every_supported_char_has_tones() {
        for ch in ALPHABET.chars() {
            let pattern = encode_char(ch).unwrap();
            assert!(!pattern.is_empty(), "{ch} has an empty pattern");
            assert!(pattern.iter().all(|s| s.is_tone()));
            assert_eq!(pattern, encode_char(ch).unwrap());
        }
    }

    #[test]
    fn test_known_patterns() {
        assert_eq!(dots(encode_char('K').unwrap()), "-.-");
        assert_eq!(dots(encode_char('M').unwrap()), "--");
        assert_eq!(dots(encode_char('Ü').unwrap()), "..--");
        assert_eq!(dots(encode_char('=').unwrap()), "-...-");
        assert_eq!(dots(encode_char('?').unwrap()), "..--..");
        assert_eq!(dots(encode_char(':').unwrap()), "---...");
    }

    #[test]
    fn test_patterns_are_unique() {
        let mut seen = std::collections::HashMap::new();
        for ch in ALPHABET.chars() {
            let code = dots(encode_char(ch).unwrap());
            assert!(seen.insert(code.clone(), ch).is_none(), "{code} reused");
        }
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        assert_eq!(encode_char('k').unwrap(), encode_char('K').unwrap());
        assert_eq!(encode_char('ö').unwrap(), encode_char('Ö').unwrap());
    }

    #[test]
    fn test_unsupported_characters() {
        for ch in ['#', '%', ' ', '\n', 'ß'] {
            assert!(matches!(
                encode_char(ch),
                Err(MorseError::UnsupportedCharacter(c)) if c == ch
            ));
        }
    }
}
