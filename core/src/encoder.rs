use crate::error::Result;
use crate::patterns::encode_char;
use crate::types::MorseSymbol;

/// Convert text into the symbolic stream shared by the tally and the
/// synthesizer.
///
/// Every letter is followed by one inter-letter gap, including the last
/// one; a space becomes a single inter-word gap. Any other character that
/// has no pattern fails the whole call.
pub fn encode(text: &str) -> Result<Vec<MorseSymbol>> {
    let mut symbols = Vec::with_capacity(text.len() * 8);

    for ch in text.chars() {
        if ch == ' ' {
            symbols.push(MorseSymbol::InterWordGap);
            continue;
        }

        let pattern = encode_char(ch)?;
        for (i, &element) in pattern.iter().enumerate() {
            if i > 0 {
                symbols.push(MorseSymbol::IntraLetterGap);
            }
            symbols.push(element);
        }
        symbols.push(MorseSymbol::InterLetterGap);
    }

    Ok(symbols)
}
