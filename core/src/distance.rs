/// Levenshtein distance between two strings, counted in characters.
///
/// Bottom-up over a flat `(m + 1) x (n + 1)` table, so long words cost
/// `O(m * n)` rather than the exponential plain recursion.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let cols = b.len() + 1;
    let mut table = vec![0usize; (a.len() + 1) * cols];

    for i in 0..=a.len() {
        table[i * cols] = i;
    }
    for j in 0..=b.len() {
        table[j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let delete = table[(i - 1) * cols + j] + 1;
            let insert = table[i * cols + j - 1] + 1;
            let replace = table[(i - 1) * cols + j - 1] + cost;
            table[i * cols + j] = delete.min(insert).min(replace);
        }
    }

    table[a.len() * cols + b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance("KM", "KN"), 1);
        assert_eq!(edit_distance("SOS", "SIS"), 1);
        assert_eq!(edit_distance("KITTEN", "SITTING"), 3);
        assert_eq!(edit_distance("KMURE", "EMURK"), 2);
        assert_eq!(edit_distance("ÄÖ", "AO"), 2);
    }

    #[test]
    fn test_identities() {
        for s in ["", "K", "PARIS", "QRZ?"] {
            assert_eq!(edit_distance(s, s), 0);
            assert_eq!(edit_distance("", s), s.chars().count());
            assert_eq!(edit_distance(s, ""), s.chars().count());
        }
    }

    #[test]
    fn test_symmetry() {
        let words = ["", "KMR", "KMRSU", "RMK", "ABCDEFG", "GFEDCBA", "ÜBER"];
        for a in words {
            for b in words {
                assert_eq!(edit_distance(a, b), edit_distance(b, a), "{a} / {b}");
            }
        }
    }

    #[test]
    fn test_long_words_are_fast() {
        let a = "KMURESNAPTLWI".repeat(40);
        let b = "KMURESNAPTLWJ".repeat(40);
        assert_eq!(edit_distance(&a, &b), 40);
    }
}
