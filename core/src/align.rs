// Needleman-Wunsch global alignment of a solution word against the
// trainee's transcription.
use serde::{Deserialize, Serialize};

pub const GAP_MARKER: char = '-';

const MATCH_SCORE: i32 = 1;
const MISMATCH_SCORE: i32 = -1;
const GAP_SCORE: i32 = -1;

/// One column of an alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditOp {
    /// Same character in both strings.
    Match,
    /// Different characters paired in one column.
    Substitution,
    /// Character present only in the first (solution) string.
    Insertion,
    /// Character present only in the second (input) string.
    Deletion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alignment {
    pub score: i32,
    pub ops: Vec<EditOp>,
    pub solution_row: String,
    pub input_row: String,
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Columns where both rows agree.
    pub fn matches(&self) -> usize {
        self.ops.iter().filter(|op| **op == EditOp::Match).count()
    }
}

// Tied best actions of one cell. Bit order is the traceback priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ActionSet(u8);

impl ActionSet {
    const DIAGONAL: u8 = 0b001;
    const DELETION: u8 = 0b010;
    const INSERTION: u8 = 0b100;

    fn insert(&mut self, action: u8) {
        self.0 |= action;
    }

    fn len(&self) -> u32 {
        self.0.count_ones()
    }

    // Diagonal beats deletion beats insertion.
    fn preferred(&self) -> Option<u8> {
        [Self::DIAGONAL, Self::DELETION, Self::INSERTION]
            .into_iter()
            .find(|&a| self.0 & a != 0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Cell {
    score: i32,
    actions: ActionSet,
}

struct ScoreTable {
    cols: usize,
    cells: Vec<Cell>,
}

impl ScoreTable {
    fn fill(a: &[char], b: &[char]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut table = Self {
            cols,
            cells: vec![Cell::default(); rows * cols],
        };

        for i in 1..rows {
            let cell = table.at_mut(i, 0);
            cell.score = -(i as i32);
            cell.actions.insert(ActionSet::INSERTION);
        }
        for j in 1..cols {
            let cell = table.at_mut(0, j);
            cell.score = -(j as i32);
            cell.actions.insert(ActionSet::DELETION);
        }

        for i in 1..rows {
            for j in 1..cols {
                let pair = if a[i - 1] == b[j - 1] {
                    MATCH_SCORE
                } else {
                    MISMATCH_SCORE
                };
                let candidates = [
                    (ActionSet::DIAGONAL, table.at(i - 1, j - 1).score + pair),
                    (ActionSet::DELETION, table.at(i, j - 1).score + GAP_SCORE),
                    (ActionSet::INSERTION, table.at(i - 1, j).score + GAP_SCORE),
                ];
                let best = candidates.iter().map(|&(_, s)| s).max().unwrap_or(0);

                let cell = table.at_mut(i, j);
                cell.score = best;
                for (action, score) in candidates {
                    if score == best {
                        cell.actions.insert(action);
                    }
                }
            }
        }

        table
    }

    fn at(&self, i: usize, j: usize) -> &Cell {
        &self.cells[i * self.cols + j]
    }

    fn at_mut(&mut self, i: usize, j: usize) -> &mut Cell {
        &mut self.cells[i * self.cols + j]
    }

    // Walk back from the corner, then reverse into forward order.
    fn traceback(&self, a: &[char], b: &[char]) -> Vec<EditOp> {
        let (mut i, mut j) = (a.len(), b.len());
        let mut ops = Vec::with_capacity(i + j);

        while i > 0 || j > 0 {
            let cell = self.at(i, j);
            debug_assert!((1..=3).contains(&cell.actions.len()));
            match cell.actions.preferred() {
                Some(ActionSet::DIAGONAL) => {
                    i -= 1;
                    j -= 1;
                    ops.push(if a[i] == b[j] {
                        EditOp::Match
                    } else {
                        EditOp::Substitution
                    });
                }
                Some(ActionSet::DELETION) => {
                    j -= 1;
                    ops.push(EditOp::Deletion);
                }
                _ => {
                    i -= 1;
                    ops.push(EditOp::Insertion);
                }
            }
        }

        ops.reverse();
        ops
    }
}

/// Globally align `solution` against `input` with `'-'` as gap marker.
pub fn align(solution: &str, input: &str) -> Alignment {
    align_with_gap(solution, input, GAP_MARKER)
}

/// Globally align two strings.
///
/// Match scores +1, substitution -1 and every gap -1. When several moves
/// are equally good the traceback takes match/substitution first, then
/// deletion, then insertion, so the rendering is reproducible.
pub fn align_with_gap(solution: &str, input: &str, gap: char) -> Alignment {
    let a: Vec<char> = solution.chars().collect();
    let b: Vec<char> = input.chars().collect();

    let table = ScoreTable::fill(&a, &b);
    let score = table.at(a.len(), b.len()).score;
    let ops = table.traceback(&a, &b);

    let mut solution_row = String::with_capacity(ops.len());
    let mut input_row = String::with_capacity(ops.len());
    let (mut sa, mut sb) = (a.iter(), b.iter());
    for op in &ops {
        match op {
            EditOp::Match | EditOp::Substitution => {
                solution_row.extend(sa.next());
                input_row.extend(sb.next());
            }
            EditOp::Insertion => {
                solution_row.extend(sa.next());
                input_row.push(gap);
            }
            EditOp::Deletion => {
                solution_row.push(gap);
                input_row.extend(sb.next());
            }
        }
    }

    Alignment {
        score,
        ops,
        solution_row,
        input_row,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(row: &str) -> String {
        row.chars().filter(|&c| c != GAP_MARKER).collect()
    }

    #[test]
    fn test_identical_words() {
        let alignment = align("SOS", "SOS");
        assert_eq!(alignment.score, 3);
        assert_eq!(alignment.solution_row, "SOS");
        assert_eq!(alignment.input_row, "SOS");
        assert_eq!(alignment.matches(), 3);
    }

    #[test]
    fn test_substitution() {
        let alignment = align("SOS", "SIS");
        assert_eq!(alignment.score, 1);
        assert_eq!(alignment.solution_row, "SOS");
        assert_eq!(alignment.input_row, "SIS");
        assert_eq!(
            alignment.ops,
            vec![EditOp::Match, EditOp::Substitution, EditOp::Match]
        );
    }

    #[test]
    fn test_missing_character() {
        let alignment = align("KMRSE", "KMSE");
        assert_eq!(alignment.score, 3);
        assert_eq!(alignment.solution_row, "KMRSE");
        assert_eq!(alignment.input_row, "KM-SE");
    }

    #[test]
    fn test_extra_character() {
        let alignment = align("KMS", "KMRS");
        assert_eq!(alignment.score, 2);
        assert_eq!(alignment.solution_row, "KM-S");
        assert_eq!(alignment.input_row, "KMRS");
    }

    #[test]
    fn test_empty_inputs() {
        let alignment = align("", "");
        assert_eq!(alignment.score, 0);
        assert!(alignment.is_empty());

        let alignment = align("KMR", "");
        assert_eq!(alignment.score, -3);
        assert_eq!(alignment.solution_row, "KMR");
        assert_eq!(alignment.input_row, "---");

        let alignment = align("", "KM");
        assert_eq!(alignment.score, -2);
        assert_eq!(alignment.solution_row, "--");
        assert_eq!(alignment.input_row, "KM");
    }

    #[test]
    fn test_tie_break_prefers_diagonal_then_deletion() {
        let alignment = align("A", "B");
        assert_eq!(alignment.ops, vec![EditOp::Substitution]);

        // At (1,2) the diagonal and the deletion both score -2; traceback
        // takes the diagonal, pairing A with the second B.
        let alignment = align("A", "BB");
        assert_eq!(alignment.solution_row, "-A");
        assert_eq!(alignment.input_row, "BB");
    }

    #[test]
    fn test_rows_reconstruct_inputs() {
        let pairs = [
            ("KMURE", "KMURE"),
            ("KMURE", "KURME"),
            ("PARIS", "PRS"),
            ("ABC", "XYZW"),
            ("ÄÖÜ", "AOU"),
            ("", "QRZ"),
        ];
        for (a, b) in pairs {
            let alignment = align(a, b);
            assert_eq!(
                alignment.solution_row.chars().count(),
                alignment.input_row.chars().count()
            );
            assert_eq!(alignment.len(), alignment.solution_row.chars().count());
            assert_eq!(strip(&alignment.solution_row), a);
            assert_eq!(strip(&alignment.input_row), b);
        }
    }

    #[test]
    fn test_custom_gap_marker() {
        let alignment = align_with_gap("K-M", "KM", '_');
        assert_eq!(alignment.solution_row, "K-M");
        assert_eq!(alignment.input_row, "K_M");
    }

    #[test]
    fn test_cell_tie_sets() {
        let a: Vec<char> = "AB".chars().collect();
        let b: Vec<char> = "BA".chars().collect();
        let table = ScoreTable::fill(&a, &b);
        for cell in &table.cells[1..] {
            assert!((1..=3).contains(&cell.actions.len()));
        }
        assert_eq!(table.at(0, 0).actions.len(), 0);
    }
}
