//! Feature row assembly: term-frequency columns first, lexical columns last.
//!
//! The column layout must be identical to the one used at training time;
//! a swapped order does not fail, it silently produces wrong probabilities.

use crate::features::{LexicalVector, LEXICAL_WIDTH};
use crate::sparse::SparseVector;

/// Concatenate `tf` (width V) and `lexical` into one row of width V + 4.
/// The term-frequency part stays sparse.
pub fn assemble(tf: &SparseVector, lexical: &LexicalVector) -> SparseVector {
    let offset = tf.width();
    let mut entries = Vec::with_capacity(tf.nnz() + LEXICAL_WIDTH);
    entries.extend(tf.iter());
    entries.extend(
        lexical
            .to_features()
            .into_iter()
            .enumerate()
            .filter(|(_, v)| *v != 0.0)
            .map(|(i, v)| (offset + i, v)),
    );
    SparseVector::from_sorted(offset + LEXICAL_WIDTH, entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_columns_follow_term_columns() {
        let tf = SparseVector::from_entries(3, [(0, 0.6), (2, 0.8)]);
        let lex = LexicalVector {
            word_count: 5,
            exclamation_count: 2,
            question_count: 0,
            clickbait_hits: 1,
        };
        let row = assemble(&tf, &lex);
        assert_eq!(row.width(), 7);
        assert_eq!(row.to_dense(), vec![0.6, 0.0, 0.8, 5.0, 2.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_inputs_keep_full_width() {
        let row = assemble(&SparseVector::zeros(1000), &LexicalVector::default());
        assert_eq!(row.width(), 1004);
        assert_eq!(row.nnz(), 0);
    }

    #[test]
    fn term_part_is_not_densified() {
        let tf = SparseVector::from_entries(50_000, [(42, 1.0)]);
        let lex = LexicalVector {
            word_count: 1,
            ..Default::default()
        };
        let row = assemble(&tf, &lex);
        assert_eq!(row.nnz(), 2);
        assert_eq!(row.get(42), 1.0);
        assert_eq!(row.get(50_000), 1.0);
    }
}
