//! Minimal sparse row vector shared by the vectorizer, assembler and classifiers.

use serde::Serialize;

/// A single sparse row: fixed `width`, entries sorted by column, no explicit zeros.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SparseVector {
    width: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// All-zero row of the given width.
    pub fn zeros(width: usize) -> Self {
        Self {
            width,
            entries: Vec::new(),
        }
    }

    /// Build from unordered `(column, value)` pairs.
    /// Duplicate columns are summed; zeros and columns `>= width` are dropped.
    pub fn from_entries<I>(width: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut raw: Vec<(usize, f64)> = entries.into_iter().filter(|(i, _)| *i < width).collect();
        raw.sort_by_key(|(i, _)| *i);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(raw.len());
        for (i, v) in raw {
            if let Some((last, acc)) = merged.last_mut() {
                if *last == i {
                    *acc += v;
                    continue;
                }
            }
            merged.push((i, v));
        }
        merged.retain(|(_, v)| *v != 0.0);

        Self {
            width,
            entries: merged,
        }
    }

    /// Caller guarantees: strictly increasing columns, all `< width`, no zeros.
    pub(crate) fn from_sorted(width: usize, entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        debug_assert!(entries.iter().all(|(i, v)| *i < width && *v != 0.0));
        Self { width, entries }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of stored (non-zero) entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Value at `column`; zero when not stored or out of range.
    pub fn get(&self, column: usize) -> f64 {
        self.entries
            .binary_search_by_key(&column, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense weight vector. Columns past `weights.len()` contribute 0.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(i, v)| weights.get(*i).map(|w| w * v))
            .sum()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.width];
        for (i, v) in &self.entries {
            out[*i] = *v;
        }
        out
    }
}
