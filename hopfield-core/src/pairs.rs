//! # Pair Table - Triangular Indexing of the Weight Matrix
//!
//! A Hopfield weight matrix is symmetric with a zero diagonal, so only the
//! strictly lower triangle carries information. The table maps a linear
//! index `k` onto the `k`-th unordered pair of distinct cells:
//!
//! ```text
//! k:     0      1      2      3      4      5     ...
//! pair: (1,0)  (2,0)  (2,1)  (3,0)  (3,1)  (3,2)  ...
//! ```
//!
//! Row `i` starts at `i·(i-1)/2` and holds `i` entries (`j = 0..i`). The
//! table is enumerated once in that order; there is no inverse formula, so
//! `j < i` holds for every entry by construction.
//!
//! Order matters: recall updates pairs sequentially, so the sweep result
//! depends on visiting pairs exactly in this order.

use serde::{Deserialize, Serialize};

/// Number of unordered pairs of distinct cells among `cells` cells
pub fn pair_count(cells: usize) -> usize {
    cells * cells.saturating_sub(1) / 2
}

/// Linear offset of the first pair in row `row` (`flatten(row, 0)`)
pub fn row_offset(row: usize) -> usize {
    pair_count(row)
}

/// An unordered pair of distinct cells, stored as `row > col`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPair {
    /// Larger cell index
    pub row: usize,
    /// Smaller cell index
    pub col: usize,
}

impl CellPair {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build a pair from two cell indices in either order
    ///
    /// Returns `None` for `a == b`: no cell is paired with itself.
    pub fn unordered(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(Self::new(a, b)),
            std::cmp::Ordering::Less => Some(Self::new(b, a)),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl From<CellPair> for (usize, usize) {
    fn from(pair: CellPair) -> Self {
        (pair.row, pair.col)
    }
}

/// Bijection between `0..pair_count(cells)` and the pairs of distinct cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairTable {
    cells: usize,
    pairs: Vec<CellPair>,
}

impl PairTable {
    /// Enumerate every pair for `cells` cells
    ///
    /// Fewer than two cells yields an empty (valid) table.
    pub fn new(cells: usize) -> Self {
        let mut pairs = Vec::with_capacity(pair_count(cells));
        for row in 1..cells {
            for col in 0..row {
                pairs.push(CellPair::new(row, col));
            }
        }
        debug_assert_eq!(pairs.len(), pair_count(cells));

        Self { cells, pairs }
    }

    /// Number of cells the table was built for
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Number of pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Linear index of the pair `(row, col)`, requires `col < row < cells`
    pub fn flatten(&self, row: usize, col: usize) -> Option<usize> {
        if col < row && row < self.cells {
            Some(row_offset(row) + col)
        } else {
            None
        }
    }

    /// Linear index of the pair formed by `a` and `b` in either order
    pub fn flatten_unordered(&self, a: usize, b: usize) -> Option<usize> {
        let pair = CellPair::unordered(a, b)?;
        self.flatten(pair.row, pair.col)
    }

    /// Pair stored at linear index `index`
    pub fn unflatten(&self, index: usize) -> Option<CellPair> {
        self.pairs.get(index).copied()
    }

    /// Pairs in visiting order
    pub fn as_slice(&self) -> &[CellPair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellPair> {
        self.pairs.iter()
    }
}

impl<'a> IntoIterator for &'a PairTable {
    type Item = &'a CellPair;
    type IntoIter = std::slice::Iter<'a, CellPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(256), 32_640);
    }

    #[test]
    fn test_triangular_order() {
        let table = PairTable::new(4);
        let pairs: Vec<(usize, usize)> = table.iter().map(|&p| p.into()).collect();
        assert_eq!(pairs, vec![(1, 0), (2, 0), (2, 1), (3, 0), (3, 1), (3, 2)]);
    }

    #[test]
    fn test_degenerate_tables() {
        for cells in 0..2 {
            let table = PairTable::new(cells);
            assert!(table.is_empty());
            assert_eq!(table.cells(), cells);
            assert_eq!(table.unflatten(0), None);
            assert_eq!(table.flatten(0, 0), None);
        }
    }

    #[test]
    fn test_bijection_law() {
        for cells in 0..=40 {
            let table = PairTable::new(cells);
            assert_eq!(table.len(), pair_count(cells));

            for k in 0..table.len() {
                let pair = table.unflatten(k).unwrap();
                assert!(pair.col < pair.row, "n={} k={} gave {:?}", cells, k, pair);
                assert_eq!(table.flatten(pair.row, pair.col), Some(k));
            }

            for row in 0..cells {
                for col in 0..row {
                    let k = table.flatten(row, col).unwrap();
                    assert_eq!(table.unflatten(k), Some(CellPair::new(row, col)));
                }
            }

            assert_eq!(table.unflatten(table.len()), None);
        }
    }

    #[test]
    fn test_pair_coverage() {
        for cells in 0..=24 {
            let table = PairTable::new(cells);
            let seen: HashSet<(usize, usize)> = table.iter().map(|&p| p.into()).collect();
            assert_eq!(seen.len(), table.len(), "repeated pair for n={}", cells);

            let mut expected = HashSet::new();
            for a in 0..cells {
                for b in 0..cells {
                    if a != b {
                        expected.insert((a.max(b), a.min(b)));
                    }
                }
            }
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn test_row_offsets() {
        let table = PairTable::new(10);
        for row in 1..10 {
            assert_eq!(table.flatten(row, 0), Some(row_offset(row)));
            assert_eq!(row_offset(row), row * (row - 1) / 2);
        }
    }

    #[test]
    fn test_invalid_flatten() {
        let table = PairTable::new(5);
        assert_eq!(table.flatten(3, 3), None);
        assert_eq!(table.flatten(2, 3), None);
        assert_eq!(table.flatten(5, 0), None);
        assert_eq!(table.flatten_unordered(1, 1), None);
        assert_eq!(table.flatten_unordered(0, 4), table.flatten(4, 0));
        assert_eq!(table.flatten_unordered(2, 3), table.flatten_unordered(3, 2));
    }
}
