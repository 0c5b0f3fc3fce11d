//! # Associative Memory - Hebbian Store and Continuous Recall
//!
//! "Cells that fire together, wire together."
//!
//! The engine keeps one weight per unordered pair of cells (see
//! [`PairTable`]). Memorizing a pattern adds its outer product into the
//! store; recalling relaxes a state vector toward whatever the store has
//! learned, one sweep per call.
//!
//! ## Recall sweep
//!
//! For each pair `(i, j)` in table order:
//!
//! ```text
//! s[i] += w · s[j] · rate
//! s[j] += w · s[i] · rate      // s[i] already updated above
//! ```
//!
//! followed by `s[k] = tanh(s[k])` over the whole vector. The two half
//! updates are sequential, so a sweep is only reproducible when pairs are
//! visited in exactly the table's row-major order.

use tracing::{debug, trace};

use crate::error::{HopfieldError, HopfieldResult};
use crate::pairs::{pair_count, PairTable};

/// Default step size for one recall sweep (2^-7)
pub const DEFAULT_RECALL_RATE: f64 = 1.0 / 128.0;

/// Continuous Hopfield network over `cells` cells
#[derive(Clone, Debug)]
pub struct AssociativeMemory {
    pub(crate) pairs: PairTable,
    pub(crate) weights: Vec<f64>,
    pub(crate) patterns_memorized: u64,
}

impl AssociativeMemory {
    /// Create an empty memory (all weights zero)
    pub fn new(cells: usize) -> Self {
        Self {
            pairs: PairTable::new(cells),
            weights: vec![0.0; pair_count(cells)],
            patterns_memorized: 0,
        }
    }

    /// Create a memory from an existing weight store
    ///
    /// `weights` must hold exactly one entry per pair, in table order.
    pub fn from_weights(cells: usize, weights: Vec<f64>) -> HopfieldResult<Self> {
        let expected = pair_count(cells);
        if weights.len() != expected {
            return Err(HopfieldError::corrupt(format!(
                "{} cells need {} weights, got {}",
                cells,
                expected,
                weights.len()
            )));
        }

        Ok(Self {
            pairs: PairTable::new(cells),
            weights,
            patterns_memorized: 0,
        })
    }

    pub fn cells(&self) -> usize {
        self.pairs.cells()
    }

    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// Weight store in pair-table order
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of patterns accumulated so far
    pub fn patterns_memorized(&self) -> u64 {
        self.patterns_memorized
    }

    /// Symmetric matrix view of the store
    ///
    /// The diagonal is zero; `None` when either index is out of range.
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        if a >= self.cells() || b >= self.cells() {
            return None;
        }
        match self.pairs.flatten_unordered(a, b) {
            Some(k) => Some(self.weights[k]),
            None => Some(0.0),
        }
    }

    /// Accumulate the outer product of `pattern` into the store
    ///
    /// Additive across calls; nothing is normalized or decayed. Bipolar
    /// (±1) input is intended but any values are accepted.
    pub fn memorize(&mut self, pattern: &[f64]) -> HopfieldResult<()> {
        HopfieldError::check_len(self.cells(), pattern.len())?;

        for (pair, weight) in self.pairs.iter().zip(self.weights.iter_mut()) {
            *weight += pattern[pair.row] * pattern[pair.col];
        }
        self.patterns_memorized += 1;

        debug!(
            "Memorized pattern #{} ({} cells, {} weights)",
            self.patterns_memorized,
            self.cells(),
            self.weights.len()
        );
        Ok(())
    }

    /// Run one relaxation sweep over `state` in place
    ///
    /// Returns the same buffer. Repeated calls on the previous output move
    /// the state toward an attractor; convergence is not guaranteed.
    pub fn recall<'a>(&self, state: &'a mut [f64], rate: f64) -> HopfieldResult<&'a mut [f64]> {
        HopfieldError::check_len(self.cells(), state.len())?;

        for (pair, &weight) in self.pairs.iter().zip(&self.weights) {
            let (i, j) = (pair.row, pair.col);
            state[i] += weight * state[j] * rate;
            state[j] += weight * state[i] * rate;
        }

        trace!("Recall sweep over {} pairs (rate={})", self.weights.len(), rate);
        Ok(activate(state))
    }

    /// [`recall`](Self::recall) with [`DEFAULT_RECALL_RATE`]
    pub fn recall_default<'a>(&self, state: &'a mut [f64]) -> HopfieldResult<&'a mut [f64]> {
        self.recall(state, DEFAULT_RECALL_RATE)
    }

    /// Hopfield energy `-Σ w·s_i·s_j` of a state
    ///
    /// Diagnostic only; recall never consults it.
    pub fn energy(&self, state: &[f64]) -> HopfieldResult<f64> {
        HopfieldError::check_len(self.cells(), state.len())?;

        let sum: f64 = self
            .pairs
            .iter()
            .zip(&self.weights)
            .map(|(pair, &weight)| weight * state[pair.row] * state[pair.col])
            .sum();
        Ok(-sum)
    }
}

/// Largest `f64` below 1.0
///
/// `f64::tanh` rounds to exactly ±1.0 for `|x| > ~19.06`; activated values
/// are kept inside the open interval `(-1, 1)`.
pub const MAX_ACTIVATION: f64 = 1.0 - f64::EPSILON / 2.0;

/// Saturating nonlinearity: `tanh` applied to every element in place
///
/// Results are bit-identical to `tanh` except where it rounds to ±1.0,
/// which become ±[`MAX_ACTIVATION`].
pub fn activate(state: &mut [f64]) -> &mut [f64] {
    for value in state.iter_mut() {
        *value = value.tanh().clamp(-MAX_ACTIVATION, MAX_ACTIVATION);
    }
    state
}
