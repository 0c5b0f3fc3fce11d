//! # Hopfield Core
//!
//! A continuous-valued associative memory in the style of a Hopfield
//! network.
//!
//! - **Pairs**: triangular indexing of the symmetric, zero-diagonal weight
//!   matrix onto a compact linear store
//! - **Engine**: Hebbian memorization and `tanh` recall sweeps
//! - **Persistence**: bincode snapshots of the weight store
//! - **Config**: grid and recall parameters
//!
//! The engine has no notion of displays or input devices; hosts own the
//! state vector and call [`AssociativeMemory::memorize`] and
//! [`AssociativeMemory::recall`] on it.
//!
//! ```
//! use hopfield_core::AssociativeMemory;
//!
//! let mut memory = AssociativeMemory::new(4);
//! memory.memorize(&[1.0, 1.0, -1.0, -1.0]).unwrap();
//!
//! let mut state = [1.0, -1.0, -1.0, -1.0];
//! for _ in 0..100 {
//!     memory.recall(&mut state, 0.5).unwrap();
//! }
//! assert!(state[1] > 0.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod pairs;
pub mod persistence;

// Re-export main types at crate root
pub use config::{GridConfig, HopfieldConfig, PersistenceConfig, RecallConfig, MAX_GRID_SIDE};
pub use engine::{activate, AssociativeMemory, DEFAULT_RECALL_RATE, MAX_ACTIVATION};
pub use error::{HopfieldError, HopfieldResult};
pub use pairs::{pair_count, row_offset, CellPair, PairTable};
pub use persistence::{MemorySnapshot, SNAPSHOT_VERSION};
