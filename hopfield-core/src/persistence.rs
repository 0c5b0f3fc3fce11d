//! Weight-store snapshots
//!
//! The store is serialized to disk via bincode so painted memories
//! survive a restart. The pair table is never written; it is rebuilt from
//! the cell count on load.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::AssociativeMemory;
use crate::error::{HopfieldError, HopfieldResult};

/// Current snapshot format
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk form of an [`AssociativeMemory`]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MemorySnapshot {
    pub version: u32,
    pub cells: usize,
    pub patterns_memorized: u64,
    pub weights: Vec<f64>,
}

impl From<&AssociativeMemory> for MemorySnapshot {
    fn from(memory: &AssociativeMemory) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            cells: memory.cells(),
            patterns_memorized: memory.patterns_memorized(),
            weights: memory.weights().to_vec(),
        }
    }
}

impl TryFrom<MemorySnapshot> for AssociativeMemory {
    type Error = HopfieldError;

    fn try_from(snapshot: MemorySnapshot) -> HopfieldResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(HopfieldError::corrupt(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let mut memory = AssociativeMemory::from_weights(snapshot.cells, snapshot.weights)?;
        memory.patterns_memorized = snapshot.patterns_memorized;
        Ok(memory)
    }
}

impl AssociativeMemory {
    /// Write the weight store to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> HopfieldResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = bincode::serialize(&MemorySnapshot::from(self))?;
        fs::write(path, data)?;

        tracing::info!(
            "Memory saved: {} patterns over {} cells -> {}",
            self.patterns_memorized,
            self.cells(),
            path.display()
        );
        Ok(())
    }

    /// Read a weight store written by [`save`](Self::save)
    pub fn load(path: &Path) -> HopfieldResult<Self> {
        let data = fs::read(path)?;
        let snapshot: MemorySnapshot = bincode::deserialize(&data)?;
        Self::try_from(snapshot)
    }

    /// Load `path` if it holds a store for `cells` cells, else start empty
    pub fn load_or_create(path: &Path, cells: usize) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(memory) if memory.cells() == cells => {
                    tracing::info!(
                        "Memory loaded: {} patterns over {} cells",
                        memory.patterns_memorized,
                        memory.cells()
                    );
                    return memory;
                }
                Ok(memory) => {
                    tracing::warn!(
                        "Memory is for {} cells, canvas has {}, starting fresh",
                        memory.cells(),
                        cells
                    );
                }
                Err(e) => {
                    tracing::warn!("Memory corrupted, starting fresh: {}", e);
                }
            }
        }

        tracing::info!("Creating new memory ({} cells)", cells);
        Self::new(cells)
    }
}
