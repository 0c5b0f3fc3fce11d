//! Scripted, non-interactive run
//!
//! Memorizes a cross and a ring, damages the cross, then lets recall run
//! and prints the grid as ASCII every few sweeps.

use std::io::{self, Write};

use tracing::info;

use hopfield_core::{HopfieldConfig, HopfieldError, HopfieldResult};

use crate::canvas::intensity;
use crate::session::{Command, Session};

const SWEEPS: usize = 40;
const PRINT_EVERY: usize = 10;
const SHADES: &[u8] = b" .:-=+*#%@";

pub fn run(config: &HopfieldConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let agreement = run_scenario(config, &mut out)?;
    info!("Demo finished, {:.0}% of cells match the cross", agreement * 100.0);
    Ok(())
}

/// Run the scenario, writing frames to `out`
///
/// Returns the fraction of cells whose sign matches the stored cross.
pub fn run_scenario<W: Write>(config: &HopfieldConfig, out: &mut W) -> Result<f64, Box<dyn std::error::Error>> {
    let mut session = Session::from_config(config)?;
    let side = config.grid.side;

    let cross = cross(side);
    load(&mut session, &cross)?;
    session.handle(Command::Memorize)?;

    load(&mut session, &ring(side))?;
    session.handle(Command::Memorize)?;

    let damaged = corrupt(&cross, 5);
    load(&mut session, &damaged)?;
    writeln!(out, "damaged cross ({} cells flipped):", count_differences(&cross, &damaged))?;
    write_grid(out, session.canvas().cells(), side)?;

    session.handle(Command::ToggleRecall)?;
    for sweep in 1..=SWEEPS {
        session.tick()?;
        if sweep % PRINT_EVERY == 0 {
            writeln!(out, "after {} sweeps (energy {:.1}):", sweep, session.energy()?)?;
            write_grid(out, session.canvas().cells(), side)?;
        }
    }

    Ok(sign_agreement(session.canvas().cells(), &cross))
}

fn load(session: &mut Session, pattern: &[f64]) -> HopfieldResult<()> {
    HopfieldError::check_len(session.canvas().cells().len(), pattern.len())?;
    session.canvas_mut().cells_mut().copy_from_slice(pattern);
    Ok(())
}

/// Both diagonals painted
pub fn cross(side: usize) -> Vec<f64> {
    (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            if row == col || row + col + 1 == side { 1.0 } else { -1.0 }
        })
        .collect()
}

/// Border two cells in from the edge
pub fn ring(side: usize) -> Vec<f64> {
    (0..side * side)
        .map(|i| {
            let (row, col) = (i / side, i % side);
            let edge = side.saturating_sub(3);
            let on_ring = (row == 2 || row == edge || col == 2 || col == edge)
                && (2..=edge).contains(&row)
                && (2..=edge).contains(&col);
            if on_ring { 1.0 } else { -1.0 }
        })
        .collect()
}

/// Flip every `stride`-th cell
pub fn corrupt(pattern: &[f64], stride: usize) -> Vec<f64> {
    pattern
        .iter()
        .enumerate()
        .map(|(i, &v)| if stride > 0 && i % stride == 0 { -v } else { v })
        .collect()
}

fn count_differences(a: &[f64], b: &[f64]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x.signum() != y.signum()).count()
}

/// Fraction of cells with the same sign in both vectors
pub fn sign_agreement(state: &[f64], pattern: &[f64]) -> f64 {
    if pattern.is_empty() {
        return 1.0;
    }
    let same = state.len().min(pattern.len()) - count_differences(state, pattern);
    same as f64 / pattern.len() as f64
}

fn write_grid<W: Write>(out: &mut W, cells: &[f64], side: usize) -> io::Result<()> {
    for row in cells.chunks(side.max(1)) {
        let line: String = row
            .iter()
            .map(|&v| {
                let shade = SHADES[intensity(v) as usize * (SHADES.len() - 1) / 255] as char;
                format!("{}{}", shade, shade)
            })
            .collect();
        writeln!(out, "  {}", line)?;
    }
    writeln!(out)
}
