//! Session - one canvas wired to one associative memory
//!
//! The frame loop feeds input as [`Command`]s and calls [`Session::tick`]
//! once per frame. In recall mode every tick is one sweep whose output
//! becomes the next tick's input.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use hopfield_core::{AssociativeMemory, HopfieldConfig, HopfieldError, HopfieldResult, MAX_GRID_SIDE};

use crate::canvas::Canvas;

const MAX_EVENTS: usize = 100;

/// User intent, already decoded from device events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Store the current canvas
    Memorize,
    /// Enter or leave recall mode
    ToggleRecall,
    /// Blank the canvas
    Clear,
    /// Switch between pen and eraser
    ToggleEraser,
    /// Pointer button pressed
    PenDown,
    /// Pointer is over this cell (`None` when off the grid)
    PenAt(Option<usize>),
    /// Pointer button released
    PenUp,
    Quit,
}

/// Something worth showing in the event log
#[derive(Clone, Debug)]
pub struct SessionEvent {
    pub at: DateTime<Local>,
    pub message: String,
}

pub struct Session {
    canvas: Canvas,
    memory: AssociativeMemory,
    rate: f64,
    pointer: Option<usize>,
    sweeps: u64,
    running: bool,
    events: VecDeque<SessionEvent>,
}

impl Session {
    /// Fresh canvas over an existing memory
    ///
    /// The memory must have `side²` cells and `side` may not exceed
    /// [`MAX_GRID_SIDE`].
    pub fn new(side: usize, memory: AssociativeMemory, rate: f64) -> HopfieldResult<Self> {
        if side > MAX_GRID_SIDE {
            return Err(HopfieldError::config(format!(
                "grid side {} exceeds the maximum of {}",
                side, MAX_GRID_SIDE
            )));
        }
        let canvas = Canvas::new(side);
        HopfieldError::check_len(canvas.cells().len(), memory.cells())?;
        let stored = memory.patterns_memorized();

        let mut session = Self {
            canvas,
            memory,
            rate,
            pointer: None,
            sweeps: 0,
            running: true,
            events: VecDeque::new(),
        };
        session.log(format!("{}×{} canvas, {} patterns in memory", side, side, stored));
        Ok(session)
    }

    /// Session sized and tuned by `config`, with an empty memory
    pub fn from_config(config: &HopfieldConfig) -> HopfieldResult<Self> {
        config.validate()?;
        Self::new(
            config.grid.side,
            AssociativeMemory::new(config.grid.cells()),
            config.recall.rate,
        )
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn memory(&self) -> &AssociativeMemory {
        &self.memory
    }

    /// Recall sweeps run since the session started
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Most recent events, oldest first
    pub fn events(&self) -> impl Iterator<Item = &SessionEvent> {
        self.events.iter()
    }

    /// Energy of the current canvas under the stored weights
    pub fn energy(&self) -> HopfieldResult<f64> {
        self.memory.energy(self.canvas.cells())
    }

    pub fn handle(&mut self, command: Command) -> HopfieldResult<()> {
        match command {
            Command::Memorize => {
                self.memory.memorize(self.canvas.cells())?;
                let count = self.memory.patterns_memorized();
                info!("Memorized pattern #{}", count);
                self.log(format!("memorized pattern #{}", count));
            }
            Command::ToggleRecall => {
                self.canvas.toggle_recall();
                info!("Mode: {}", self.canvas.mode_label());
                self.log(format!("mode: {}", self.canvas.mode_label()));
            }
            Command::Clear => {
                self.canvas.clear();
                self.log("cleared".to_string());
            }
            Command::ToggleEraser => {
                self.canvas.toggle_eraser();
                debug!("Tool: {:?}", self.canvas.tool);
            }
            Command::PenDown => self.canvas.press(),
            Command::PenAt(cell) => self.pointer = cell,
            Command::PenUp => self.canvas.release(),
            Command::Quit => self.running = false,
        }
        Ok(())
    }

    /// Advance one frame
    pub fn tick(&mut self) -> HopfieldResult<()> {
        if self.canvas.recalling() {
            self.memory.recall(self.canvas.cells_mut(), self.rate)?;
            self.sweeps += 1;
        } else if self.canvas.pen_down {
            if let Some(cell) = self.pointer {
                self.canvas.paint(cell);
            }
        }
        Ok(())
    }

    /// Give the memory back, e.g. to persist it
    pub fn into_memory(self) -> AssociativeMemory {
        self.memory
    }

    fn log(&mut self, message: String) {
        self.events.push_back(SessionEvent {
            at: Local::now(),
            message,
        });
        if self.events.len() > MAX_EVENTS {
            self.events.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint_cells(session: &mut Session, cells: &[usize]) {
        session.handle(Command::PenDown).unwrap();
        for &cell in cells {
            session.handle(Command::PenAt(Some(cell))).unwrap();
            session.tick().unwrap();
        }
        session.handle(Command::PenUp).unwrap();
    }

    #[test]
    fn test_session_from_config() {
        let session = Session::from_config(&HopfieldConfig::default()).unwrap();
        assert_eq!(session.canvas().side(), 16);
        assert_eq!(session.memory().cells(), 256);
        assert!(session.running());
        assert_eq!(session.events().count(), 1);
    }

    #[test]
    fn test_memory_size_must_match_canvas() {
        assert!(Session::new(4, AssociativeMemory::new(15), 0.1).is_err());
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let side = MAX_GRID_SIDE + 1;
        let err = Session::new(side, AssociativeMemory::new(0), 0.1).err().unwrap();
        assert!(matches!(err, HopfieldError::Config(_)));

        let mut config = HopfieldConfig::default();
        config.grid.side = 1000;
        assert!(Session::from_config(&config).is_err());
    }

    #[test]
    fn test_energy_of_blank_canvas() {
        let mut session = Session::new(2, AssociativeMemory::new(4), 0.1).unwrap();
        assert_eq!(session.energy().unwrap(), 0.0);

        session.handle(Command::Memorize).unwrap();
        // All-blank pattern: every pair product is +1, six pairs
        assert_eq!(session.energy().unwrap(), -6.0);
    }

    #[test]
    fn test_painting_follows_pointer() {
        let mut session = Session::new(3, AssociativeMemory::new(9), 0.1).unwrap();
        paint_cells(&mut session, &[0, 4, 8]);

        let cells = session.canvas().cells();
        assert_eq!(cells, &[1.0, -1.0, -1.0, -1.0, 1.0, -1.0, -1.0, -1.0, 1.0]);

        // Pointer moves without the button held paint nothing
        session.handle(Command::PenAt(Some(2))).unwrap();
        session.tick().unwrap();
        assert_eq!(session.canvas().cells()[2], -1.0);
    }

    #[test]
    fn test_recall_mode_stops_painting() {
        let mut session = Session::new(2, AssociativeMemory::new(4), 0.1).unwrap();
        session.handle(Command::ToggleRecall).unwrap();
        session.handle(Command::PenDown).unwrap();
        session.handle(Command::PenAt(Some(0))).unwrap();
        session.tick().unwrap();

        // Empty memory: the sweep only squashes, nothing gets painted
        assert!(session.canvas().cells().iter().all(|&c| c == (-1.0f64).tanh()));
        assert_eq!(session.sweeps(), 1);
    }

    #[test]
    fn test_memorize_then_recall_restores_pattern() {
        let mut session = Session::new(4, AssociativeMemory::new(16), 0.05).unwrap();

        // A vertical bar in column 1
        paint_cells(&mut session, &[1, 5, 9, 13]);
        let bar = session.canvas().cells().to_vec();
        session.handle(Command::Memorize).unwrap();
        assert_eq!(session.memory().patterns_memorized(), 1);

        // Damage it: erase one bar cell, paint a stray one
        session.handle(Command::ToggleEraser).unwrap();
        paint_cells(&mut session, &[5]);
        session.handle(Command::ToggleEraser).unwrap();
        paint_cells(&mut session, &[10]);
        assert_ne!(session.canvas().cells(), bar.as_slice());

        session.handle(Command::ToggleRecall).unwrap();
        for _ in 0..100 {
            session.tick().unwrap();
        }

        for (cell, expected) in session.canvas().cells().iter().zip(&bar) {
            assert_eq!(cell.signum(), expected.signum());
        }
        assert!(session.energy().unwrap() < 0.0);
    }

    #[test]
    fn test_clear_and_quit() {
        let mut session = Session::new(2, AssociativeMemory::new(4), 0.1).unwrap();
        paint_cells(&mut session, &[3]);
        session.handle(Command::Clear).unwrap();
        assert!(session.canvas().cells().iter().all(|&c| c == -1.0));

        session.handle(Command::Quit).unwrap();
        assert!(!session.running());
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut session = Session::new(2, AssociativeMemory::new(4), 0.1).unwrap();
        for _ in 0..150 {
            session.handle(Command::Clear).unwrap();
        }
        assert_eq!(session.events().count(), MAX_EVENTS);
    }
}
