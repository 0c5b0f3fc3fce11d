//! # Hopfield Canvas
//!
//! Interactive host for [`hopfield_core`]: a square painting grid, the
//! per-frame session logic that drives memorize/recall, and a ratatui
//! front-end.
//!
//! - **Canvas**: cell values, pen/eraser, paint/recall mode
//! - **Session**: commands in, one tick per frame
//! - **Visualizer**: terminal rendering and mouse hit testing
//! - **Demo**: scripted run without a terminal UI

pub mod canvas;
pub mod demo;
pub mod session;
pub mod visualizer;

pub use canvas::{intensity, Canvas, Mode, Tool};
pub use session::{Command, Session, SessionEvent};
pub use visualizer::CanvasVisualizer;
