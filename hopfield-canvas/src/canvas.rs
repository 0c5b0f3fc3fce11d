//! Painting grid - the host-side state vector
//!
//! Cells hold `+1` (painted) or `-1` (blank) while painting and drift
//! through `(-1, 1)` once recall takes over.

/// What the pointer paints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
}

impl Tool {
    /// Value written into a cell
    pub fn value(self) -> f64 {
        match self {
            Tool::Pen => 1.0,
            Tool::Eraser => -1.0,
        }
    }
}

/// Whether the user edits the grid or the network drives it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Paint,
    Recall,
}

/// Square grid of cells plus pointer state
#[derive(Clone, Debug)]
pub struct Canvas {
    side: usize,
    cells: Vec<f64>,
    pub tool: Tool,
    pub mode: Mode,
    pub pen_down: bool,
    last_change: Option<usize>,
}

impl Canvas {
    /// Blank `side × side` canvas
    pub fn new(side: usize) -> Self {
        Self {
            side,
            cells: vec![-1.0; side * side],
            tool: Tool::Pen,
            mode: Mode::Paint,
            pen_down: false,
            last_change: None,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Reset every cell to blank
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = -1.0);
    }

    /// Row-major index of `(row, col)`
    pub fn cell_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.side && col < self.side).then(|| row * self.side + col)
    }

    /// `(row, col)` of a row-major index
    pub fn cell_position(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.cells.len()).then(|| (index / self.side, index % self.side))
    }

    /// Cell under a surface point, where each cell covers
    /// `cell_width × cell_height` units
    pub fn cell_at_point(&self, x: usize, y: usize, cell_width: usize, cell_height: usize) -> Option<usize> {
        if cell_width == 0 || cell_height == 0 {
            return None;
        }
        self.cell_index(y / cell_height, x / cell_width)
    }

    pub fn press(&mut self) {
        self.pen_down = true;
    }

    pub fn release(&mut self) {
        self.pen_down = false;
        self.last_change = None;
    }

    /// Paint the cell at `index` with the current tool
    ///
    /// Holding the pen on the same cell paints it once; returns whether a
    /// cell was written.
    pub fn paint(&mut self, index: usize) -> bool {
        if index >= self.cells.len() || self.last_change == Some(index) {
            return false;
        }
        self.cells[index] = self.tool.value();
        self.last_change = Some(index);
        true
    }

    pub fn toggle_eraser(&mut self) {
        self.tool = match self.tool {
            Tool::Pen => Tool::Eraser,
            Tool::Eraser => Tool::Pen,
        };
    }

    pub fn toggle_recall(&mut self) {
        self.mode = match self.mode {
            Mode::Paint => Mode::Recall,
            Mode::Recall => Mode::Paint,
        };
    }

    pub fn recalling(&self) -> bool {
        self.mode == Mode::Recall
    }

    /// Mode indicator text
    pub fn mode_label(&self) -> &'static str {
        match (self.mode, self.tool) {
            (Mode::Recall, _) => "recall",
            (Mode::Paint, Tool::Eraser) => "eraser",
            (Mode::Paint, Tool::Pen) => "pen",
        }
    }
}

/// Grayscale level for a cell value: `-1 → 0`, `+1 → 255`
pub fn intensity(value: f64) -> u8 {
    let scaled = 255.0 * (value + 1.0) / 2.0;
    scaled.clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(4);
        assert_eq!(canvas.cells().len(), 16);
        assert!(canvas.cells().iter().all(|&c| c == -1.0));
        assert_eq!(canvas.mode_label(), "pen");
    }

    #[test]
    fn test_index_round_trip() {
        let canvas = Canvas::new(5);
        for index in 0..25 {
            let (row, col) = canvas.cell_position(index).unwrap();
            assert_eq!(canvas.cell_index(row, col), Some(index));
        }
        assert_eq!(canvas.cell_index(5, 0), None);
        assert_eq!(canvas.cell_position(25), None);
    }

    #[test]
    fn test_cell_at_point() {
        let canvas = Canvas::new(16);
        assert_eq!(canvas.cell_at_point(0, 0, 32, 32), Some(0));
        assert_eq!(canvas.cell_at_point(70, 40, 32, 32), Some(16 + 2));
        assert_eq!(canvas.cell_at_point(511, 511, 32, 32), Some(255));
        assert_eq!(canvas.cell_at_point(512, 0, 32, 32), None);
        assert_eq!(canvas.cell_at_point(3, 1, 2, 1), Some(16 + 1));
        assert_eq!(canvas.cell_at_point(3, 1, 0, 1), None);
    }

    #[test]
    fn test_paint_and_erase() {
        let mut canvas = Canvas::new(3);
        canvas.press();
        assert!(canvas.paint(4));
        assert_eq!(canvas.cells()[4], 1.0);

        canvas.toggle_eraser();
        assert_eq!(canvas.mode_label(), "eraser");

        // Same cell while held: no repaint
        assert!(!canvas.paint(4));
        assert_eq!(canvas.cells()[4], 1.0);

        canvas.release();
        assert!(canvas.paint(4));
        assert_eq!(canvas.cells()[4], -1.0);
        assert!(!canvas.paint(9));
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(2);
        canvas.cells_mut().copy_from_slice(&[1.0, 0.3, -0.2, 1.0]);
        canvas.clear();
        assert_eq!(canvas.cells(), &[-1.0; 4]);
    }

    #[test]
    fn test_mode_label() {
        let mut canvas = Canvas::new(2);
        canvas.toggle_eraser();
        canvas.toggle_recall();
        assert!(canvas.recalling());
        assert_eq!(canvas.mode_label(), "recall");
        canvas.toggle_recall();
        assert_eq!(canvas.mode_label(), "eraser");
    }

    #[test]
    fn test_intensity() {
        assert_eq!(intensity(-1.0), 0);
        assert_eq!(intensity(1.0), 255);
        assert_eq!(intensity(0.0), 127);
        assert_eq!(intensity(3.0), 255);
        assert_eq!(intensity(-7.0), 0);
        assert!(intensity(0.5) > intensity(-0.5));
    }
}
