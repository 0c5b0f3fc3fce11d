//! Terminal rendering of a session
//!
//! Shows: mode indicator, memory stats, the grid as grayscale blocks,
//! and a timestamped event log.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::canvas::{intensity, Canvas, Mode, Tool};
use crate::session::Session;

/// Terminal columns per cell (keeps cells roughly square)
pub const CELL_WIDTH: usize = 2;
/// Terminal rows per cell
pub const CELL_HEIGHT: usize = 1;

const RECALL_COLOR: Color = Color::Rgb(255, 0, 0);
const PEN_COLOR: Color = Color::Rgb(255, 255, 0);
const ERASER_COLOR: Color = Color::Rgb(255, 0, 255);

pub struct CanvasVisualizer {
    /// Where the grid was last drawn, for mouse hit testing
    grid_area: Rect,
}

impl CanvasVisualizer {
    pub fn new() -> Self {
        Self {
            grid_area: Rect::default(),
        }
    }

    /// Cell under a terminal position, if the grid was drawn there
    pub fn cell_at(&self, canvas: &Canvas, column: u16, row: u16) -> Option<usize> {
        let inner = inner(self.grid_area);
        if column < inner.x || row < inner.y || column >= inner.right() || row >= inner.bottom() {
            return None;
        }
        canvas.cell_at_point(
            (column - inner.x) as usize,
            (row - inner.y) as usize,
            CELL_WIDTH,
            CELL_HEIGHT,
        )
    }

    pub fn draw(&mut self, frame: &mut Frame, session: &Session) {
        let side = session.canvas().side() as u16;
        let grid_width = side * CELL_WIDTH as u16 + 2;
        let grid_height = side * CELL_HEIGHT as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(0)
            .constraints([
                Constraint::Length(3),           // Header
                Constraint::Min(grid_height),    // Grid + log
                Constraint::Length(3),           // Key legend
            ])
            .split(frame.size());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Min(20)])
            .split(chunks[1]);

        self.grid_area = Rect {
            height: grid_height.min(body[0].height),
            ..body[0]
        };

        draw_header(frame, chunks[0], session);
        draw_grid(frame, self.grid_area, session.canvas());
        draw_events(frame, body[1], session);
        draw_legend(frame, chunks[2]);
    }
}

impl Default for CanvasVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

fn inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

fn mode_color(canvas: &Canvas) -> Color {
    match (canvas.mode, canvas.tool) {
        (Mode::Recall, _) => RECALL_COLOR,
        (Mode::Paint, Tool::Eraser) => ERASER_COLOR,
        (Mode::Paint, Tool::Pen) => PEN_COLOR,
    }
}

fn draw_header(frame: &mut Frame, area: Rect, session: &Session) {
    let canvas = session.canvas();
    let memory = session.memory();
    let energy = match session.energy() {
        Ok(e) => format!("{:.1}", e),
        Err(e) => format!("error: {}", e),
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" HOPFIELD ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        Span::styled(
            format!(" {} ", canvas.mode_label()),
            Style::default().fg(mode_color(canvas)).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled("Patterns: ", Style::default().fg(Color::DarkGray)),
        Span::styled(memory.patterns_memorized().to_string(), Style::default().fg(Color::Green)),
        Span::raw(" │ "),
        Span::styled("Sweeps: ", Style::default().fg(Color::DarkGray)),
        Span::raw(session.sweeps().to_string()),
        Span::raw(" │ "),
        Span::styled("Energy: ", Style::default().fg(Color::DarkGray)),
        Span::styled(energy, Style::default().fg(Color::Magenta)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(header, area);
}

fn draw_grid(frame: &mut Frame, area: Rect, canvas: &Canvas) {
    let side = canvas.side();
    let blank = " ".repeat(CELL_WIDTH);

    let lines: Vec<Line> = canvas
        .cells()
        .chunks(side.max(1))
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|&value| {
                    let level = intensity(value);
                    Span::styled(blank.clone(), Style::default().bg(Color::Rgb(level, level, level)))
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let grid = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Canvas ", Style::default().fg(mode_color(canvas))))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(grid, area);
}

fn draw_events(frame: &mut Frame, area: Rect, session: &Session) {
    let visible = area.height.saturating_sub(2) as usize;
    let events: Vec<_> = session.events().collect();
    let start = events.len().saturating_sub(visible);

    let items: Vec<ListItem> = events[start..]
        .iter()
        .map(|event| {
            ListItem::new(Line::from(vec![
                Span::styled(event.at.format("%H:%M:%S ").to_string(), Style::default().fg(Color::DarkGray)),
                Span::raw(event.message.clone()),
            ]))
        })
        .collect();

    let log = List::new(items).block(
        Block::default()
            .title(Span::styled(" Events ", Style::default().fg(Color::Cyan)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(log, area);
}

fn draw_legend(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Green));
    let label = |l: &'static str| Span::styled(l, Style::default().fg(Color::DarkGray));

    let legend = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        key("mouse"),
        label(" paint  "),
        key("m"),
        label(" memorize  "),
        key("r"),
        label(" recall  "),
        key("e"),
        label(" eraser  "),
        key("c"),
        label(" clear  "),
        key("q/Esc"),
        label(" quit"),
    ]))
    .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));

    frame.render_widget(legend, area);
}
