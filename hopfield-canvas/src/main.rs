//! Hopfield Canvas - The Interface
//!
//! Paint a pattern, memorize it, scribble over it, and watch recall pull
//! the grid back to what the network remembers.

use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn, Level};

use hopfield_core::{AssociativeMemory, HopfieldConfig};

use hopfield_canvas::demo;
use hopfield_canvas::session::{Command, Session};
use hopfield_canvas::visualizer::CanvasVisualizer;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line args
    let args: Vec<String> = std::env::args().collect();
    let demo_mode = args.iter().any(|a| a == "--demo" || a == "-d");

    let config = HopfieldConfig::from_env();
    config.validate()?;

    if demo_mode {
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_writer(io::stderr)
            .init();
        demo::run(&config)
    } else {
        // The alternate screen owns stdout, so logs go to a file
        let log_path = std::env::var("HOPFIELD_LOG").unwrap_or_else(|_| "hopfield.log".to_string());
        tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_ansi(false)
            .with_writer(Mutex::new(File::create(&log_path)?))
            .init();
        run_visual_mode(&config)
    }
}

fn run_visual_mode(config: &HopfieldConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Hopfield canvas v{}", VERSION);

    let memory = match &config.persistence.memory_path {
        Some(path) => AssociativeMemory::load_or_create(path, config.grid.cells()),
        None => AssociativeMemory::new(config.grid.cells()),
    };
    let mut session = Session::new(config.grid.side, memory, config.recall.rate)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut visualizer = CanvasVisualizer::new();
    let frame_interval = Duration::from_millis(config.recall.frame_interval_ms);

    let result = event_loop(&mut terminal, &mut visualizer, &mut session, frame_interval);

    // Cleanup
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture, Show)?;
    result?;

    if let Some(path) = &config.persistence.memory_path {
        if let Err(e) = session.into_memory().save(path) {
            warn!("Could not save memory: {}", e);
            eprintln!("Could not save memory to {}: {}", path.display(), e);
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    visualizer: &mut CanvasVisualizer,
    session: &mut Session,
    frame_interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    while session.running() {
        terminal.draw(|f| visualizer.draw(f, session))?;

        // Drain input until the frame is due, then advance once
        let deadline = Instant::now() + frame_interval;
        while session.running() && event::poll(deadline.saturating_duration_since(Instant::now()))? {
            handle_event(event::read()?, visualizer, session)?;
        }

        session.tick()?;
    }
    Ok(())
}

fn handle_event(
    event: Event,
    visualizer: &CanvasVisualizer,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            let command = match key.code {
                KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
                KeyCode::Char('m') => Some(Command::Memorize),
                KeyCode::Char('r') => Some(Command::ToggleRecall),
                KeyCode::Char('c') => Some(Command::Clear),
                KeyCode::Char('e') => Some(Command::ToggleEraser),
                _ => None,
            };
            if let Some(command) = command {
                session.handle(command)?;
            }
        }
        Event::Mouse(mouse) => {
            let cell = visualizer.cell_at(session.canvas(), mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    session.handle(Command::PenAt(cell))?;
                    session.handle(Command::PenDown)?;
                }
                MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                    session.handle(Command::PenAt(cell))?;
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    session.handle(Command::PenUp)?;
                }
                _ => {}
            }
            // Paint every drag position, not just the one seen at frame time
            if !session.canvas().recalling() {
                session.tick()?;
            }
        }
        _ => {}
    }
    Ok(())
}
