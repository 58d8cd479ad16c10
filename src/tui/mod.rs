mod app;
mod help_text;
pub mod theme;
mod ui;

pub use app::App;
pub use theme::Theme;

use color_eyre::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::DefaultTerminal;
use std::io::stdout;
use std::time::{Duration, Instant};

/// Longest the loop sleeps when nothing is scheduled, so status messages
/// still expire
const MAX_POLL: Duration = Duration::from_millis(250);

/// Set up the terminal, run the app and always restore the terminal
pub fn launch(app: App) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;
    stdout().execute(EnableMouseCapture).ok();

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| {
        stdout().execute(LeaveAlternateScreen).ok();
        disable_raw_mode().ok();
    })?;

    let result = run(&mut terminal, app);

    stdout().execute(DisableMouseCapture).ok();
    stdout().execute(LeaveAlternateScreen).ok();
    disable_raw_mode().ok();
    result
}

/// Run the TUI event loop until the user quits.
///
/// The poll timeout follows the controller's next deadline: one animation
/// frame while a smooth scroll runs, otherwise the time left on the idle
/// timer.
pub fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::render(frame, &mut app, now))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = app
            .controller
            .next_wakeup(Instant::now())
            .map_or(MAX_POLL, |wait| wait.min(MAX_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        let now = Instant::now();
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key, now),
            Event::Mouse(mouse) => app.handle_mouse(mouse, now),
            // Resizes are picked up by the next draw
            _ => {}
        }
    }
}
