#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

use skillblocks::app::App;
use skillblocks::config::Config;
use skillblocks::game::MILESTONE_PAUSE_MS;
use skillblocks::input::key_to_command;
use skillblocks::leaderboard::Leaderboard;
use skillblocks::ui;

const LOG_PATH: &str = "skillblocks.log";
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / 60);

fn main() -> Result<()> {
    // Logs go to a file so they don't corrupt the terminal UI
    let log_file = std::fs::File::create(LOG_PATH)
        .with_context(|| format!("creating log file {LOG_PATH}"))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting skillblocks");

    let config = Config::load();
    let leaderboard = Leaderboard::open_default();
    info!("Leaderboard at {}", leaderboard.path().display());

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config, leaderboard);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        let frame_start = Instant::now();

        // Input is gathered before the simulation step and the render of this frame
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                debug!("Key event: {key:?}");
                if let Some(command) = key_to_command(key) {
                    commands.push(command);
                }
            }
        }

        let report = app.frame(&commands);
        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }

        terminal.draw(|f| ui::render(f, &app))?;

        if report.celebrate {
            // Full stop: nothing is simulated and keys pressed meanwhile are discarded
            thread::sleep(Duration::from_millis(MILESTONE_PAUSE_MS));
            while event::poll(Duration::ZERO)? {
                let _ = event::read()?;
            }
            app.finish_celebration();
        }

        if let Some(remaining) = FRAME_DURATION.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
