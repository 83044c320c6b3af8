use arcade::challenges::memory::{DECK_SIZE, GRID_COLUMNS};
use arcade::core::scheduler::FrameScheduler;
use arcade::host::{Arcade, ArcadeConfig, SharedStore, XpReporter};
use arcade::input::{card_at, handle_key, handle_mouse, InputResult};
use arcade::scores::{InMemoryBestScoreStore, JsonBestScoreStore};
use arcade::ui::draw_arcade;
use arcade::utils::build_info;
use arcade::utils::persistence::save_path;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::layout::Rect;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::cell::RefCell;
use std::fs::OpenOptions;
use std::io;
use std::rc::Rc;
use std::time::Duration;

const LOG_FILE: &str = "arcade.log";

/// Frame budget for the draw loop (~60 fps).
const FRAME_POLL: Duration = Duration::from_millis(16);

/// Route logs to ~/.arcade/arcade.log; stdout belongs to the TUI.
fn init_logging() {
    let Ok(path) = save_path(LOG_FILE) else {
        return;
    };
    let Ok(file) = OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

fn open_store() -> SharedStore {
    match JsonBestScoreStore::open_default() {
        Ok(store) => Rc::new(RefCell::new(store)),
        Err(e) => {
            log::warn!("Best scores will not be saved: {}", e);
            Rc::new(RefCell::new(InMemoryBestScoreStore::new()))
        }
    }
}

fn main() -> io::Result<()> {
    let mut offline = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Arcade - Focus Flappy, Habit Snake and Memory Match\n");
                println!("Usage: arcade [options]\n");
                println!("Options:");
                println!("  --offline  Do not report XP to the gamification API");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            "--offline" => offline = true,
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'arcade --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    init_logging();
    log::info!("{} starting", build_info::version_line());

    let mut config = ArcadeConfig::load();
    if offline {
        config.xp_reporting = false;
    }

    let mut arcade = Arcade::new(
        Box::new(FrameScheduler::new()),
        Box::new(rand::thread_rng()),
        open_store(),
        XpReporter::from_config(&config),
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut arcade);

    // Restore terminal
    arcade.leave();
    disable_raw_mode()?;
    terminal.backend_mut().execute(DisableMouseCapture)?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let abandoned = arcade.flush_xp(config.request_timeout());
    log::info!(
        "Arcade closed, {} XP earned ({} unsent)",
        arcade.total_xp(),
        abandoned
    );
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    arcade: &mut Arcade,
) -> io::Result<()> {
    let mut memory_grid: Option<Rect> = None;

    loop {
        arcade.tick();

        terminal.draw(|frame| {
            memory_grid = draw_arcade(frame, arcade);
        })?;

        if !event::poll(FRAME_POLL)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                if handle_key(key, arcade) == InputResult::Quit {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => {
                let grid = memory_grid;
                handle_mouse(mouse, arcade, |x, y| {
                    grid.and_then(|g| card_at(g, GRID_COLUMNS, DECK_SIZE, x, y))
                });
            }
            _ => {}
        }
    }
}
