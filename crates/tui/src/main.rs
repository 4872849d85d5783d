mod app;
mod config;
mod input;
mod keybinds;

use app::App;
use config::Config;
use directories::ProjectDirs;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "printlink", "printlink") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

// The terminal owns stdout, so diagnostics go to a file under the data
// dir. RUST_LOG overrides the default level.
fn init_logging() {
    let Some(proj_dirs) = ProjectDirs::from("com", "printlink", "printlink") else {
        return;
    };
    let log_dir = proj_dirs.data_dir();
    if std::fs::create_dir_all(log_dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::File::create(log_dir.join("printlink.log")) else {
        return;
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    terminal::enable_raw_mode()?;
    let mut terminal = ratatui::init();
    ratatui::crossterm::execute!(io::stdout(), EnterAlternateScreen)?;

    let result = run(&mut terminal);

    let _ = ratatui::crossterm::execute!(io::stdout(), LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    ratatui::restore();

    result
}

fn run(
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = get_config_path();
    let config = Config::load_or_default(&config_path);

    let rt = tokio::runtime::Runtime::new()?;
    // Keep the runtime context on this thread; actions spawn from the
    // event loop.
    let _guard = rt.enter();

    let mut app = App::new(config);
    app.init();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;

            if let Event::Key(key) = &event {
                if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    break;
                }
            }

            if let Ok(should_quit) = app.handle_event(event) {
                if should_quit {
                    break;
                }
            }
        }

        app.process_events();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
