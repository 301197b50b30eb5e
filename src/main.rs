//! # ToolDeck CLI Entry Point
//!
//! This is the main entry point for the ToolDeck TUI application.
//!
//! ## Overview
//!
//! ToolDeck is a terminal browser for a categorized catalog of small tools.
//! It loads the catalog, restores preferences and usage counts, and presents
//! the tools in a searchable, filterable list.
//!
//! ## Usage
//!
//! ```bash
//! # Browse the built-in catalog
//! tooldeck
//!
//! # Use a custom catalog file
//! tooldeck --catalog ./tools.json
//!
//! # Export the tools matching a search and exit
//! tooldeck --export csv --query json --out ./exports
//!
//! # Debug mode - print the catalog and filter results, log to stderr, exit
//! tooldeck --debug --category converters
//! ```
//!
//! ## Architecture
//!
//! 1. **Catalog**: Loaded from `--catalog`, the config file, or the built-in one
//! 2. **State**: Events go through a pure reducer; [`App`] applies the result
//! 3. **Timers**: Debounce, throttle and notification expiry are deadlines
//!    that the event loop polls
//! 4. **UI**: Rendered with ratatui; key bindings live in `ui::keys`

use tooldeck::catalog::{filter, Catalog, FilterQuery, ToolRecord};
use tooldeck::export::{self, ExportFormat};
use tooldeck::prefs::{data_dir, FileBackend, PreferenceStore};
use tooldeck::share::Clipboard;
use tooldeck::ui::config::Config;
use tooldeck::ui::state::UiEvent;
use tooldeck::ui::{self, keys, App};
use tooldeck::usage::UsageTracker;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input when no timer is pending.
const IDLE_POLL: Duration = Duration::from_millis(250);

const LOG_FILE_NAME: &str = "tooldeck.log";

/// Source of terminal events; tests substitute a scripted one.
trait EventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

/// Reads events from the real terminal.
struct CrosstermEventReader;

impl EventReader for CrosstermEventReader {
    fn read_event(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout).context("Failed to poll for events")? {
            Ok(Some(
                event::read().context("Failed to read keyboard event")?,
            ))
        } else {
            Ok(None)
        }
    }
}

/// ToolDeck - Handy tools in one place
#[derive(Parser, Debug)]
#[command(name = "tooldeck")]
#[command(author = "Luckystrike561")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse, search and launch a catalog of tools", long_about = None)]
struct Args {
    /// Path to a catalog JSON file (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Print the catalog and filter results, log to stderr, and exit
    #[arg(long)]
    debug: bool,

    /// Export the matching tools in the given format and exit
    #[arg(short, long, value_name = "FORMAT")]
    export: Option<ExportFormat>,

    /// Directory to write exports to (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    out: Option<PathBuf>,

    /// Initial search term
    #[arg(short, long, value_name = "TERM", conflicts_with = "category")]
    query: Option<String>,

    /// Initial category key
    #[arg(long, value_name = "KEY")]
    category: Option<String>,
}

impl Args {
    fn initial_query(&self) -> FilterQuery {
        match (&self.query, &self.category) {
            (Some(term), _) => FilterQuery::text(term.clone()),
            (None, Some(key)) => FilterQuery::category(key.clone()),
            (None, None) => FilterQuery::all(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.debug);

    // Leave the alternate screen before the panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableFocusChange
        );

        original_hook(panic_info);
    }));

    let result = run_application(args).await;

    let _ = panic::take_hook();

    result
}

/// Route log output to `tooldeck.log` in the data directory, or to stderr in
/// debug mode. Without a writable log file logging is switched off so it
/// cannot draw over the alternate screen.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if !debug {
        let log_file = data_dir().and_then(|dir| {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
            let path = dir.join(LOG_FILE_NAME);
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))
        });

        match log_file {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(log::LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

fn load_catalog(args: &Args, config: &Config) -> Result<Catalog> {
    match config.catalog_source(args.catalog.as_deref()) {
        Some(path) => Catalog::load_from(path)
            .with_context(|| format!("Failed to load catalog: {}", path.display())),
        None => Catalog::builtin().context("Failed to load built-in catalog"),
    }
}

fn open_preferences() -> PreferenceStore {
    match FileBackend::open_default() {
        Ok(backend) => {
            log::info!("Preferences at {}", backend.path().display());
            PreferenceStore::new(Box::new(backend))
        }
        Err(e) => {
            log::warn!(
                "Could not open preference storage, settings will not persist: {:#}",
                e
            );
            PreferenceStore::in_memory()
        }
    }
}

async fn run_application(args: Args) -> Result<()> {
    let config = Config::load();
    let catalog = load_catalog(&args, &config)?;
    log::info!(
        "Loaded {} tools in {} categories",
        catalog.len(),
        catalog.category_keys().len()
    );

    let query = args.initial_query();

    if let Some(format) = args.export {
        let out_dir = match args.out.clone() {
            Some(dir) => dir,
            None => std::env::current_dir().context("Failed to get current working directory")?,
        };
        let outcome = filter(&catalog.tools, &query);
        let records: Vec<&ToolRecord> = outcome
            .visible
            .iter()
            .filter_map(|id| catalog.tool(id))
            .collect();
        let path = export::export_tools(&records, &out_dir, "tools", format)?;
        println!("Downloaded {}", path.display());
        return Ok(());
    }

    // Debug mode: print the catalog and filter results and exit
    if args.debug {
        print_debug(&catalog, &config, &query);
        return Ok(());
    }

    let prefs = open_preferences();

    let mut app = App::new(catalog, prefs, &config);
    app.clipboard = Clipboard::system();
    app.export_dir = match args.out {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current working directory")?,
    };
    apply_initial_query(&mut app, &query, Instant::now());
    app.analytics.track_page_view("tools");

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to setup terminal")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut event_reader = CrosstermEventReader;
    let run_result = run_app(&mut terminal, &mut app, &mut event_reader).await;

    // Restore the terminal even when the loop failed; the loop's error wins
    let cleanup_result = cleanup_terminal(&mut terminal);

    run_result?;
    cleanup_result?;

    log::info!("Exiting");
    Ok(())
}

fn apply_initial_query(app: &mut App, query: &FilterQuery, now: Instant) {
    match query {
        FilterQuery::Text { term } => {
            app.search_input = term.clone();
            app.dispatch(UiEvent::QueryChanged(term.clone()), now);
        }
        FilterQuery::Category { key } => {
            app.select_category(key, now);
        }
    }
}

fn print_debug(catalog: &Catalog, config: &Config, query: &FilterQuery) {
    println!("=== Configuration ===");
    println!("  {:?}\n", config);

    println!("=== Categories ===");
    for key in catalog.category_keys() {
        let count = catalog.tools.iter().filter(|t| t.category == key).count();
        println!("  {} ({}): {} tools", catalog.category_title(key), key, count);
    }

    println!("\n=== Query: {:?} ===", query);
    let outcome = filter(&catalog.tools, query);
    if outcome.no_results {
        println!("  No tools found");
    }
    for tool in outcome.visible.iter().filter_map(|id| catalog.tool(id)) {
        println!("  {} [{}] - {}", tool.title, tool.category, tool.description);
    }

    let mut prefs = open_preferences();
    let frequent = UsageTracker::new(&mut prefs).frequent();
    if !frequent.is_empty() {
        println!("\n=== Frequently Used ===");
        for id in frequent {
            println!("  {}", id);
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}

/// How long to wait for input: until the next timer fires, capped at
/// [`IDLE_POLL`].
fn poll_timeout(deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
        None => IDLE_POLL,
    }
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_reader: &mut dyn EventReader,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        terminal
            .draw(|f| ui::render(f, app))
            .map_err(|e| anyhow::anyhow!("Failed to draw terminal UI: {}", e))?;

        if app.should_quit {
            return Ok(());
        }

        let timeout = poll_timeout(app.next_deadline(), Instant::now());
        let Some(event) = event_reader.read_event(timeout)? else {
            continue;
        };

        let now = Instant::now();
        match event {
            Event::Key(key) => keys::handle_key(app, key, now),
            Event::FocusGained => app.set_page_visible(true),
            Event::FocusLost => app.set_page_visible(false),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.next(now),
                MouseEventKind::ScrollUp => app.previous(now),
                _ => {}
            },
            _ => {}
        }
    }
}
