mod app;
mod cli;
mod domain;
mod engine;
mod input;
mod notifications;
mod persistence;
mod report;
mod ui;
mod watch;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cli::Location;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{CounterDelta, GroupKey, Quadrant, SortDirection, SortKey};
use engine::Engine;
use notifications::{ConsoleNotifier, NoticeLog};
use persistence::{
    ensure_config_dir, init_local_config, load_settings, log_file, report_file, save_settings, settings_file,
    DailyNotes, Settings, VaultStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};
use watch::Reconciler;

#[derive(Parser)]
#[command(name = "quadrant")]
#[command(about = "Eisenhower matrix and habit tracker for annotated markdown checklists", long_about = None)]
struct Cli {
    /// Vault directory to scan. Defaults to the current directory.
    #[arg(long, global = true, default_value = ".")]
    vault: PathBuf,

    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = cli::parse_day)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .quadrant directory with default settings
    Init,
    /// Print open tasks grouped by quadrant
    Matrix,
    /// Print habits and scheduled tasks
    Habits {
        /// default, progress or start-date
        #[arg(short, long, value_parser = cli::parse_sort)]
        sort: Option<SortKey>,
        /// asc or desc. Defaults to the sort key's natural direction.
        #[arg(short, long, value_parser = cli::parse_direction)]
        dir: Option<SortDirection>,
        /// none, accumulated or category
        #[arg(short, long, value_parser = cli::parse_group)]
        group: Option<GroupKey>,
    },
    /// Complete the task at <file>:<line>
    Done {
        #[arg(value_parser = Location::parse)]
        location: Location,
    },
    /// Change the counter of the accumulated task at <file>:<line>
    Bump {
        #[arg(value_parser = Location::parse)]
        location: Location,
        /// up, down or reset
        #[arg(default_value = "up", value_parser = cli::parse_delta)]
        change: CounterDelta,
    },
    /// Move the task at <file>:<line> to another quadrant
    Move {
        #[arg(value_parser = Location::parse)]
        location: Location,
        /// 1-4 or do-first, schedule, delegate, eliminate
        #[arg(value_parser = cli::parse_quadrant)]
        quadrant: Quadrant,
    },
    /// Persist resets for broken daily streaks
    Streaks,
    /// Rescan periodically and print the matrix whenever it changes
    Watch,
    /// Generate a weekly summary report
    Report {
        /// Output file path. Defaults to .quadrant/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Where log lines go
enum LogTarget {
    Stderr,
    File(PathBuf),
}

fn init_logging(target: LogTarget) -> Result<()> {
    let filter = EnvFilter::try_from_env("QUADRANT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let writer = match target {
        LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        LogTarget::File(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let vault = cli.vault.clone();

    match cli.command {
        None => {
            ensure_config_dir(&vault)?;
            init_logging(LogTarget::File(log_file(&vault)?))?;
            run_tui(&vault, cli.today)
        }
        Some(command) => {
            init_logging(LogTarget::Stderr)?;
            run_command(&vault, cli.today, command)
        }
    }
}

fn run_command(vault: &Path, today: Option<NaiveDate>, command: Commands) -> Result<()> {
    if let Commands::Init = command {
        let config_dir = init_local_config(vault)?;
        save_settings(config_dir.join("settings.json"), &Settings::default())?;
        println!("Initialized quadrant directory: {}", config_dir.display());
        println!();
        println!("Edit settings.json there to change the daily note folder or excluded folders.");
        println!("Run 'quadrant' to open the matrix.");
        return Ok(());
    }

    let settings = load_settings(settings_file(vault)?)?;
    let store = VaultStore::new(vault, settings.exclude_folders.clone());
    let notifier = ConsoleNotifier {
        desktop: settings.desktop_notifications,
    };
    let engine = Engine::new(&store, &notifier, DailyNotes::new(settings.daily_note_folder.clone())).with_today(today);

    match command {
        Commands::Init => Ok(()),
        Commands::Matrix => {
            print!("{}", cli::format_matrix(&engine.scan()?));
            Ok(())
        }
        Commands::Habits { sort, dir, group } => {
            let key = sort.unwrap_or(settings.default_sort);
            let direction = match (dir, sort) {
                (Some(dir), _) => dir,
                (None, Some(key)) => key.natural_direction(),
                (None, None) => settings.sort_direction(),
            };
            let group = group.unwrap_or(settings.default_group);
            print!(
                "{}",
                cli::format_habits(&engine.scan()?, key, direction, group, engine.today(), settings.use_emoji)
            );
            Ok(())
        }
        Commands::Done { location } => {
            let original = location.read(&store)?;
            let completion = engine.apply_completion(&location.path, location.line, &original)?;
            if completion.edit.changed() {
                println!("{}", completion.edit.new_text);
            }
            Ok(())
        }
        Commands::Bump { location, change } => {
            let original = location.read(&store)?;
            let result = engine.apply_counter_delta(&location.path, location.line, &original, change)?;
            println!("{} -> {}", result.old_count, result.new_count);
            Ok(())
        }
        Commands::Move { location, quadrant } => {
            let original = location.read(&store)?;
            let edit = engine.apply_quadrant(&location.path, location.line, &original, quadrant)?;
            println!("{}", edit.new_text);
            Ok(())
        }
        Commands::Streaks => {
            let reset = engine.refresh_streaks()?;
            println!("Reset {} broken streak{}", reset, if reset == 1 { "" } else { "s" });
            Ok(())
        }
        Commands::Watch => run_watch(&engine, &settings),
        Commands::Report { output } => {
            let today = engine.today();
            let output = match output {
                Some(path) => path,
                None => report_file(vault, today)?,
            };
            println!("Generating report for {}...", today);
            let report_path = report::generate_report(&store, today, &output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
    }
}

/// Print the matrix on every change until interrupted
fn run_watch(engine: &Engine, settings: &Settings) -> Result<()> {
    let mut reconciler = Reconciler::new(settings.poll_interval());
    eprintln!("Watching for changes every {}s (Ctrl-C to stop)", reconciler.interval().as_secs());

    loop {
        reconciler.mark_polled(Instant::now());
        match engine.scan() {
            Ok(tasks) => {
                if let Some(tasks) = reconciler.reconcile(tasks) {
                    println!("--- {} ---", Local::now().format("%H:%M:%S"));
                    print!("{}", cli::format_matrix(&tasks));
                }
            }
            Err(e) => eprintln!("Warning: scan failed: {:#}", e),
        }
        std::thread::sleep(reconciler.interval());
    }
}

fn run_tui(vault: &Path, today_override: Option<NaiveDate>) -> Result<()> {
    let settings = load_settings(settings_file(vault)?)?;
    let store = VaultStore::new(vault, settings.exclude_folders.clone());
    let log = NoticeLog::new(settings.desktop_notifications);
    let engine = Engine::new(&store, &log, DailyNotes::new(settings.daily_note_folder.clone()))
        .with_today(today_override);

    // Persist streak resets before the first render
    if let Err(e) = engine.refresh_streaks() {
        tracing::warn!(error = %e, "streak refresh failed");
    }

    let mut app = AppState::new(&settings, engine.today());
    app.rescan(&engine);
    if let Some(notice) = log.drain().pop() {
        app.set_status(notice);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app, &engine, &log);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    engine: &Engine,
    log: &NoticeLog,
) -> Result<()> {
    let tick_rate = watch::tick_duration();

    loop {
        // Midnight crossing: streaks may have broken overnight
        if engine.today() != app.today {
            app.today = engine.today();
            if let Err(e) = engine.refresh_streaks() {
                tracing::warn!(error = %e, "streak refresh failed");
            }
            app.rescan(engine);
        }

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, engine, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        if let Some(notice) = log.drain().pop() {
            app.set_status(notice);
        }

        app.poll(engine, Instant::now());
    }
}
