mod app;
mod domain;
mod input;
mod notifications;
mod persistence;
mod rollover;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use domain::{calculate_progress, filter_tasks, parse_tags, today, Priority, TaskPatch};
use notifications::{SilentCue, SystemCue};
use persistence::{get_data_dir, init_local_dir, log_file, Store};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::info;

/// Environment variable holding the log filter; logging is off when unset
const LOG_ENV: &str = "FOCUSFORGE_LOG";

#[derive(Parser)]
#[command(name = "focusforge")]
#[command(about = "Prioritized tasks, daily progress and a Pomodoro timer in your terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .focusforge directory in the current directory
    Init,
    /// Add a task
    Add {
        text: String,
        /// low, medium or high
        #[arg(short, long, default_value = "medium", value_parser = parse_priority)]
        priority: Priority,
        /// Reopen the task every day
        #[arg(short, long)]
        repeat: bool,
        /// Tag (repeatable, or comma-separated)
        #[arg(short, long)]
        tag: Vec<String>,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Change a task; ID may be any unique prefix shown by `list`
    Edit {
        id: String,
        #[arg(long)]
        text: Option<String>,
        /// low, medium or high
        #[arg(short, long, value_parser = parse_priority)]
        priority: Option<Priority>,
        /// Reopen the task every day (true or false)
        #[arg(short, long)]
        repeat: Option<bool>,
        /// Replace the tags (repeatable, or comma-separated)
        #[arg(short, long)]
        tag: Vec<String>,
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List tasks with today's progress
    List {
        #[arg(short, long)]
        tag: Option<String>,
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Write a JSON backup. Defaults to ./focusforge-backup-YYYY-MM-DD.json
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all data with a JSON backup
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all tasks, history and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_label(s).ok_or_else(|| format!("unknown priority '{}': use low, medium or high", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            // Initialize local .focusforge directory
            let dir = init_local_dir()?;
            println!("Initialized FocusForge directory: {}", dir.display());
            println!();
            println!("FocusForge will now use this local directory for its data.");
            println!("Run 'focusforge' to start.");
            Ok(())
        }
        Some(command) => {
            init_logging()?;
            run_command(command)
        }
        None => {
            init_logging()?;
            run_tui()
        }
    }
}

/// Install a file logger when FOCUSFORGE_LOG is set; the TUI owns stdout
fn init_logging() -> Result<()> {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let path = log_file()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load state and apply any pending rollover
fn open_app(cue: Box<dyn notifications::AudioCue>, infer_release: bool) -> Result<App> {
    let store = Store::open()?;
    let today = today();
    let state = store.load(today);
    let mut app = App::new(state, store, cue, Instant::now(), infer_release);
    app.check_rollover(today);
    Ok(app)
}

/// Ask on stdin; anything but y/yes declines
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn run_command(command: Commands) -> Result<()> {
    let mut app = open_app(Box::new(SilentCue), true)?;

    match command {
        // Handled in main, before any data is loaded
        Commands::Init => {}
        Commands::Add {
            text,
            priority,
            repeat,
            tag,
            notes,
        } => {
            let tags = parse_tags(&tag.join(","));
            match app.add_task(&text, priority, repeat, tags, &notes) {
                Some(id) => println!("Added task {}", id),
                None => anyhow::bail!("Task text cannot be empty"),
            }
        }
        Commands::Edit {
            id,
            text,
            priority,
            repeat,
            tag,
            notes,
        } => {
            let id = app.resolve_task_id(&id)?;
            let tags = (!tag.is_empty()).then(|| parse_tags(&tag.join(",")));
            app.update_task(
                &id,
                TaskPatch {
                    text,
                    priority,
                    repeat_daily: repeat,
                    tags,
                    notes,
                    done: None,
                },
            );
            if let Some(task) = app.state.find_task(&id) {
                println!("Updated task {}: {}", id, task.text);
            }
        }
        Commands::List { tag, search } => {
            let progress = calculate_progress(&app.state.tasks);
            println!(
                "{}  {}% ({}/{} weighted)",
                app.state.last_reset_date, progress.percentage, progress.completed_weighted,
                progress.total_weighted
            );
            for task in filter_tasks(&app.state.tasks, &search, tag.as_deref()) {
                let check = if task.done { "x" } else { " " };
                let repeat = if task.repeat_daily { " ↻" } else { "" };
                let tags: Vec<String> = task.tags.iter().map(|t| format!("#{}", t)).collect();
                let short_id = task.id().get(..8).unwrap_or(task.id());
                println!(
                    "{:<8} [{}] {:<6} {}{} {}",
                    short_id,
                    check,
                    task.priority().label(),
                    task.text,
                    repeat,
                    tags.join(" ")
                );
            }
        }
        Commands::Export { output } => {
            let path = app.export(output, today())?;
            println!("Exported to {}", path.display());
        }
        Commands::Import { file, yes } => {
            let prompt = format!("Replace all current data with {}?", file.display());
            if !yes && !confirm(&prompt)? {
                println!("Import cancelled");
                return Ok(());
            }
            app.import_from_file(&file, today())?;
            println!("Imported {} tasks", app.state.tasks.len());
        }
        Commands::Reset { yes } => {
            if !yes && !confirm("Delete all tasks, history and settings?")? {
                println!("Reset cancelled");
                return Ok(());
            }
            app.reset_all_data(today());
            println!("All data reset");
        }
    }

    if app.needs_save {
        app.flush_strict()?;
    }
    Ok(())
}

fn run_tui() -> Result<()> {
    let data_dir = get_data_dir()?;
    eprintln!("Using FocusForge directory: {}", data_dir.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Without release events the exit hold is ended by a pause in key repeats
    let release_events = supports_keyboard_enhancement().unwrap_or(false);
    if release_events {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = open_app(Box::new(SystemCue), !release_events).and_then(|mut app| {
        let result = run_app(&mut terminal, &mut app);
        app.flush();
        result
    });

    // Restore terminal
    if release_events {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        eprintln!("Error: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = ticker::tick_duration();
    info!("tui started");

    loop {
        terminal.draw(|f| ui::render(f, app, Instant::now()))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if input::is_edit_notes_key(app, &key) {
                    // Hand the terminal to $EDITOR
                    disable_raw_mode()?;
                    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

                    let outcome = input::handle_key(app, key, Instant::now());

                    enable_raw_mode()?;
                    execute!(io::stdout(), EnterAlternateScreen)?;
                    terminal.clear()?;

                    if let Err(e) = outcome {
                        app.status = Some(format!("Editor failed: {}", e));
                    }
                } else if input::handle_key(app, key, Instant::now())? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
        app.flush();
    }
}
