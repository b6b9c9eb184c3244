use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careconnect::{
    events, ui, App, DashboardConfig, DashboardSnapshot, Overrides, ThemeChoice, TickerClock,
    VitalsGenerator, VitalsSeries,
};

/// How long to wait for input before redrawing.
const EVENT_POLL: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "careconnect")]
#[command(about = "Terminal dashboard for remote patient vital-sign monitoring")]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Days of vitals history before today
    #[arg(short, long)]
    window_days: Option<u16>,

    /// Seed for a reproducible vitals series
    #[arg(short, long)]
    seed: Option<u64>,

    /// "Last updated" clock period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Export current state to JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_file_logging(path)?;
    } else if args.export.is_some() {
        init_stderr_logging();
    }

    let config = load_config(&args)?;
    let vitals = generate(&config);

    // Handle export mode (non-interactive)
    if let Some(export_path) = &args.export {
        return export_to_file(&config, &vitals, export_path);
    }

    run_tui(config, vitals)
}

/// Merge the configuration file, environment and CLI flags.
fn load_config(args: &Args) -> Result<DashboardConfig> {
    let overrides = Overrides {
        window_days: args.window_days,
        seed: args.seed,
        tick_interval_ms: args.tick_ms,
        theme: args.theme,
    };
    DashboardConfig::load(args.config.as_deref())
        .context("failed to load configuration")?
        .with_overrides(&overrides)
        .context("invalid configuration")
}

fn generate(config: &DashboardConfig) -> VitalsSeries {
    let generator = VitalsGenerator::new(config.generator.baselines.clone());
    let mut rng = VitalsGenerator::rng(config.generator.seed);
    let vitals = generator.generate(
        config.generator.window_days,
        Local::now().date_naive(),
        &mut rng,
    );
    info!(
        window_days = config.generator.window_days,
        seeded = config.generator.seed.is_some(),
        samples = vitals.len(),
        "generated vitals"
    );
    vitals
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("careconnect=info"))
}

fn init_file_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Write a snapshot of the dashboard without starting the TUI.
fn export_to_file(config: &DashboardConfig, vitals: &VitalsSeries, path: &Path) -> Result<()> {
    DashboardSnapshot::new(&config.data, vitals, Local::now())
        .write_to(path)
        .with_context(|| format!("failed to export to {}", path.display()))?;

    println!("Exported dashboard state to: {}", path.display());
    Ok(())
}

/// Run the TUI until the user quits.
fn run_tui(config: DashboardConfig, vitals: VitalsSeries) -> Result<()> {
    // Query the terminal background before raw mode takes over
    let theme = ui::Theme::from_choice(config.display.theme);

    // The ticker runs on this runtime while the UI loop owns the main thread
    let rt = tokio::runtime::Runtime::new()?;
    let _guard = rt.enter();
    let clock = TickerClock::spawn(config.display.tick_interval());

    let mut app = App::new(Arc::new(config.data), vitals, Box::new(clock), theme)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let result = run_app(&mut terminal, &mut app);

    app.shutdown();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(EVENT_POLL)? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        app.tick();
    }

    Ok(())
}
