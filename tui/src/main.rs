//! Calc TUI Entry Point
//!
//! Launches the terminal keypad calculator.
//!
//! Usage:
//!   calc-tui [OPTIONS]
//!
//! Options:
//!   -u, --service-url <URL>   Evaluation service (default: http://localhost:5000)
//!   -c, --config <FILE>       Configuration file
//!   -s, --scientific          Start with the scientific keypad
//!       --timeout-ms <MS>     Per-request timeout, 0 for none
//!   -l, --log-level <LEVEL>   Log level when RUST_LOG is unset

use std::io;
use std::panic;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use calc_controller::config::{default_config_path, load_config_from_path, ConfigOverrides};
use calc_tui::{App, CalculatorClient};

/// Terminal keypad calculator
#[derive(Parser, Debug)]
#[command(name = "calc-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the evaluation service
    #[arg(short = 'u', long, value_name = "URL")]
    service_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "CALC_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Start with the scientific keypad
    #[arg(short = 's', long)]
    scientific: bool,

    /// Per-request timeout in milliseconds (0 = wait forever)
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "CALC_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "CALC_LOG_FILE", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.service_url {
            overrides = overrides.with_service_url(url.clone());
        }
        if let Some(ms) = self.timeout_ms {
            overrides = overrides.with_request_timeout_ms(ms);
        }
        if self.scientific {
            overrides = overrides.with_scientific(true);
        }
        overrides
    }
}

/// Initialize logging
///
/// Stderr shares the terminal with the alternate screen, so a log file is
/// the only way to read logs while the UI is up.
fn init_logging(level: &str, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("calc_tui={level},calc_controller={level}"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {path:?}"))?;
            builder
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => builder.with_writer(io::stderr).init(),
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.log_file.as_ref())?;

    let config_path = args.config.clone().or_else(default_config_path);
    let mut config = load_config_from_path(config_path)
        .await
        .context("Failed to load configuration")?;
    args.overrides()
        .apply(&mut config)
        .context("Invalid command-line options")?;

    tracing::info!(
        service_url = %config.service_url,
        source = %config.source(),
        scientific = config.scientific,
        "Configuration resolved"
    );

    let client = CalculatorClient::from_config(&config)?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: calc-tui requires a terminal (TTY)");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: CalculatorClient,
) -> Result<()> {
    let mut app = App::new(client)?;
    app.run(terminal).await
}
