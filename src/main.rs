//! progress-gauge - terminal demo for the animated progress widgets
//!
//! Runs the ratatui dashboard by default; `simulate` and `validate-config`
//! work without a terminal.

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use progress_gauge::config::{self, Config};
use progress_gauge::core::simulation::simulate;
use progress_gauge::core::{AppCore, TICK_INTERVAL};
use progress_gauge::data::ProgressConfig;
use progress_gauge::frontend::{Frontend, FrontendEvent, TuiFrontend};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "progress-gauge")]
#[command(about = "Animated progress bar and ring widgets in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.progress-gauge)
    /// Can also be set via PROGRESS_GAUGE_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive dashboard (default)
    Demo,
    /// Run one animation against a simulated clock and print every step
    Simulate {
        /// Target progress (0-100)
        #[arg(long, default_value_t = 80.0)]
        target: f32,
        /// Start from this value instead of zero
        #[arg(long)]
        start: Option<f32>,
        /// Animation duration in milliseconds
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
        /// Continue from the start value instead of restarting at zero
        #[arg(long)]
        no_from_zero: bool,
        /// Skip the animation and jump straight to the target
        #[arg(long)]
        no_animation: bool,
    },
    /// Validate the configuration file
    ValidateConfig,
    /// Write the default config to the data directory
    InitConfig,
}

fn main() -> Result<()> {
    // Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    // TUI apps can't log to stdout, so we write to a file
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("progress-gauge.log")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var(config::DATA_DIR_ENV) {
        tracing::info!("Using data directory from {}: {}", config::DATA_DIR_ENV, env_dir);
    }

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => {
            let config = load_config(cli.config.as_ref())?;
            run_tui(config)
        }
        Commands::Simulate {
            target,
            start,
            duration_ms,
            no_from_zero,
            no_animation,
        } => {
            let progress_config = ProgressConfig::default()
                .animation_duration_ms(duration_ms)
                .animate_from_zero(!no_from_zero)
                .animation_enabled(!no_animation);
            run_simulation(progress_config, start, target)
        }
        Commands::ValidateConfig => validate_config(cli.config.as_ref()),
        Commands::InitConfig => {
            let path = Config::extract_default()?;
            println!("Config at {:?}", path);
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn validate_config(path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => println!("Validating config file: {:?}", path),
        None => println!("Validating default config"),
    }

    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load config: {:#}", e);
            std::process::exit(1);
        }
    };
    println!("✓ Config loaded successfully");
    println!("  {} widgets defined", config.widgets.len());

    let report = config.validate();
    for error in &report.errors {
        eprintln!("✗ Error: {}", error);
    }
    for warning in &report.warnings {
        println!("⚠ Warning: {}", warning);
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("✓ Config is valid with no issues");
    }
    if report.has_errors() {
        eprintln!("\n✗ Found {} error(s)", report.errors.len());
        std::process::exit(1);
    }
    Ok(())
}

fn run_simulation(config: ProgressConfig, start: Option<f32>, target: f32) -> Result<()> {
    let report = simulate(config, start, target).context("Simulation rejected its input")?;

    println!(
        "{:>8}  {:>8}   (tick {}ms, duration {}ms)",
        "time",
        "progress",
        TICK_INTERVAL.as_millis(),
        config.animation_duration_ms
    );
    for step in &report.steps {
        println!("{:>6}ms  {:>7.2}%", step.elapsed.as_millis(), step.progress);
    }

    match report.completed_at {
        Some(at) => {
            let configured = if config.animation_enabled {
                config.animation_duration_ms
            } else {
                0
            };
            println!(
                "completed at {}ms (configured {}ms, error {}ms)",
                at.as_millis(),
                configured,
                at.as_millis() as i128 - configured as i128
            );
        }
        None => bail!("Animation did not complete"),
    }
    Ok(())
}

/// TUI main loop
fn run_tui(config: Config) -> Result<()> {
    let poll_timeout = Duration::from_millis(config.demo.poll_timeout_ms);

    // Create core application state
    let mut app_core = AppCore::new(config)?;

    // Create TUI frontend
    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(poll_timeout);

    let result = (|| -> Result<()> {
        while app_core.running {
            for event in frontend.poll_events()? {
                match event {
                    FrontendEvent::Key { .. } => {
                        if let Some(key) = event.as_key_event() {
                            app_core.handle_key(key);
                        }
                    }
                    FrontendEvent::Resize { width, height } => {
                        tracing::debug!("Terminal resized to {}x{}", width, height);
                        app_core.needs_render = true;
                    }
                    FrontendEvent::Quit => app_core.running = false,
                }
            }

            app_core.pump_ticks();

            if app_core.needs_render {
                frontend.render(&app_core)?;
                app_core.needs_render = false;
            }
        }
        Ok(())
    })();

    app_core.shutdown();
    frontend.cleanup()?;
    tracing::info!("Exited after {} completed animations", app_core.completed_animations());
    result
}
