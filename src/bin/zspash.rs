//! zspash - live node dashboard.
//!
//! Usage:
//!   zspash                      # refresh every second
//!   zspash 5                    # refresh every 5 seconds
//!   zspash --config zspash.toml # branding, overlay network, sources
//!   zspash --log-file /tmp/zspash.log -v

use std::fs::OpenOptions;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use zspash::collector::{AddressLookup, Collector, FileSystem};
#[cfg(not(target_os = "linux"))]
use zspash::collector::{MockFs, StaticAddresses};
#[cfg(target_os = "linux")]
use zspash::collector::{RealFs, SysinfoAddresses};
use zspash::config::Config;
use zspash::provider::LiveProvider;
use zspash::tui::{App, Layout, Shutdown, TerminalPacer, TerminalSurface};

/// Live terminal dashboard for a node.
#[derive(Parser)]
#[command(name = "zspash", about = "Live node dashboard", version)]
struct Args {
    /// Refresh interval in seconds (default: 1).
    #[arg(value_name = "INTERVAL")]
    interval: Option<u64>,

    /// Path to a TOML config file.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, value_name = "PATH")]
    proc_path: Option<String>,

    /// Path to /sys filesystem.
    #[arg(long, value_name = "PATH")]
    sys_path: Option<String>,

    /// Write logs to this file. Without it logs go to stderr only when
    /// stderr is not the terminal the dashboard draws on.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(args.verbose, args.quiet, config.logging.file.as_deref()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    info!("zspash {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}ms, proc={}, sys={}",
        config.refresh.interval_ms, config.sources.proc_path, config.sources.sys_path
    );

    #[cfg(target_os = "linux")]
    let collector = Collector::new(
        RealFs::new(),
        SysinfoAddresses::new(),
        &config.sources.proc_path,
    );
    #[cfg(not(target_os = "linux"))]
    let collector = Collector::new(
        MockFs::typical_host(),
        StaticAddresses::typical_host(),
        &config.sources.proc_path,
    );

    match run(collector, &config) {
        Ok(frames) => info!(frames, "zspash stopped"),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Reads the config file, if any, and applies command-line overrides.
fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(secs) = args.interval {
        config.refresh.interval_ms = secs.saturating_mul(1000);
    }
    if let Some(path) = &args.proc_path {
        config.sources.proc_path = path.clone();
    }
    if let Some(path) = &args.sys_path {
        config.sources.sys_path = path.clone();
    }
    if let Some(path) = &args.log_file {
        config.logging.file = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Runs the dashboard until interrupted.
///
/// The terminal is restored before this returns, so callers can print errors.
fn run<F, A>(collector: Collector<F, A>, config: &Config) -> anyhow::Result<usize>
where
    F: FileSystem,
    A: AddressLookup,
{
    let mut collector = collector.with_sys_path(&config.sources.sys_path);
    if let Some(overlay) = config.overlay_settings() {
        debug!(network_id = %overlay.network_id, "overlay network configured");
        collector = collector.with_overlay(overlay);
    }

    let provider = LiveProvider::initialize(collector).context("failed to initialize metrics")?;

    // Setup graceful shutdown
    let shutdown = Shutdown::new();
    let handle = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        handle.request();
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    let surface = TerminalSurface::new().context("failed to initialize terminal")?;
    let mut app = App::new(
        provider,
        surface,
        TerminalPacer::new(),
        Layout::new(config.branding()),
        config.interval(),
    )
    .with_shutdown(shutdown);

    let result = app.run();
    // Dropping the app restores the terminal.
    drop(app);
    Ok(result?)
}

/// Initializes the tracing subscriber.
///
/// The dashboard owns the terminal, so logs go to `file` when given, to
/// stderr when it is redirected, and nowhere otherwise.
fn init_logging(verbose: u8, quiet: bool, file: Option<&Path>) -> anyhow::Result<()> {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::from_default_env().add_directive(format!("zspash={}", level).parse()?);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if let Some(path) = file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    } else if !io::stderr().is_terminal() {
        builder.with_writer(io::stderr).init();
    } else {
        builder.with_writer(io::sink).init();
    }
    Ok(())
}
