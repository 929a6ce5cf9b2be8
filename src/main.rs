use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{error, info, warn};
use viewfinder::{
    KeyboardInputHandler, LoggingSurface, MockCameraEngine, Rect, SetupAction, SetupOutcome,
    ViewfinderConfig, ViewfinderController, ViewfinderEvent,
};

#[derive(Parser, Debug)]
#[command(name = "viewfinder")]
#[command(about = "Drive the camera control orchestration against a simulated camera")]
#[command(version)]
#[command(long_about = "Runs the viewfinder controller against a mock capture engine and a \
logging view surface. Setup outcomes can be fed from the command line or from the keyboard, \
and the resulting prompt, control and zoom state is reported as it changes.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "viewfinder.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,

    /// Run without a camera collaborator
    #[arg(long, help = "Start without a camera attached")]
    camera_absent: bool,

    /// Outcomes the mock camera reports for successive video updates
    #[arg(long = "update-outcome", value_name = "OUTCOME", help = "Outcome returned by the next video update (repeatable)")]
    update_outcomes: Vec<String>,

    /// Setup outcomes to handle in order, then print the final state
    #[arg(long, num_args = 1.., value_name = "OUTCOME", help = "Setup outcomes to feed, e.g. video_ready requires_update")]
    script: Vec<String>,

    /// Drive the controller from the keyboard
    #[arg(long, help = "Keyboard driver; the default when no --script is given")]
    interactive: bool,

    /// View width
    #[arg(long, default_value_t = 375.0)]
    width: f64,

    /// View height
    #[arg(long, default_value_t = 667.0)]
    height: f64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        println!("# Viewfinder Configuration File");
        println!();
        println!("{}", ViewfinderConfig::default().to_toml()?);
        return Ok(());
    }

    init_logging(&args)?;

    info!("Starting viewfinder v{}", env!("CARGO_PKG_VERSION"));

    let config = ViewfinderConfig::load_from_file(&args.config).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    let script = parse_outcomes(&args.script).context("invalid --script outcome")?;
    let update_outcomes =
        parse_outcomes(&args.update_outcomes).context("invalid --update-outcome")?;

    let bounds = Rect::new(0.0, 0.0, args.width, args.height);
    let mut builder = ViewfinderController::builder()
        .config(config)
        .view(LoggingSurface::new(bounds));
    if args.camera_absent {
        info!("Running without a camera");
    } else {
        let camera = MockCameraEngine::new()
            .with_update_outcomes(update_outcomes)
            .with_update_delay(Duration::from_millis(250));
        builder = builder.camera(Arc::new(camera));
    }
    let controller = builder.build()?;

    if args.interactive || script.is_empty() {
        run_interactive(controller, bounds).await
    } else {
        run_script(controller, &script).await
    }
}

async fn run_script(controller: ViewfinderController, script: &[SetupOutcome]) -> Result<()> {
    for outcome in script {
        let mut events = controller.subscribe();
        controller.handle_setup_result(*outcome);
        settle(&mut events).await;
    }

    let snapshot = controller.shutdown().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn run_interactive(controller: ViewfinderController, bounds: Rect) -> Result<()> {
    let controller = Arc::new(controller);
    let keyboard = KeyboardInputHandler::new(Arc::clone(&controller), bounds);
    let quit = keyboard.quit_token();

    keyboard.start().await?;

    tokio::select! {
        _ = quit.cancelled() => info!("Quit requested from keyboard"),
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT signal (Ctrl+C)"),
    }

    keyboard.stop().await?;

    let snapshot = controller.snapshot().await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Wait until a setup outcome is handled without triggering another video update
async fn settle(events: &mut broadcast::Receiver<ViewfinderEvent>) {
    let wait = async {
        loop {
            match events.recv().await {
                Ok(ViewfinderEvent::SetupOutcomeHandled { action, .. })
                    if action != SetupAction::ReconfigureVideo =>
                {
                    break
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    if tokio::time::timeout(Duration::from_secs(10), wait).await.is_err() {
        warn!("Timed out waiting for setup to settle");
    }
}

fn parse_outcomes(names: &[String]) -> viewfinder::Result<Vec<SetupOutcome>> {
    names.iter().map(|name| name.parse()).collect()
}

fn init_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("viewfinder={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(args.debug)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer()
                .with_target(true)
                .with_thread_ids(args.debug)
                .with_file(args.debug)
                .with_line_number(args.debug)
                .boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();

    Ok(())
}
