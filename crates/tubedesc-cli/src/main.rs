use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// tubedesc: draft YouTube video descriptions from your terminal.
///
/// Fill in the video details, send them to the generation service and watch
/// the description appear. Copy it as is or edit it first.
#[derive(Parser, Debug)]
#[command(name = "tubedesc", version, about)]
struct Cli {
    /// YouTube video URL to pre-fill (can also be typed in the TUI).
    #[arg(short, long)]
    url: Option<String>,

    /// Base URL of the generation service (overrides the config file).
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // The TUI owns the terminal, so logs go to a file or nowhere.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("tubedesc");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("tubedesc.log"));

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    let mut config = tubedesc_core::TubedescConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        tubedesc_core::TubedescConfig::default()
    });
    if let Some(endpoint) = cli.endpoint {
        config.service.base_url = endpoint;
    }

    tracing::info!("Starting tubedesc v{}", env!("CARGO_PKG_VERSION"));

    let mut app = tubedesc_tui::App::new(config);
    if let Some(ref url) = cli.url {
        app.set_initial_url(url);
    }

    app.run().await?;

    tracing::info!("tubedesc exited cleanly");
    Ok(())
}
