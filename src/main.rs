/// Main entry point for the SoftDay companion
///
/// This file sets up logging, parses command line arguments, and starts a
/// companion session. The session listens for JSON-RPC requests over
/// stdin/stdout, one message per line.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use softday_companion::config::{DATABASE_FILE_NAME, DEFAULT_ADVICE_MODEL};
use softday_companion::session::SessionServer;
use softday_companion::{AdviceConfig, Companion, CompanionConfig, StorageTarget};

/// Get the default database path with robust fallback strategy
fn get_default_database_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|mut p| {
            p.push(".softday");
            p
        }),
        dirs::data_dir().map(|mut p| {
            p.push("softday");
            p
        }),
        dirs::config_dir().map(|mut p| {
            p.push("softday");
            p
        }),
        std::env::current_dir().ok().map(|mut p| {
            p.push(".softday");
            p
        }),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if std::fs::create_dir_all(potential_path).is_ok() {
            // Only use directories we can actually write to
            let marker = potential_path.join(".write_check");
            if std::fs::write(&marker, "ok").is_ok() {
                let _ = std::fs::remove_file(&marker);
                return Ok(potential_path.join(DATABASE_FILE_NAME));
            }
        }
    }

    let mut temp_path = std::env::temp_dir();
    temp_path.push("softday");
    std::fs::create_dir_all(&temp_path)?;
    temp_path.push(DATABASE_FILE_NAME);

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path)
}

/// Command line arguments for the SoftDay companion
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the SQLite database file
    /// If not provided, uses a default location in the user's home directory
    #[arg(long, conflicts_with = "memory")]
    database: Option<PathBuf>,

    /// Keep state in memory only; nothing is written to disk
    #[arg(long)]
    memory: bool,

    /// API key for remote advice; offline phrases are used without one
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used for remote advice
    #[arg(long, default_value = DEFAULT_ADVICE_MODEL)]
    model: String,

    /// Seconds to wait for advice before falling back
    #[arg(long, default_value_t = 8)]
    advice_timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = if args.verbose {
        "debug"
    } else if args.debug {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(format!("softday_companion={}", log_level))
        .with_writer(std::io::stderr) // stdout carries the session protocol
        .init();

    info!("Starting SoftDay companion");

    let storage = if args.memory {
        StorageTarget::Memory
    } else {
        let db_path = match args.database {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                path
            }
            None => get_default_database_path()?,
        };
        info!("Using database at: {}", db_path.display());
        StorageTarget::File(db_path)
    };

    let config = CompanionConfig {
        storage,
        advice: AdviceConfig {
            api_key: args.api_key,
            model: args.model,
            timeout: Duration::from_secs(args.advice_timeout_secs),
            ..AdviceConfig::default()
        },
    };

    let companion = Companion::open(&config)?;
    let mut session = SessionServer::new(companion);
    session.run().await?;

    info!("SoftDay companion shutdown complete");
    Ok(())
}
