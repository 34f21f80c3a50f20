//! # ScanLane Register
//!
//! The register application: configuration, a scan-to-checkout session and
//! the logging setup shared by the `scanlane` binary.
//!
//! ## Module Structure
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       apps/register/src                                 │
//! │                                                                         │
//! │  main.rs ────── clap Cli, subcommands, anyhow at the top                │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  lib.rs ─────── init_tracing(verbosity)                                 │
//! │  config.rs ──── RegisterConfig (defaults → TOML → SCANLANE_* env)       │
//! │  session.rs ─── PosSession: open, process_scan_file, checkout           │
//! │  error.rs ───── AppError                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{ConfigError, RegisterConfig};
pub use error::{AppError, AppResult};
pub use session::{classify_file, encode_codes, ClassifiedLine, PosSession, Receipt};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Maps `-v` occurrences to a default level.
pub fn verbosity_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the level comes from `-v`.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(verbosity).as_str().to_lowercase()));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
