use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set, indexed by the number of `-v` flags.
const LEVELS: &[&str] = &["datofiks=warn", "datofiks=info", "datofiks=debug"];

/// Initializes logging to stderr. Stdout is kept for results.
pub fn init_logging(verbose: u8) {
    let fallback = LEVELS[usize::from(verbose).min(LEVELS.len() - 1)];
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
