use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "BINSTATE_LOG";

/// Log to stderr; stdout carries the outcome document.
///
/// The filter comes from `BINSTATE_LOG`, then `RUST_LOG`, then the level
/// implied by the `-v` count.
pub fn init(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
