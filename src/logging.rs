use tracing::Level;

/// Sends log output to stderr with timestamps, so it never mixes with lines
/// echoed to stdout.
pub fn init() {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
