//! Logging setup for the driver binary.

use tracing::Level;

/// Install a fmt subscriber that writes to stderr, keeping stdout for the
/// job's own output. Returns `false` if a global subscriber was already set.
pub fn init_logging(max_level: Level) -> bool {
    tracing_subscriber::fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
