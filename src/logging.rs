use tracing_subscriber::{fmt, EnvFilter};

use crate::types::{ParkError, Result};

/// Installs a global `fmt` subscriber filtered by `level` (an `EnvFilter`
/// directive such as `"info"` or `"parkade=debug"`).
pub fn init_logging(level: &str) -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_new(level)
                .map_err(|_| ParkError::InvalidArgument("invalid log filter directive"))?,
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|_| ParkError::InvalidArgument("logging already initialized"))
}
