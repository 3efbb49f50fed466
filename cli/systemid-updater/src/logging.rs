//! Log output on stderr.

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Pick the log filter.
///
/// `-v` and `-vv` win over everything. Otherwise a configured level is used
/// and `RUST_LOG` is ignored. With neither, `RUST_LOG` applies, falling back
/// to warnings only.
pub fn filter(verbose: u8, configured: Option<&str>) -> Result<EnvFilter> {
    Ok(match (verbose, configured) {
        (0, Some(level)) => EnvFilter::builder()
            .parse(level)
            .with_context(|| format!("invalid log level '{level}'"))?,
        (0, None) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
        (1, _) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    })
}

/// Install the global subscriber.
pub fn setup_logging(verbose: u8, configured: Option<&str>) -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter(verbose, configured)?)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}
