use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{IngestError, Result};

/// Installs the global tracing subscriber. `RUST_LOG` takes precedence over
/// the default filter; `verbose` raises the crate's default level to debug.
pub fn init_tracing(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|error| IngestError::Logging(error.to_string()))
}

/// Filter used when `RUST_LOG` is unset. Only the crate's own level changes.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "timetable_ingest=debug"
    } else {
        "timetable_ingest=info"
    }
}
