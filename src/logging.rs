//! Tracing initialization.

use std::io;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `APRIORI_LOG=apriori=debug`.
pub const LOG_ENV: &str = "APRIORI_LOG";

static INIT: Once = Once::new();

/// Installs a stderr fmt subscriber filtered by `APRIORI_LOG`.
///
/// Falls back to `apriori=info` when the variable is unset or invalid. Safe to
/// call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("apriori=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(filter)
            .init();
    });
}
