use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives when `RUST_LOG` is unset. sqlx logs every statement
/// at info, which drowns out the application's own output.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

/// Initialize structured logging for the CLI.
///
/// `verbose` raises this crate to `debug` on top of whatever filter is
/// active. Must be called once, before any other work in `main`.
pub fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if verbose {
        if let Ok(directive) = "car_maintenance=debug".parse() {
            filter = filter.add_directive(directive);
        }
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    debug!("Logging initialized");
}
