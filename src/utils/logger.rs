use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset. Dependencies (reqwest, html5ever)
/// stay at warn so per-page progress is readable.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,volby_etl=debug"
    } else {
        "warn,volby_etl=info"
    }
}

/// Progress and diagnostics go to stderr; stdout only carries the
/// start/finish lines printed by the binary.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
