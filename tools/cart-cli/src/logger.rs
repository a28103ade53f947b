//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr logger.
///
/// `RUST_LOG` wins when set; otherwise cart crates log at info, or debug
/// with `--verbose`.
pub fn init_cli_logger(verbose: bool) {
    let default = if verbose {
        "turbo_cart=debug,turbo_cache=debug,cart=debug,warn"
    } else {
        "turbo_cart=info,turbo_cache=warn,cart=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
