use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins, then `--verbose`, then the configured directive.
fn build_filter(verbose: bool, directive: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("period_algebra=debug,info")
        } else {
            directive
                .and_then(|directive| EnvFilter::try_new(directive).ok())
                .unwrap_or_else(|| EnvFilter::new("period_algebra=info"))
        }
    })
}

pub fn init_cli_logger(verbose: bool, directive: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directive))
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

/// Same filtering as [`init_cli_logger`], one JSON object per event.
pub fn init_json_logger(verbose: bool, directive: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(verbose, directive))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
