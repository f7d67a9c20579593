use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Installs the stderr logger used by the command line tools.
///
/// `verbose`: 0 warnings only, 1 progress, 2 details (default), 3+ everything.
/// `RUST_LOG` takes precedence when set.
pub fn init(verbose: i32) {
    let level = match verbose {
        i32::MIN..=0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new("%x - %I:%M.%S%p".to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
