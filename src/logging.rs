//! Process-wide tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "ratingforge=debug,ratingforge_common=debug"
    } else {
        "ratingforge=info,ratingforge_common=info"
    }
}

/// Install the global `fmt` subscriber, writing to stderr.
///
/// Respects `RUST_LOG` if set, otherwise uses [`default_filter`]. Stdout is
/// left to command output.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
