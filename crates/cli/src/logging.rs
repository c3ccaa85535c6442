//! Diagnostic logging setup
//!
//! Library crates emit `tracing` events; this installs the subscriber that
//! prints them to stderr so stdout stays reserved for command output.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Build the filter, preferring `RUST_LOG` when it parses
fn build_filter(verbose: bool) -> EnvFilter {
    match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .unwrap_or_else(|_| {
                eprintln!(
                    "Warning: Invalid RUST_LOG filter '{}', using default",
                    directives
                );
                EnvFilter::new(default_directive(verbose))
            }),
        _ => EnvFilter::new(default_directive(verbose)),
    }
}

/// Initialize the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_target(verbose)
        .compact()
        .with_writer(std::io::stderr)
        .try_init();
}
