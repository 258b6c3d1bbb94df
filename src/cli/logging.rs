//! Diagnostic logging setup
//!
//! Library events go through `tracing`. `RUST_LOG` wins when set;
//! otherwise `--verbose` raises the crate's level from `warn` to `debug`.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default = if verbose { "scatt=debug" } else { "scatt=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed (e.g. when embedded)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
