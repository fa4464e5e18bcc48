//! Tracing setup.
//!
//! Log output goes to stderr so stdout stays machine-readable. The filter is
//! read from `REFLECT_REGISTRAR_LOG` using `RUST_LOG` syntax and defaults to
//! `warn`, which keeps class resolution failures visible.

use tracing_subscriber::{EnvFilter, filter::LevelFilter, prelude::*};

pub const LOG_ENV: &str = "REFLECT_REGISTRAR_LOG";

pub fn init() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
