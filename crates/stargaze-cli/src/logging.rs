// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the Stargaze CLI.
//!
//! Uses `tracing` with `tracing-subscriber` for structured logging.
//! Log level can be controlled via the `RUST_LOG` environment variable.
//!
//! # Examples
//!
//! ```bash
//! # Default: warnings only
//! stargaze -f table
//!
//! # Per-request debug output, including every failed fetch
//! RUST_LOG=stargaze=debug stargaze -f table
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default directives when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "stargaze=warn,stargaze_core=warn,reqwest=error";

/// Directives used with `-v`.
const VERBOSE_FILTER: &str = "stargaze=debug,stargaze_core=debug,reqwest=warn";

/// Initialize the logging subsystem.
///
/// `RUST_LOG` always wins. Otherwise `-v` raises Stargaze's own targets to
/// debug. Logs go to stderr so stdout stays parseable.
pub fn init_logging(verbose: bool) {
    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .expect("valid default filter directives");

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
