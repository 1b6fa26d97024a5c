/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Behavioral core of the portfolio site: the error-recovery boundary that
//! guards every page, the project registries, asset path resolution and the
//! "back to projects" navigation flag.

pub mod prefs;
pub mod registries;
pub mod render;
pub mod services;
pub mod shell;

pub const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Install the process-wide log subscriber.
///
/// `filter` takes the usual `RUST_LOG` directive syntax. When it is absent the
/// `RUST_LOG` environment variable is consulted, then `info`.
#[cfg(feature = "tracing")]
pub fn init_tracing(filter: Option<&str>) {
    use tracing_subscriber::EnvFilter;

    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    // `try_init` also installs the `log` bridge, so `log::` macros in the
    // library reach the subscriber.
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("log subscriber already installed: {error}");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn init_tracing(_filter: Option<&str>) {}
