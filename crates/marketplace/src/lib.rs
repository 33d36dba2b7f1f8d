//! # marketplace
//!
//! Presentation layer of the `Marketplace` classifieds client.
//!
//! Each screen is a state holder publishing its state through a
//! `tokio::sync::watch` channel; a rendering layer subscribes and redraws.
//! [`App`] wires the repositories from `marketplace-core` into the screens.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod app;
pub mod screen;
mod settings;
mod state;

pub use app::App;
pub use settings::{
    AppSettings, load_settings, load_settings_from, save_settings, save_settings_to,
    settings_path,
};
pub use state::UiState;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling this more than once
/// keeps the first subscriber.
pub fn init_logging() {
    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marketplace=debug,marketplace_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if installed.is_ok() {
        tracing::info!("Logging initialised");
    }
}
