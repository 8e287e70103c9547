//! Shared helpers for the survey CLI tools.

pub mod grid;

pub use grid::serpentine_grid;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for CLI binaries.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("survey_core=info".parse()?),
        )
        .init();
    Ok(())
}
