//! # Observability & Tracing
//!
//! Initializes structured logging using the `tracing` crate with:
//! - **Environment-based filtering**: Controlled via the `RUST_LOG` environment variable
//! - **Span tracking**: every resource client operation runs inside a span
//!   carrying the schema name and the requested location
//!
//! ## Environment Variables
//!
//! - `RUST_LOG=info` - Lifecycle events, updates, deletes and analytics
//! - `RUST_LOG=debug` - Every request and publish
//! - `RUST_LOG=platform_kit=trace` - Subscription bookkeeping as well
//!
//! ## Example
//!
//! ```ignore
//! setup_tracing();
//! tracing::info!("Application started");
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Panics if one is already installed.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Installs the global fmt subscriber unless one is already installed.
///
/// Returns `false` when another subscriber was already in place.
pub fn try_setup_tracing() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        try_setup_tracing();
        assert!(!try_setup_tracing());
    }
}
