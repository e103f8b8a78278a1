//! # Shell Lifecycle & Composition
//!
//! The shell is the composition root. It is the only place that constructs
//! collaborators; feature modules receive theirs.
//!
//! ## Composition order
//!
//! [`AppShell::with_transport`] wires everything once, without network I/O:
//!
//! 1. **Resource client** - one client for the configured BFF, bound to the
//!    shell's shutdown token
//! 2. **Capabilities** - `FeedClient`, `FriendsClient` and `ProfileClient`
//!    share that client
//! 3. **Broadcast channel** - one channel, handed to the feed and profile factories
//! 4. **Registry** - one (factory, bundle) pair per module, built in tab order
//!    feed, friends, profile
//!
//! ## Shutdown
//!
//! [`AppShell::shutdown`] cancels the token every request is bound to.
//! In-flight requests end with `Cancelled` and later ones fail before dispatch.
//!
//! ## Configuration
//!
//! [`ShellConfig`] is read from TOML and overlaid from the environment:
//!
//! ```bash
//! BFF_BASE_URL=http://localhost:3000 SHELL_SELF_USER_ID=2 RUST_LOG=info cargo run
//! ```

pub mod app_shell;
pub mod config;

pub use app_shell::AppShell;
pub use config::ShellConfig;

use platform_kit::{ClientError, FeatureError};
use std::path::PathBuf;

/// Errors raised while configuring or composing the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("failed to read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid value for {name}: {value:?}")]
    InvalidOverride { name: &'static str, value: String },

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}
