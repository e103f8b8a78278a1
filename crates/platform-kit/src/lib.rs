//! # Platform Kit
//!
//! This crate provides the shared building blocks for composing a client
//! application out of independently built **feature modules** that all talk to
//! one backend-for-frontend (BFF).
//!
//! ## Architecture Overview
//!
//! The kit separates concerns into three layers:
//!
//! 1. **Schema Layer** ([`ResourceSchema`]) - the shape contract a domain type satisfies
//! 2. **Transport Layer** ([`ResourceClient`], [`Transport`]) - generic fetch/update/delete against the BFF
//! 3. **Composition Layer** ([`Feature`], [`FeatureFactory`], [`FeatureRegistry`]) - how a host shell assembles modules
//!
//! Cross-module signals go through the [`BroadcastChannel`]; user interactions
//! are reported through the [`Analytics`] trait.
//!
//! ## Core Abstractions
//!
//! ### [`ResourceSchema`] - The Shape Contract
//!
//! ```rust
//! use platform_kit::{ResourceClient, ResourceSchema};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Post {
//!     id: i64,
//!     user_id: i64,
//!     title: String,
//!     body: String,
//! }
//!
//! impl ResourceSchema for Post {
//!     type Id = i64;
//!     const COLLECTION: &'static str = "posts";
//!     fn id(&self) -> Option<i64> { Some(self.id) }
//! }
//!
//! async fn first_title(client: &ResourceClient) -> Result<String, platform_kit::ClientError> {
//!     let posts: Vec<Post> = client.fetch_list(Post::COLLECTION).await?;
//!     Ok(posts.first().map(|p| p.title.clone()).unwrap_or_default())
//! }
//! ```
//!
//! ### [`FeatureFactory`] - Dependency Injection
//!
//! A module declares what it needs as an associated `Dependencies` bundle. The
//! shell resolves every bundle, hands it to the factory and gets back a boxed
//! [`Feature`]. The shell never sees the concrete module type and the module
//! never constructs its own collaborators.
//!
//! ## Concurrency Model
//!
//! - Resource client operations are async, independent and individually
//!   cancellable (see [`ResourceClient::with_cancellation`]).
//! - The broadcast subscriber set is the only shared mutable state. It sits
//!   behind a read/write lock that is never held while handlers run.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`MockTransport`](mock::MockTransport)
//! and a [`RecordingAnalytics`](mock::RecordingAnalytics) sink.

pub mod analytics;
pub mod broadcast;
pub mod client;
pub mod config;
pub mod error;
pub mod feature;
pub mod location;
pub mod mock;
pub mod registry;
pub mod schema;
pub mod tracing;
pub mod transport;

// Re-export core types for convenience
pub use analytics::{Analytics, AnalyticsEvent, ItemType, PageName, TracingAnalytics};
pub use broadcast::{channels, BroadcastChannel, BroadcastMessage, ChannelName, Subscription};
pub use client::ResourceClient;
pub use config::BffConfig;
pub use error::ClientError;
pub use feature::{
    Feature, FeatureApi, FeatureDescriptor, FeatureError, FeatureFactory, IconRef, RootView, Screen,
    ScreenRow,
};
pub use location::ResourceLocation;
pub use registry::{FeatureRegistry, FeatureSet};
pub use schema::ResourceSchema;
pub use tokio_util::sync::CancellationToken;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
