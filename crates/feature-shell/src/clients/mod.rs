//! # Capability Clients
//!
//! One capability contract per feature module, each with a default
//! implementation built on the shared [`ResourceClient`](platform_kit::ResourceClient).
//!
//! The contracts extend [`FeatureApi`](platform_kit::FeatureApi) and provide
//! their operations as default methods, so a concrete client only supplies
//! the resource client it wraps. Test doubles override the operations instead.

pub mod feed_client;
pub mod friends_client;
pub mod profile_client;

pub use feed_client::{FeedApi, FeedClient};
pub use friends_client::{FriendsApi, FriendsClient};
pub use profile_client::{ProfileApi, ProfileClient};
