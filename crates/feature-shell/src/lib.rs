//! # Feature Shell
//!
//! A tabbed client shell composed of three independently built feature modules
//! (feed, friends, profile) on top of [`platform_kit`].
//!
//! - **[model]**: wire records ([`Post`](model::Post), [`User`](model::User),
//!   [`Comment`](model::Comment)) implementing `ResourceSchema`.
//! - **[clients]**: capability contracts and their resource-client-backed implementations.
//! - **[features]**: bundle, factory, feature handle and root view per module.
//! - **[lifecycle]**: configuration and the [`AppShell`](lifecycle::AppShell) composition root.

pub mod clients;
pub mod features;
pub mod lifecycle;
pub mod model;
