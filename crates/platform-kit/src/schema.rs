//! # ResourceSchema Trait
//!
//! The `ResourceSchema` trait is the shape contract a domain type satisfies to be
//! carried by the generic [`ResourceClient`](crate::ResourceClient). Every domain
//! object (post, user, comment, ...) talks the same transport protocol and only
//! differs in shape, so the CRUD logic is written once against this trait.
//!
//! A schema exposes:
//! - an encode/decode pair for the wire format (JSON, via `serde_json`),
//! - an accessor for its identifier, which may be absent for records that
//!   have not been created yet,
//! - the collection path it lives under on the BFF.
//!
//! The encode/decode methods are provided. A type only needs to derive
//! `Serialize`/`Deserialize` and implement [`ResourceSchema::id`].

use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any resource type must implement to be carried by `ResourceClient`.
///
/// # Example
///
/// ```rust
/// use platform_kit::ResourceSchema;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Album {
///     id: Option<i64>,
///     title: String,
/// }
///
/// impl ResourceSchema for Album {
///     type Id = i64;
///     const COLLECTION: &'static str = "albums";
///
///     fn id(&self) -> Option<i64> {
///         self.id
///     }
/// }
///
/// let album = Album::decode(br#"{"id":3,"title":"quidem"}"#).unwrap();
/// assert_eq!(album.id(), Some(3));
/// ```
pub trait ResourceSchema: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The identifier type (e.g. `i64`, `String`).
    type Id: Display + Debug + Clone + PartialEq + Send + Sync;

    /// Path prefix of this resource's collection on the BFF (e.g. `"posts"`).
    const COLLECTION: &'static str;

    /// The identifier, or `None` for records that were never persisted.
    fn id(&self) -> Option<Self::Id>;

    /// Encode this record to its wire representation.
    fn encode(&self) -> Result<Vec<u8>, ClientError> {
        serde_json::to_vec(self).map_err(ClientError::EncodeFailure)
    }

    /// Decode a single record from its wire representation.
    fn decode(bytes: &[u8]) -> Result<Self, ClientError> {
        serde_json::from_slice(bytes).map_err(ClientError::DecodeFailure)
    }

    /// Decode a sequence of records, preserving wire order.
    fn decode_list(bytes: &[u8]) -> Result<Vec<Self>, ClientError> {
        serde_json::from_slice(bytes).map_err(ClientError::DecodeFailure)
    }

    /// Path of a single record inside the collection, e.g. `posts/1`.
    fn member_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}
