//! # Generic Resource Client
//!
//! This module defines the generic client that performs fetch/update/delete
//! against the BFF for any type implementing [`ResourceSchema`].
//!
//! ## ResourceClient
//!
//! `ResourceClient` holds nothing but its base address, a shared
//! [`Transport`] and an optional cancellation token. It is cheap to clone and
//! can be shared across tasks; every operation is independent of every other.
//!
//! | Operation | Method | Success status |
//! |-----------|--------|----------------|
//! | [`fetch_single`](ResourceClient::fetch_single) | `GET` | 200–299 |
//! | [`fetch_list`](ResourceClient::fetch_list) | `GET` | 200–299 |
//! | [`update`](ResourceClient::update) | `PUT` | 200 |
//! | [`delete`](ResourceClient::delete) | `DELETE` | 200 or 204 |
//!
//! ## Cancellation
//!
//! Bind a [`CancellationToken`] with [`ResourceClient::with_cancellation`].
//! When the token fires the in-flight transport future is dropped (aborting
//! the request) and the operation returns [`ClientError::Cancelled`].

use crate::error::ClientError;
use crate::location::{self, ResourceLocation};
use crate::schema::ResourceSchema;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};
use url::Url;

const JSON: &str = "application/json";

/// A type-safe client for CRUD operations against the BFF.
#[derive(Clone)]
pub struct ResourceClient {
    base: Url,
    transport: Arc<dyn Transport>,
    cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("base", &self.base.as_str())
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl ResourceClient {
    /// Creates a client for `base` backed by a fresh [`ReqwestTransport`].
    pub fn new(base: &str) -> Result<Self, ClientError> {
        Self::with_transport(base, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a client for `base` that dispatches through `transport`.
    pub fn with_transport(base: &str, transport: Arc<dyn Transport>) -> Result<Self, ClientError> {
        Ok(Self {
            base: location::parse_base(base)?,
            transport,
            cancel: None,
        })
    }

    /// Returns a clone whose operations abort when `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            base: self.base.clone(),
            transport: Arc::clone(&self.transport),
            cancel: Some(token),
        }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves `location` against the configured base without dispatching anything.
    pub fn resolve(&self, location: &str) -> Result<Url, ClientError> {
        ResourceLocation::parse(location)?.resolve(&self.base)
    }

    /// Fetches a single record and decodes it as `T`.
    #[instrument(skip(self), fields(schema = schema_name::<T>()))]
    pub async fn fetch_single<T: ResourceSchema>(&self, location: &str) -> Result<T, ClientError> {
        let url = self.resolve(location)?;
        let response = self.send(read_request(url)).await?;
        expect_status(&response, is_read_success)?;
        T::decode(&response.body).inspect_err(|e| warn!(error = %e, "Decode failed"))
    }

    /// Fetches a sequence of records, preserving wire order.
    ///
    /// An empty sequence is a valid result.
    #[instrument(skip(self), fields(schema = schema_name::<T>()))]
    pub async fn fetch_list<T: ResourceSchema>(&self, location: &str) -> Result<Vec<T>, ClientError> {
        let url = self.resolve(location)?;
        let response = self.send(read_request(url)).await?;
        expect_status(&response, is_read_success)?;
        let records = T::decode_list(&response.body).inspect_err(|e| warn!(error = %e, "Decode failed"))?;
        debug!(count = records.len(), "Fetched list");
        Ok(records)
    }

    /// Replaces the record at `location` with `record`.
    ///
    /// Returns the server's resulting record, which is authoritative and may
    /// differ from what was submitted.
    #[instrument(skip(self, record), fields(schema = schema_name::<T>(), id = ?record.id()))]
    pub async fn update<T: ResourceSchema>(&self, location: &str, record: &T) -> Result<T, ClientError> {
        let body = record.encode()?;
        let url = self.resolve(location)?;

        let mut request = HttpRequest::new(Method::PUT, url);
        request
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        request.headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        request.body = Some(body);

        let response = self.send(request).await?;
        expect_status(&response, |status| status == 200)?;
        let updated = T::decode(&response.body).inspect_err(|e| warn!(error = %e, "Decode failed"))?;
        info!("Updated");
        Ok(updated)
    }

    /// Removes the record identified by `id`.
    ///
    /// `id` is appended to `location` unless the location already addresses it.
    #[instrument(skip(self), fields(schema = schema_name::<T>()))]
    pub async fn delete<T: ResourceSchema>(&self, location: &str, id: &T::Id) -> Result<(), ClientError> {
        let id_segment = id.to_string();
        let url = location::address_member(self.resolve(location)?, &id_segment);

        let response = self.send(HttpRequest::new(Method::DELETE, url)).await?;
        match response.status {
            200 | 204 => {
                info!(%id, status = response.status, "Record deleted");
                Ok(())
            }
            status => {
                let body = response.body_text();
                warn!(%id, status, body = body.as_deref().unwrap_or(""), "Delete failed");
                Err(ClientError::UnexpectedStatus { status, body })
            }
        }
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let Some(token) = &self.cancel else {
            return Ok(self.transport.execute(request).await?);
        };
        if token.is_cancelled() {
            debug!("Cancelled before dispatch");
            return Err(ClientError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("Cancelled in flight");
                Err(ClientError::Cancelled)
            }
            result = self.transport.execute(request) => Ok(result?),
        }
    }
}

fn read_request(url: Url) -> HttpRequest {
    let mut request = HttpRequest::new(Method::GET, url);
    request.headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    request
}

fn is_read_success(status: u16) -> bool {
    (200..=299).contains(&status)
}

fn expect_status(response: &HttpResponse, accept: impl Fn(u16) -> bool) -> Result<(), ClientError> {
    if accept(response.status) {
        return Ok(());
    }
    warn!(status = response.status, "Unexpected status");
    Err(ClientError::UnexpectedStatus {
        status: response.status,
        body: response.body_text(),
    })
}

// Extract just the type name (e.g. "Post" instead of "feature_shell::model::post::Post")
fn schema_name<T>() -> &'static str {
    std::any::type_name::<T>()
        .rsplit("::")
        .next()
        .unwrap_or("Unknown")
}
