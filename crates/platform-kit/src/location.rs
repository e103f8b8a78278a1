//! Resolution of resource locations against the configured BFF base.
//!
//! A location is either a path relative to the base (`posts/1`) or a fully
//! qualified address (`https://bff.example.com/posts/1`). Both must resolve to
//! an `http`/`https` URL before any request is dispatched.

use crate::error::ClientError;
use url::Url;

const FORBIDDEN_PATH_CHARS: &[char] = &['"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// A location the client can address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    /// Segment joined to the configured base.
    Relative(String),
    /// Fully qualified address, used as-is.
    Absolute(Url),
}

impl ResourceLocation {
    /// Classify and validate a raw location string.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        match Url::parse(raw) {
            Ok(url) => {
                check_network_url(&url).map_err(|reason| ClientError::invalid_location(raw, reason))?;
                Ok(Self::Absolute(url))
            }
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                check_relative_path(raw).map_err(|reason| ClientError::invalid_location(raw, reason))?;
                Ok(Self::Relative(raw.trim_matches('/').to_string()))
            }
            Err(e) => Err(ClientError::invalid_location(raw, e.to_string())),
        }
    }

    /// Resolve against `base`, producing the address a request will be sent to.
    pub fn resolve(&self, base: &Url) -> Result<Url, ClientError> {
        match self {
            Self::Absolute(url) => Ok(url.clone()),
            Self::Relative(path) => {
                let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path);
                let url = Url::parse(&joined)
                    .map_err(|e| ClientError::invalid_location(path.as_str(), e.to_string()))?;
                check_network_url(&url).map_err(|reason| ClientError::invalid_location(path.as_str(), reason))?;
                Ok(url)
            }
        }
    }
}

/// Validate a configured base address.
pub fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::invalid_location(raw, e.to_string()))?;
    check_network_url(&url).map_err(|reason| ClientError::invalid_location(raw, reason))?;
    Ok(url)
}

/// Append `id` as a trailing segment unless the URL already ends with it.
///
/// Segments are compared in their percent-encoded form, so an id such as
/// `a b` matches a location ending in `a%20b`.
pub fn address_member(mut url: Url, id: &str) -> Url {
    let encoded_id = encode_segment(id);
    let already_addressed = url
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .is_some_and(|last| last == id || Some(last) == encoded_id.as_deref());
    if !already_addressed {
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
    }
    url
}

// `id` as `Url::path_segments_mut().push` writes it.
fn encode_segment(id: &str) -> Option<String> {
    let mut scratch = Url::parse("http://segment.invalid/").ok()?;
    scratch.path_segments_mut().ok()?.pop_if_empty().push(id);
    scratch.path_segments()?.next_back().map(str::to_string)
}

fn check_network_url(url: &Url) -> Result<(), String> {
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme {other:?}")),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".into());
    }
    Ok(())
}

fn check_relative_path(path: &str) -> Result<(), String> {
    if path.trim_matches('/').is_empty() {
        return Err("empty path".into());
    }
    if let Some(c) = path
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_PATH_CHARS.contains(c))
    {
        return Err(format!("illegal character {c:?} in path"));
    }
    Ok(())
}
