//! # Feature Contracts
//!
//! The contracts between the host shell and independently built feature
//! modules.
//!
//! - [`Feature`] is the only thing the shell ever sees of a module: its
//!   [`FeatureDescriptor`] and a render entrypoint.
//! - [`RootView`] is the opaque render entrypoint. The shell invokes it without
//!   knowing the concrete view type or its data sources.
//! - [`FeatureFactory`] turns a fully resolved dependency bundle into a
//!   `Feature`. Factories only wire references; they never perform I/O.
//! - [`FeatureApi`] is the base of every capability contract a module depends on.

use crate::client::ResourceClient;
use crate::error::ClientError;
use async_trait::async_trait;
use std::fmt;

/// Errors raised at the feature layer.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Loading or mutating data through a capability failed.
    #[error("failed to load feature data: {0}")]
    Load(#[from] ClientError),

    /// Two registered modules declared the same id.
    #[error("duplicate feature id: {0}")]
    DuplicateFeature(String),

    /// No module with this id was registered.
    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

/// Reference to an icon asset, resolved by whatever renders the shell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconRef(pub String);

impl IconRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identity and display metadata of a feature module.
///
/// `id` is stable for the module's lifetime and is the shell's lookup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub id: String,
    pub title: String,
    pub tab_icon: IconRef,
    pub selected_tab_icon: IconRef,
}

impl FeatureDescriptor {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        tab_icon: impl Into<String>,
        selected_tab_icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tab_icon: IconRef::new(tab_icon),
            selected_tab_icon: IconRef::new(selected_tab_icon),
        }
    }
}

/// One line of a rendered screen. `id` is set for selectable rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRow {
    pub id: Option<i64>,
    pub text: String,
}

impl ScreenRow {
    pub fn item(id: i64, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }
}

/// Technology-neutral output of a [`RootView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub title: String,
    pub rows: Vec<ScreenRow>,
}

impl Screen {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: ScreenRow) {
        self.rows.push(row);
    }

    /// Ids of the selectable rows, in display order.
    pub fn item_ids(&self) -> Vec<i64> {
        self.rows.iter().filter_map(|r| r.id).collect()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        for row in &self.rows {
            match row.id {
                Some(id) => writeln!(f, "[{id}] {}", row.text)?,
                None => writeln!(f, "{}", row.text)?,
            }
        }
        Ok(())
    }
}

/// The render entrypoint of a feature module.
#[async_trait]
pub trait RootView: Send + Sync {
    /// Loads the module's data and renders it.
    async fn render(&self) -> Result<Screen, FeatureError>;

    /// Handles selection of the row with `id`.
    async fn select_item(&self, _id: i64) -> Result<(), FeatureError> {
        Ok(())
    }
}

/// The public face of a feature module.
pub trait Feature: Send + Sync {
    fn descriptor(&self) -> &FeatureDescriptor;

    /// Builds a fresh root view for this module.
    fn make_root_view(&self) -> Box<dyn RootView>;

    fn id(&self) -> &str {
        &self.descriptor().id
    }

    fn title(&self) -> &str {
        &self.descriptor().title
    }
}

/// Builds a feature module from its dependency bundle.
///
/// Construction is deterministic and does not perform network calls.
pub trait FeatureFactory: Send + Sync {
    /// The resolved collaborators this module needs.
    type Dependencies: Send + 'static;

    fn make_feature(&self, dependencies: Self::Dependencies) -> Box<dyn Feature>;
}

/// Base of every feature capability contract.
///
/// Capabilities wrap the shared [`ResourceClient`] with domain-specific calls.
/// Callers depend on the capability trait, never on its implementation.
pub trait FeatureApi: Send + Sync {
    /// Access the underlying resource client.
    fn resources(&self) -> &ResourceClient;
}
