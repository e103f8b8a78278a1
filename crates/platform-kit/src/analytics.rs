//! # Analytics
//!
//! Feature modules report user interactions through the [`Analytics`] trait.
//! The platform only depends on `track`; where events land (console, network,
//! file) is decided by the injected sink.
//!
//! Event names and parameters are fully determined by the [`AnalyticsEvent`]
//! variant, so there are no ad hoc event shapes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Kind of item a user selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Post,
    Friend,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Post => "post",
            ItemType::Friend => "friend",
        }
    }
}

/// Page on which an interaction happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageName {
    Feed,
    Friends,
    Profile,
}

impl PageName {
    pub fn as_str(self) -> &'static str {
        match self {
            PageName::Feed => "feed",
            PageName::Friends => "friends",
            PageName::Profile => "profile",
        }
    }
}

/// Every event the application can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    AppLaunched,
    TabSelected {
        title: String,
    },
    ItemSelected {
        id: i64,
        item_type: ItemType,
        page_name: PageName,
    },
}

impl AnalyticsEvent {
    /// Canonical event name.
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::AppLaunched => "app_launched",
            AnalyticsEvent::TabSelected { .. } => "tab_selected",
            AnalyticsEvent::ItemSelected { .. } => "item_selected",
        }
    }

    /// Event parameters, or `None` for events that carry none.
    pub fn parameters(&self) -> Option<BTreeMap<String, String>> {
        match self {
            AnalyticsEvent::AppLaunched => None,
            AnalyticsEvent::TabSelected { title } => {
                Some(BTreeMap::from([("title".to_string(), title.clone())]))
            }
            AnalyticsEvent::ItemSelected {
                id,
                item_type,
                page_name,
            } => Some(BTreeMap::from([
                ("id".to_string(), id.to_string()),
                ("type".to_string(), item_type.as_str().to_string()),
                ("page_name".to_string(), page_name.as_str().to_string()),
            ])),
        }
    }
}

/// Receives analytics events. Must tolerate concurrent `track` calls.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}

/// Demo sink that writes each event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        match event.parameters() {
            Some(parameters) if !parameters.is_empty() => {
                info!(target: "analytics", event = event.name(), ?parameters, "Tracked")
            }
            _ => info!(target: "analytics", event = event.name(), "Tracked"),
        }
    }
}

/// An event destination that needs exclusive access to write.
pub trait EventWriter: Send {
    fn write(&mut self, event: &AnalyticsEvent);
}

/// Adapts an [`EventWriter`] into a thread-safe [`Analytics`] sink by
/// serializing every `track` call behind a mutex.
#[derive(Debug, Default)]
pub struct SerializedAnalytics<W> {
    writer: Mutex<W>,
}

impl<W: EventWriter> SerializedAnalytics<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: EventWriter> Analytics for SerializedAnalytics<W> {
    fn track(&self, event: &AnalyticsEvent) {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write(event);
    }
}
