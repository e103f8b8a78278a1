//! # Feature Registry
//!
//! The registry aggregates one factory per supported module kind, each paired
//! with the dependency bundle the shell resolved for it. Factories have
//! different bundle types, so each pair is type-erased behind a boxed builder.
//! [`FeatureRegistry::build`] then produces the whole feature set in the order
//! the modules were declared.

use crate::feature::{Feature, FeatureError, FeatureFactory};
use std::collections::HashSet;
use tracing::{debug, info};

type Builder = Box<dyn FnOnce() -> Box<dyn Feature> + Send>;

/// Declared (factory, bundle) pairs awaiting construction.
#[derive(Default)]
pub struct FeatureRegistry {
    builders: Vec<Builder>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a module. Nothing is constructed until [`build`](Self::build).
    pub fn register<F>(&mut self, factory: F, dependencies: F::Dependencies) -> &mut Self
    where
        F: FeatureFactory + 'static,
    {
        self.builders
            .push(Box::new(move || factory.make_feature(dependencies)));
        self
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Constructs every declared module, in declaration order.
    pub fn build(self) -> Result<FeatureSet, FeatureError> {
        let mut seen = HashSet::new();
        let mut features = Vec::with_capacity(self.builders.len());
        for build in self.builders {
            let feature = build();
            let id = feature.id().to_string();
            if !seen.insert(id.clone()) {
                return Err(FeatureError::DuplicateFeature(id));
            }
            debug!(feature = %id, "Feature built");
            features.push(feature);
        }
        info!(count = features.len(), "Feature set ready");
        Ok(FeatureSet { features })
    }
}

/// The constructed modules, in declaration order.
pub struct FeatureSet {
    features: Vec<Box<dyn Feature>>,
}

impl FeatureSet {
    pub fn iter(&self) -> impl Iterator<Item = &dyn Feature> {
        self.features.iter().map(|f| f.as_ref())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|f| f.id()).collect()
    }

    pub fn get(&self, id: &str) -> Result<&dyn Feature, FeatureError> {
        self.iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| FeatureError::UnknownFeature(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
