//! Category Index
//!
//! Two interchangeable ways to produce the category list shown in the
//! sidebar and the "popular" subset:
//!
//! - [`CuratedCategories`] reads precomputed lists from the backend.
//! - [`DerivedCategories`] walks the full listing collection and collects
//!   distinct categories, for backends without a curated endpoint.
//!
//! The strategy is picked once at startup from configuration; renderers
//! only ever see a [`CategoryIndex`].

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::backend::SearchBackend;
use super::error::Result;
use super::models::Listing;

/// Ordered category names plus the popular subset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    pub categories: Vec<String>,
    pub popular: Vec<String>,
}

impl CategoryIndex {
    /// Exact string match against the active filter.
    pub fn is_active(name: &str, active: &str) -> bool {
        name == active
    }
}

/// A source of the category index. Loading never fails; unavailable lists are empty.
#[async_trait]
pub trait CategorySource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn load(&self) -> CategoryIndex;
}

/// Configuration switch between the two strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategorySourceKind {
    #[default]
    Curated,
    Derived,
}

/// Build the configured category source.
pub fn category_source(
    kind: CategorySourceKind,
    backend: Arc<dyn SearchBackend>,
) -> Arc<dyn CategorySource> {
    match kind {
        CategorySourceKind::Curated => Arc::new(CuratedCategories::new(backend)),
        CategorySourceKind::Derived => Arc::new(DerivedCategories::new(backend)),
    }
}

fn or_empty(what: &str, result: Result<Vec<String>>) -> Vec<String> {
    result.unwrap_or_else(|e| {
        log::warn!("Failed to load {what}: {e}");
        Vec::new()
    })
}

// ============================================================================
// Curated
// ============================================================================

pub struct CuratedCategories {
    backend: Arc<dyn SearchBackend>,
}

impl CuratedCategories {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CategorySource for CuratedCategories {
    fn name(&self) -> &'static str {
        "curated"
    }

    async fn load(&self) -> CategoryIndex {
        let (categories, popular) = tokio::join!(
            self.backend.categories(),
            self.backend.popular_categories()
        );
        CategoryIndex {
            categories: or_empty("categories", categories),
            popular: or_empty("popular categories", popular),
        }
    }
}

// ============================================================================
// Derived
// ============================================================================

pub struct DerivedCategories {
    backend: Arc<dyn SearchBackend>,
}

impl DerivedCategories {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl CategorySource for DerivedCategories {
    fn name(&self) -> &'static str {
        "derived"
    }

    async fn load(&self) -> CategoryIndex {
        let (listings, popular) = tokio::join!(
            self.backend.all_listings(),
            self.backend.popular_categories()
        );
        let categories = match listings {
            Ok(listings) => derive_categories(&listings),
            Err(e) => {
                log::warn!("Failed to load listings for category derivation: {e}");
                Vec::new()
            }
        };
        CategoryIndex {
            categories,
            popular: or_empty("popular categories", popular),
        }
    }
}

/// Distinct non-empty categories in first-occurrence order.
pub fn derive_categories(listings: &[Listing]) -> Vec<String> {
    let mut seen = HashSet::new();
    listings
        .iter()
        .filter_map(Listing::category_name)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
