//! Category grouping for the results page.

use std::fmt;

use indexmap::IndexMap;

use super::models::Listing;

/// Display name of the bucket for listings without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Grouping key. The uncategorized bucket is its own variant so a real
/// category that happens to be named "Uncategorized" stays separate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Named(String),
    Uncategorized,
}

impl CategoryKey {
    pub fn of(listing: &Listing) -> Self {
        match listing.category_name() {
            Some(name) => Self::Named(name.to_string()),
            None => Self::Uncategorized,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Uncategorized => UNCATEGORIZED,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Listings sharing one category, in result order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub key: CategoryKey,
    pub listings: Vec<Listing>,
}

impl CategoryGroup {
    pub fn title(&self) -> &str {
        self.key.label()
    }
}

/// Partition `listings` by category.
///
/// Groups appear in the order their category is first seen; listings keep
/// their relative order within a group.
pub fn group_by_category(listings: &[Listing]) -> Vec<CategoryGroup> {
    let mut buckets: IndexMap<CategoryKey, Vec<Listing>> = IndexMap::new();
    for listing in listings {
        buckets
            .entry(CategoryKey::of(listing))
            .or_default()
            .push(listing.clone());
    }

    buckets
        .into_iter()
        .map(|(key, listings)| CategoryGroup { key, listings })
        .collect()
}
