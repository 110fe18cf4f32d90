//! Crop Picker
//!
//! Catalog-backed selection: the displayed set is the intersection of a
//! case-insensitive substring search and a category filter over the
//! reference catalog. Picking an entry emits the entry's own category and
//! name, so a choice always references a real catalog row.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::data::{CropCategory, CropRecord, ReferenceData};

/// Category filter over the catalog: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CropCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: CropCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(only) => *only == category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Crops",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    /// Parse a filter token: `"all"` or a category key.
    pub fn parse(token: &str) -> Option<Self> {
        if token.trim().eq_ignore_ascii_case("all") {
            Some(CategoryFilter::All)
        } else {
            CropCategory::parse(token).ok().map(CategoryFilter::Only)
        }
    }
}

/// A picked crop.
///
/// Equality deliberately covers both fields: two categories may in principle
/// carry the same crop name, so a name alone does not identify a choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropChoice {
    pub category: CropCategory,
    pub name: String,
}

/// Search + category filter state over the catalog.
pub struct CropPicker {
    reference: Arc<ReferenceData>,
    search: String,
    category: CategoryFilter,
}

impl CropPicker {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        CropPicker {
            reference,
            search: String::new(),
            category: CategoryFilter::All,
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn set_category(&mut self, filter: CategoryFilter) {
        self.category = filter;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> CategoryFilter {
        self.category
    }

    /// Catalog entries passing both filters, in catalog order.
    pub fn visible_crops(&self) -> Vec<&CropRecord> {
        let needle = self.search.to_lowercase();
        self.reference
            .crops()
            .iter()
            .filter(|crop| {
                crop.name.to_lowercase().contains(&needle) && self.category.matches(crop.category)
            })
            .collect()
    }

    /// Emit a choice from a catalog entry's own fields.
    pub fn choice_for(record: &CropRecord) -> CropChoice {
        CropChoice {
            category: record.category,
            name: record.name.clone(),
        }
    }

    /// Whether a catalog entry is the current selection. Compares category
    /// and name jointly, never name alone.
    pub fn is_selected(selected: Option<&CropChoice>, record: &CropRecord) -> bool {
        selected.is_some_and(|choice| {
            choice.category == record.category && choice.name == record.name
        })
    }
}
