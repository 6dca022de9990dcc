//! Search filters as named predicates over a knowledge entry.

use std::collections::HashMap;

use medkb_core::entities::KnowledgeEntry;

/// Optional restrictions applied to both search passes.
///
/// `None` means "no restriction". A filter value that matches nothing yields
/// an empty result, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    /// Case-insensitive substring of the category name.
    pub category: Option<String>,
    /// Exact content type, e.g. `"FAQ"`.
    pub content_type: Option<String>,
    /// Exact difficulty tier, e.g. `"BASIC"`.
    pub difficulty_level: Option<String>,
}

impl SearchFilters {
    /// Build filters from a loose key/value map. Unrecognized keys are ignored.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            category: map.get("category").cloned(),
            content_type: map.get("content_type").cloned(),
            difficulty_level: map.get("difficulty_level").cloned(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.content_type.is_none() && self.difficulty_level.is_none()
    }

    /// Whether an active entry passes every filter.
    #[must_use]
    pub fn accepts(&self, entry: &KnowledgeEntry) -> bool {
        is_searchable(entry)
            && matches_category(entry, self.category.as_deref())
            && matches_content_type(entry, self.content_type.as_deref())
            && matches_difficulty(entry, self.difficulty_level.as_deref())
    }
}

/// Only active entries are searchable.
#[must_use]
pub const fn is_searchable(entry: &KnowledgeEntry) -> bool {
    entry.is_active
}

#[must_use]
pub fn matches_category(entry: &KnowledgeEntry, category: Option<&str>) -> bool {
    let Some(wanted) = category else {
        return true;
    };
    entry
        .category_name()
        .is_some_and(|name| name.to_lowercase().contains(&wanted.to_lowercase()))
}

#[must_use]
pub fn matches_content_type(entry: &KnowledgeEntry, content_type: Option<&str>) -> bool {
    content_type.is_none_or(|wanted| entry.content_type.as_str() == wanted)
}

#[must_use]
pub fn matches_difficulty(entry: &KnowledgeEntry, difficulty: Option<&str>) -> bool {
    difficulty.is_none_or(|wanted| entry.difficulty_level.as_str() == wanted)
}
