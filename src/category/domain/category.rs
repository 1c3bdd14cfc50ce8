//! Category aggregate and the default category set.

use super::{CategoryDomainError, CategoryId, CategoryName, Color};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Default categories as `(id, name, color)` triples.
const DEFAULT_CATEGORIES: [(&str, &str, &str); 3] = [
    ("work", "Work", "#FF6B6B"),
    ("life", "Life", "#4ECDC4"),
    ("projects", "Projects", "#45B7D1"),
];

/// A coloured label applied to tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: CategoryName,
    color: Color,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCategoryData {
    /// Persisted category identifier.
    pub id: CategoryId,
    /// Persisted display name.
    pub name: CategoryName,
    /// Persisted display color.
    pub color: Color,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Creates a new category with the given identifier.
    #[must_use]
    pub fn new(id: CategoryId, name: CategoryName, color: Color, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            name,
            color,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCategoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> &CategoryId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CategoryName {
        &self.name
    }

    /// Returns the display color.
    #[must_use]
    pub const fn color(&self) -> &Color {
        &self.color
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the category.
    pub fn rename(&mut self, name: CategoryName, clock: &impl Clock) {
        self.name = name;
        self.touch(clock);
    }

    /// Changes the display color.
    pub fn recolor(&mut self, color: Color, clock: &impl Clock) {
        self.color = color;
        self.touch(clock);
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Builds the default category set seeded into an empty store.
///
/// # Errors
///
/// Returns [`CategoryDomainError`] only if the built-in definitions are
/// themselves invalid.
pub fn default_categories(clock: &impl Clock) -> Result<Vec<Category>, CategoryDomainError> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|&(id, name, color)| {
            Ok(Category::new(
                CategoryId::new(id)?,
                CategoryName::new(name)?,
                Color::new(color)?,
                clock,
            ))
        })
        .collect()
}
