//! Dashboard aggregate: categories, widgets, and the snapshot shape.
//!
//! # Responsibility
//! - Define the root `DashboardState` aggregate that the store mutates and
//!   the persistence layer snapshots.
//! - Validate referential integrity of persisted snapshots before they are
//!   accepted as live state.
//!
//! # Invariants
//! - `categories` contains no duplicate category id; creation order is
//!   display order and is preserved.
//! - A category's `widget_ids` contains no duplicate id; insertion order is
//!   display order and is preserved.
//! - Every id in any `widget_ids` resolves to an entry in `widgets`.

use crate::model::ids::{CategoryId, WidgetId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display label assigned to widgets created from blank name input.
pub const UNTITLED_WIDGET_NAME: &str = "Untitled Widget";

/// A named, described unit of dashboard content.
///
/// Widgets are owned globally and referenced (shared) by zero or more
/// categories. They are never updated in place: created once, destroyed by
/// the global delete operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: WidgetId,
    /// Non-empty display label.
    pub name: String,
    /// Description; may be empty.
    pub text: String,
}

/// A named, ordered grouping of widget references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// Non-empty display label supplied at creation.
    pub title: String,
    /// Ordered, duplicate-free widget references. Serialized as `widgetIds`
    /// to match the snapshot wire format.
    #[serde(rename = "widgetIds")]
    pub widget_ids: Vec<WidgetId>,
}

impl Category {
    /// Creates an empty category with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: CategoryId::generate(),
            title: title.into(),
            widget_ids: Vec::new(),
        }
    }
}

/// The complete serializable state of the dashboard at one instant.
///
/// This is both the in-memory root aggregate and the snapshot wire shape:
/// it must round-trip through JSON without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub categories: Vec<Category>,
    pub widgets: BTreeMap<WidgetId, Widget>,
}

impl DashboardState {
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn category_mut(&mut self, id: &CategoryId) -> Option<&mut Category> {
        self.categories
            .iter_mut()
            .find(|category| &category.id == id)
    }

    /// Checks the aggregate invariants.
    ///
    /// Used by the load path: a persisted snapshot that parses but violates
    /// referential integrity is rejected instead of masked, and the caller
    /// degrades to the seed dataset.
    pub fn validate(&self) -> Result<(), StateValidationError> {
        let mut seen_categories = BTreeSet::new();
        for category in &self.categories {
            if !seen_categories.insert(&category.id) {
                return Err(StateValidationError::DuplicateCategoryId(
                    category.id.clone(),
                ));
            }
            if category.title.trim().is_empty() {
                return Err(StateValidationError::BlankCategoryTitle(
                    category.id.clone(),
                ));
            }

            let mut seen_links = BTreeSet::new();
            for widget_id in &category.widget_ids {
                if !seen_links.insert(widget_id) {
                    return Err(StateValidationError::DuplicateWidgetLink {
                        category_id: category.id.clone(),
                        widget_id: widget_id.clone(),
                    });
                }
                if !self.widgets.contains_key(widget_id) {
                    return Err(StateValidationError::DanglingWidgetLink {
                        category_id: category.id.clone(),
                        widget_id: widget_id.clone(),
                    });
                }
            }
        }

        for (key, widget) in &self.widgets {
            if key != &widget.id {
                return Err(StateValidationError::MismatchedWidgetKey {
                    key: key.clone(),
                    id: widget.id.clone(),
                });
            }
            if widget.name.trim().is_empty() {
                return Err(StateValidationError::BlankWidgetName(widget.id.clone()));
            }
        }

        Ok(())
    }
}

/// Violation of a dashboard aggregate invariant in a candidate snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateValidationError {
    DuplicateCategoryId(CategoryId),
    BlankCategoryTitle(CategoryId),
    DuplicateWidgetLink {
        category_id: CategoryId,
        widget_id: WidgetId,
    },
    DanglingWidgetLink {
        category_id: CategoryId,
        widget_id: WidgetId,
    },
    MismatchedWidgetKey {
        key: WidgetId,
        id: WidgetId,
    },
    BlankWidgetName(WidgetId),
}

impl Display for StateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCategoryId(id) => write!(f, "duplicate category id `{id}`"),
            Self::BlankCategoryTitle(id) => write!(f, "category `{id}` has a blank title"),
            Self::DuplicateWidgetLink {
                category_id,
                widget_id,
            } => write!(
                f,
                "category `{category_id}` links widget `{widget_id}` more than once"
            ),
            Self::DanglingWidgetLink {
                category_id,
                widget_id,
            } => write!(
                f,
                "category `{category_id}` links unknown widget `{widget_id}`"
            ),
            Self::MismatchedWidgetKey { key, id } => {
                write!(f, "widget map key `{key}` does not match widget id `{id}`")
            }
            Self::BlankWidgetName(id) => write!(f, "widget `{id}` has a blank name"),
        }
    }
}

impl Error for StateValidationError {}
