//! Pure mutation operations over the dashboard aggregate.
//!
//! # Responsibility
//! - Apply each UI intent as one atomic, synchronous transformation of
//!   `DashboardState`.
//! - Report what happened as a discriminated `Outcome` so callers and tests
//!   can distinguish "changed state" from "did nothing, and why".
//!
//! # Invariants
//! - No intent ever leaves a duplicate id inside a category's `widget_ids`;
//!   every insertion path re-checks membership.
//! - `DeleteWidgetGlobally` scrubs the id from every category, not just the
//!   ones currently displayed.
//! - A missing mutation target is a no-op outcome, never an error: the
//!   dispatch surface has no failure channel back to the UI.

use crate::model::dashboard::{Category, DashboardState, Widget, UNTITLED_WIDGET_NAME};
use crate::model::ids::{CategoryId, WidgetId};

/// A mutation request dispatched by the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Allocate a new widget and link it into the target category.
    CreateAndAddWidget {
        category_id: CategoryId,
        name: String,
        text: String,
    },
    /// Link an existing widget into a category.
    AddWidgetToCategory {
        category_id: CategoryId,
        widget_id: WidgetId,
    },
    /// Drop one category's link to a widget; the widget itself survives.
    RemoveWidgetFromCategory {
        category_id: CategoryId,
        widget_id: WidgetId,
    },
    /// Destroy a widget and every category link to it.
    DeleteWidgetGlobally { widget_id: WidgetId },
    /// Append a new empty category.
    AddCategory { title: String },
    /// Remove a category; its widgets stay in the global collection.
    DeleteCategory { category_id: CategoryId },
}

/// What a single applied intent did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A widget was allocated. `linked` is false when the target category
    /// did not exist; the widget is then orphaned but still stored.
    WidgetCreated { widget_id: WidgetId, linked: bool },
    WidgetLinked,
    WidgetUnlinked,
    /// The widget was removed from the global collection and from
    /// `links_removed` categories.
    WidgetDeleted { links_removed: usize },
    CategoryCreated { category_id: CategoryId },
    /// The category was removed; `links_dropped` widget references were
    /// orphaned from it (the widgets themselves are untouched).
    CategoryDeleted { links_dropped: usize },
    /// Nothing changed.
    Noop(NoopReason),
}

/// Why an intent left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoopReason {
    /// Both name and text were blank after trimming, or a category title
    /// was blank.
    BlankInput,
    CategoryNotFound,
    WidgetNotFound,
    AlreadyLinked,
    LinkNotFound,
}

/// Applies one intent to the state, returning the outcome.
///
/// Pure with respect to everything but `state`: no persistence, no logging.
/// The effectful mutate-then-persist sequencing lives in the service layer.
pub fn reduce(state: &mut DashboardState, intent: Intent) -> Outcome {
    match intent {
        Intent::CreateAndAddWidget {
            category_id,
            name,
            text,
        } => create_and_add_widget(state, &category_id, &name, &text),
        Intent::AddWidgetToCategory {
            category_id,
            widget_id,
        } => add_widget_to_category(state, &category_id, widget_id),
        Intent::RemoveWidgetFromCategory {
            category_id,
            widget_id,
        } => remove_widget_from_category(state, &category_id, &widget_id),
        Intent::DeleteWidgetGlobally { widget_id } => delete_widget_globally(state, &widget_id),
        Intent::AddCategory { title } => add_category(state, &title),
        Intent::DeleteCategory { category_id } => delete_category(state, &category_id),
    }
}

fn create_and_add_widget(
    state: &mut DashboardState,
    category_id: &CategoryId,
    name: &str,
    text: &str,
) -> Outcome {
    let name = name.trim();
    let text = text.trim();

    // The blank guard runs on the raw trimmed inputs, before the name
    // placeholder is applied. A request that carries no content at all
    // allocates nothing.
    if name.is_empty() && text.is_empty() {
        return Outcome::Noop(NoopReason::BlankInput);
    }

    let widget = Widget {
        id: WidgetId::generate(),
        name: if name.is_empty() {
            UNTITLED_WIDGET_NAME.to_string()
        } else {
            name.to_string()
        },
        text: text.to_string(),
    };
    let widget_id = widget.id.clone();
    state.widgets.insert(widget_id.clone(), widget);

    // An unknown category still leaves the widget stored, just unlinked.
    let linked = match state.category_mut(category_id) {
        Some(category) if !category.widget_ids.contains(&widget_id) => {
            category.widget_ids.push(widget_id.clone());
            true
        }
        _ => false,
    };

    Outcome::WidgetCreated { widget_id, linked }
}

fn add_widget_to_category(
    state: &mut DashboardState,
    category_id: &CategoryId,
    widget_id: WidgetId,
) -> Outcome {
    if !state.widgets.contains_key(&widget_id) {
        return Outcome::Noop(NoopReason::WidgetNotFound);
    }
    let Some(category) = state.category_mut(category_id) else {
        return Outcome::Noop(NoopReason::CategoryNotFound);
    };
    if category.widget_ids.contains(&widget_id) {
        return Outcome::Noop(NoopReason::AlreadyLinked);
    }

    category.widget_ids.push(widget_id);
    Outcome::WidgetLinked
}

fn remove_widget_from_category(
    state: &mut DashboardState,
    category_id: &CategoryId,
    widget_id: &WidgetId,
) -> Outcome {
    let Some(category) = state.category_mut(category_id) else {
        return Outcome::Noop(NoopReason::CategoryNotFound);
    };
    let before = category.widget_ids.len();
    category.widget_ids.retain(|id| id != widget_id);
    if category.widget_ids.len() == before {
        return Outcome::Noop(NoopReason::LinkNotFound);
    }

    Outcome::WidgetUnlinked
}

fn delete_widget_globally(state: &mut DashboardState, widget_id: &WidgetId) -> Outcome {
    let removed = state.widgets.remove(widget_id).is_some();

    let mut links_removed = 0;
    for category in &mut state.categories {
        let before = category.widget_ids.len();
        category.widget_ids.retain(|id| id != widget_id);
        links_removed += before - category.widget_ids.len();
    }

    if !removed && links_removed == 0 {
        return Outcome::Noop(NoopReason::WidgetNotFound);
    }

    Outcome::WidgetDeleted { links_removed }
}

fn add_category(state: &mut DashboardState, title: &str) -> Outcome {
    let title = title.trim();
    if title.is_empty() {
        return Outcome::Noop(NoopReason::BlankInput);
    }

    let category = Category::new(title);
    let category_id = category.id.clone();
    state.categories.push(category);
    Outcome::CategoryCreated { category_id }
}

fn delete_category(state: &mut DashboardState, category_id: &CategoryId) -> Outcome {
    let Some(index) = state
        .categories
        .iter()
        .position(|category| &category.id == category_id)
    else {
        return Outcome::Noop(NoopReason::CategoryNotFound);
    };

    let category = state.categories.remove(index);
    Outcome::CategoryDeleted {
        links_dropped: category.widget_ids.len(),
    }
}
