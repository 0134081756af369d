//! Bundled default dashboard snapshot.
//!
//! # Responsibility
//! - Provide the fixed initial state used when no persisted snapshot exists
//!   or the persisted one is unreadable.
//!
//! # Invariants
//! - The bundled document is version-controlled and must always parse and
//!   satisfy the aggregate invariants (pinned by tests).
//! - Seed loading never panics; a malformed bundle degrades to an empty
//!   state with a logged error.

use crate::model::dashboard::DashboardState;
use log::error;

const SEED_JSON: &str = include_str!("../data/seed.json");

/// Returns the bundled default dashboard state.
pub fn seed_state() -> DashboardState {
    match serde_json::from_str::<DashboardState>(SEED_JSON) {
        Ok(state) => state,
        Err(err) => {
            error!("event=seed_load module=seed status=error error={err}");
            DashboardState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::seed_state;

    #[test]
    fn bundled_seed_parses_and_is_valid() {
        let state = seed_state();
        assert!(!state.categories.is_empty());
        assert!(!state.widgets.is_empty());
        state.validate().expect("bundled seed must satisfy invariants");
    }

    #[test]
    fn every_seed_link_resolves() {
        let state = seed_state();
        for category in &state.categories {
            for widget_id in &category.widget_ids {
                assert!(
                    state.widgets.contains_key(widget_id),
                    "seed category {} links unknown widget {}",
                    category.id,
                    widget_id
                );
            }
        }
    }
}
