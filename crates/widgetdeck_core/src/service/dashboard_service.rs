//! Dashboard use-case service.
//!
//! # Responsibility
//! - Initialize live state from the persisted snapshot or the seed.
//! - Apply dispatched intents through the pure reducer, then snapshot the
//!   full state into the durable slot.
//!
//! # Invariants
//! - Initialization never fails past this boundary: absent, unreadable, or
//!   invalid persisted state degrades to the seed dataset.
//! - A persistence write failure never rolls back or blocks the in-memory
//!   mutation; it is reported to the log sink only.
//! - The write for intent N is issued before intent N+1 is processed
//!   (synchronous, reducer-serial execution).

use crate::model::dashboard::DashboardState;
use crate::repo::snapshot_repo::{SnapshotRepository, SNAPSHOT_KEY};
use crate::seed::seed_state;
use crate::store::{reduce, Intent, Outcome};
use log::{error, info, warn};

/// Owns the live dashboard state and the durable snapshot slot.
///
/// The UI layer holds one instance for the life of the session, dispatches
/// intents into it one at a time, and re-reads `state()` after each
/// dispatch. There is no concurrent mutator.
pub struct DashboardService<R: SnapshotRepository> {
    repo: R,
    state: DashboardState,
}

impl<R: SnapshotRepository> DashboardService<R> {
    /// Builds a service from the persisted snapshot, falling back to the
    /// bundled seed when no valid snapshot exists.
    pub fn init(repo: R) -> Self {
        let state = load_or_seed(&repo);
        Self { repo, state }
    }

    /// Read snapshot of the live state.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The underlying snapshot slot, e.g. for test inspection.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Applies one intent and persists the resulting snapshot.
    ///
    /// The returned outcome is informational; no-op outcomes are not
    /// errors. Persistence failures are logged and swallowed, leaving the
    /// in-memory state authoritative until a later write succeeds.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        let outcome = reduce(&mut self.state, intent);
        self.persist();
        outcome
    }

    fn persist(&self) {
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(err) => {
                error!("event=snapshot_save module=service status=error stage=serialize error={err}");
                return;
            }
        };

        if let Err(err) = self.repo.save_snapshot(SNAPSHOT_KEY, &json) {
            error!("event=snapshot_save module=service status=error stage=write error={err}");
        }
    }
}

fn load_or_seed<R: SnapshotRepository>(repo: &R) -> DashboardState {
    let raw = match repo.load_snapshot(SNAPSHOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=snapshot_load module=service status=empty fallback=seed");
            return seed_state();
        }
        Err(err) => {
            error!("event=snapshot_load module=service status=error fallback=seed error={err}");
            return seed_state();
        }
    };

    let state = match serde_json::from_str::<DashboardState>(&raw) {
        Ok(state) => state,
        Err(err) => {
            warn!("event=snapshot_load module=service status=unreadable fallback=seed error={err}");
            return seed_state();
        }
    };

    if let Err(err) = state.validate() {
        warn!("event=snapshot_load module=service status=invalid fallback=seed error={err}");
        return seed_state();
    }

    info!(
        "event=snapshot_load module=service status=ok categories={} widgets={}",
        state.categories.len(),
        state.widgets.len()
    );
    state
}
