//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `widgetdeck_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use widgetdeck_core::{DashboardService, MemorySnapshotRepository};

fn main() {
    let service = DashboardService::init(MemorySnapshotRepository::new());
    let state = service.state();

    println!("widgetdeck_core version={}", widgetdeck_core::core_version());
    println!(
        "seed categories={} widgets={}",
        state.categories.len(),
        state.widgets.len()
    );
}
