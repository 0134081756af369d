use rusqlite::Connection;
use widgetdeck_core::db::{open_db, open_db_in_memory};
use widgetdeck_core::{
    seed_state, DashboardService, DashboardState, Intent, MemorySnapshotRepository, RepoError,
    SnapshotRepository, SqliteSnapshotRepository, SNAPSHOT_KEY,
};

#[test]
fn sqlite_slot_roundtrips_a_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    assert_eq!(repo.load_snapshot(SNAPSHOT_KEY).unwrap(), None);

    repo.save_snapshot(SNAPSHOT_KEY, "{\"v\":1}").unwrap();
    assert_eq!(
        repo.load_snapshot(SNAPSHOT_KEY).unwrap().as_deref(),
        Some("{\"v\":1}")
    );
}

#[test]
fn sqlite_slot_overwrites_existing_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();

    repo.save_snapshot(SNAPSHOT_KEY, "old").unwrap();
    repo.save_snapshot(SNAPSHOT_KEY, "new").unwrap();

    assert_eq!(
        repo.load_snapshot(SNAPSHOT_KEY).unwrap().as_deref(),
        Some("new")
    );
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSnapshotRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn init_with_empty_slot_uses_seed() {
    let repo = MemorySnapshotRepository::new();

    let service = DashboardService::init(repo);

    assert_eq!(service.state(), &seed_state());
}

#[test]
fn init_with_corrupt_snapshot_falls_back_to_seed() {
    let repo = MemorySnapshotRepository::new();
    repo.set_raw_value(SNAPSHOT_KEY, "{not valid json");

    let service = DashboardService::init(repo);

    assert_eq!(service.state(), &seed_state());
}

#[test]
fn init_with_invalid_state_falls_back_to_seed() {
    // Parses fine but violates referential integrity (dangling link).
    let repo = MemorySnapshotRepository::new();
    repo.set_raw_value(
        SNAPSHOT_KEY,
        r#"{
            "categories": [
                { "id": "category-1", "title": "Cloud", "widgetIds": ["widget-ghost"] }
            ],
            "widgets": {}
        }"#,
    );

    let service = DashboardService::init(repo);

    assert_eq!(service.state(), &seed_state());
}

#[test]
fn init_with_valid_snapshot_restores_it() {
    let stored = r#"{
        "categories": [
            { "id": "category-1", "title": "Cloud", "widgetIds": ["widget-a"] }
        ],
        "widgets": {
            "widget-a": { "id": "widget-a", "name": "A", "text": "stored" }
        }
    }"#;
    let repo = MemorySnapshotRepository::new();
    repo.set_raw_value(SNAPSHOT_KEY, stored);

    let service = DashboardService::init(repo);

    let expected: DashboardState = serde_json::from_str(stored).unwrap();
    assert_eq!(service.state(), &expected);
}

#[test]
fn dispatch_persists_a_snapshot_after_every_mutation() {
    let mut service = DashboardService::init(MemorySnapshotRepository::new());

    service.dispatch(Intent::AddCategory {
        title: "Ops".to_string(),
    });

    let stored = service_raw_snapshot(&service);
    let persisted: DashboardState = serde_json::from_str(&stored).unwrap();
    assert_eq!(&persisted, service.state());

    service.dispatch(Intent::AddCategory {
        title: "Second".to_string(),
    });
    let persisted: DashboardState =
        serde_json::from_str(&service_raw_snapshot(&service)).unwrap();
    assert_eq!(&persisted, service.state());
    assert_eq!(
        persisted.categories.last().map(|c| c.title.as_str()),
        Some("Second")
    );
}

#[test]
fn write_failure_never_blocks_the_in_memory_mutation() {
    let repo = MemorySnapshotRepository::new();
    let mut service = DashboardService::init(repo);

    let before = service_raw_snapshot_opt(&service);

    service_repo(&service).set_fail_writes(true);
    service.dispatch(Intent::AddCategory {
        title: "Unpersisted".to_string(),
    });

    // In-memory state advanced, the durable slot did not.
    assert!(service
        .state()
        .categories
        .iter()
        .any(|c| c.title == "Unpersisted"));
    assert_eq!(service_raw_snapshot_opt(&service), before);

    // Once the store recovers, the next mutation persists the full state,
    // including the previously unpersisted change.
    service_repo(&service).set_fail_writes(false);
    service.dispatch(Intent::AddCategory {
        title: "Recovered".to_string(),
    });

    let persisted: DashboardState =
        serde_json::from_str(&service_raw_snapshot(&service)).unwrap();
    assert!(persisted.categories.iter().any(|c| c.title == "Unpersisted"));
    assert!(persisted.categories.iter().any(|c| c.title == "Recovered"));
}

#[test]
fn file_backed_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("widgetdeck.sqlite3");

    let expected = {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
        let mut service = DashboardService::init(repo);
        service.dispatch(Intent::AddCategory {
            title: "Durable".to_string(),
        });
        service.state().clone()
    };

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteSnapshotRepository::try_new(&conn).unwrap();
    let service = DashboardService::init(repo);

    assert_eq!(service.state(), &expected);
    assert!(service
        .state()
        .categories
        .iter()
        .any(|c| c.title == "Durable"));
}

// The service owns its repository; these helpers reach through to the
// memory fake's test hooks.
fn service_repo(service: &DashboardService<MemorySnapshotRepository>) -> &MemorySnapshotRepository {
    service.repository()
}

fn service_raw_snapshot(service: &DashboardService<MemorySnapshotRepository>) -> String {
    service_raw_snapshot_opt(service).expect("a snapshot should have been persisted")
}

fn service_raw_snapshot_opt(
    service: &DashboardService<MemorySnapshotRepository>,
) -> Option<String> {
    service_repo(service).raw_value(SNAPSHOT_KEY)
}
