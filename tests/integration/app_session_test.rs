//! End-to-end application sessions over file-backed stores.

use super::location_mock::MockLocationProvider;
use geolog::location::capture::CaptureWorkflow;
use geolog::location::types::Coordinates;
use geolog::storage::config::{AppConfig, Theme};
use geolog::storage::history::LocationHistoryStore;
use geolog::storage::preferences::FilePreferenceStore;
use geolog::LocationApp;

fn config_in(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_session_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.location.fixed_position = Some(Coordinates::new(-23.55, -46.63).unwrap());

    let captured = {
        let mut app = LocationApp::open(&config).unwrap();
        app.start();
        assert_eq!(app.state().theme, Theme::Light);

        app.toggle_theme();
        app.capture().await.unwrap()
    };

    let mut app = LocationApp::open(&config).unwrap();
    app.start();

    assert_eq!(app.state().theme, Theme::Dark);
    assert_eq!(app.state().locations, vec![captured]);
}

#[tokio::test]
async fn test_denied_permission_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(dir.path());
    config.location.permission_granted = false;
    config.location.fixed_position = Some(Coordinates::new(1.0, 2.0).unwrap());

    let mut app = LocationApp::open(&config).unwrap();
    app.start();

    assert!(app.capture().await.is_none());
    assert!(app.state().locations.is_empty());
    assert_eq!(app.store().count().unwrap(), 0);
}

#[tokio::test]
async fn test_ids_continue_after_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("locations.db");
    let prefs_path = dir.path().join("preferences.toml");

    let first = {
        let provider = MockLocationProvider::granted();
        provider.push_fix(10.0, 10.0);
        let mut app = LocationApp::new(
            FilePreferenceStore::new(&prefs_path),
            LocationHistoryStore::open(&db_path).unwrap(),
            CaptureWorkflow::new(provider),
        );
        app.start();
        app.capture().await.unwrap()
    };

    let provider = MockLocationProvider::granted();
    provider.push_fix(20.0, 20.0);
    let mut app = LocationApp::new(
        FilePreferenceStore::new(&prefs_path),
        LocationHistoryStore::open(&db_path).unwrap(),
        CaptureWorkflow::new(provider),
    );
    app.start();
    let second = app.capture().await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(app.state().locations, vec![second, first]);
}

#[tokio::test]
async fn test_failed_capture_keeps_list() {
    let dir = tempfile::tempdir().unwrap();
    let provider = MockLocationProvider::granted();
    provider.push_fix(1.0, 1.0);
    provider.push_failure("gps timeout");

    let mut app = LocationApp::new(
        FilePreferenceStore::new(dir.path().join("preferences.toml")),
        LocationHistoryStore::open(&dir.path().join("locations.db")).unwrap(),
        CaptureWorkflow::new(provider),
    );
    app.start();

    let stored = app.capture().await.unwrap();
    assert!(app.capture().await.is_none());

    assert_eq!(app.state().locations, vec![stored]);
    assert!(!app.state().is_loading);
}
