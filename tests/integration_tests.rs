//! Integration tests for daemon-CLI IPC communication.
//!
//! These tests verify end-to-end communication between the CLI client and
//! the daemon IPC server: command dispatch, state transitions observable
//! through responses, and connection error handling.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::Duration;

use oktimer::cli::client::IpcClient;
use oktimer::cli::commands::{ConfigArgs, StartArgs};
use oktimer::daemon::clock::ManualClock;
use oktimer::daemon::ipc::{IpcServer, RequestHandler};
use oktimer::daemon::timer::CountdownEngine;
use oktimer::{
    MockAlarmScheduler, MockCompletionPresenter, MockSoundPlayer, SessionHistoryStore,
    SettingsStore, TimerSettings,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a temporary socket path for testing.
fn create_temp_socket_path() -> PathBuf {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("integration_test.sock");
    // Keep the directory so it's not deleted
    std::mem::forget(dir);
    path
}

struct TestDaemon {
    server: Arc<IpcServer>,
    handler: Arc<RequestHandler>,
    clock: Arc<ManualClock>,
    engine: Arc<Mutex<CountdownEngine>>,
    _dir: tempfile::TempDir,
}

/// Builds a full handler stack on mocks, a manual clock, and real stores in
/// a temp directory.
fn create_daemon(socket_path: &PathBuf) -> TestDaemon {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::new());
    let history = Arc::new(SessionHistoryStore::open(dir.path()));
    let settings_store = SettingsStore::new(dir.path());
    let (tx, _rx) = mpsc::unbounded_channel();

    let engine = Arc::new(Mutex::new(CountdownEngine::new(
        TimerSettings::default(),
        clock.clone(),
        Arc::new(MockAlarmScheduler::new()),
        Arc::new(MockCompletionPresenter::new()),
        Arc::new(MockSoundPlayer::new()),
        history.clone(),
        tx,
    )));

    let server = Arc::new(IpcServer::new(socket_path).unwrap());
    let handler = Arc::new(RequestHandler::new(
        engine.clone(),
        history,
        settings_store,
    ));

    TestDaemon {
        server,
        handler,
        clock,
        engine,
        _dir: dir,
    }
}

/// Serves request-response cycles until aborted.
fn spawn_server(daemon: &TestDaemon) -> tokio::task::JoinHandle<()> {
    let server = daemon.server.clone();
    let handler = daemon.handler.clone();
    tokio::spawn(async move {
        loop {
            let Ok(mut stream) = server.accept().await else {
                break;
            };
            if let Ok(request) = IpcServer::receive_request(&mut stream).await {
                let response = handler.handle(request).await;
                let _ = IpcServer::send_response(&mut stream, &response).await;
            }
        }
    })
}

async fn wait_for_socket(path: &PathBuf) {
    for _ in 0..50 {
        if path.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// ============================================================================
// Timer control via IPC
// ============================================================================

#[tokio::test]
async fn test_start_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);
    let response = client
        .start(&StartArgs {
            minutes: Some(5),
            seconds: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, "success");
    assert_eq!(response.message, "タイマーを開始しました");

    let data = response.data.expect("Response should contain data");
    assert_eq!(data.state, Some("running".to_string()));
    assert_eq!(data.remaining_seconds, Some(300));
    assert_eq!(data.total_seconds, Some(300));

    server.abort();
}

#[tokio::test]
async fn test_pause_resume_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    client.start(&StartArgs::default()).await.unwrap();

    // Let a minute of virtual time pass, then pause
    daemon.clock.advance_secs(60);
    let response = client.pause().await.unwrap();
    assert_eq!(response.status, "success");
    let data = response.data.unwrap();
    assert_eq!(data.state, Some("paused".to_string()));
    assert_eq!(data.remaining_seconds, Some(240));

    // Paused time does not count
    daemon.clock.advance_secs(600);
    let response = client.start(&StartArgs::default()).await.unwrap();
    assert_eq!(response.message, "タイマーを再開しました");
    assert_eq!(response.data.unwrap().remaining_seconds, Some(240));

    server.abort();
}

#[tokio::test]
async fn test_status_query_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);
    let response = client.status().await.unwrap();

    assert_eq!(response.status, "success");
    let data = response.data.unwrap();
    assert_eq!(data.state, Some("idle".to_string()));
    assert_eq!(data.remaining_seconds, Some(300));
    assert_eq!(data.progress, Some(0.0));

    server.abort();
}

#[tokio::test]
async fn test_full_countdown_cycle_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    // Arm 5 seconds and start
    client.preset(5).await.unwrap();
    client.start(&StartArgs::default()).await.unwrap();

    // Clock passes the end; a tick completes the countdown
    daemon.clock.advance_secs(6);
    daemon.engine.lock().await.handle_tick();

    let response = client.status().await.unwrap();
    let data = response.data.unwrap();
    assert_eq!(data.state, Some("completed".to_string()));
    assert_eq!(data.remaining_seconds, Some(0));

    // Dismiss returns to idle with the armed duration restored
    let response = client.dismiss().await.unwrap();
    assert_eq!(response.status, "success");
    let data = response.data.unwrap();
    assert_eq!(data.state, Some("idle".to_string()));
    assert_eq!(data.remaining_seconds, Some(5));

    // Exactly one completed session in the history
    let response = client.history().await.unwrap();
    let data = response.data.unwrap();
    let sessions = data.sessions.unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].was_completed);
    assert_eq!(sessions[0].duration_secs, 5);

    server.abort();
}

#[tokio::test]
async fn test_snooze_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    client.preset(5).await.unwrap();
    client.start(&StartArgs::default()).await.unwrap();
    daemon.clock.advance_secs(5);
    daemon.engine.lock().await.handle_tick();

    let response = client.snooze().await.unwrap();
    assert_eq!(response.status, "success");
    let data = response.data.unwrap();
    assert_eq!(data.state, Some("running".to_string()));
    // Snooze re-arms with the configured snooze duration
    assert_eq!(data.total_seconds, Some(300));

    server.abort();
}

#[tokio::test]
async fn test_reset_records_abandoned_session() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    client.preset(60).await.unwrap();
    client.start(&StartArgs::default()).await.unwrap();
    daemon.clock.advance_secs(10);
    client.reset().await.unwrap();

    let response = client.history().await.unwrap();
    let sessions = response.data.unwrap().sessions.unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(!sessions[0].was_completed);
    assert_eq!(sessions[0].duration_secs, 60);

    server.abort();
}

// ============================================================================
// Settings via IPC
// ============================================================================

#[tokio::test]
async fn test_config_roundtrip_via_ipc() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    let response = client
        .config(&ConfigArgs {
            sound: Some(false),
            snooze_secs: Some(120),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(response.status, "success");

    let response = client.config(&ConfigArgs::default()).await.unwrap();
    let settings = response.data.unwrap().settings.unwrap();
    assert!(!settings.sound_enabled);
    assert_eq!(settings.snooze_secs, 120);

    server.abort();
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_invalid_transition_returns_error_status() {
    let socket_path = create_temp_socket_path();
    let daemon = create_daemon(&socket_path);
    let server = spawn_server(&daemon);
    wait_for_socket(&socket_path).await;

    let client = IpcClient::with_socket_path(socket_path);

    let response = client.pause().await.unwrap();
    assert_eq!(response.status, "error");
    assert!(response.message.contains("実行されていません"));

    let response = client.snooze().await.unwrap();
    assert_eq!(response.status, "error");

    server.abort();
}

#[tokio::test]
async fn test_connection_to_missing_daemon_fails() {
    let client = IpcClient::with_socket_path(PathBuf::from("/tmp/oktimer-no-such.sock"));

    let result = client.status().await;
    assert!(result.is_err());
}
