//! IPC server for the countdown daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for countdown commands
//! - Dispatch into the CountdownEngine and the stores
//!
//! The engine turns invalid commands into no-ops; the handler translates
//! those no-ops back into error responses so the CLI can tell the user why
//! nothing happened.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::daemon::timer::{CountdownEngine, CountdownSnapshot};
use crate::storage::{SessionHistoryStore, SettingsStore};
use crate::types::{ConfigParams, IpcRequest, IpcResponse, ResponseData, StartParams, TimerState};

// ============================================================================
// Constants
// ============================================================================

/// Socket file name within the data directory.
pub const SOCKET_FILE: &str = "oktimer.sock";

/// Maximum request size in bytes (8KB)
const MAX_REQUEST_SIZE: usize = 8192;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Socket binding error
    #[error("Failed to bind socket: {0}")]
    BindError(String),

    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// A stale socket file from a previous run is removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            anyhow::bail!("Connection closed by client");
        }

        let request: IpcRequest = serde_json::from_slice(&buffer[..n])
            .with_context(|| "Failed to deserialize IPC request")?;

        Ok(request)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        // Clean up socket file on drop
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to the engine and the stores.
pub struct RequestHandler {
    engine: Arc<Mutex<CountdownEngine>>,
    history: Arc<SessionHistoryStore>,
    settings_store: SettingsStore,
}

impl RequestHandler {
    /// Creates a new request handler.
    pub fn new(
        engine: Arc<Mutex<CountdownEngine>>,
        history: Arc<SessionHistoryStore>,
        settings_store: SettingsStore,
    ) -> Self {
        Self {
            engine,
            history,
            settings_store,
        }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        match request {
            IpcRequest::Start { params } => self.handle_start(params).await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Snooze => self.handle_snooze().await,
            IpcRequest::Dismiss => self.handle_dismiss().await,
            IpcRequest::Set { minutes, seconds } => self.handle_set(minutes, seconds).await,
            IpcRequest::Preset { seconds } => self.handle_preset(seconds).await,
            IpcRequest::Config { params } => self.handle_config(params).await,
            IpcRequest::Status => self.handle_status().await,
            IpcRequest::History => self.handle_history().await,
            IpcRequest::ClearHistory => self.handle_clear_history().await,
        }
    }

    /// Handles the start command. An explicit duration is applied first and
    /// only works from idle; a bare start also resumes from paused.
    async fn handle_start(&self, params: StartParams) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if let Some(secs) = params.duration_secs() {
            if !engine.set_preset(secs) {
                return IpcResponse::error("実行中は時間を変更できません");
            }
        }

        let resuming = engine.state() == TimerState::Paused;
        if engine.start() {
            let message = if resuming {
                "タイマーを再開しました"
            } else {
                "タイマーを開始しました"
            };
            IpcResponse::success(message, Some(snapshot_data(&engine.snapshot())))
        } else {
            IpcResponse::error("タイマーは既に実行中です")
        }
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.pause() {
            IpcResponse::success(
                "タイマーを一時停止しました",
                Some(snapshot_data(&engine.snapshot())),
            )
        } else {
            IpcResponse::error("タイマーは実行されていません")
        }
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        engine.reset();

        IpcResponse::success(
            "タイマーをリセットしました",
            Some(snapshot_data(&engine.snapshot())),
        )
    }

    /// Handles the snooze command.
    async fn handle_snooze(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.snooze() {
            IpcResponse::success(
                "スヌーズしました",
                Some(snapshot_data(&engine.snapshot())),
            )
        } else {
            IpcResponse::error("完了したタイマーがありません")
        }
    }

    /// Handles the dismiss command.
    async fn handle_dismiss(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.dismiss() {
            IpcResponse::success(
                "完了を確認しました",
                Some(snapshot_data(&engine.snapshot())),
            )
        } else {
            IpcResponse::error("完了したタイマーがありません")
        }
    }

    /// Handles the set command.
    async fn handle_set(&self, minutes: u32, seconds: u32) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.set_duration(minutes, seconds) {
            IpcResponse::success(
                "時間を設定しました",
                Some(snapshot_data(&engine.snapshot())),
            )
        } else {
            IpcResponse::error("実行中は時間を変更できません")
        }
    }

    /// Handles the preset command.
    async fn handle_preset(&self, seconds: u64) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if engine.set_preset(seconds) {
            IpcResponse::success(
                "時間を設定しました",
                Some(snapshot_data(&engine.snapshot())),
            )
        } else {
            IpcResponse::error("実行中は時間を変更できません")
        }
    }

    /// Handles the config command: applies any provided fields, persists,
    /// and returns the effective settings.
    async fn handle_config(&self, params: ConfigParams) -> IpcResponse {
        let mut engine = self.engine.lock().await;

        if params.is_empty() {
            let data = ResponseData {
                settings: Some(engine.settings().clone()),
                ..Default::default()
            };
            return IpcResponse::success("", Some(data));
        }

        let mut settings = engine.settings().clone();
        if let Some(sound) = params.sound {
            settings.sound_enabled = sound;
        }
        if let Some(tick) = params.tick_sound {
            settings.tick_sound_enabled = tick;
        }
        if let Some(secs) = params.default_secs {
            settings.default_duration_secs = secs;
        }
        if let Some(secs) = params.snooze_secs {
            settings.snooze_secs = secs;
        }

        if let Err(e) = settings.validate() {
            return IpcResponse::error(e);
        }

        if let Err(e) = self.settings_store.save(&settings) {
            return IpcResponse::error(e.to_string());
        }
        engine.update_settings(settings.clone());

        let data = ResponseData {
            settings: Some(settings),
            ..Default::default()
        };
        IpcResponse::success("設定を保存しました", Some(data))
    }

    /// Handles the status command.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        IpcResponse::success("", Some(snapshot_data(&engine.snapshot())))
    }

    /// Handles the history command.
    async fn handle_history(&self) -> IpcResponse {
        let data = ResponseData {
            sessions: Some(self.history.all()),
            stats: Some(self.history.stats()),
            ..Default::default()
        };
        IpcResponse::success("", Some(data))
    }

    /// Handles the clear-history command.
    async fn handle_clear_history(&self) -> IpcResponse {
        match self.history.clear() {
            Ok(()) => IpcResponse::success("履歴を消去しました", None),
            Err(e) => IpcResponse::error(e.to_string()),
        }
    }
}

/// Converts an engine snapshot into wire data.
fn snapshot_data(snapshot: &CountdownSnapshot) -> ResponseData {
    ResponseData {
        state: Some(snapshot.state.as_str().to_string()),
        remaining_seconds: Some(snapshot.remaining.as_secs()),
        total_seconds: Some(snapshot.total.as_secs()),
        progress: Some(snapshot.progress),
        ..Default::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::alarm::MockAlarmScheduler;
    use crate::alert::MockCompletionPresenter;
    use crate::daemon::clock::ManualClock;
    use crate::sound::MockSoundPlayer;
    use crate::types::TimerSettings;

    // ------------------------------------------------------------------------
    // Helper functions
    // ------------------------------------------------------------------------

    fn create_temp_socket_path() -> PathBuf {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");
        // Keep the directory so it's not deleted
        std::mem::forget(dir);
        path
    }

    struct HandlerHarness {
        handler: RequestHandler,
        clock: Arc<ManualClock>,
        _dir: tempfile::TempDir,
    }

    fn create_handler() -> HandlerHarness {
        let dir = tempfile::tempdir().unwrap();
        let clock = Arc::new(ManualClock::new());
        let history = Arc::new(SessionHistoryStore::open(dir.path()));
        let settings_store = SettingsStore::new(dir.path());
        // Receiver dropped immediately; engine event delivery is best-effort
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();

        let engine = CountdownEngine::new(
            TimerSettings::default(),
            clock.clone(),
            Arc::new(MockAlarmScheduler::new()),
            Arc::new(MockCompletionPresenter::new()),
            Arc::new(MockSoundPlayer::new()),
            history.clone(),
            tx,
        );

        HandlerHarness {
            handler: RequestHandler::new(Arc::new(Mutex::new(engine)), history, settings_store),
            clock,
            _dir: dir,
        }
    }

    // ------------------------------------------------------------------------
    // IpcServer Tests
    // ------------------------------------------------------------------------

    mod ipc_server_tests {
        use super::*;

        #[tokio::test]
        async fn test_server_creation() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path);

            assert!(server.is_ok());
            assert!(socket_path.exists());
        }

        #[tokio::test]
        async fn test_server_removes_stale_socket() {
            let socket_path = create_temp_socket_path();
            std::fs::write(&socket_path, "stale").unwrap();

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
        }

        #[tokio::test]
        async fn test_server_creates_parent_directory() {
            let dir = tempfile::tempdir().unwrap();
            let socket_path = dir.path().join("nested").join("test.sock");

            let server = IpcServer::new(&socket_path);
            assert!(server.is_ok());
            assert!(socket_path.parent().unwrap().exists());
        }

        #[tokio::test]
        async fn test_request_response_roundtrip() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let client_handle = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream
                    .write_all(br#"{"command":"status"}"#)
                    .await
                    .unwrap();
                stream.flush().await.unwrap();

                let mut buffer = vec![0u8; 4096];
                let n = stream.read(&mut buffer).await.unwrap();
                serde_json::from_slice::<IpcResponse>(&buffer[..n]).unwrap()
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await.unwrap();
            assert!(matches!(request, IpcRequest::Status));

            let response = IpcResponse::success("ok", None);
            IpcServer::send_response(&mut stream, &response).await.unwrap();

            let received = client_handle.await.unwrap();
            assert_eq!(received.status, "success");
            assert_eq!(received.message, "ok");
        }

        #[tokio::test]
        async fn test_receive_invalid_json_fails() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let mut stream = UnixStream::connect(&client_path).await.unwrap();
                stream.write_all(b"not json").await.unwrap();
                stream.flush().await.unwrap();
                // Keep the stream open until the server has read
                tokio::time::sleep(Duration::from_millis(200)).await;
            });

            let mut stream = server.accept().await.unwrap();
            let request = IpcServer::receive_request(&mut stream).await;
            assert!(request.is_err());
        }

        #[tokio::test]
        async fn test_connection_closed_without_data() {
            let socket_path = create_temp_socket_path();
            let server = IpcServer::new(&socket_path).unwrap();

            let client_path = socket_path.clone();
            let _client = tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                let stream = UnixStream::connect(&client_path).await.unwrap();
                drop(stream);
            });

            let mut stream = server.accept().await.unwrap();
            let result = IpcServer::receive_request(&mut stream).await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_server_drop_cleanup() {
            let socket_path = create_temp_socket_path();

            {
                let _server = IpcServer::new(&socket_path).unwrap();
                assert!(socket_path.exists());
            }

            assert!(!socket_path.exists());
        }
    }

    // ------------------------------------------------------------------------
    // RequestHandler Tests
    // ------------------------------------------------------------------------

    mod request_handler_tests {
        use super::*;

        #[tokio::test]
        async fn test_handle_status_initial() {
            let h = create_handler();

            let response = h.handler.handle(IpcRequest::Status).await;

            assert_eq!(response.status, "success");
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("idle".to_string()));
            assert_eq!(data.remaining_seconds, Some(300));
            assert_eq!(data.total_seconds, Some(300));
            assert_eq!(data.progress, Some(0.0));
        }

        #[tokio::test]
        async fn test_handle_start() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;

            assert_eq!(response.status, "success");
            assert_eq!(response.message, "タイマーを開始しました");
            let data = response.data.unwrap();
            assert_eq!(data.state, Some("running".to_string()));
            assert_eq!(data.remaining_seconds, Some(300));
        }

        #[tokio::test]
        async fn test_handle_start_with_duration() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    params: StartParams {
                        minutes: Some(1),
                        seconds: Some(30),
                    },
                })
                .await;

            assert_eq!(response.status, "success");
            let data = response.data.unwrap();
            assert_eq!(data.remaining_seconds, Some(90));
            assert_eq!(data.total_seconds, Some(90));
        }

        #[tokio::test]
        async fn test_handle_start_already_running() {
            let h = create_handler();

            let start = IpcRequest::Start {
                params: StartParams::default(),
            };
            h.handler.handle(start.clone()).await;
            let response = h.handler.handle(start).await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("既に実行中"));
        }

        #[tokio::test]
        async fn test_handle_start_with_duration_while_running() {
            let h = create_handler();

            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    params: StartParams {
                        minutes: Some(10),
                        seconds: None,
                    },
                })
                .await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("実行中は時間を変更できません"));
        }

        #[tokio::test]
        async fn test_handle_pause_and_resume() {
            let h = create_handler();

            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;

            let response = h.handler.handle(IpcRequest::Pause).await;
            assert_eq!(response.status, "success");
            assert_eq!(response.message, "タイマーを一時停止しました");
            assert_eq!(
                response.data.unwrap().state,
                Some("paused".to_string())
            );

            let response = h
                .handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;
            assert_eq!(response.status, "success");
            assert_eq!(response.message, "タイマーを再開しました");
        }

        #[tokio::test]
        async fn test_handle_pause_not_running() {
            let h = create_handler();

            let response = h.handler.handle(IpcRequest::Pause).await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("実行されていません"));
        }

        #[tokio::test]
        async fn test_handle_reset_always_succeeds() {
            let h = create_handler();

            let response = h.handler.handle(IpcRequest::Reset).await;
            assert_eq!(response.status, "success");

            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;
            let response = h.handler.handle(IpcRequest::Reset).await;
            assert_eq!(response.status, "success");
            assert_eq!(response.data.unwrap().state, Some("idle".to_string()));
        }

        #[tokio::test]
        async fn test_handle_set_and_preset() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Set {
                    minutes: 10,
                    seconds: 0,
                })
                .await;
            assert_eq!(response.status, "success");
            assert_eq!(response.data.unwrap().total_seconds, Some(600));

            let response = h.handler.handle(IpcRequest::Preset { seconds: 60 }).await;
            assert_eq!(response.status, "success");
            assert_eq!(response.data.unwrap().total_seconds, Some(60));
        }

        #[tokio::test]
        async fn test_handle_set_while_running_fails() {
            let h = create_handler();

            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams::default(),
                })
                .await;

            let response = h
                .handler
                .handle(IpcRequest::Set {
                    minutes: 1,
                    seconds: 0,
                })
                .await;

            assert_eq!(response.status, "error");
        }

        #[tokio::test]
        async fn test_handle_snooze_without_completion_fails() {
            let h = create_handler();

            let response = h.handler.handle(IpcRequest::Snooze).await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("完了したタイマーがありません"));
        }

        #[tokio::test]
        async fn test_handle_dismiss_without_completion_fails() {
            let h = create_handler();

            let response = h.handler.handle(IpcRequest::Dismiss).await;

            assert_eq!(response.status, "error");
        }

        #[tokio::test]
        async fn test_complete_then_snooze_via_handler() {
            let h = create_handler();

            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams {
                        minutes: None,
                        seconds: Some(5),
                    },
                })
                .await;

            // Drive completion through the engine tick
            h.clock.advance_secs(6);
            {
                let engine = h.handler.engine.clone();
                let mut engine = engine.lock().await;
                assert!(engine.handle_tick());
            }

            let response = h.handler.handle(IpcRequest::Snooze).await;
            assert_eq!(response.status, "success");

            let data = response.data.unwrap();
            assert_eq!(data.state, Some("running".to_string()));
            assert_eq!(data.total_seconds, Some(300));
        }

        #[tokio::test]
        async fn test_handle_config_read_back() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Config {
                    params: ConfigParams::default(),
                })
                .await;

            assert_eq!(response.status, "success");
            let settings = response.data.unwrap().settings.unwrap();
            assert_eq!(settings, TimerSettings::default());
        }

        #[tokio::test]
        async fn test_handle_config_update_persists() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Config {
                    params: ConfigParams {
                        sound: Some(false),
                        snooze_secs: Some(120),
                        ..Default::default()
                    },
                })
                .await;

            assert_eq!(response.status, "success");
            let settings = response.data.unwrap().settings.unwrap();
            assert!(!settings.sound_enabled);
            assert_eq!(settings.snooze_secs, 120);

            // Written through to the store
            assert_eq!(h.handler.settings_store.load(), settings);
        }

        #[tokio::test]
        async fn test_handle_config_rejects_invalid() {
            let h = create_handler();

            let response = h
                .handler
                .handle(IpcRequest::Config {
                    params: ConfigParams {
                        snooze_secs: Some(0),
                        ..Default::default()
                    },
                })
                .await;

            assert_eq!(response.status, "error");
            assert!(response.message.contains("スヌーズ時間"));
        }

        #[tokio::test]
        async fn test_handle_history_and_clear() {
            let h = create_handler();

            // Complete a 5-second countdown to produce one record
            h.handler
                .handle(IpcRequest::Start {
                    params: StartParams {
                        minutes: None,
                        seconds: Some(5),
                    },
                })
                .await;
            h.clock.advance_secs(6);
            {
                let engine = h.handler.engine.clone();
                engine.lock().await.handle_tick();
            }

            let response = h.handler.handle(IpcRequest::History).await;
            assert_eq!(response.status, "success");
            let data = response.data.unwrap();
            let sessions = data.sessions.unwrap();
            assert_eq!(sessions.len(), 1);
            assert_eq!(sessions[0].duration_secs, 5);
            assert!(sessions[0].was_completed);
            assert_eq!(data.stats.unwrap().completed_count, 1);

            let response = h.handler.handle(IpcRequest::ClearHistory).await;
            assert_eq!(response.status, "success");

            let response = h.handler.handle(IpcRequest::History).await;
            assert!(response.data.unwrap().sessions.unwrap().is_empty());
        }
    }
}
