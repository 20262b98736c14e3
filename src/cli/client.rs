//! IPC client for communicating with the OKTimer daemon.
//!
//! This module provides:
//! - Unix Domain Socket client
//! - Request/response handling
//! - Connection retry logic
//! - Timeout handling

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::UnixStream;
use tokio::time::timeout;

use crate::cli::commands::{ConfigArgs, StartArgs};
use crate::types::{ConfigParams, IpcRequest, IpcResponse, StartParams};

// ============================================================================
// Constants
// ============================================================================

/// Default socket path relative to the home directory
const DEFAULT_SOCKET_PATH: &str = ".oktimer/oktimer.sock";

/// Connection timeout in seconds
const CONNECTION_TIMEOUT_SECS: u64 = 5;

/// Read/write timeout in seconds
const IO_TIMEOUT_SECS: u64 = 5;

/// Maximum response size in bytes (64KB, history responses included)
const MAX_RESPONSE_SIZE: usize = 65536;

/// Maximum retry attempts
const MAX_RETRIES: u32 = 3;

/// Retry delay in milliseconds (base delay, multiplied by attempt number)
const RETRY_DELAY_MS: u64 = 500;

// ============================================================================
// IpcClient
// ============================================================================

/// IPC client for daemon communication.
pub struct IpcClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl IpcClient {
    /// Creates a new IPC client with the default socket path.
    pub fn new() -> Result<Self> {
        let socket_path = Self::default_socket_path()?;
        Ok(Self {
            socket_path,
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
        })
    }

    /// Creates a new IPC client with a custom socket path.
    pub fn with_socket_path(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: Duration::from_secs(CONNECTION_TIMEOUT_SECS),
        }
    }

    /// Returns the default socket path.
    fn default_socket_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("ホームディレクトリが見つかりません")?;
        Ok(home.join(DEFAULT_SOCKET_PATH))
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &PathBuf {
        &self.socket_path
    }

    /// Sends a start command to the daemon.
    pub async fn start(&self, args: &StartArgs) -> Result<IpcResponse> {
        let request = IpcRequest::Start {
            params: StartParams {
                minutes: args.minutes,
                seconds: args.seconds,
            },
        };
        self.send_request_with_retry(&request).await
    }

    /// Sends a pause command to the daemon.
    pub async fn pause(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Pause).await
    }

    /// Sends a reset command to the daemon.
    pub async fn reset(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Reset).await
    }

    /// Sends a snooze command to the daemon.
    pub async fn snooze(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Snooze).await
    }

    /// Sends a dismiss command to the daemon.
    pub async fn dismiss(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Dismiss).await
    }

    /// Sends a set-duration command to the daemon.
    pub async fn set(&self, minutes: u32, seconds: u32) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Set { minutes, seconds })
            .await
    }

    /// Sends a preset command to the daemon.
    pub async fn preset(&self, seconds: u64) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Preset { seconds })
            .await
    }

    /// Sends a config command to the daemon.
    pub async fn config(&self, args: &ConfigArgs) -> Result<IpcResponse> {
        let request = IpcRequest::Config {
            params: ConfigParams {
                sound: args.sound,
                tick_sound: args.tick_sound,
                default_secs: args.default_secs,
                snooze_secs: args.snooze_secs,
            },
        };
        self.send_request_with_retry(&request).await
    }

    /// Sends a status query to the daemon.
    pub async fn status(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::Status).await
    }

    /// Sends a history query to the daemon.
    pub async fn history(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::History).await
    }

    /// Sends a clear-history command to the daemon.
    pub async fn clear_history(&self) -> Result<IpcResponse> {
        self.send_request_with_retry(&IpcRequest::ClearHistory).await
    }

    /// Sends a request to the daemon with retry logic.
    async fn send_request_with_retry(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut last_error = None;

        for attempt in 1..=MAX_RETRIES {
            match self.send_request(request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    last_error = Some(e);
                    if attempt < MAX_RETRIES {
                        let delay = Duration::from_millis(RETRY_DELAY_MS * u64::from(attempt));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap()).context(
            "デーモンに接続できません。`oktimer daemon` が起動しているか確認してください",
        )
    }

    /// Sends a single request and reads the response.
    async fn send_request(&self, request: &IpcRequest) -> Result<IpcResponse> {
        let mut stream = timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("接続がタイムアウトしました")?
            .with_context(|| format!("ソケットに接続できません: {:?}", self.socket_path))?;

        let json = serde_json::to_vec(request).context("リクエストのシリアライズに失敗しました")?;

        timeout(Duration::from_secs(IO_TIMEOUT_SECS), stream.write_all(&json))
            .await
            .context("書き込みがタイムアウトしました")?
            .context("リクエストの送信に失敗しました")?;
        stream.flush().await.context("フラッシュに失敗しました")?;

        let mut buffer = vec![0u8; MAX_RESPONSE_SIZE];
        let n = timeout(
            Duration::from_secs(IO_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await
        .context("読み取りがタイムアウトしました")?
        .context("応答の読み取りに失敗しました")?;

        if n == 0 {
            anyhow::bail!("デーモンが応答せずに接続を閉じました");
        }

        let response: IpcResponse = serde_json::from_slice(&buffer[..n])
            .context("応答のデシリアライズに失敗しました")?;

        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_socket_path() {
        let path = PathBuf::from("/tmp/custom.sock");
        let client = IpcClient::with_socket_path(path.clone());
        assert_eq!(client.socket_path(), &path);
    }

    #[test]
    fn test_default_socket_path_under_home() {
        let path = IpcClient::default_socket_path().unwrap();
        assert!(path.ends_with(DEFAULT_SOCKET_PATH));
    }

    #[tokio::test]
    async fn test_connect_failure_produces_helpful_error() {
        let client = IpcClient::with_socket_path(PathBuf::from("/nonexistent/nowhere.sock"));

        let result = client.status().await;
        assert!(result.is_err());
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("デーモンに接続できません"));
    }

    #[tokio::test]
    async fn test_request_against_live_server() {
        use crate::types::ResponseData;
        use tokio::net::UnixListener;

        let dir = tempfile::tempdir().unwrap();
        let socket_path = dir.path().join("client-test.sock");
        let listener = UnixListener::bind(&socket_path).unwrap();

        // Minimal one-shot server
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buffer = vec![0u8; 4096];
            let n = stream.read(&mut buffer).await.unwrap();
            let request: IpcRequest = serde_json::from_slice(&buffer[..n]).unwrap();
            assert!(matches!(request, IpcRequest::Status));

            let response = IpcResponse::success(
                "",
                Some(ResponseData {
                    state: Some("idle".to_string()),
                    ..Default::default()
                }),
            );
            let json = serde_json::to_vec(&response).unwrap();
            stream.write_all(&json).await.unwrap();
        });

        let client = IpcClient::with_socket_path(socket_path);
        let response = client.status().await.unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.data.unwrap().state, Some("idle".to_string()));
        server.await.unwrap();
    }
}
