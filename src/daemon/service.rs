//! Daemon runtime.
//!
//! Owns the single execution context every state transition happens on: one
//! select loop driving the periodic ticker, alarm wake-ups, IPC connections
//! and engine event logging. The engine is behind a mutex only because IPC
//! handling is spawned per connection; transitions remain serialized.
//!
//! The ticker runs at a fixed 100ms cadence whether or not a countdown is
//! armed; the engine ignores ticks outside the running state, and missed
//! ticks are skipped rather than replayed because elapsed time is always
//! recomputed from the wall clock.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::alarm::TokioAlarmScheduler;
use crate::alert::DesktopPresenter;
use crate::daemon::clock::SystemClock;
use crate::daemon::ipc::{IpcServer, RequestHandler, SOCKET_FILE};
use crate::daemon::timer::{CountdownEngine, TimerEvent};
use crate::sound::create_player;
use crate::storage::{default_data_dir, SessionHistoryStore, SettingsStore};
use crate::types::IpcResponse;

/// Tick cadence while the daemon runs.
const TICK_INTERVAL_MS: u64 = 100;

/// Runs the daemon with the default data directory.
pub async fn run() -> Result<()> {
    let data_dir = default_data_dir()?;
    let socket_path = data_dir.join(SOCKET_FILE);
    run_with(data_dir, socket_path).await
}

/// Runs the daemon with explicit paths. Used directly by tests.
pub async fn run_with(data_dir: PathBuf, socket_path: PathBuf) -> Result<()> {
    let settings_store = SettingsStore::new(&data_dir);
    let settings = settings_store.load();
    let history = Arc::new(SessionHistoryStore::open(&data_dir));

    let (alarm, mut alarm_rx) = TokioAlarmScheduler::with_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let engine = Arc::new(Mutex::new(CountdownEngine::new(
        settings,
        Arc::new(SystemClock),
        Arc::new(alarm),
        Arc::new(DesktopPresenter::new()),
        create_player(),
        history.clone(),
        event_tx,
    )));

    let server = IpcServer::new(&socket_path)?;
    let handler = Arc::new(RequestHandler::new(
        engine.clone(),
        history,
        settings_store,
    ));

    info!("デーモンを開始しました: {:?}", server.socket_path());

    let mut ticker = interval(Duration::from_millis(TICK_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                engine.lock().await.handle_tick();
            }
            Some(()) = alarm_rx.recv() => {
                // Same wall-clock re-evaluation as a tick; the alarm only
                // guarantees the loop wakes at the end instant
                engine.lock().await.handle_tick();
            }
            Some(event) = event_rx.recv() => {
                log_event(&event);
            }
            conn = server.accept() => {
                match conn {
                    Ok(stream) => {
                        let handler = handler.clone();
                        tokio::spawn(serve_connection(stream, handler));
                    }
                    Err(e) => warn!("接続の受け付けに失敗しました: {}", e),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("シャットダウンします");
                break;
            }
        }
    }

    Ok(())
}

/// Handles one client connection: one request, one response.
async fn serve_connection(mut stream: tokio::net::UnixStream, handler: Arc<RequestHandler>) {
    match IpcServer::receive_request(&mut stream).await {
        Ok(request) => {
            debug!("Request: {:?}", request);
            let response = handler.handle(request).await;
            if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
                warn!("応答の送信に失敗しました: {}", e);
            }
        }
        Err(e) => {
            warn!("リクエストの読み取りに失敗しました: {}", e);
            let response = IpcResponse::error(format!("不正なリクエストです: {}", e));
            let _ = IpcServer::send_response(&mut stream, &response).await;
        }
    }
}

/// Logs engine events. Ticks are trace-level so normal runs stay quiet.
fn log_event(event: &TimerEvent) {
    match event {
        TimerEvent::Started { remaining, .. } => {
            info!("タイマー開始: 残り{}秒", remaining.as_secs());
        }
        TimerEvent::Paused { remaining } => {
            info!("一時停止: 残り{}秒", remaining.as_secs());
        }
        TimerEvent::Reset => info!("リセットしました"),
        TimerEvent::Ticked { remaining } => {
            trace!("tick: {}ms remaining", remaining.as_millis());
        }
        TimerEvent::Completed { total } => {
            info!("タイマー終了: {}秒", total.as_secs());
        }
        TimerEvent::Snoozed { duration } => {
            info!("スヌーズ: {}秒", duration.as_secs());
        }
        TimerEvent::Dismissed => debug!("完了を確認しました"),
        TimerEvent::DurationSet { total } => {
            debug!("時間を設定: {}秒", total.as_secs());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
