//! Display utilities for the OKTimer CLI.
//!
//! This module provides formatted output for:
//! - Success messages
//! - Error messages
//! - Status, history and settings display

use crate::types::{IpcResponse, SessionRecord};

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows a success message for countdown start/resume.
    pub fn show_start_success(response: &IpcResponse) {
        println!("> {}", response.message);

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                println!("  残り時間: {}", Self::format_time(remaining));
            }
        }
    }

    /// Shows a success message for countdown pause.
    pub fn show_pause_success(response: &IpcResponse) {
        println!("|| {}", response.message);

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                println!("  残り時間: {}", Self::format_time(remaining));
            }
        }
    }

    /// Shows a success message for reset.
    pub fn show_reset_success(response: &IpcResponse) {
        println!("[] {}", response.message);
    }

    /// Shows a success message for snooze.
    pub fn show_snooze_success(response: &IpcResponse) {
        println!("> {}", response.message);

        if let Some(data) = &response.data {
            if let Some(remaining) = data.remaining_seconds {
                println!("  残り時間: {}", Self::format_time(remaining));
            }
        }
    }

    /// Shows a success message for dismiss.
    pub fn show_dismiss_success(response: &IpcResponse) {
        println!("* {}", response.message);
    }

    /// Shows a success message for duration changes.
    pub fn show_set_success(response: &IpcResponse) {
        println!("* {}", response.message);

        if let Some(data) = &response.data {
            if let Some(total) = data.total_seconds {
                println!("  時間: {}", Self::format_time(total));
            }
        }
    }

    /// Shows the current countdown status.
    pub fn show_status(response: &IpcResponse) {
        println!("OKTimer ステータス");
        println!("─────────────────────────────");

        let Some(data) = &response.data else {
            println!("タイマーは起動していません");
            return;
        };

        let state = data.state.as_deref().unwrap_or("unknown");
        let state_display = match state {
            "idle" => "待機中",
            "running" => "カウントダウン中",
            "paused" => "一時停止中",
            "completed" => "完了",
            _ => state,
        };
        println!("状態: {}", state_display);

        if let Some(remaining) = data.remaining_seconds {
            println!("残り時間: {}", Self::format_time(remaining));
        }
        if let (Some(total), Some(progress)) = (data.total_seconds, data.progress) {
            println!(
                "経過: {:.0}% (設定 {})",
                progress * 100.0,
                Self::format_time(total)
            );
        }
    }

    /// Shows the session history and statistics.
    pub fn show_history(response: &IpcResponse, limit: usize) {
        println!("セッション履歴");
        println!("─────────────────────────────");

        let Some(data) = &response.data else {
            println!("履歴はありません");
            return;
        };

        match &data.sessions {
            Some(sessions) if !sessions.is_empty() => {
                for session in sessions.iter().take(limit) {
                    Self::show_session(session);
                }
                if sessions.len() > limit {
                    println!("  ... 他 {} 件", sessions.len() - limit);
                }
            }
            _ => println!("履歴はありません"),
        }

        if let Some(stats) = &data.stats {
            println!();
            println!("完了: {} 回", stats.completed_count);
            println!("合計時間: {}", Self::format_time(stats.total_secs));
            println!("平均時間: {}", Self::format_time(stats.average_secs));
        }
    }

    /// Shows one history record.
    fn show_session(session: &SessionRecord) {
        let mark = if session.was_completed { "*" } else { "x" };
        println!(
            "  {} {}  {} ({})",
            mark,
            session.completed_at.format("%m/%d %H:%M"),
            session.formatted_duration(),
            if session.was_completed {
                "完了"
            } else {
                "中断"
            }
        );
    }

    /// Shows the current settings.
    pub fn show_config(response: &IpcResponse) {
        if !response.message.is_empty() {
            println!("* {}", response.message);
        }

        let Some(settings) = response.data.as_ref().and_then(|d| d.settings.as_ref()) else {
            return;
        };

        println!("サウンド: {}", if settings.sound_enabled { "on" } else { "off" });
        println!(
            "ティック音: {}",
            if settings.tick_sound_enabled { "on" } else { "off" }
        );
        println!(
            "デフォルト時間: {}",
            Self::format_time(settings.default_duration_secs)
        );
        println!("スヌーズ時間: {}", Self::format_time(settings.snooze_secs));
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }

    /// Formats seconds as "M:SS", or "H:MM:SS" above an hour.
    fn format_time(total_seconds: u64) -> String {
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;
        if hours > 0 {
            format!("{}:{:02}:{:02}", hours, minutes, seconds)
        } else {
            format!("{}:{:02}", minutes, seconds)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
