// Debug logging module for asynchronous decision logging
//
// Fire-and-forget async writes so the move response is never blocked on
// disk. Each turn's snapshot, phase, and chosen move land in a JSONL file
// that the replay tool can consume.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::policy::Decision;
use crate::types::Board;

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    phase: String,
    chosen_move: String,
    board: Board,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<Option<File>>> to allow concurrent async writes from
/// multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger. When enabled, the log file is opened
    /// (and truncated) synchronously at startup; writes stay async.
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(File::from_std(file)))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    pub fn log_move(&self, turn: i32, board: Board, decision: Decision) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();

        tokio::spawn(async move {
            Self::log_move_internal(file_handle, turn, board, decision).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(
        file_handle: Arc<Mutex<Option<File>>>,
        turn: i32,
        board: Board,
        decision: Decision,
    ) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            let entry = DebugLogEntry {
                turn,
                phase: decision.phase.as_str().to_string(),
                chosen_move: decision.direction.as_str().to_string(),
                board,
                timestamp: chrono::Utc::now().to_rfc3339(),
            };

            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
