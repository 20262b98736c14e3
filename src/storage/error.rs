//! Storage error types.

use thiserror::Error;

/// Errors that can occur while persisting settings or session history.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The data directory could not be determined or created.
    #[error("データディレクトリを利用できません: {0}")]
    DataDirUnavailable(String),

    /// A store file could not be read.
    #[error("ファイルの読み込みに失敗しました: {0}")]
    ReadFailed(String),

    /// A store file could not be written.
    #[error("ファイルの書き込みに失敗しました: {0}")]
    WriteFailed(String),

    /// Stored JSON could not be parsed.
    #[error("保存データの解析に失敗しました: {0}")]
    ParseFailed(String),
}
