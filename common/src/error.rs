//! エラー型定義

use thiserror::Error;

use crate::input::InputError;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
