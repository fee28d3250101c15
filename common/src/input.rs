//! ユーザー入力の検証
//!
//! 入力エラーはリクエスト送信前に検出し、その場でユーザーに通知する。

use thiserror::Error;

/// ユーザー入力エラー（アラート表示用メッセージを持つ）
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Please select a file.")]
    NoFile,

    #[error("Please enter a prompt.")]
    EmptyPrompt,
}

/// プロンプトをトリムし、空なら `EmptyPrompt` を返す
pub fn validate_prompt(prompt: &str) -> Result<&str, InputError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        Err(InputError::EmptyPrompt)
    } else {
        Ok(trimmed)
    }
}

/// ファイル未選択なら `NoFile` を返す
pub fn require_file<T>(file: Option<T>) -> Result<T, InputError> {
    file.ok_or(InputError::NoFile)
}
