use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocExtractError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("サーバーURLが不正です: {0}")]
    InvalidServerUrl(String),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] doc_extract_common::Error),
}

impl From<doc_extract_common::InputError> for DocExtractError {
    fn from(err: doc_extract_common::InputError) -> Self {
        DocExtractError::Common(err.into())
    }
}

pub type Result<T> = std::result::Result<T, DocExtractError>;
