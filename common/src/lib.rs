//! Document Extractor Common Library
//!
//! CLIとWeb(WASM)で共有される型とユーティリティ。
//! DOMに依存しない純粋関数のみを置き、両フロントエンドから同じ表示結果を得る。

pub mod protocol;
pub mod pretty;
pub mod render;
pub mod preview;
pub mod sequence;
pub mod input;
pub mod download;
pub mod error;

pub use protocol::{
    Endpoint, ExtractResponse, PromptRequest, PromptResponse, Timing,
    is_supported_upload, mime_for_file_name, FILE_FIELD, PROMPT_FIELD,
};
pub use pretty::pretty_print_json;
pub use render::{DisplayPatch, DisplayState, display_seconds};
pub use preview::PreviewKind;
pub use sequence::{Operation, RequestSequence, ResponseGate, Ticket};
pub use input::{InputError, require_file, validate_prompt};
pub use download::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};
pub use error::{Error, Result};
