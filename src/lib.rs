//! Document Extractor CLI
//!
//! OCR + LLM抽出バックエンドの端末クライアント。
//! 描画は Web 版と同じ `doc_extract_common::render` を使う。

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
