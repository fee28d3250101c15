//! バックエンドAPI連携

mod backend;

pub use backend::{extract, extract_prompt, reset};
