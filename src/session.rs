//! 端末版の表示セッション
//!
//! ページと同じ描画関数で `DisplayState` を更新する。
//! 通信に失敗した場合も表示を更新してからエラーを返す。

use crate::client::BackendClient;
use crate::error::{DocExtractError, Result};
use doc_extract_common::render;
use doc_extract_common::{DisplayPatch, DisplayState, DOWNLOAD_FILE_NAME};
use std::path::{Path, PathBuf};

pub struct Session {
    client: BackendClient,
    display: DisplayState,
}

impl Session {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            display: DisplayState::cleared(),
        }
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub async fn extract(&mut self, path: &Path, prompt: Option<&str>) -> Result<&DisplayState> {
        if !path.is_file() {
            return Err(DocExtractError::FileNotFound(path.display().to_string()));
        }

        self.display.apply(&render::extract_pending());
        let resp = self.client.extract(path, prompt).await;
        self.settle(resp, render::extract_result)?;
        Ok(&self.display)
    }

    pub async fn prompt(&mut self, prompt: &str) -> Result<&DisplayState> {
        doc_extract_common::validate_prompt(prompt)?;

        self.display.apply(&render::prompt_pending());
        let resp = self.client.extract_prompt(prompt).await;
        self.settle(resp, render::prompt_result)?;
        Ok(&self.display)
    }

    pub async fn reset(&mut self) -> Result<()> {
        self.display.apply(&DisplayPatch::reset());
        self.client.reset().await
    }

    /// 表示中のJSON出力をそのまま `extracted_data.json` に書き出す
    pub fn download(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(DOWNLOAD_FILE_NAME);
        std::fs::write(&path, &self.display.json_output)?;
        Ok(path)
    }

    fn settle<T>(&mut self, resp: Result<T>, render_fn: fn(&T) -> DisplayPatch) -> Result<()> {
        match resp {
            Ok(resp) => {
                self.display.apply(&render_fn(&resp));
                Ok(())
            }
            Err(err) => {
                self.display.apply(&render::transport_failure(&err.to_string()));
                Err(err)
            }
        }
    }
}
