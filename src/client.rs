//! バックエンドHTTPクライアント
//!
//! バックエンドは失敗時も400/500でJSONのエラーボディを返すため、
//! ステータスコードではなくボディをそのままパースして返す。

use crate::error::{DocExtractError, Result};
use doc_extract_common::{
    is_supported_upload, mime_for_file_name, validate_prompt, Endpoint, ExtractResponse,
    PromptRequest, PromptResponse, FILE_FIELD, PROMPT_FIELD,
};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    /// ファイルをアップロードしOCR + フィールド抽出
    ///
    /// `prompt` を指定するとサーバー既定の抽出プロンプトを上書きする。
    pub async fn extract(&self, path: &Path, prompt: Option<&str>) -> Result<ExtractResponse> {
        if !path.is_file() {
            return Err(DocExtractError::FileNotFound(path.display().to_string()));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload".to_string());
        if !is_supported_upload(&file_name) {
            log::warn!("{} はサーバーが受け付けない可能性があります（png/jpg/jpeg/pdf）", file_name);
        }

        let bytes = tokio::fs::read(path).await?;
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime_for_file_name(&file_name))?;
        let mut form = Form::new().part(FILE_FIELD, part);
        if let Some(prompt) = prompt {
            form = form.text(PROMPT_FIELD, prompt.to_string());
        }

        let url = Endpoint::Extract.url(&self.base_url);
        log::debug!("POST {} file={}", url, file_name);
        let resp = self.http.post(&url).multipart(form).send().await?;
        log::debug!("{} -> {}", url, resp.status());

        let body = resp.text().await?;
        Ok(ExtractResponse::from_json(&body)?)
    }

    /// 直前にOCRしたテキストに対してカスタムプロンプトを実行
    pub async fn extract_prompt(&self, prompt: &str) -> Result<PromptResponse> {
        let prompt = validate_prompt(prompt)?;
        let request = PromptRequest {
            prompt: prompt.to_string(),
        };

        let url = Endpoint::ExtractPrompt.url(&self.base_url);
        log::debug!("POST {} prompt_len={}", url, prompt.len());
        let resp = self.http.post(&url).json(&request).send().await?;
        log::debug!("{} -> {}", url, resp.status());

        let body = resp.text().await?;
        Ok(PromptResponse::from_json(&body)?)
    }

    /// サーバー側のOCRキャッシュとアップロードを破棄（ボディは参照しない）
    pub async fn reset(&self) -> Result<()> {
        let url = Endpoint::Reset.url(&self.base_url);
        log::debug!("POST {}", url);
        let resp = self.http.post(&url).send().await?;
        log::debug!("{} -> {}", url, resp.status());
        Ok(())
    }
}
