use crate::error::{DocExtractError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// サーバーURLを上書きする環境変数
pub const SERVER_ENV: &str = "DOC_EXTRACT_SERVER";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            // OCR + LLMは数分かかることがある
            timeout_seconds: 300,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DocExtractError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("doc-extract").join("config.json"))
    }

    /// 接続先URLを決定（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_server(&self, cli_server: Option<&str>) -> Result<String> {
        let env_server = std::env::var(SERVER_ENV).ok();
        let server = cli_server
            .map(str::to_string)
            .or(env_server.filter(|s| !s.trim().is_empty()))
            .unwrap_or_else(|| self.server_url.clone());
        validate_server_url(&server)?;
        Ok(server)
    }

    pub fn set_server_url(&mut self, url: String) -> Result<()> {
        validate_server_url(&url)?;
        self.server_url = url;
        Ok(())
    }
}

fn validate_server_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(DocExtractError::InvalidServerUrl(url.to_string()))
    }
}
