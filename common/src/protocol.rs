//! バックエンドとのリクエスト/レスポンス型
//!
//! バックエンド（OCR + LLM抽出サーバー）は不透明なHTTP協調者として扱う:
//! - POST /extract        : multipart（`file` フィールド）→ ExtractResponse
//! - POST /extract_prompt : JSON `{prompt}` → PromptResponse
//! - POST /reset          : 空ボディ（レスポンスは参照しない）
//!
//! バックエンドはエラー時も400/500でJSONボディを返すため、
//! HTTPステータスではなくボディの `error` フィールドで成否を判定する。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// アップロードファイルのmultipartフィールド名
pub const FILE_FIELD: &str = "file";

/// 抽出プロンプトを上書きするmultipartフィールド名（省略時はサーバー既定）
pub const PROMPT_FIELD: &str = "prompt";

/// バックエンドのエンドポイント（すべてPOST）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Extract,
    ExtractPrompt,
    Reset,
}

impl Endpoint {
    /// ページと同一オリジンでの相対パス
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Extract => "/extract",
            Endpoint::ExtractPrompt => "/extract_prompt",
            Endpoint::Reset => "/reset",
        }
    }

    /// ベースURLと結合した絶対URL
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

/// /extract のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractResponse {
    pub ocr_text: Option<String>,
    /// LLM出力（オブジェクトの場合も文字列の場合もある）
    pub llm_output: Option<Value>,
    pub timing: Option<Timing>,
    pub error: Option<String>,
}

/// 処理時間（秒）
///
/// 成功時は数値、LLM失敗時はサーバーが `"--"` を返すため生のJSON値で保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub ocr_seconds: Option<Value>,
    pub llm_seconds: Option<Value>,
}

/// /extract_prompt のリクエストボディ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

/// /extract_prompt のレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptResponse {
    pub llm_output: Option<Value>,
    pub llm_seconds: Option<Value>,
    pub error: Option<String>,
}

impl ExtractResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

impl PromptResponse {
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }
}

/// ファイル名からmultipartパートのMIMEタイプを推定
pub fn mime_for_file_name(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".pdf") {
        "application/pdf"
    } else {
        "application/octet-stream"
    }
}

/// バックエンドが受け付ける拡張子か（png/jpg/jpeg/pdf）
pub fn is_supported_upload(file_name: &str) -> bool {
    mime_for_file_name(file_name) != "application/octet-stream"
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Extract.path(), "/extract");
        assert_eq!(Endpoint::ExtractPrompt.path(), "/extract_prompt");
        assert_eq!(Endpoint::Reset.path(), "/reset");
    }

    #[test]
    fn test_endpoint_url_joins_single_slash() {
        assert_eq!(Endpoint::Reset.url("http://localhost:8080"), "http://localhost:8080/reset");
        assert_eq!(Endpoint::Reset.url("http://localhost:8080/"), "http://localhost:8080/reset");
    }

    #[test]
    fn test_parse_extract_success() {
        let body = r#"{
            "ocr_text": "hello",
            "llm_output": {"name": "x"},
            "timing": {"ocr_seconds": 1.2, "llm_seconds": 0.8}
        }"#;
        let resp = ExtractResponse::from_json(body).expect("パース失敗");

        assert_eq!(resp.ocr_text.as_deref(), Some("hello"));
        assert_eq!(resp.llm_output, Some(json!({"name": "x"})));
        let timing = resp.timing.expect("timingなし");
        assert_eq!(timing.ocr_seconds, Some(json!(1.2)));
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_parse_extract_error_body() {
        let resp = ExtractResponse::from_json(r#"{"error": "No file uploaded"}"#).expect("パース失敗");
        assert_eq!(resp.error.as_deref(), Some("No file uploaded"));
        assert!(resp.ocr_text.is_none());
        assert!(resp.timing.is_none());
    }

    #[test]
    fn test_parse_timing_with_placeholder_string() {
        let body = r#"{"ocr_text": "t", "llm_output": {"error": "throttled"},
                       "timing": {"ocr_seconds": 2.5, "llm_seconds": "--"}}"#;
        let resp = ExtractResponse::from_json(body).expect("パース失敗");
        assert_eq!(resp.timing.and_then(|t| t.llm_seconds), Some(json!("--")));
    }

    #[test]
    fn test_parse_non_json_body_fails() {
        let result = ExtractResponse::from_json("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }

    #[test]
    fn test_prompt_request_body() {
        let body = serde_json::to_string(&PromptRequest { prompt: "list totals".into() }).unwrap();
        assert_eq!(body, r#"{"prompt":"list totals"}"#);
    }

    #[test]
    fn test_parse_prompt_response() {
        let resp = PromptResponse::from_json(r#"{"llm_output": "{\"a\":1}", "llm_seconds": 0.4}"#)
            .expect("パース失敗");
        assert_eq!(resp.llm_output, Some(json!("{\"a\":1}")));
        assert_eq!(resp.llm_seconds, Some(json!(0.4)));
    }

    #[test]
    fn test_mime_for_file_name() {
        assert_eq!(mime_for_file_name("scan.PNG"), "image/png");
        assert_eq!(mime_for_file_name("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_file_name("invoice.pdf"), "application/pdf");
        assert_eq!(mime_for_file_name("mail.eml"), "application/octet-stream");
    }

    #[test]
    fn test_is_supported_upload() {
        assert!(is_supported_upload("a.jpg"));
        assert!(is_supported_upload("B.PDF"));
        assert!(!is_supported_upload("notes.txt"));
    }
}
