//! 表示領域の描画ロジック
//!
//! レスポンスを受け取り各表示領域の文字列を返す純粋関数群。
//! DOMを持たないため、ページとCLIの両方で同じ結果を検証できる。

use serde_json::Value;

use crate::pretty::{number_text, pretty_print_json};
use crate::protocol::{ExtractResponse, PromptResponse};

/// 時間未取得時の表示
pub const NO_TIMING: &str = "--";
/// OCRテキストが空の場合の表示
pub const NO_OCR_TEXT: &str = "(No OCR text)";
/// LLMエラー詳細が無い場合の表示
pub const UNKNOWN_LLM_ERROR: &str = "Unknown";

pub const EXTRACTING_TEXT: &str = "Extracting text...";
pub const EXTRACTING_FIELDS: &str = "Extracting fields...";
pub const SENDING_PROMPT: &str = "Sending prompt to LLM...";

/// 4つのテキスト表示領域
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    pub ocr_text: String,
    pub json_output: String,
    pub ocr_timer: String,
    pub llm_timer: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::cleared()
    }
}

impl DisplayState {
    /// リセット直後の表示
    pub fn cleared() -> Self {
        Self {
            ocr_text: String::new(),
            json_output: "{}".to_string(),
            ocr_timer: NO_TIMING.to_string(),
            llm_timer: NO_TIMING.to_string(),
        }
    }

    /// 差分を適用（`None` の領域は変更しない）
    pub fn apply(&mut self, patch: &DisplayPatch) {
        if let Some(text) = &patch.ocr_text {
            self.ocr_text = text.clone();
        }
        if let Some(text) = &patch.json_output {
            self.json_output = text.clone();
        }
        if let Some(text) = &patch.ocr_timer {
            self.ocr_timer = text.clone();
        }
        if let Some(text) = &patch.llm_timer {
            self.llm_timer = text.clone();
        }
    }
}

/// 表示の差分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayPatch {
    pub ocr_text: Option<String>,
    pub json_output: Option<String>,
    pub ocr_timer: Option<String>,
    pub llm_timer: Option<String>,
}

impl DisplayPatch {
    /// 全領域をリセット値で上書きする差分
    pub fn reset() -> Self {
        let cleared = DisplayState::cleared();
        Self {
            ocr_text: Some(cleared.ocr_text),
            json_output: Some(cleared.json_output),
            ocr_timer: Some(cleared.ocr_timer),
            llm_timer: Some(cleared.llm_timer),
        }
    }
}

/// /extract 送信中のプレースホルダー
pub fn extract_pending() -> DisplayPatch {
    DisplayPatch {
        ocr_text: Some(EXTRACTING_TEXT.to_string()),
        json_output: Some(EXTRACTING_FIELDS.to_string()),
        ..Default::default()
    }
}

/// /extract レスポンスの描画
///
/// エラー時はタイマーを変更しない。
pub fn extract_result(resp: &ExtractResponse) -> DisplayPatch {
    if let Some(error) = resp.error.as_deref().filter(|e| !e.is_empty()) {
        let llm_error = resp
            .llm_output
            .as_ref()
            .and_then(|output| output.get("error"))
            .and_then(truthy_text)
            .unwrap_or_else(|| UNKNOWN_LLM_ERROR.to_string());

        return DisplayPatch {
            ocr_text: Some(format!("OCR Failed: {}", error)),
            json_output: Some(format!("LLM Error: {}", llm_error)),
            ..Default::default()
        };
    }

    let ocr_text = resp
        .ocr_text
        .clone()
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_OCR_TEXT.to_string());
    let timing = resp.timing.as_ref();

    DisplayPatch {
        ocr_text: Some(ocr_text),
        json_output: Some(render_llm_output(resp.llm_output.as_ref())),
        ocr_timer: Some(display_seconds(timing.and_then(|t| t.ocr_seconds.as_ref()))),
        llm_timer: Some(display_seconds(timing.and_then(|t| t.llm_seconds.as_ref()))),
    }
}

/// /extract_prompt 送信中のプレースホルダー
pub fn prompt_pending() -> DisplayPatch {
    DisplayPatch {
        json_output: Some(SENDING_PROMPT.to_string()),
        ..Default::default()
    }
}

/// /extract_prompt レスポンスの描画（OCR領域は変更しない）
pub fn prompt_result(resp: &PromptResponse) -> DisplayPatch {
    if let Some(error) = resp.error.as_deref().filter(|e| !e.is_empty()) {
        return DisplayPatch {
            json_output: Some(format!("LLM Error: {}", error)),
            ..Default::default()
        };
    }

    DisplayPatch {
        json_output: Some(render_llm_output(resp.llm_output.as_ref())),
        llm_timer: Some(display_seconds(resp.llm_seconds.as_ref())),
        ..Default::default()
    }
}

/// 通信・パース失敗時の描画（プレースホルダーのまま放置しない）
pub fn transport_failure(message: &str) -> DisplayPatch {
    DisplayPatch {
        json_output: Some(format!("Request failed: {}", message)),
        ..Default::default()
    }
}

/// 秒数の表示文字列
///
/// 欠落・null・0・空文字・false は `"--"`。
pub fn display_seconds(value: Option<&Value>) -> String {
    value
        .and_then(truthy_text)
        .unwrap_or_else(|| NO_TIMING.to_string())
}

fn render_llm_output(output: Option<&Value>) -> String {
    output.map(pretty_print_json).unwrap_or_default()
}

/// 真とみなせる値をテキスト化（偽値は `None`）
fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(number_text(n)),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Timing;
    use serde_json::json;

    fn rendered(patch: &DisplayPatch) -> DisplayState {
        let mut state = DisplayState::cleared();
        state.apply(patch);
        state
    }

    #[test]
    fn test_cleared_state() {
        let state = DisplayState::cleared();
        assert_eq!(state.ocr_text, "");
        assert_eq!(state.json_output, "{}");
        assert_eq!(state.ocr_timer, "--");
        assert_eq!(state.llm_timer, "--");
    }

    #[test]
    fn test_extract_success() {
        let resp = ExtractResponse {
            ocr_text: Some("hello".into()),
            llm_output: Some(json!({"name": "x"})),
            timing: Some(Timing {
                ocr_seconds: Some(json!(1.2)),
                llm_seconds: Some(json!(0.8)),
            }),
            error: None,
        };
        let state = rendered(&extract_result(&resp));

        assert_eq!(state.ocr_text, "hello");
        assert_eq!(state.json_output, "{\n  \"name\": \"x\"\n}");
        assert_eq!(state.ocr_timer, "1.2");
        assert_eq!(state.llm_timer, "0.8");
    }

    #[test]
    fn test_extract_error_without_llm_detail() {
        let resp = ExtractResponse {
            error: Some("bad scan".into()),
            ..Default::default()
        };
        let patch = extract_result(&resp);

        assert_eq!(patch.ocr_text.as_deref(), Some("OCR Failed: bad scan"));
        assert_eq!(patch.json_output.as_deref(), Some("LLM Error: Unknown"));
        assert!(patch.ocr_timer.is_none());
        assert!(patch.llm_timer.is_none());
    }

    #[test]
    fn test_extract_error_with_llm_detail() {
        let resp = ExtractResponse {
            error: Some("OCR failed: timeout".into()),
            llm_output: Some(json!({"error": "model unavailable"})),
            ..Default::default()
        };
        let patch = extract_result(&resp);
        assert_eq!(patch.json_output.as_deref(), Some("LLM Error: model unavailable"));
    }

    #[test]
    fn test_extract_error_keeps_previous_timers() {
        let mut state = DisplayState::cleared();
        state.ocr_timer = "3.1".into();
        state.llm_timer = "1.7".into();

        state.apply(&extract_result(&ExtractResponse {
            error: Some("bad scan".into()),
            ..Default::default()
        }));

        assert_eq!(state.ocr_timer, "3.1");
        assert_eq!(state.llm_timer, "1.7");
    }

    #[test]
    fn test_extract_fallbacks() {
        let resp = ExtractResponse {
            ocr_text: Some(String::new()),
            llm_output: Some(json!("plain answer")),
            timing: None,
            error: Some(String::new()),
        };
        let state = rendered(&extract_result(&resp));

        assert_eq!(state.ocr_text, "(No OCR text)");
        assert_eq!(state.json_output, "plain answer");
        assert_eq!(state.ocr_timer, "--");
        assert_eq!(state.llm_timer, "--");
    }

    #[test]
    fn test_extract_llm_failure_timing_placeholder() {
        let resp = ExtractResponse {
            ocr_text: Some("text".into()),
            llm_output: Some(json!({"error": "throttled"})),
            timing: Some(Timing {
                ocr_seconds: Some(json!(2.0)),
                llm_seconds: Some(json!("--")),
            }),
            error: None,
        };
        let state = rendered(&extract_result(&resp));

        assert_eq!(state.json_output, "{\n  \"error\": \"throttled\"\n}");
        assert_eq!(state.ocr_timer, "2");
        assert_eq!(state.llm_timer, "--");
    }

    #[test]
    fn test_pending_placeholders() {
        let state = rendered(&extract_pending());
        assert_eq!(state.ocr_text, "Extracting text...");
        assert_eq!(state.json_output, "Extracting fields...");

        let patch = prompt_pending();
        assert_eq!(patch.json_output.as_deref(), Some("Sending prompt to LLM..."));
        assert!(patch.ocr_text.is_none());
    }

    #[test]
    fn test_prompt_success() {
        let resp = PromptResponse {
            llm_output: Some(json!("{\"total\":\"12.00\"}")),
            llm_seconds: Some(json!(0.45)),
            error: None,
        };
        let mut state = DisplayState::cleared();
        state.ocr_text = "kept".into();
        state.apply(&prompt_result(&resp));

        assert_eq!(state.ocr_text, "kept");
        assert_eq!(state.json_output, "{\n  \"total\": \"12.00\"\n}");
        assert_eq!(state.llm_timer, "0.45");
    }

    #[test]
    fn test_prompt_error() {
        let resp = PromptResponse {
            error: Some("No OCR cache found. Please extract a document first.".into()),
            ..Default::default()
        };
        let patch = prompt_result(&resp);
        assert_eq!(
            patch.json_output.as_deref(),
            Some("LLM Error: No OCR cache found. Please extract a document first.")
        );
        assert!(patch.llm_timer.is_none());
    }

    #[test]
    fn test_transport_failure() {
        let patch = transport_failure("connection refused");
        assert_eq!(patch.json_output.as_deref(), Some("Request failed: connection refused"));
        assert!(patch.ocr_text.is_none());
    }

    #[test]
    fn test_reset_patch_restores_cleared() {
        let mut state = rendered(&extract_pending());
        state.apply(&DisplayPatch::reset());
        assert_eq!(state, DisplayState::cleared());
    }

    #[test]
    fn test_display_seconds() {
        assert_eq!(display_seconds(Some(&json!(1.2))), "1.2");
        assert_eq!(display_seconds(Some(&json!(3))), "3");
        assert_eq!(display_seconds(Some(&json!(4.0))), "4");
        assert_eq!(display_seconds(Some(&json!("--"))), "--");
        assert_eq!(display_seconds(Some(&json!(0))), "--");
        assert_eq!(display_seconds(Some(&json!(null))), "--");
        assert_eq!(display_seconds(None), "--");
    }

    #[test]
    fn test_display_seconds_large_integral_float() {
        assert_eq!(display_seconds(Some(&json!(1e16))), "10000000000000000");
        assert_eq!(display_seconds(Some(&json!(123456789012345.0))), "123456789012345");
    }

    #[test]
    fn test_extract_result_integral_llm_numbers() {
        let resp = ExtractResponse::from_json(
            r#"{"ocr_text": "t", "llm_output": "{\"total\": 100.0}", "timing": {"ocr_seconds": 2.0, "llm_seconds": 1.5}}"#,
        )
        .unwrap();
        let state = rendered(&extract_result(&resp));
        assert_eq!(state.json_output, "{\n  \"total\": 100\n}");
        assert_eq!(state.ocr_timer, "2");
    }
}
