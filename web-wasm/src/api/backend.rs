//! /extract, /extract_prompt, /reset の呼び出し
//!
//! ページはバックエンドと同一オリジンで配信されるため相対パスで送信する。
//! バックエンドは400/500でもJSONのエラーボディを返すので、
//! `resp.ok()` は見ずにボディを常にパースする。

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, Response};
use doc_extract_common::{
    Endpoint, Error, ExtractResponse, PromptRequest, PromptResponse, Result, FILE_FIELD,
};

/// POST送信（共通処理）
async fn post(
    endpoint: Endpoint,
    body: Option<&JsValue>,
    content_type: Option<&str>,
) -> std::result::Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    if let Some(body) = body {
        opts.set_body(body);
    }

    let request = Request::new_with_str_and_init(endpoint.path(), &opts)?;
    if let Some(content_type) = content_type {
        request.headers().set("Content-Type", content_type)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;
    Ok(resp)
}

async fn read_body(resp: &Response) -> std::result::Result<String, JsValue> {
    let text = JsFuture::from(resp.text()?).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("Response body is not text"))
}

/// `web_sys` 側の失敗を通信エラーに変換
fn transport(err: JsValue) -> Error {
    Error::Transport(describe_error(&err))
}

/// JsValueのエラーを表示用文字列に変換
fn describe_error(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// ファイルをmultipartで送信しOCR + フィールド抽出を行う
pub async fn extract(file: &File) -> Result<ExtractResponse> {
    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename(FILE_FIELD, file, &file.name())
        .map_err(transport)?;

    // Content-Typeはブラウザがboundary付きで設定する
    let resp = post(Endpoint::Extract, Some(form.as_ref()), None)
        .await
        .map_err(transport)?;
    let body = read_body(&resp).await.map_err(transport)?;
    ExtractResponse::from_json(&body)
}

/// キャッシュ済みOCRテキストに対してカスタムプロンプトを実行
pub async fn extract_prompt(prompt: &str) -> Result<PromptResponse> {
    let request = PromptRequest { prompt: prompt.to_string() };
    let body = serde_json::to_string(&request)?;

    let resp = post(
        Endpoint::ExtractPrompt,
        Some(&JsValue::from_str(&body)),
        Some("application/json"),
    )
    .await
    .map_err(transport)?;
    let body = read_body(&resp).await.map_err(transport)?;
    PromptResponse::from_json(&body)
}

/// バックエンドのキャッシュとアップロードを破棄（レスポンスは参照しない）
pub async fn reset() -> Result<()> {
    post(Endpoint::Reset, None, None)
        .await
        .map(|_| ())
        .map_err(transport)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_fetch_failure_is_transport_error() {
        let err = transport(JsValue::from_str("Failed to fetch"));
        assert!(matches!(&err, Error::Transport(m) if m == "Failed to fetch"));
        assert_eq!(err.to_string(), "Transport error: Failed to fetch");
    }

    #[wasm_bindgen_test]
    fn wasm_non_string_failure_is_described() {
        let err = transport(JsValue::from_f64(404.0));
        assert!(err.to_string().starts_with("Transport error: "));
    }

    #[wasm_bindgen_test]
    fn wasm_html_body_is_json_error() {
        let err = ExtractResponse::from_json("<html>").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
