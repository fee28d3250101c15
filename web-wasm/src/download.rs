//! ブラウザダウンロード
//!
//! Blob → Object URL → 非表示の `<a download>` をクリック。
//! URLはダウンロード開始後に遅延して解放する。

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;

const REVOKE_DELAY_MS: u32 = 5_000;

/// テキストをファイルとしてダウンロード
pub fn download_text(filename: &str, content: &str, mime_type: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object available")?;
    let document = window.document().ok_or("No document available")?;
    let body = document.body().ok_or("No body element available")?;

    let url = blob_url(content, mime_type)?;
    let anchor = download_anchor(&document, &url, filename)?;

    body.append_child(&anchor).ok();
    anchor.click();
    body.remove_child(&anchor).ok();

    Timeout::new(REVOKE_DELAY_MS, move || {
        web_sys::Url::revoke_object_url(&url).ok();
    })
    .forget();

    Ok(())
}

/// テキストをBlobにしてObject URLを発行
fn blob_url(content: &str, mime_type: &str) -> Result<String, String> {
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&JsValue::from_str(content));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_str_sequence_and_options(&blob_parts, &options)
        .map_err(|e| format!("Failed to create Blob: {:?}", e))?;

    web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))
}

fn download_anchor(
    document: &web_sys::Document,
    url: &str,
    filename: &str,
) -> Result<web_sys::HtmlAnchorElement, String> {
    let anchor: web_sys::HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor element: {:?}", e))?
        .dyn_into()
        .map_err(|_| "Created element is not an anchor".to_string())?;

    anchor.set_href(url);
    anchor.set_download(filename);
    Ok(anchor)
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use doc_extract_common::{DOWNLOAD_FILE_NAME, DOWNLOAD_MIME};
    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const JSON_OUTPUT: &str = "{\n  \"total\": 100\n}";

    #[wasm_bindgen_test]
    fn wasm_anchor_carries_file_name_and_blob_url() {
        let document = web_sys::window().unwrap().document().unwrap();
        let url = blob_url(JSON_OUTPUT, DOWNLOAD_MIME).unwrap();

        let anchor = download_anchor(&document, &url, DOWNLOAD_FILE_NAME).unwrap();

        assert_eq!(anchor.get_attribute("download").as_deref(), Some("extracted_data.json"));
        assert!(anchor.href().starts_with("blob:"));
        web_sys::Url::revoke_object_url(&url).unwrap();
    }

    #[wasm_bindgen_test]
    async fn wasm_blob_holds_displayed_text() {
        let window = web_sys::window().unwrap();
        let url = blob_url(JSON_OUTPUT, DOWNLOAD_MIME).unwrap();

        let resp: web_sys::Response = JsFuture::from(window.fetch_with_str(&url))
            .await
            .unwrap()
            .dyn_into()
            .unwrap();
        let text = JsFuture::from(resp.text().unwrap()).await.unwrap();

        assert_eq!(text.as_string().as_deref(), Some(JSON_OUTPUT));
        web_sys::Url::revoke_object_url(&url).unwrap();
    }

    #[wasm_bindgen_test]
    fn wasm_download_text_does_not_leave_anchor() {
        download_text(DOWNLOAD_FILE_NAME, JSON_OUTPUT, DOWNLOAD_MIME).unwrap();

        let document = web_sys::window().unwrap().document().unwrap();
        assert!(document.query_selector("a[download]").unwrap().is_none());
    }
}
