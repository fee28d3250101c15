//! プレビュー状態とObject URLの管理

use doc_extract_common::PreviewKind;
use web_sys::File;

/// プレビュー領域の表示内容
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewState {
    Empty,
    Image(String),
    Pdf(String),
    Unsupported,
}

impl PreviewState {
    /// 選択ファイルからプレビューを作成（Object URLを発行）
    pub fn for_file(file: &File) -> Self {
        let kind = PreviewKind::detect(&file.type_(), &file.name());
        if kind == PreviewKind::Unsupported {
            return PreviewState::Unsupported;
        }

        match web_sys::Url::create_object_url_with_blob(file) {
            Ok(url) if kind == PreviewKind::Image => PreviewState::Image(url),
            Ok(url) => PreviewState::Pdf(url),
            Err(e) => {
                gloo::console::warn!("object URL creation failed:", e);
                PreviewState::Unsupported
            }
        }
    }

    pub fn object_url(&self) -> Option<&str> {
        match self {
            PreviewState::Image(url) | PreviewState::Pdf(url) => Some(url),
            PreviewState::Empty | PreviewState::Unsupported => None,
        }
    }
}

/// Object URLを解放（解放済みでも無害）
pub fn revoke_object_url(url: &str) {
    web_sys::Url::revoke_object_url(url).ok();
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_file(name: &str, mime: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&JsValue::from_str("dummy"));
        let options = web_sys::FilePropertyBag::new();
        options.set_type(mime);
        File::new_with_str_sequence_and_options(&parts, name, &options).expect("File作成失敗")
    }

    #[wasm_bindgen_test]
    fn wasm_png_preview_is_image_blob_url() {
        let preview = PreviewState::for_file(&make_file("scan.png", "image/png"));
        match &preview {
            PreviewState::Image(url) => assert!(url.starts_with("blob:")),
            other => panic!("unexpected preview: {:?}", other),
        }
        revoke_object_url(preview.object_url().unwrap());
    }

    #[wasm_bindgen_test]
    fn wasm_pdf_preview_is_embed() {
        let preview = PreviewState::for_file(&make_file("invoice.pdf", "application/pdf"));
        assert!(matches!(preview, PreviewState::Pdf(_)));
    }

    #[wasm_bindgen_test]
    fn wasm_text_file_is_unsupported() {
        let preview = PreviewState::for_file(&make_file("notes.txt", "text/plain"));
        assert_eq!(preview, PreviewState::Unsupported);
        assert!(preview.object_url().is_none());
    }
}
