//! ファイルプレビュー
//!
//! Object URLは要素の読み込み完了時に解放する。

use leptos::prelude::*;
use doc_extract_common::preview::{NO_FILE_SELECTED, PDF_PREVIEW_HEIGHT, UNSUPPORTED_PREVIEW};
use crate::preview::{revoke_object_url, PreviewState};

#[component]
pub fn PreviewPane(preview: ReadSignal<PreviewState>) -> impl IntoView {
    view! {
        <div class="preview" id="preview">
            {move || match preview.get() {
                PreviewState::Empty => view! {
                    <p class="text-muted">{NO_FILE_SELECTED}</p>
                }.into_any(),
                PreviewState::Unsupported => view! {
                    <p class="text-muted">{UNSUPPORTED_PREVIEW}</p>
                }.into_any(),
                PreviewState::Image(url) => {
                    let src = url.clone();
                    view! {
                        <img
                            src=src
                            style="max-width: 100%"
                            on:load=move |_| revoke_object_url(&url)
                        />
                    }.into_any()
                }
                PreviewState::Pdf(url) => {
                    let src = url.clone();
                    view! {
                        <embed
                            src=src
                            type="application/pdf"
                            width="100%"
                            height=PDF_PREVIEW_HEIGHT
                            on:load=move |_| revoke_object_url(&url)
                        />
                    }.into_any()
                }
            }}
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use leptos::mount::mount_to;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// 新しいコンテナにプレビューを描画して返す
    fn render(state: PreviewState) -> web_sys::HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let host: web_sys::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&host).unwrap();

        let handle = mount_to(host.clone(), move || {
            let (preview, _) = signal(state);
            view! { <PreviewPane preview=preview /> }
        });
        handle.forget();
        host
    }

    #[wasm_bindgen_test]
    fn wasm_pdf_renders_embed() {
        let host = render(PreviewState::Pdf("blob:http://localhost/pdf".to_string()));

        let embed = host.query_selector("#preview embed").unwrap().expect("embed要素が無い");
        assert_eq!(embed.get_attribute("type").as_deref(), Some("application/pdf"));
        assert_eq!(embed.get_attribute("src").as_deref(), Some("blob:http://localhost/pdf"));
        assert_eq!(embed.get_attribute("width").as_deref(), Some("100%"));
        assert_eq!(embed.get_attribute("height").as_deref(), Some(PDF_PREVIEW_HEIGHT));
        assert!(host.query_selector("#preview img").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn wasm_image_renders_img_with_blob_src() {
        let host = render(PreviewState::Image("blob:http://localhost/img".to_string()));

        let img = host.query_selector("#preview img").unwrap().expect("img要素が無い");
        assert_eq!(img.get_attribute("src").as_deref(), Some("blob:http://localhost/img"));
        assert!(host.query_selector("#preview embed").unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn wasm_messages_for_empty_and_unsupported() {
        let empty = render(PreviewState::Empty);
        assert_eq!(empty.text_content().as_deref(), Some(NO_FILE_SELECTED));

        let unsupported = render(PreviewState::Unsupported);
        assert_eq!(unsupported.text_content().as_deref(), Some(UNSUPPORTED_PREVIEW));
    }
}
