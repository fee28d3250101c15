//! メインアプリケーションコンポーネント
//!
//! UIイベントをバックエンド呼び出しに結び付け、結果を描画する。
//! 表示文字列の組み立ては `doc_extract_common::render` の純粋関数に任せ、
//! ここではシグナルの更新とレスポンスの選別（`ResponseGate`）だけを行う。

use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use gloo::dialogs::alert;
use doc_extract_common::{
    render, require_file, validate_prompt, DisplayPatch, DisplayState, Endpoint, InputError,
    Operation, ResponseGate, Ticket, DOWNLOAD_FILE_NAME, DOWNLOAD_MIME,
};
use web_sys::{File, HtmlInputElement};

use crate::api;
use crate::components::{
    action_buttons::ActionButtons,
    header::Header,
    preview_pane::PreviewPane,
    prompt_panel::PromptPanel,
    result_panels::ResultPanels,
    upload_panel::UploadPanel,
};
use crate::download;
use crate::preview::{revoke_object_url, PreviewState};

/// プレビューを差し替え（未解放の旧URLはここで解放）
fn replace_preview(
    preview: ReadSignal<PreviewState>,
    set_preview: WriteSignal<PreviewState>,
    next: PreviewState,
) {
    if let Some(url) = preview.with_untracked(|p| p.object_url().map(str::to_string)) {
        revoke_object_url(&url);
    }
    set_preview.set(next);
}

/// ファイル入力の選択ファイル（未選択なら `InputError::NoFile`）
pub(crate) fn selected_file(input: Option<HtmlInputElement>) -> Result<File, InputError> {
    require_file(input.and_then(|input| input.files()).and_then(|files| files.get(0)))
}

/// 古くなっていない領域だけを表示に反映
fn apply_admitted(
    gate: &ResponseGate,
    ticket: &Ticket,
    set_display: WriteSignal<DisplayState>,
    endpoint: Endpoint,
    patch: DisplayPatch,
) {
    match gate.admit(ticket, patch) {
        Some(patch) => set_display.update(|d| d.apply(&patch)),
        None => gloo::console::log!("stale response discarded:", endpoint.path()),
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let (display, set_display) = signal(DisplayState::cleared());
    let (preview, set_preview) = signal(PreviewState::Empty);
    let (prompt, set_prompt) = signal(String::new());
    let file_input: NodeRef<Input> = NodeRef::new();
    let gate = ResponseGate::new();

    // 抽出ハンドラ
    let on_extract = {
        let gate = gate.clone();
        move |_: ()| {
            let file = match selected_file(file_input.get_untracked()) {
                Ok(file) => file,
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };

            replace_preview(preview, set_preview, PreviewState::for_file(&file));
            set_display.update(|d| d.apply(&render::extract_pending()));

            let ticket = gate.begin(Operation::Extract);
            let gate = gate.clone();
            spawn_local(async move {
                let patch = match api::extract(&file).await {
                    Ok(resp) => render::extract_result(&resp),
                    Err(e) => {
                        let message = e.to_string();
                        gloo::console::error!("extract failed:", message.clone());
                        render::transport_failure(&message)
                    }
                };
                apply_admitted(&gate, &ticket, set_display, Endpoint::Extract, patch);
            });
        }
    };

    // カスタムプロンプトハンドラ
    let on_prompt = {
        let gate = gate.clone();
        move |_: ()| {
            let raw = prompt.get_untracked();
            let text = match validate_prompt(&raw) {
                Ok(text) => text.to_string(),
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };

            set_display.update(|d| d.apply(&render::prompt_pending()));

            let ticket = gate.begin(Operation::Prompt);
            let gate = gate.clone();
            spawn_local(async move {
                let patch = match api::extract_prompt(&text).await {
                    Ok(resp) => render::prompt_result(&resp),
                    Err(e) => {
                        let message = e.to_string();
                        gloo::console::error!("extract_prompt failed:", message.clone());
                        render::transport_failure(&message)
                    }
                };
                apply_admitted(&gate, &ticket, set_display, Endpoint::ExtractPrompt, patch);
            });
        }
    };

    // リセットハンドラ
    let on_reset = {
        let gate = gate.clone();
        move |_: ()| {
            // 送信中のレスポンスはリセット後に表示しない
            gate.invalidate();
            set_display.update(|d| d.apply(&DisplayPatch::reset()));
            replace_preview(preview, set_preview, PreviewState::Empty);
            if let Some(input) = file_input.get_untracked() {
                input.set_value("");
            }

            spawn_local(async {
                if let Err(e) = api::reset().await {
                    gloo::console::warn!("reset request failed:", e.to_string());
                }
            });
        }
    };

    // ダウンロードハンドラ
    let on_download = move |_: ()| {
        let content = display.with_untracked(|d| d.json_output.clone());
        if let Err(e) = download::download_text(DOWNLOAD_FILE_NAME, &content, DOWNLOAD_MIME) {
            gloo::console::error!("download failed:", e);
        }
    };

    view! {
        <div class="container">
            <Header />

            <UploadPanel file_input=file_input on_extract=on_extract />

            <PromptPanel
                prompt=prompt
                set_prompt=set_prompt
                on_submit=on_prompt
            />

            <ActionButtons on_reset=on_reset on_download=on_download />

            <div class="results">
                <PreviewPane preview=preview />
                <ResultPanels display=display />
            </div>
        </div>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_extract_without_file_is_rejected() {
        let document = web_sys::window().unwrap().document().unwrap();
        let input: HtmlInputElement = document
            .create_element("input")
            .unwrap()
            .dyn_into()
            .unwrap();
        input.set_type("file");

        assert_eq!(selected_file(Some(input)).unwrap_err(), InputError::NoFile);
        assert_eq!(selected_file(None).unwrap_err(), InputError::NoFile);
    }
}
