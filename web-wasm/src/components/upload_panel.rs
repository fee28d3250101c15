//! ファイル選択と抽出ボタン

use leptos::html::Input;
use leptos::prelude::*;

#[component]
pub fn UploadPanel<F>(
    file_input: NodeRef<Input>,
    on_extract: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="upload-panel">
            <input
                type="file"
                id="fileInput"
                accept=".png,.jpg,.jpeg,.pdf"
                node_ref=file_input
            />
            <button
                class="btn btn-primary"
                id="extractBtn"
                on:click={
                    let on_extract = on_extract.clone();
                    move |_| on_extract(())
                }
            >
                "Extract"
            </button>
        </div>
    }
}
