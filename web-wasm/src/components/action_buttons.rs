//! リセット・ダウンロードボタン

use leptos::prelude::*;

#[component]
pub fn ActionButtons<FR, FD>(
    on_reset: FR,
    on_download: FD,
) -> impl IntoView
where
    FR: Fn(()) + 'static + Clone,
    FD: Fn(()) + 'static + Clone,
{
    view! {
        <div class="action-buttons">
            <button
                class="btn btn-tertiary"
                id="resetBtn"
                on:click={
                    let on_reset = on_reset.clone();
                    move |_| on_reset(())
                }
            >
                "Reset"
            </button>

            <button
                class="btn btn-secondary"
                id="downloadBtn"
                on:click={
                    let on_download = on_download.clone();
                    move |_| on_download(())
                }
            >
                "Download JSON"
            </button>
        </div>
    }
}
