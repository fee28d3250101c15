//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Universal Document Extractor"</h1>
            <p class="text-muted">"OCR + LLM field extraction for images and PDFs"</p>
        </header>
    }
}
