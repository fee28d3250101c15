//! OCRテキスト・JSON出力・処理時間の表示

use leptos::prelude::*;
use doc_extract_common::DisplayState;

#[component]
pub fn ResultPanels(display: ReadSignal<DisplayState>) -> impl IntoView {
    view! {
        <div class="result-panels">
            <section class="result-panel">
                <h3>"OCR Text"</h3>
                <pre id="ocrText">{move || display.with(|d| d.ocr_text.clone())}</pre>
                <p class="timer">
                    "OCR time (s): "
                    <span id="ocrTimer">{move || display.with(|d| d.ocr_timer.clone())}</span>
                </p>
            </section>

            <section class="result-panel">
                <h3>"Extracted JSON"</h3>
                <pre id="jsonOutput">{move || display.with(|d| d.json_output.clone())}</pre>
                <p class="timer">
                    "LLM time (s): "
                    <span id="llmTimer">{move || display.with(|d| d.llm_timer.clone())}</span>
                </p>
            </section>
        </div>
    }
}
