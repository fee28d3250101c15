//! カスタムプロンプト入力

use leptos::prelude::*;

#[component]
pub fn PromptPanel<F>(
    prompt: ReadSignal<String>,
    set_prompt: WriteSignal<String>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    view! {
        <div class="form-group prompt-panel">
            <label for="customPrompt">"Custom prompt"</label>
            <input
                type="text"
                id="customPrompt"
                placeholder="e.g. Return only the invoice number and total as JSON"
                prop:value=move || prompt.get()
                on:input=move |ev| {
                    set_prompt.set(event_target_value(&ev));
                }
            />
            <button
                class="btn btn-secondary"
                id="customPromptBtn"
                on:click={
                    let on_submit = on_submit.clone();
                    move |_| on_submit(())
                }
            >
                "Run Prompt"
            </button>
        </div>
    }
}
