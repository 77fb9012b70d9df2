use leptos::prelude::*;
use shared::CONFIG;

use crate::session::{Notice, SourceMode};

/// Data source switch, upload form and the one-shot notice
#[component]
pub fn SourcePicker(mode: SourceMode, status: Option<String>, notice: Option<Notice>) -> impl IntoView {
    let labels = &CONFIG.labels;
    let class_for = move |m: SourceMode| if m == mode { "tab active" } else { "tab" };

    view! {
        <aside class="source">
            <h2>{labels.data_input}</h2>
            <form method="post" action="/source" class="tabs">
                <button type="submit" name="source" value="sample" class={class_for(SourceMode::Sample)}>
                    {labels.sample_source}
                </button>
                <button type="submit" name="source" value="upload" class={class_for(SourceMode::Upload)}>
                    {labels.upload_source}
                </button>
            </form>
            {(mode == SourceMode::Upload).then(|| view! {
                <form method="post" action="/upload" enctype="multipart/form-data" class="upload">
                    <input type="file" name="ledger" accept=".csv,text/csv" />
                    <button type="submit">"Upload"</button>
                </form>
            })}
            {status.map(|text| view! { <div class="notice success">{text}</div> })}
            {notice.map(|notice| {
                let (class, text) = match notice {
                    Notice::Success(text) => ("notice success", text),
                    Notice::Info(text) => ("notice info", text),
                    Notice::Error(text) => ("notice error", text),
                };
                view! { <div class=class role="status">{text}</div> }
            })}
        </aside>
    }
}
