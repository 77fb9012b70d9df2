use leptos::prelude::*;
use shared::CONFIG;

/// Collapsible prototype disclosure
#[component]
pub fn About() -> impl IntoView {
    let about = &CONFIG.about;

    view! {
        <details class="about">
            <summary>{about.title}</summary>
            <p>{about.intro}</p>
            <ul>
                {about.capabilities.iter().map(|item| view! { <li>"✅ " {*item}</li> }).collect_view()}
            </ul>
            <p>{about.roadmap_intro}</p>
            <ul>
                {about.roadmap.iter().map(|item| view! { <li>{*item}</li> }).collect_view()}
            </ul>
        </details>
    }
}
