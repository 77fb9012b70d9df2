use leptos::prelude::*;

/// Titled region of the dashboard. The heading labels the region so screen
/// readers announce it; `note` adds a muted line under the title.
#[component]
pub fn Panel(
    id: &'static str,
    title: &'static str,
    #[prop(optional, into)] note: Option<String>,
    children: Children,
) -> impl IntoView {
    let heading_id = format!("{}-title", id);
    let labelledby = heading_id.clone();

    view! {
        <section id=id class="panel" aria-labelledby=labelledby>
            <h2 id=heading_id>{title}</h2>
            {note.map(|note| view! { <p class="panel-note muted">{note}</p> })}
            {children()}
        </section>
    }
}
