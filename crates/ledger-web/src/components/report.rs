use leptos::prelude::*;
use shared::CONFIG;

use crate::markdown::{Block, parse_blocks};

/// Generate button, plus the last report and its download link if present
#[component]
pub fn ReportPanel(report: Option<String>, can_generate: bool) -> impl IntoView {
    view! {
        <form method="post" action="/report" class="generate">
            <button type="submit" class="primary" disabled={!can_generate}>
                {CONFIG.report.generate_button}
            </button>
            <span class="muted">{CONFIG.report.pending_hint}</span>
        </form>
        {report.map(|text| view! {
            <article class="report">
                <h2>{CONFIG.report.heading}</h2>
                <ReportBody text=text />
                <a class="button" href="/report/download" download=CONFIG.report.download_filename>
                    {CONFIG.report.download_label}
                </a>
            </article>
        })}
    }
}

/// Report markdown rendered as headings, lists, tables and paragraphs
#[component]
fn ReportBody(text: String) -> impl IntoView {
    parse_blocks(&text)
        .into_iter()
        .map(|block| match block {
            Block::Heading { level: 1, text } => view! { <h3>{text}</h3> }.into_any(),
            Block::Heading { level: 2, text } => view! { <h4>{text}</h4> }.into_any(),
            Block::Heading { text, .. } => view! { <h5>{text}</h5> }.into_any(),
            Block::List(items) => view! {
                <ul>
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ul>
            }
            .into_any(),
            Block::OrderedList(items) => view! {
                <ol>
                    {items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
                </ol>
            }
            .into_any(),
            Block::Table { header, rows } => view! {
                <table class="report-table">
                    {(!header.is_empty()).then(|| view! {
                        <thead>
                            <tr>{header.into_iter().map(|cell| view! { <th>{cell}</th> }).collect_view()}</tr>
                        </thead>
                    })}
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| view! {
                                <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}</tr>
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any(),
            Block::Paragraph(text) => view! { <p>{text}</p> }.into_any(),
        })
        .collect_view()
}
