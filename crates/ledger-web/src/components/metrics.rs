use leptos::prelude::*;
use ledger_core::SummaryMetrics;
use shared::CONFIG;

use crate::format::format_money;

/// The four headline numbers
#[component]
pub fn Metrics(summary: SummaryMetrics, currency: String) -> impl IntoView {
    let labels = &CONFIG.labels;
    let cards = [
        (labels.total_income, format_money(&currency, summary.total_income)),
        (labels.total_expense, format_money(&currency, summary.total_expense)),
        (labels.balance, format_money(&currency, summary.balance)),
        (labels.count, summary.count.to_string()),
    ];

    view! {
        <div class="metrics">
            {cards.into_iter().map(|(label, value)| view! {
                <div class="metric">
                    <div class="metric-label">{label}</div>
                    <div class="metric-value">{value}</div>
                </div>
            }).collect_view()}
        </div>
    }
}
