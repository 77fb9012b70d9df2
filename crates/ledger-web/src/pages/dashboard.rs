use std::sync::Arc;

use leptos::prelude::*;
use ledger_core::{CategoryTotal, Ledger, SummaryMetrics, expenses_by_category, summarize};
use shared::CONFIG;

use crate::components::{About, CategoryChart, Metrics, Panel, ReportPanel, SourcePicker, TransactionTable};
use crate::session::{Notice, Session, SourceMode};

const STYLE: &str = include_str!("../../style/main.css");

/// Everything one render of the page needs
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub mode: SourceMode,
    pub currency: String,
    /// None in upload mode before a file arrives
    pub data: Option<LedgerView>,
    pub report: Option<String>,
    pub notice: Option<Notice>,
}

/// Aggregates derived from the active ledger
#[derive(Debug, Clone)]
pub struct LedgerView {
    pub ledger: Arc<Ledger>,
    pub summary: SummaryMetrics,
    pub categories: Option<Vec<CategoryTotal>>,
}

impl LedgerView {
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self {
            summary: summarize(&ledger.transactions),
            categories: expenses_by_category(&ledger),
            ledger,
        }
    }
}

impl DashboardView {
    pub fn from_session(session: Session, sample: &Arc<Ledger>, currency: &str) -> Self {
        Self {
            mode: session.mode,
            currency: currency.to_string(),
            data: session.active_ledger(sample).map(LedgerView::new),
            report: session.report,
            notice: session.notice,
        }
    }
}

/// Render the full HTML document
pub fn render_dashboard(page: DashboardView) -> String {
    let body = Owner::new().with(|| view! { <DashboardPage page=page /> }.to_html());

    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\" />\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\
         <title>{}</title>\
         <style>{}</style>\
         </head>\
         <body>{}</body>\
         </html>",
        CONFIG.name, STYLE, body
    )
}

#[component]
fn DashboardPage(page: DashboardView) -> impl IntoView {
    let DashboardView {
        mode,
        currency,
        data,
        report,
        notice,
    } = page;

    let status = data
        .as_ref()
        .map(|d| format!("Loaded {} ({} transactions)", d.ledger.source, d.ledger.len()));
    let can_generate = data.is_some();

    view! {
        <main class="page">
            <header class="header">
                <h1>"🧠 " {CONFIG.name}</h1>
                <p class="muted">{CONFIG.tagline}</p>
            </header>

            <SourcePicker mode=mode status=status notice=notice />

            {match data {
                Some(data) => view! { <LedgerSections data=data currency=currency /> }.into_any(),
                None => view! {
                    <div class="notice info">"Upload a CSV file or switch to the sample data."</div>
                }.into_any(),
            }}

            <Panel id="report" title="Report">
                <ReportPanel report=report can_generate=can_generate />
            </Panel>

            <About />
        </main>
    }
}

#[component]
fn LedgerSections(data: LedgerView, currency: String) -> impl IntoView {
    let LedgerView {
        ledger,
        summary,
        categories,
    } = data;
    let chart_currency = currency.clone();

    view! {
        <Panel id="transactions" title=CONFIG.labels.raw_data>
            <TransactionTable ledger=ledger />
        </Panel>

        <Panel id="summary" title="Summary">
            <Metrics summary=summary currency=currency />
        </Panel>

        {categories.map(|totals| view! {
            <Panel
                id="categories"
                title=CONFIG.labels.category_chart
                note="Expenses only. Records without a category are left out."
            >
                <CategoryChart totals=totals currency=chart_currency />
            </Panel>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledger_core::Transaction;

    fn ledger(with_categories: bool) -> Arc<Ledger> {
        let tx = |day, description: &str, income: &str, expense: &str, category: &str| Transaction {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            description: description.to_string(),
            income: income.parse().unwrap(),
            expense: expense.parse().unwrap(),
            income_text: income.to_string(),
            expense_text: expense.to_string(),
            category: with_categories.then(|| category.to_string()),
        };
        Arc::new(Ledger {
            source: "sample_transactions.csv".to_string(),
            has_category_column: with_categories,
            transactions: vec![tx(1, "Lunch", "0", "20.00", "Food"), tx(2, "Salary", "1000", "0", "Income")],
        })
    }

    fn render(session: Session, sample: Arc<Ledger>) -> String {
        render_dashboard(DashboardView::from_session(session, &sample, "¥"))
    }

    #[test]
    fn test_renders_metrics_table_and_chart() {
        let html = render(Session::default(), ledger(true));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Lunch"));
        assert!(html.contains("Salary"));
        assert!(html.contains("¥1000.00"));
        assert!(html.contains("¥20.00"));
        assert!(html.contains("¥980.00"));
        assert!(html.contains("conic-gradient"));
        assert!(html.contains(CONFIG.labels.category_chart));
        assert!(html.contains(CONFIG.about.title));
    }

    #[test]
    fn test_table_shows_amounts_as_loaded() {
        let html = render(Session::default(), ledger(true));
        assert!(html.contains(">20.00<"));
        assert!(html.contains(">1000<"));
    }

    #[test]
    fn test_chart_omitted_without_categories() {
        let html = render(Session::default(), ledger(false));
        assert!(html.contains("¥980.00"));
        assert!(!html.contains("conic-gradient"));
        assert!(!html.contains("categories-title"));
    }

    #[test]
    fn test_panels_are_labelled_by_their_headings() {
        let html = render(Session::default(), ledger(true));
        assert!(html.contains(r#"aria-labelledby="transactions-title""#));
        assert!(html.contains(r#"id="categories-title""#));
        assert!(html.contains("Records without a category are left out."));
    }

    #[test]
    fn test_upload_mode_without_file_stops_pipeline() {
        let session = Session {
            mode: SourceMode::Upload,
            ..Session::default()
        };
        let html = render(session, ledger(true));

        assert!(html.contains("Upload a CSV file or switch to the sample data."));
        assert!(html.contains("multipart/form-data"));
        assert!(!html.contains("Lunch"));
        assert!(!html.contains(CONFIG.labels.total_income));
    }

    #[test]
    fn test_report_and_download_link() {
        let session = Session {
            report: Some("## Overview\n- Spend less on bubble tea".to_string()),
            ..Session::default()
        };
        let html = render(session, ledger(true));

        assert!(html.contains(CONFIG.report.heading));
        assert!(html.contains("Spend less on bubble tea"));
        assert!(html.contains("/report/download"));
    }

    #[test]
    fn test_report_numbered_list_and_table() {
        let session = Session {
            report: Some("## Recommendations\n1. Cut bubble tea\n2. Save 20%\n| Item | Cost |\n|---|---|\n| Tea | ¥15 |".to_string()),
            ..Session::default()
        };
        let html = render(session, ledger(true));

        assert!(html.contains("<ol>"));
        assert!(html.contains("Cut bubble tea"));
        assert!(html.contains("report-table"));
        assert!(html.contains("<th>Item</th>"));
        assert!(html.contains("<td>Tea</td>"));
    }

    #[test]
    fn test_no_download_link_without_report() {
        let html = render(Session::default(), ledger(true));
        assert!(!html.contains("/report/download"));
        assert!(html.contains(CONFIG.report.generate_button));
    }

    #[test]
    fn test_notice_and_text_escaping() {
        let sample = Arc::new(Ledger {
            source: "x.csv".to_string(),
            has_category_column: false,
            transactions: vec![Transaction {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                description: "<script>alert(1)</script>".to_string(),
                income: 0.0,
                expense: 1.0,
                income_text: "0".to_string(),
                expense_text: "1".to_string(),
                category: None,
            }],
        });
        let session = Session {
            notice: Some(Notice::Error("Report generation failed: report service returned HTTP 500".to_string())),
            ..Session::default()
        };
        let html = render(session, sample);

        assert!(html.contains("HTTP 500"));
        assert!(!html.contains("<script>alert(1)</script>"));
    }
}
