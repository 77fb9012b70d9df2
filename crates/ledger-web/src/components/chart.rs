use leptos::prelude::*;
use ledger_core::CategoryTotal;

use crate::format::format_money;

/// Slice colours, reused in order when there are more categories
const PALETTE: &[&str] = &[
    "#4c78a8", "#f58518", "#e45756", "#72b7b2", "#54a24b", "#eeca3b", "#b279a2", "#ff9da6", "#9d755d",
    "#bab0ac",
];

/// One wedge of the pie, in percent of the full circle
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub amount: f64,
    pub color: &'static str,
    pub start: f64,
    pub end: f64,
}

impl PieSlice {
    pub fn percent(&self) -> f64 {
        self.end - self.start
    }
}

pub fn pie_slices(totals: &[CategoryTotal]) -> Vec<PieSlice> {
    let mut cursor = 0.0;
    let last = totals.len().saturating_sub(1);

    totals
        .iter()
        .enumerate()
        .map(|(i, total)| {
            let start = cursor;
            // Pin the final edge so rounding never leaves a gap
            let end = if i == last { 100.0 } else { start + total.share * 100.0 };
            cursor = end;
            PieSlice {
                label: total.category.clone(),
                amount: total.amount,
                color: PALETTE[i % PALETTE.len()],
                start,
                end,
            }
        })
        .collect()
}

/// CSS background for the pie
pub fn conic_gradient(slices: &[PieSlice]) -> String {
    let stops: Vec<String> = slices
        .iter()
        .map(|s| format!("{} {:.2}% {:.2}%", s.color, s.start, s.end))
        .collect();
    format!("conic-gradient({})", stops.join(", "))
}

/// Pie chart of expenses by category, drawn with CSS only
#[component]
pub fn CategoryChart(totals: Vec<CategoryTotal>, currency: String) -> impl IntoView {
    let slices = pie_slices(&totals);
    let background = format!("background: {}", conic_gradient(&slices));

    view! {
        <div class="chart">
            <div class="pie" role="img" aria-label="Expenses by category" style=background></div>
            <ul class="legend">
                {slices.into_iter().map(|slice| {
                    let swatch = format!("background: {}", slice.color);
                    let detail = format!(
                        "{} · {} · {:.1}%",
                        slice.label,
                        format_money(&currency, slice.amount),
                        slice.percent(),
                    );
                    view! {
                        <li>
                            <span class="swatch" style=swatch></span>
                            {detail}
                        </li>
                    }
                }).collect_view()}
            </ul>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(category: &str, amount: f64, share: f64) -> CategoryTotal {
        CategoryTotal {
            category: category.to_string(),
            amount,
            share,
        }
    }

    #[test]
    fn test_slices_cover_full_circle() {
        let slices = pie_slices(&[total("Food", 30.0, 0.3), total("Rent", 70.0, 0.7)]);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].start, 0.0);
        assert_eq!(slices[0].end, 30.0);
        assert_eq!(slices[1].start, 30.0);
        assert_eq!(slices[1].end, 100.0);
        assert_ne!(slices[0].color, slices[1].color);
    }

    #[test]
    fn test_single_slice() {
        let slices = pie_slices(&[total("Food", 20.0, 1.0)]);
        assert_eq!(slices[0].percent(), 100.0);
        assert_eq!(conic_gradient(&slices), "conic-gradient(#4c78a8 0.00% 100.00%)");
    }

    #[test]
    fn test_palette_wraps() {
        let totals: Vec<_> = (0..12).map(|i| total(&format!("c{}", i), 1.0, 1.0 / 12.0)).collect();
        let slices = pie_slices(&totals);
        assert_eq!(slices[0].color, slices[PALETTE.len()].color);
    }

    #[test]
    fn test_empty() {
        assert!(pie_slices(&[]).is_empty());
    }
}
