use leptos::prelude::*;
use ledger_core::Ledger;
use ledger_core::constants::DATE_FORMAT;

/// Raw transaction table, in file order. Amounts show as written in the file.
#[component]
pub fn TransactionTable(ledger: std::sync::Arc<Ledger>) -> impl IntoView {
    let show_category = ledger.has_category_column;

    let rows = ledger
        .transactions
        .iter()
        .map(|tx| {
            let date = tx.date.format(DATE_FORMAT).to_string();
            let description = tx.description.clone();
            let income = tx.income_text.clone();
            let expense = tx.expense_text.clone();
            let category = tx.category.clone().unwrap_or_default();
            view! {
                <tr>
                    <td>{date}</td>
                    <td>{description}</td>
                    <td class="num">{income}</td>
                    <td class="num">{expense}</td>
                    {show_category.then(|| view! { <td>{category}</td> })}
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="table-wrap">
            <table>
                <thead>
                    <tr>
                        <th>"Date"</th>
                        <th>"Description"</th>
                        <th class="num">"Income"</th>
                        <th class="num">"Expense"</th>
                        {show_category.then(|| view! { <th>"Category"</th> })}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {ledger.is_empty().then(|| view! {
                <p class="muted">"The file has no transactions."</p>
            })}
        </div>
    }
}
