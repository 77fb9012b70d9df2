//! Prompt construction for the financial health report

use std::fmt::Write;

use crate::constants;
use crate::transactions::Transaction;

const PROMPT_INTRO: &str = "You are a professional financial advisor. Analyse the following \
spending records from a university student and write a detailed, easy-to-understand \
financial health report.";

const PROMPT_INSTRUCTIONS: &str = "\
Organise the report with the following structure:

## 📈 Financial overview
- Overall income and spending
- Savings rate

## 🏷️ Spending structure
- Share of spending by category
- Spending items that look unreasonable

## ⚠️ Risk flags
- Red alerts (serious problems)
- Yellow warnings (worth watching)
- Green highlights (things done well)

## 💡 Recommendations
- Concrete, actionable improvements
- A suggested budget allocation

Use a friendly tone, add emoji to keep the report lively, and give specific numbers and suggestions.";

/// Render one record as a prompt line. Amounts are written as they
/// appeared in the file.
pub fn record_line(tx: &Transaction) -> String {
    format!(
        "{} {} income:{} expense:{} category:{}",
        tx.date.format(constants::DATE_FORMAT),
        tx.description,
        tx.income_text,
        tx.expense_text,
        tx.category.as_deref().unwrap_or("")
    )
}

/// Build the full report prompt: intro, one line per record, then the
/// report structure instructions
pub fn build_report_prompt(transactions: &[Transaction]) -> String {
    let mut prompt = String::with_capacity(PROMPT_INTRO.len() + PROMPT_INSTRUCTIONS.len() + transactions.len() * 64);

    prompt.push_str(PROMPT_INTRO);
    prompt.push_str("\n\nSpending records:\n");
    for tx in transactions {
        // Writing to a String cannot fail
        let _ = writeln!(prompt, "{}", record_line(tx));
    }
    prompt.push('\n');
    prompt.push_str(PROMPT_INSTRUCTIONS);
    prompt
}
