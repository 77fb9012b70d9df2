//! Transaction records and CSV ledger loading
//!
//! Columns are matched by header name. English and Chinese headers are both
//! accepted, so exports from either version of the sample sheet load as-is.
//! Every cell is validated up front; a bad row rejects the whole file.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

use crate::constants;
use crate::error::LoadError;

/// One line item of the ledger
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub income: f64,
    pub expense: f64,
    /// Income cell exactly as it appeared in the file
    pub income_text: String,
    /// Expense cell exactly as it appeared in the file
    pub expense_text: String,
    /// None when the cell is blank or the file has no category column
    pub category: Option<String>,
}

/// A loaded record set, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    /// File name the records came from
    pub source: String,
    /// Whether the header row had a category column at all
    pub has_category_column: bool,
    pub transactions: Vec<Transaction>,
}

// =============================================================================
// Column Mapping
// =============================================================================

const DATE_HEADERS: &[&str] = &["date", "日期"];
const DESCRIPTION_HEADERS: &[&str] = &["description", "item", "事项"];
const INCOME_HEADERS: &[&str] = &["income", "收入"];
const EXPENSE_HEADERS: &[&str] = &["expense", "支出"];
const CATEGORY_HEADERS: &[&str] = &["category", "分类"];

/// Positions of each known column in the header row
#[derive(Debug)]
struct ColumnMap {
    date: usize,
    description: usize,
    income: usize,
    expense: usize,
    category: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_lowercase())
            .collect();

        let find = |aliases: &[&str]| {
            normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()))
        };
        let require = |aliases: &[&str], name: &'static str| {
            find(aliases).ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            date: require(DATE_HEADERS, "date")?,
            description: require(DESCRIPTION_HEADERS, "description")?,
            income: require(INCOME_HEADERS, "income")?,
            expense: require(EXPENSE_HEADERS, "expense")?,
            category: find(CATEGORY_HEADERS),
        })
    }
}

// =============================================================================
// Loading
// =============================================================================

impl Ledger {
    /// Load a ledger from a CSV file on disk
    pub fn load_from_path(path: &Path) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_reader(name, file)
    }

    /// Load an uploaded CSV body, enforcing a size limit
    pub fn from_upload(name: &str, bytes: &[u8], limit: usize) -> Result<Self, LoadError> {
        if bytes.len() > limit {
            return Err(LoadError::TooLarge {
                size: bytes.len(),
                limit,
            });
        }
        Self::from_reader(name, bytes)
    }

    /// Parse CSV from any reader
    pub fn from_reader<R: Read>(source: impl Into<String>, reader: R) -> Result<Self, LoadError> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let columns = ColumnMap::from_headers(rdr.headers()?)?;

        let mut transactions = Vec::new();
        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            transactions.push(parse_record(&record, &columns, idx + 1)?);
        }

        Ok(Self {
            source: source.into(),
            has_category_column: columns.category.is_some(),
            transactions,
        })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

fn parse_record(record: &StringRecord, columns: &ColumnMap, row: usize) -> Result<Transaction, LoadError> {
    let cell = |idx: usize| record.get(idx).unwrap_or("");

    let category = columns
        .category
        .map(cell)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    let income_text = cell(columns.income);
    let expense_text = cell(columns.expense);

    Ok(Transaction {
        date: parse_date(cell(columns.date), row)?,
        description: cell(columns.description).to_string(),
        income: parse_amount(income_text, "income", row)?,
        expense: parse_amount(expense_text, "expense", row)?,
        income_text: income_text.to_string(),
        expense_text: expense_text.to_string(),
        category,
    })
}

fn parse_date(value: &str, row: usize) -> Result<NaiveDate, LoadError> {
    constants::ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .ok_or_else(|| LoadError::InvalidDate {
            row,
            value: value.to_string(),
        })
}

/// Blank cells count as zero
fn parse_amount(value: &str, column: &'static str, row: usize) -> Result<f64, LoadError> {
    if value.is_empty() {
        return Ok(0.0);
    }

    let amount: f64 = value
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| LoadError::InvalidAmount {
            row,
            column,
            value: value.to_string(),
        })?;

    if amount < 0.0 {
        return Err(LoadError::NegativeAmount {
            row,
            column,
            value: amount,
        });
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load(csv: &str) -> Result<Ledger, LoadError> {
        Ledger::from_reader("test.csv", csv.as_bytes())
    }

    #[test]
    fn test_load_english_headers() {
        let ledger = load(
            "date,description,income,expense,category\n\
             2024-01-01,Lunch,0,20,Food\n\
             2024-01-02,Salary,1000,0,Income\n",
        )
        .unwrap();

        assert_eq!(ledger.len(), 2);
        assert!(ledger.has_category_column);
        assert_eq!(ledger.transactions[0].description, "Lunch");
        assert_eq!(ledger.transactions[0].expense, 20.0);
        assert_eq!(ledger.transactions[1].income, 1000.0);
        assert_eq!(ledger.transactions[1].category.as_deref(), Some("Income"));
    }

    #[test]
    fn test_load_chinese_headers() {
        let ledger = load(
            "日期,事项,收入,支出,分类\n\
             2024/03/05,食堂午餐,0,15.5,餐饮\n",
        )
        .unwrap();

        let tx = &ledger.transactions[0];
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(tx.expense, 15.5);
        assert_eq!(tx.category.as_deref(), Some("餐饮"));
    }

    #[test]
    fn test_headers_ignore_case_order_and_bom() {
        let ledger = load(
            "\u{feff}Category, Expense ,Income,Description,Date\n\
             Food,20,0,Lunch,2024-01-01\n",
        )
        .unwrap();
        assert_eq!(ledger.transactions[0].category.as_deref(), Some("Food"));
        assert_eq!(ledger.transactions[0].expense, 20.0);
    }

    #[test]
    fn test_amount_text_kept_as_written() {
        let ledger = load(
            "date,description,income,expense,category\n\
             2024-01-01,Lunch,0,20.00,Food\n\
             2024-01-02,Bonus,1e2,,Income\n",
        )
        .unwrap();

        let lunch = &ledger.transactions[0];
        assert_eq!(lunch.expense, 20.0);
        assert_eq!(lunch.expense_text, "20.00");
        assert_eq!(lunch.income_text, "0");

        let bonus = &ledger.transactions[1];
        assert_eq!(bonus.income, 100.0);
        assert_eq!(bonus.income_text, "1e2");
        assert_eq!(bonus.expense_text, "");
    }

    #[test]
    fn test_missing_category_column_is_allowed() {
        let ledger = load("date,description,income,expense\n2024-01-01,Lunch,0,20\n").unwrap();
        assert!(!ledger.has_category_column);
        assert_eq!(ledger.transactions[0].category, None);
    }

    #[test]
    fn test_blank_cells() {
        let ledger = load("date,description,income,expense,category\n2024-01-01,Gift,50,,\n").unwrap();
        let tx = &ledger.transactions[0];
        assert_eq!(tx.expense, 0.0);
        assert_eq!(tx.category, None);
    }

    #[test]
    fn test_header_only_file_is_empty_ledger() {
        let ledger = load("date,description,income,expense,category\n").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_missing_required_column() {
        let err = load("date,description,income\n2024-01-01,Lunch,0\n").unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("expense")));
    }

    #[test]
    fn test_invalid_amount_reports_row() {
        let err = load(
            "date,description,income,expense,category\n\
             2024-01-01,Lunch,0,20,Food\n\
             2024-01-02,Dinner,0,lots,Food\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidAmount { row: 2, column: "expense", .. }
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let err = load("date,description,income,expense,category\n2024-01-01,Refund,-5,0,Food\n").unwrap_err();
        assert!(matches!(err, LoadError::NegativeAmount { row: 1, column: "income", .. }));
    }

    #[test]
    fn test_invalid_date_rejected() {
        let err = load("date,description,income,expense,category\nyesterday,Lunch,0,20,Food\n").unwrap_err();
        assert!(matches!(err, LoadError::InvalidDate { row: 1, .. }));
    }

    #[test]
    fn test_upload_size_limit() {
        let body = b"date,description,income,expense\n";
        let err = Ledger::from_upload("big.csv", body, 10).unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { limit: 10, .. }));
        assert!(Ledger::from_upload("ok.csv", body, 1024).is_ok());
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "date,description,income,expense,category").unwrap();
        writeln!(file, "2024-01-01,Lunch,0,20,Food").unwrap();

        let ledger = Ledger::load_from_path(file.path()).unwrap();
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.source.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Ledger::load_from_path(Path::new("/nonexistent/ledger.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_bundled_sample_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/sample_transactions.csv");
        let ledger = Ledger::load_from_path(&path).unwrap();
        assert!(!ledger.is_empty());
        assert!(ledger.has_category_column);
    }
}
