mod about;
mod chart;
mod metrics;
mod panel;
mod report;
mod source;
mod table;

pub use about::About;
pub use chart::CategoryChart;
pub use metrics::Metrics;
pub use panel::Panel;
pub use report::ReportPanel;
pub use source::SourcePicker;
pub use table::TransactionTable;
