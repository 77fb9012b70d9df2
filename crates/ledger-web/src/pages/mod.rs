mod dashboard;

pub use dashboard::{DashboardView, render_dashboard};
