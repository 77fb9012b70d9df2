/// Static dashboard configuration
pub struct Config {
    pub name: &'static str,
    pub tagline: &'static str,

    pub labels: Labels,
    pub report: ReportCopy,
    pub about: About,
}

/// Headings and metric captions
pub struct Labels {
    pub data_input: &'static str,
    pub sample_source: &'static str,
    pub upload_source: &'static str,
    pub raw_data: &'static str,
    pub total_income: &'static str,
    pub total_expense: &'static str,
    pub balance: &'static str,
    pub count: &'static str,
    pub category_chart: &'static str,
}

pub struct ReportCopy {
    pub heading: &'static str,
    pub generate_button: &'static str,
    pub pending_hint: &'static str,
    pub download_label: &'static str,
    /// Fixed name of the downloaded report file
    pub download_filename: &'static str,
}

/// Prototype disclosure block shown at the bottom of the page
pub struct About {
    pub title: &'static str,
    pub intro: &'static str,
    pub capabilities: &'static [&'static str],
    pub roadmap_intro: &'static str,
    pub roadmap: &'static [&'static str],
}

pub static CONFIG: Config = Config {
    name: "Ledger Lens",
    tagline: "Financial health analysis for student budgets. Upload your spending records and get an AI-written report.",

    labels: Labels {
        data_input: "Data input",
        sample_source: "Use sample data",
        upload_source: "Upload a CSV file",
        raw_data: "Raw transactions",
        total_income: "Total income",
        total_expense: "Total expense",
        balance: "Balance",
        count: "Transactions",
        category_chart: "Spending by category",
    },

    report: ReportCopy {
        heading: "AI financial health report",
        generate_button: "Generate AI financial health report",
        pending_hint: "Analysis can take up to a minute. Keep this tab open.",
        download_label: "Download report",
        download_filename: "financial-health-report.md",
    },

    about: About {
        title: "About this demo",
        intro: "This is a proof-of-concept showing the core capabilities:",
        capabilities: &[
            "Automatic spending categorisation and analysis",
            "AI-driven financial health assessment",
            "Personalised improvement suggestions",
            "Visual data presentation",
        ],
        roadmap_intro: "In the full product we plan to:",
        roadmap: &[
            "Connect directly to bank APIs for hands-off data sync",
            "Build a deeper financial knowledge base",
            "Deliver more accurate spending forecasts and planning",
        ],
    },
};
