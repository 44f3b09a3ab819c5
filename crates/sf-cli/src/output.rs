//! Console output formatting for the storfleet CLI
//!
//! Tables for the pre-flight node summary and the final install report,
//! plus colored status line helpers.

use tabled::{settings::Style, Table, Tabled};

use sf_core::{InstallReport, NodeDescriptor};

/// Format the pre-flight node summary as an ASCII table.
///
/// All four columns are always rendered; the credential slot a node does not
/// use shows as `-`. Printed before any remote side effect so the operator
/// can confirm the targets.
pub fn node_summary_table(nodes: &[NodeDescriptor]) -> String {
    #[derive(Tabled)]
    struct NodeRow {
        #[tabled(rename = "USERNAME")]
        username: String,
        #[tabled(rename = "ADDRESS")]
        address: String,
        #[tabled(rename = "PASSWORD")]
        password: String,
        #[tabled(rename = "KEYFILE")]
        keyfile: String,
    }

    let rows: Vec<NodeRow> = nodes
        .iter()
        .map(|node| NodeRow {
            username: node.username.clone(),
            address: node.address.clone(),
            password: node
                .password()
                .map(str::to_string)
                .unwrap_or_else(|| "-".to_string()),
            keyfile: node
                .keyfile()
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format the install report as an ASCII table
pub fn report_table(report: &InstallReport) -> String {
    if report.is_empty() {
        return "No nodes attempted".to_string();
    }

    #[derive(Tabled)]
    struct ReportRow {
        #[tabled(rename = "NODE")]
        node: String,
        #[tabled(rename = "OUTCOME")]
        outcome: String,
    }

    let rows: Vec<ReportRow> = report
        .entries()
        .iter()
        .map(|entry| ReportRow {
            node: format!("{}@{}", entry.node.username, entry.node.address),
            outcome: entry.outcome.to_string(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print a success message in green with a checkmark prefix
pub fn print_success(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print("✓ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an error message in red with an X prefix
pub fn print_error(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stderr = std::io::stderr();
    let _ = crossterm::execute!(
        stderr,
        SetForegroundColor(Color::Red),
        Print("✗ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print an informational message in cyan with an info symbol prefix
pub fn print_info(msg: &str) {
    use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

    let mut stdout = std::io::stdout();
    let _ = crossterm::execute!(
        stdout,
        SetForegroundColor(Color::Cyan),
        Print("ℹ "),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}
