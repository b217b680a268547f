use crate::{
    error::ExportError,
    resources::ReportRow,
};
use std::path::Path;

/// Report column names, shared by both formats.
pub const HEADERS: [&str; 6] = [
    "Namespace",
    "VM_Name",
    "OS_Name",
    "OS_Version",
    "Kernel",
    "Agent_Connected",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    Csv,
    Md,
}

impl Format {
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Md => "md",
        }
    }

    /// Whether the output path carries the extension this format expects
    /// (ascii case-insensitive). A path without an extension never matches.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case(self.extension()))
    }
}

pub fn render(format: Format, rows: &[ReportRow]) -> String {
    match format {
        Format::Csv => render_csv(rows),
        Format::Md => render_markdown(rows),
    }
}

fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = String::new();

    out.push_str(&HEADERS.join(","));
    out.push('\n');

    for row in rows {
        let line = row
            .fields()
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Quote a field containing a delimiter, quote or line break; embedded quotes
/// are doubled.
fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn render_markdown(rows: &[ReportRow]) -> String {
    let mut out = String::new();

    out.push_str("# OpenShift Virtualization OS Report\n\n");
    out.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
    out.push_str(&format!("| {} |\n", vec!["---"; HEADERS.len()].join(" | ")));

    for row in rows {
        out.push_str(&format!("| {} |\n", row.fields().join(" | ")));
    }

    out
}

/// Render the whole report in memory and write it in one shot. Nothing is
/// written when the destination cannot be created.
pub fn write_report(path: &Path, format: Format, rows: &[ReportRow]) -> Result<(), ExportError> {
    let contents = render(format, rows);

    std::fs::write(path, contents).map_err(|source| ExportError::Output {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::AgentState;

    fn row(namespace: &str, vm_name: &str, os_name: &str) -> ReportRow {
        ReportRow {
            namespace: namespace.to_string(),
            vm_name: vm_name.to_string(),
            os_name: os_name.to_string(),
            os_version: "N/A".to_string(),
            kernel: "N/A".to_string(),
            agent_connected: AgentState::Connected,
        }
    }

    #[test]
    fn test_csv_layout() {
        let rows = vec![row("ns1", "vm1", "Linux")];

        assert_eq!(
            render(Format::Csv, &rows),
            "Namespace,VM_Name,OS_Name,OS_Version,Kernel,Agent_Connected\n\
             ns1,vm1,Linux,N/A,N/A,Connected\n"
        );
    }

    #[test]
    fn test_csv_escapes_delimiters_and_quotes() {
        let rows = vec![row("ns1", "vm1", "Windows, Server \"2022\"")];
        let out = render(Format::Csv, &rows);

        assert!(out.contains("\"Windows, Server \"\"2022\"\"\""));

        let data_line = out.lines().nth(1).unwrap();
        assert!(data_line.starts_with("ns1,vm1,\"Windows"));
    }

    #[test]
    fn test_markdown_layout() {
        let rows = vec![row("ns1", "vm1", "Linux"), row("ns2", "vm2", "FreeBSD")];
        let out = render(Format::Md, &rows);
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4 + rows.len());
        assert_eq!(lines[0], "# OpenShift Virtualization OS Report");
        assert_eq!(lines[1], "");
        assert_eq!(
            lines[2],
            "| Namespace | VM_Name | OS_Name | OS_Version | Kernel | Agent_Connected |"
        );
        assert_eq!(lines[3], "| --- | --- | --- | --- | --- | --- |");
        assert_eq!(lines[4], "| ns1 | vm1 | Linux | N/A | N/A | Connected |");
        assert_eq!(lines[5], "| ns2 | vm2 | FreeBSD | N/A | N/A | Connected |");
    }

    #[test]
    fn test_extension_matching() {
        assert!(Format::Csv.matches_extension(Path::new("report.csv")));
        assert!(Format::Csv.matches_extension(Path::new("REPORT.CSV")));
        assert!(Format::Md.matches_extension(Path::new("inventory.md")));

        assert!(!Format::Csv.matches_extension(Path::new("report.md")));
        assert!(!Format::Md.matches_extension(Path::new("inventory")));
        assert!(!Format::Csv.matches_extension(Path::new("csv")));
    }

    #[test]
    fn test_write_report_fails_on_unwritable_destination() {
        let rows = vec![row("ns1", "vm1", "Linux")];
        let err = write_report(Path::new("/nonexistent-dir/report.csv"), Format::Csv, &rows);

        assert!(matches!(err, Err(ExportError::Output { .. })));
    }
}
