use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::app::error::AppError;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_TIMEOUT: &str = "timeout";
pub const STATUS_OK: &str = "ok";
pub const STATUS_CRASHED: &str = "crashed";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    MassInstall,
    AppTesting,
}

impl ReportKind {
    pub fn base_name(&self) -> &'static str {
        match self {
            ReportKind::MassInstall => "mass_install_report",
            ReportKind::AppTesting => "app_testing_report",
        }
    }

    fn success_status(&self) -> &'static str {
        match self {
            ReportKind::MassInstall => STATUS_SUCCESS,
            ReportKind::AppTesting => STATUS_OK,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::MassInstall => "Mass installation",
            ReportKind::AppTesting => "App testing",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportEntry {
    pub item: String,
    pub status: String,
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchReport {
    #[serde(rename = "type")]
    pub kind: ReportKind,
    pub timestamp: String,
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub entries: Vec<ReportEntry>,
}

impl BatchReport {
    /// Totals are derived from the entries, never tracked separately, so
    /// `success + failed == total` holds by construction.
    pub fn from_entries(kind: ReportKind, entries: Vec<ReportEntry>) -> Self {
        let total = entries.len();
        let success = entries
            .iter()
            .filter(|entry| entry.status == kind.success_status())
            .count();
        Self {
            kind,
            timestamp: Local::now().to_rfc3339(),
            total,
            success,
            failed: total - success,
            entries,
        }
    }

    pub fn summary_line(&self) -> String {
        format!("Success: {}, Errors: {}", self.success, self.failed)
    }
}

pub struct SavedReport {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
}

/// Write the report twice: pretty JSON for machines, a small HTML table for
/// humans. File names carry the wall-clock timestamp.
pub fn save_report(report: &BatchReport, output_dir: &Path) -> Result<SavedReport, AppError> {
    fs::create_dir_all(output_dir)
        .map_err(|err| AppError::system(format!("Failed to create output dir: {err}"), ""))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let base = report.kind.base_name();
    let json_path = output_dir.join(format!("{base}_{stamp}.json"));
    let html_path = output_dir.join(format!("{base}_{stamp}.html"));

    let json = serde_json::to_string_pretty(report)
        .map_err(|err| AppError::system(format!("Failed to serialize report: {err}"), ""))?;
    fs::write(&json_path, json)
        .map_err(|err| AppError::system(format!("Failed to write JSON report: {err}"), ""))?;
    fs::write(&html_path, render_report_html(report))
        .map_err(|err| AppError::system(format!("Failed to write HTML report: {err}"), ""))?;

    Ok(SavedReport {
        json_path,
        html_path,
    })
}

pub fn render_report_html(report: &BatchReport) -> String {
    let mut rows = String::new();
    for entry in &report.entries {
        rows.push_str("<tr><td>");
        rows.push_str(&escape_html(&entry.item));
        rows.push_str("</td><td>");
        rows.push_str(&escape_html(&entry.status));
        rows.push_str("</td><td>");
        rows.push_str(&escape_html(&entry.details));
        rows.push_str("</td></tr>\n");
    }
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title} report</title>\n<style>\nbody {{font-family:Arial,sans-serif;}}\ntable {{border-collapse:collapse;width:100%;}}\nth,td {{border:1px solid #ddd;padding:8px;}}\nth {{background:#f2f2f2;}}\n</style>\n</head>\n<body>\n<h2>{title} report - {timestamp}</h2>\n<p>Total: {total}, success: {success}, failed: {failed}</p>\n<table>\n<tr><th>Package</th><th>Status</th><th>Details</th></tr>\n{rows}</table>\n</body>\n</html>\n",
        title = report.kind.title(),
        timestamp = escape_html(&report.timestamp),
        total = report.total,
        success = report.success,
        failed = report.failed,
        rows = rows,
    )
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_entries() -> Vec<ReportEntry> {
        vec![
            ReportEntry {
                item: "one.apk".to_string(),
                status: STATUS_SUCCESS.to_string(),
                details: "Installed".to_string(),
            },
            ReportEntry {
                item: "two.apk".to_string(),
                status: STATUS_FAILED.to_string(),
                details: "INSTALL_FAILED_OLDER_SDK".to_string(),
            },
            ReportEntry {
                item: "three.apk".to_string(),
                status: STATUS_TIMEOUT.to_string(),
                details: "Command timed out after 360 sec".to_string(),
            },
        ]
    }

    #[test]
    fn totals_match_entry_statuses() {
        let report = BatchReport::from_entries(ReportKind::MassInstall, sample_entries());
        assert_eq!(report.total, 3);
        assert_eq!(report.success, 1);
        assert_eq!(report.failed, 2);
        assert_eq!(report.success + report.failed, report.total);
        let success_entries = report
            .entries
            .iter()
            .filter(|entry| entry.status == STATUS_SUCCESS)
            .count();
        assert_eq!(report.success, success_entries);
    }

    #[test]
    fn app_testing_counts_ok_as_success() {
        let entries = vec![
            ReportEntry {
                item: "com.example.good".to_string(),
                status: STATUS_OK.to_string(),
                details: "No errors".to_string(),
            },
            ReportEntry {
                item: "com.example.bad".to_string(),
                status: STATUS_CRASHED.to_string(),
                details: "Errors: 3".to_string(),
            },
        ];
        let report = BatchReport::from_entries(ReportKind::AppTesting, entries);
        assert_eq!(report.success, 1);
        assert_eq!(report.failed, 1);
    }

    #[test]
    fn json_serialization_uses_type_field() {
        let report = BatchReport::from_entries(ReportKind::MassInstall, Vec::new());
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["type"], "mass_install");
        assert_eq!(value["total"], 0);
        let back: BatchReport = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, report);
    }

    #[test]
    fn html_contains_rows_and_escapes_markup() {
        let entries = vec![ReportEntry {
            item: "<script>.apk".to_string(),
            status: STATUS_FAILED.to_string(),
            details: "a & b".to_string(),
        }];
        let report = BatchReport::from_entries(ReportKind::MassInstall, entries);
        let html = render_report_html(&report);
        assert!(html.contains("&lt;script&gt;.apk"));
        assert!(html.contains("a &amp; b"));
        assert!(!html.contains("<script>.apk"));
    }

    #[test]
    fn save_report_writes_json_and_html() {
        let dir = TempDir::new().expect("tmp");
        let report = BatchReport::from_entries(ReportKind::AppTesting, sample_entries());
        let saved = save_report(&report, dir.path()).expect("save");
        assert!(saved.json_path.exists());
        assert!(saved.html_path.exists());

        let raw = std::fs::read_to_string(&saved.json_path).expect("read json");
        let loaded: BatchReport = serde_json::from_str(&raw).expect("parse json");
        assert_eq!(loaded, report);
    }
}
