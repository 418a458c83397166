use std::path::PathBuf;

use crate::app::adb::apk::{install_failure_details, install_output_success};
use crate::app::adb::CommandExecutor;
use crate::app::context::AppContext;
use crate::app::reports::{
    save_report, BatchReport, ReportEntry, ReportKind, STATUS_FAILED, STATUS_SUCCESS,
    STATUS_TIMEOUT,
};
use crate::app::worker::WorkerCtx;

pub struct MassInstallJob {
    pub executor: CommandExecutor,
    pub apk_files: Vec<PathBuf>,
    pub serial: Option<String>,
    pub output_dir: PathBuf,
}

/// Install every APK in sequence on the worker thread. Failures are logged
/// and counted; the loop only stops early on the cancel flag.
pub fn run(ctx: &WorkerCtx, job: MassInstallJob) -> Option<BatchReport> {
    let total = job.apk_files.len();
    let trace_id = AppContext::new_trace_id();
    ctx.log(format!("Beginning mass installation of {total} APK files"));

    let mut entries = Vec::new();
    for (index, apk_path) in job.apk_files.iter().enumerate() {
        if ctx.cancelled() {
            ctx.log("Installation stopped by user");
            break;
        }
        let item = apk_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| apk_path.to_string_lossy().to_string());
        ctx.log(format!(
            "[{}/{}] Installing {}",
            index + 1,
            total,
            apk_path.display()
        ));

        let args = vec![
            "install".to_string(),
            "-r".to_string(),
            apk_path.to_string_lossy().to_string(),
        ];
        let result = job.executor.run_adb_with_timeout(
            job.serial.as_deref(),
            &args,
            job.executor.install_timeout(),
            &trace_id,
        );
        let (status, details) = match result {
            Ok(output) if install_output_success(&output.stdout, output.exit_code) => {
                ctx.log(format!("SUCCESS: {item}"));
                (STATUS_SUCCESS, "Installed".to_string())
            }
            Ok(output) => {
                let details = install_failure_details(&output.stdout, &output.stderr);
                ctx.log(format!("ERROR: {item} - {details}"));
                (STATUS_FAILED, details)
            }
            Err(err) if err.is_timeout() => {
                ctx.log(format!("TIMEOUT: {item}"));
                (STATUS_TIMEOUT, err.error)
            }
            Err(err) => {
                ctx.log(format!("ERROR: {item} - {err}"));
                (STATUS_FAILED, err.error)
            }
        };
        entries.push(ReportEntry {
            item,
            status: status.to_string(),
            details,
        });
        ctx.progress(index + 1, total);
    }

    let report = BatchReport::from_entries(ReportKind::MassInstall, entries);
    match save_report(&report, &job.output_dir) {
        Ok(saved) => {
            ctx.log(format!("JSON report saved: {}", saved.json_path.display()));
            ctx.log(format!("HTML report saved: {}", saved.html_path.display()));
        }
        Err(err) => ctx.log(format!("Failed to save report: {err}")),
    }
    ctx.log(format!("Installation completed! {}", report.summary_line()));
    Some(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::AppConfig;
    use crate::app::worker::{spawn_worker, WorkerEvent};
    use std::time::Duration;
    use tempfile::TempDir;

    fn failing_executor() -> CommandExecutor {
        let mut config = AppConfig::default();
        config.general.adb_path = "/no/such/adb-binary".to_string();
        CommandExecutor::from_config(&config)
    }

    #[test]
    fn unreachable_adb_produces_failed_entries_and_a_report() {
        let dir = TempDir::new().expect("tmp");
        let out_dir = dir.path().join("reports");
        let job = MassInstallJob {
            executor: failing_executor(),
            apk_files: vec![dir.path().join("a.apk"), dir.path().join("b.apk")],
            serial: None,
            output_dir: out_dir.clone(),
        };

        let handle = spawn_worker("mass-install", move |ctx| run(ctx, job));
        let report = loop {
            let mut finished = None;
            for event in handle.poll_events() {
                if let WorkerEvent::Finished { report } = event {
                    finished = Some(report);
                }
            }
            if let Some(report) = finished {
                break report;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        .expect("report");

        assert_eq!(report.total, 2);
        assert_eq!(report.success, 0);
        assert_eq!(report.failed, 2);
        assert_eq!(report.success + report.failed, report.total);
        assert!(report
            .entries
            .iter()
            .all(|entry| entry.status == STATUS_FAILED));

        let wrote_json = std::fs::read_dir(&out_dir)
            .expect("out dir")
            .flatten()
            .any(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == "json")
            });
        assert!(wrote_json);
    }

    #[test]
    fn cancelled_job_reports_only_processed_files() {
        let dir = TempDir::new().expect("tmp");
        let job = MassInstallJob {
            executor: failing_executor(),
            apk_files: (0..50).map(|i| dir.path().join(format!("{i}.apk"))).collect(),
            serial: None,
            output_dir: dir.path().join("reports"),
        };

        let handle = spawn_worker("mass-install", move |ctx| run(ctx, job));
        handle.cancel();
        let report = loop {
            let mut finished = None;
            for event in handle.poll_events() {
                if let WorkerEvent::Finished { report } = event {
                    finished = Some(report);
                }
            }
            if let Some(report) = finished {
                break report;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        .expect("report");

        assert!(report.total < 50);
        assert_eq!(report.total, report.entries.len());
        assert_eq!(report.success + report.failed, report.total);
    }
}
