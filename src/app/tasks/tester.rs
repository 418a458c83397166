use std::path::PathBuf;
use std::time::Duration;

use crate::app::adb::parse::count_crash_markers;
use crate::app::adb::CommandExecutor;
use crate::app::context::AppContext;
use crate::app::reports::{
    save_report, BatchReport, ReportEntry, ReportKind, STATUS_CRASHED, STATUS_OK,
};
use crate::app::worker::WorkerCtx;

const LAUNCH_TIMEOUT: Duration = Duration::from_secs(5);
const LOGCAT_TIMEOUT: Duration = Duration::from_secs(10);
const SETTLE_DELAY: Duration = Duration::from_secs(3);

pub struct CrashSweepJob {
    pub executor: CommandExecutor,
    pub packages: Vec<String>,
    pub serial: Option<String>,
    pub delay_secs: u64,
    pub output_dir: PathBuf,
}

/// Launch each user package once, let it settle, and scan an error-level
/// logcat dump for crash markers. One worker thread, cooperative stop
/// between packages.
pub fn run(ctx: &WorkerCtx, job: CrashSweepJob) -> Option<BatchReport> {
    let total = job.packages.len();
    ctx.log(format!("Starting application testing of {total} packages"));

    let mut entries = Vec::new();
    for (index, package) in job.packages.iter().enumerate() {
        if ctx.cancelled() {
            ctx.log("Testing stopped by user");
            break;
        }

        let error_count = test_package(&job, package);
        if error_count > 0 {
            ctx.item_status(index, STATUS_CRASHED, format!("Errors: {error_count}"));
            entries.push(ReportEntry {
                item: package.clone(),
                status: STATUS_CRASHED.to_string(),
                details: format!("Errors: {error_count}"),
            });
        } else {
            ctx.item_status(index, STATUS_OK, "No errors");
            entries.push(ReportEntry {
                item: package.clone(),
                status: STATUS_OK.to_string(),
                details: "No errors".to_string(),
            });
        }
        ctx.progress(index + 1, total);

        if index + 1 < total {
            for remaining in (1..=job.delay_secs).rev() {
                if ctx.cancelled() {
                    break;
                }
                ctx.log(format!("Waiting {remaining}s before next test..."));
                std::thread::sleep(Duration::from_secs(1));
            }
        }
    }

    let crashed = entries
        .iter()
        .filter(|entry| entry.status == STATUS_CRASHED)
        .count();
    if crashed > 0 {
        ctx.log(format!("Testing finished. Problematic apps: {crashed}"));
    } else {
        ctx.log("Testing finished. No problematic apps found");
    }

    let report = BatchReport::from_entries(ReportKind::AppTesting, entries);
    match save_report(&report, &job.output_dir) {
        Ok(saved) => {
            ctx.log(format!("JSON report saved: {}", saved.json_path.display()));
            ctx.log(format!("HTML report saved: {}", saved.html_path.display()));
        }
        Err(err) => ctx.log(format!("Failed to save report: {err}")),
    }
    Some(report)
}

/// One launch-and-observe cycle. A launch or logcat failure counts as one
/// error.
fn test_package(job: &CrashSweepJob, package: &str) -> u32 {
    let trace_id = AppContext::new_trace_id();
    let serial = job.serial.as_deref();

    let clear = vec!["logcat".to_string(), "-c".to_string()];
    let _ = job.executor.run_adb_quick(serial, &clear, &trace_id);

    let launch = vec![
        "shell".to_string(),
        "monkey".to_string(),
        "-p".to_string(),
        package.to_string(),
        "-c".to_string(),
        "android.intent.category.LAUNCHER".to_string(),
        "1".to_string(),
    ];
    if job
        .executor
        .run_adb_with_timeout(serial, &launch, LAUNCH_TIMEOUT, &trace_id)
        .is_err()
    {
        return 1;
    }

    std::thread::sleep(SETTLE_DELAY);

    let dump = vec![
        "logcat".to_string(),
        "-d".to_string(),
        "-v".to_string(),
        "brief".to_string(),
        "*:E".to_string(),
    ];
    let error_count = match job
        .executor
        .run_adb_with_timeout(serial, &dump, LOGCAT_TIMEOUT, &trace_id)
    {
        Ok(output) => count_crash_markers(&output.stdout, package),
        Err(_) => 1,
    };

    let stop = vec![
        "shell".to_string(),
        "am".to_string(),
        "force-stop".to_string(),
        package.to_string(),
    ];
    let _ = job.executor.run_adb_quick(serial, &stop, &trace_id);

    error_count
}
