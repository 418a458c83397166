use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use zip::write::FileOptions;

use crate::app::adb::parse::parse_adb_devices;
use crate::app::adb::paths::sanitize_filename_component;
use crate::app::adb::CommandExecutor;
use crate::app::config::AppConfig;
use crate::app::error::AppError;
use crate::app::models::DeviceSummary;

#[derive(Debug, Serialize)]
struct DiagnosticsManifest {
    app_version: &'static str,
    os: &'static str,
    arch: &'static str,
    timestamp_utc: String,
    trace_id: String,
}

#[derive(Debug, Serialize)]
struct DevicesPayload {
    parsed: Vec<DeviceSummary>,
    raw_stdout: String,
    raw_stderr: String,
    exit_code: Option<i32>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DiagnosticsPayload<'a> {
    manifest: DiagnosticsManifest,
    config: &'a AppConfig,
    devices: DevicesPayload,
}

fn resolve_output_dir(config: &AppConfig, output_dir: Option<String>) -> String {
    if let Some(dir) = output_dir
        .as_deref()
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
    {
        return dir.to_string();
    }
    if !config.general.output_dir.trim().is_empty() {
        return config.general.output_dir.clone();
    }
    std::env::temp_dir()
        .join("xhelper_diagnostics")
        .to_string_lossy()
        .to_string()
}

/// Zip up a support bundle: a manifest, the active settings, and the raw
/// plus parsed `adb devices -l` output. Works without a reachable adb.
pub fn export_diagnostics_bundle(
    executor: &CommandExecutor,
    config: &AppConfig,
    output_dir: Option<String>,
    trace_id: &str,
) -> Result<PathBuf, AppError> {
    let resolved_dir = resolve_output_dir(config, output_dir);
    fs::create_dir_all(&resolved_dir)
        .map_err(|err| AppError::system(format!("Failed to create output dir: {err}"), trace_id))?;

    let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    let trace_short: String = sanitize_filename_component(trace_id)
        .chars()
        .take(8)
        .collect();
    let bundle_path =
        PathBuf::from(&resolved_dir).join(format!("diagnostics_{timestamp}_{trace_short}.zip"));

    let manifest = DiagnosticsManifest {
        app_version: env!("CARGO_PKG_VERSION"),
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
        timestamp_utc: Utc::now().to_rfc3339(),
        trace_id: trace_id.to_string(),
    };

    let mut devices = DevicesPayload {
        parsed: Vec::new(),
        raw_stdout: String::new(),
        raw_stderr: String::new(),
        exit_code: None,
        error: None,
    };
    let args = vec!["devices".to_string(), "-l".to_string()];
    match executor.run_adb(None, &args, trace_id) {
        Ok(output) => {
            devices.parsed = parse_adb_devices(&output.stdout);
            devices.raw_stdout = output.stdout;
            devices.raw_stderr = output.stderr;
            devices.exit_code = output.exit_code;
        }
        Err(err) => {
            warn!(trace_id = %trace_id, error = %err.error, code = %err.code, "Failed to run adb devices for diagnostics");
            devices.error = Some(err.error);
        }
    }

    let payload = DiagnosticsPayload {
        manifest,
        config,
        devices,
    };
    let json = serde_json::to_vec_pretty(&payload).map_err(|err| {
        AppError::system(
            format!("Failed to serialize diagnostics payload: {err}"),
            trace_id,
        )
    })?;

    let file = fs::File::create(&bundle_path)
        .map_err(|err| AppError::system(format!("Failed to create bundle: {err}"), trace_id))?;
    let mut bundle = zip::ZipWriter::new(file);
    bundle
        .start_file("diagnostics.json", FileOptions::<()>::default())
        .map_err(|err| AppError::system(format!("Failed to write bundle: {err}"), trace_id))?;
    bundle
        .write_all(&json)
        .map_err(|err| AppError::system(format!("Failed to write bundle: {err}"), trace_id))?;
    bundle
        .finish()
        .map_err(|err| AppError::system(format!("Failed to finalize bundle: {err}"), trace_id))?;

    Ok(bundle_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};
    use tempfile::TempDir;

    #[test]
    fn export_succeeds_without_adb_and_embeds_config() {
        let dir = TempDir::new().expect("tmp");
        let out_dir = dir.path().join("out");

        let mut config = AppConfig::default();
        config.general.adb_path = "/no/such/adb-binary".to_string();
        config.general.output_dir = out_dir.to_string_lossy().to_string();
        config.command.quick_timeout_secs = 1;
        let executor = CommandExecutor::from_config(&config);

        let bundle =
            export_diagnostics_bundle(&executor, &config, None, "trace-test").expect("bundle");
        assert!(bundle.starts_with(&out_dir));

        let bytes = fs::read(&bundle).expect("read bundle");
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("zip");
        let mut file = archive.by_name("diagnostics.json").expect("entry");
        let mut content = String::new();
        file.read_to_string(&mut content).expect("read");

        assert!(content.contains("\"trace_id\": \"trace-test\""));
        assert!(content.contains("/no/such/adb-binary"));
        assert!(content.contains("\"error\""));
    }
}
