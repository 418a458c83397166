use std::path::Path;
use std::process::Command;

use crate::app::adb::locator::normalize_command_path;
use crate::app::models::ToolInfo;

pub fn check_scrcpy_availability(configured_path: &str) -> ToolInfo {
    let mut result = ToolInfo {
        available: false,
        version_output: String::new(),
        command_path: "scrcpy".to_string(),
        error: None,
    };

    let configured = normalize_command_path(configured_path);
    let mut candidates: Vec<String> = Vec::new();
    if !configured.is_empty() {
        candidates.push(configured);
    }
    candidates.push("scrcpy".to_string());
    let common_paths = if std::env::consts::OS == "macos" {
        vec![
            "/opt/homebrew/bin/scrcpy",
            "/usr/local/bin/scrcpy",
            "~/Applications/scrcpy.app/Contents/MacOS/scrcpy",
        ]
    } else {
        vec![
            "/usr/bin/scrcpy",
            "/usr/local/bin/scrcpy",
            "/snap/bin/scrcpy",
            "~/.local/bin/scrcpy",
        ]
    };
    candidates.extend(common_paths.into_iter().map(expand_home));

    for candidate in candidates {
        let is_bare = !candidate.contains('/');
        if !is_bare && !Path::new(&candidate).exists() {
            continue;
        }
        if let Some(output) = try_version(&candidate) {
            result.available = true;
            result.version_output = output;
            result.command_path = candidate;
            return result;
        }
    }

    result.error = Some("scrcpy not found".to_string());
    result
}

/// Mirror invocation: `-s` when a serial is selected, capped frame rate and a
/// recognizable window title.
pub fn build_scrcpy_command(serial: Option<&str>) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(serial) = serial {
        args.push("-s".to_string());
        args.push(serial.to_string());
    }
    args.push("--max-fps".to_string());
    args.push("60".to_string());
    args.push("--window-title".to_string());
    args.push("xHelper - Android Screen".to_string());
    args
}

fn try_version(command: &str) -> Option<String> {
    let output = Command::new(command).arg("--version").output().ok()?;
    if output.status.success() {
        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        None
    }
}

fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_scrcpy_command_targets_serial() {
        let args = build_scrcpy_command(Some("ABC123"));
        assert_eq!(args[0], "-s");
        assert_eq!(args[1], "ABC123");
        assert!(args.contains(&"--max-fps".to_string()));
    }

    #[test]
    fn build_scrcpy_command_without_serial() {
        let args = build_scrcpy_command(None);
        assert!(!args.contains(&"-s".to_string()));
        assert!(args.contains(&"--window-title".to_string()));
    }

    #[test]
    fn unavailable_scrcpy_reports_error() {
        let info = check_scrcpy_availability("/definitely/not/scrcpy");
        if !info.available {
            assert!(info.error.is_some());
        }
    }
}
