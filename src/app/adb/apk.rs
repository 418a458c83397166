use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

pub fn collect_apk_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("apk"))
        })
        .collect();
    files.sort();
    files
}

/// `adb install` prints `Success` on its own and exits 0; anything else is a
/// failure even when the exit code lies.
pub fn install_output_success(stdout: &str, exit_code: Option<i32>) -> bool {
    exit_code == Some(0) && !stdout.contains("Failure")
}

/// Pull the `INSTALL_*` failure token out of an install failure, when the
/// package manager provided one.
pub fn extract_install_failure(output: &str) -> Option<String> {
    let re = Regex::new(r"INSTALL(?:_PARSE)?_FAILED_[A-Z0-9_]+").ok()?;
    re.find(output).map(|m| m.as_str().to_string())
}

pub fn install_failure_details(stdout: &str, stderr: &str) -> String {
    if let Some(code) = extract_install_failure(stdout).or_else(|| extract_install_failure(stderr))
    {
        return code;
    }
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    let stdout = stdout.trim();
    if !stdout.is_empty() {
        return stdout.to_string();
    }
    "Unknown installation error".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collects_only_apk_files_sorted() {
        let dir = TempDir::new().expect("tmp");
        for name in ["b.apk", "a.APK", "notes.txt", "c.apk.bak"] {
            fs::write(dir.path().join(name), b"x").expect("write");
        }
        let files = collect_apk_files(dir.path());
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, vec!["a.APK", "b.apk"]);
    }

    #[test]
    fn missing_dir_yields_empty_list() {
        assert!(collect_apk_files(Path::new("/no/such/dir")).is_empty());
    }

    #[test]
    fn classifies_install_output() {
        assert!(install_output_success("Performing Streamed Install\nSuccess\n", Some(0)));
        assert!(!install_output_success(
            "Failure [INSTALL_FAILED_VERSION_DOWNGRADE]",
            Some(0)
        ));
        assert!(!install_output_success("Success", Some(1)));
    }

    #[test]
    fn extracts_failure_token() {
        assert_eq!(
            extract_install_failure("Failure [INSTALL_FAILED_OLDER_SDK: bad]").as_deref(),
            Some("INSTALL_FAILED_OLDER_SDK")
        );
        assert_eq!(
            extract_install_failure("Failure [INSTALL_PARSE_FAILED_NOT_APK]").as_deref(),
            Some("INSTALL_PARSE_FAILED_NOT_APK")
        );
        assert_eq!(extract_install_failure("all good"), None);
    }

    #[test]
    fn failure_details_prefers_code_then_stderr() {
        assert_eq!(
            install_failure_details("Failure [INSTALL_FAILED_TEST_ONLY]", "noise"),
            "INSTALL_FAILED_TEST_ONLY"
        );
        assert_eq!(
            install_failure_details("", "  device offline \n"),
            "device offline"
        );
        assert_eq!(install_failure_details("", ""), "Unknown installation error");
    }
}
