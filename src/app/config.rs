use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub adb_path: String,
    pub fastboot_path: String,
    pub scrcpy_path: String,
    pub output_dir: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            adb_path: String::new(),
            fastboot_path: String::new(),
            scrcpy_path: String::new(),
            output_dir: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiSettings {
    pub dark_theme: bool,
    pub show_console: bool,
    pub console_height: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            dark_theme: false,
            show_console: true,
            console_height: 180.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub log_to_file: bool,
    pub log_file_path: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("xHelper_log.txt");
        Self {
            log_to_file: false,
            log_file_path: path.to_string_lossy().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HotkeySettings {
    pub refresh_devices: String,
    pub screenshot: String,
    pub screen_mirror: String,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            refresh_devices: "Ctrl+R".to_string(),
            screenshot: "Ctrl+S".to_string(),
            screen_mirror: "Ctrl+M".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandSettings {
    pub timeout_secs: u64,
    pub quick_timeout_secs: u64,
    pub install_timeout_secs: u64,
    pub fastboot_timeout_secs: u64,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            quick_timeout_secs: 7,
            install_timeout_secs: 360,
            fastboot_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub ui: UiSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub hotkeys: HotkeySettings,
    #[serde(default)]
    pub command: CommandSettings,
    #[serde(default)]
    pub version: String,
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("XHELPER_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".xhelper_config.json")
}

pub fn backup_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".xhelper_config.backup.json")
}

pub fn load_config() -> Result<AppConfig, AppError> {
    load_config_from_path(&config_path())
}

pub fn save_config(config: &AppConfig) -> Result<(), AppError> {
    save_config_to_path(config, &config_path(), &backup_config_path())
}

pub fn load_config_from_path(path: &Path) -> Result<AppConfig, AppError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let raw = fs::read_to_string(path)
        .map_err(|err| AppError::system(format!("Failed to read config: {err}"), ""))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|err| AppError::system(format!("Failed to parse config: {err}"), ""))?;
    let mut config: AppConfig = serde_json::from_value(value.clone()).unwrap_or_default();
    config = apply_legacy_overrides(config, &value);
    Ok(validate_config(config))
}

pub fn save_config_to_path(
    config: &AppConfig,
    path: &Path,
    backup_path: &Path,
) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if path.exists() {
        let _ = fs::copy(path, backup_path);
    }
    let payload = serde_json::to_string_pretty(config)
        .map_err(|err| AppError::system(format!("Failed to serialize config: {err}"), ""))?;
    fs::write(path, payload)
        .map_err(|err| AppError::system(format!("Failed to write config: {err}"), ""))?;
    Ok(())
}

// Older settings files were a flat object; fold the known keys into their
// sections so they keep working.
fn apply_legacy_overrides(mut config: AppConfig, value: &serde_json::Value) -> AppConfig {
    if let Some(adb_path) = value.get("adb_path").and_then(|v| v.as_str()) {
        config.general.adb_path = adb_path.to_string();
    }
    if let Some(dark) = value.get("theme_dark").and_then(|v| v.as_bool()) {
        config.ui.dark_theme = dark;
    }
    if let Some(log_to_file) = value.get("log_to_file").and_then(|v| v.as_bool()) {
        config.logging.log_to_file = log_to_file;
    }
    if let Some(log_file_path) = value.get("log_file_path").and_then(|v| v.as_str()) {
        config.logging.log_file_path = log_file_path.to_string();
    }
    if let Some(hotkeys) = value.get("hotkeys").and_then(|v| v.as_object()) {
        if let Some(seq) = hotkeys.get("refresh").and_then(|v| v.as_str()) {
            config.hotkeys.refresh_devices = seq.to_string();
        }
        if let Some(seq) = hotkeys.get("screenshot").and_then(|v| v.as_str()) {
            config.hotkeys.screenshot = seq.to_string();
        }
        if let Some(seq) = hotkeys.get("scrcpy").and_then(|v| v.as_str()) {
            config.hotkeys.screen_mirror = seq.to_string();
        }
    }
    config
}

fn validate_config(mut config: AppConfig) -> AppConfig {
    if !(1..=3600).contains(&config.command.timeout_secs) {
        config.command.timeout_secs = 30;
    }
    if !(1..=60).contains(&config.command.quick_timeout_secs) {
        config.command.quick_timeout_secs = 7;
    }
    if !(1..=3600).contains(&config.command.install_timeout_secs) {
        config.command.install_timeout_secs = 360;
    }
    if !(1..=3600).contains(&config.command.fastboot_timeout_secs) {
        config.command.fastboot_timeout_secs = 60;
    }
    if !(80.0..=600.0).contains(&config.ui.console_height) {
        config.ui.console_height = 180.0;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("config.json");
        let backup = dir.path().join("config.backup.json");

        let mut config = AppConfig::default();
        config.general.adb_path = "/opt/platform-tools/adb".to_string();
        config.ui.dark_theme = true;
        config.command.timeout_secs = 45;
        config.hotkeys.refresh_devices = "F5".to_string();
        config.version = "0.2.0".to_string();

        save_config_to_path(&config, &path, &backup).expect("save");
        let loaded = load_config_from_path(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().expect("tmp");
        let config = load_config_from_path(&dir.path().join("nope.json")).expect("load");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn merges_legacy_flat_keys() {
        let value = serde_json::json!({
            "adb_path": "/usr/local/bin/adb",
            "theme_dark": true,
            "log_to_file": true,
            "log_file_path": "/tmp/xhelper.log",
            "hotkeys": {"refresh": "F5", "screenshot": "F12"}
        });
        let config: AppConfig = serde_json::from_value(value.clone()).unwrap_or_default();
        let config = apply_legacy_overrides(config, &value);
        assert_eq!(config.general.adb_path, "/usr/local/bin/adb");
        assert!(config.ui.dark_theme);
        assert!(config.logging.log_to_file);
        assert_eq!(config.logging.log_file_path, "/tmp/xhelper.log");
        assert_eq!(config.hotkeys.refresh_devices, "F5");
        assert_eq!(config.hotkeys.screenshot, "F12");
    }

    #[test]
    fn clamps_invalid_values() {
        let mut config = AppConfig::default();
        config.command.timeout_secs = 0;
        config.command.install_timeout_secs = 999_999;
        config.ui.console_height = 5.0;
        let validated = validate_config(config);
        assert_eq!(validated.command.timeout_secs, 30);
        assert_eq!(validated.command.install_timeout_secs, 360);
        assert_eq!(validated.ui.console_height, 180.0);
    }

    #[test]
    fn save_creates_backup_of_previous_file() {
        let dir = TempDir::new().expect("tmp");
        let path = dir.path().join("config.json");
        let backup = dir.path().join("config.backup.json");

        let first = AppConfig::default();
        save_config_to_path(&first, &path, &backup).expect("save first");
        let mut second = AppConfig::default();
        second.ui.dark_theme = true;
        save_config_to_path(&second, &path, &backup).expect("save second");

        let restored = load_config_from_path(&backup).expect("load backup");
        assert_eq!(restored, first);
    }
}
