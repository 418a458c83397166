use std::collections::BTreeSet;
use std::path::PathBuf;

use uuid::Uuid;

use crate::app::adb::parse::parse_adb_devices;
use crate::app::adb::runner::CommandOutput;
use crate::app::adb::{split_command_line, CommandExecutor};
use crate::app::config::AppConfig;
use crate::app::console::ConsoleLog;
use crate::app::models::DeviceSummary;
use crate::app::state::AppState;

#[derive(Default)]
pub struct DeviceSelection {
    pub selected: BTreeSet<String>,
    pub run_on_all: bool,
}

impl DeviceSelection {
    pub fn is_selected(&self, serial: &str) -> bool {
        self.selected.contains(serial)
    }

    pub fn toggle(&mut self, serial: &str) {
        if !self.selected.remove(serial) {
            self.selected.insert(serial.to_string());
        }
    }

    pub fn retain_known(&mut self, devices: &[DeviceSummary]) {
        self.selected
            .retain(|serial| devices.iter().any(|device| &device.serial == serial));
    }

    pub fn primary(&self) -> Option<String> {
        self.selected.iter().next().cloned()
    }

    /// Targets for a device-specific command: every selected device when
    /// "run on all selected" is on, otherwise just the first.
    pub fn targets(&self) -> Vec<String> {
        let all: Vec<String> = self.selected.iter().cloned().collect();
        if self.run_on_all {
            all
        } else {
            all.into_iter().take(1).collect()
        }
    }
}

/// What a tab or plugin gets instead of the whole window: settings, the
/// device list and selection, process handles, a command port and a log
/// sink.
pub struct AppContext {
    pub config: AppConfig,
    pub console: ConsoleLog,
    pub devices: Vec<DeviceSummary>,
    pub selection: DeviceSelection,
    pub state: AppState,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let ctx = Self {
            config,
            console: ConsoleLog::new(),
            devices: Vec::new(),
            selection: DeviceSelection::default(),
            state: AppState::new(),
        };
        ctx.apply_logging_settings();
        ctx
    }

    pub fn new_trace_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn executor(&self) -> CommandExecutor {
        CommandExecutor::from_config(&self.config)
    }

    pub fn log(&self, message: impl AsRef<str>) {
        self.console.log(message);
    }

    pub fn apply_logging_settings(&self) {
        let path = self.config.logging.log_file_path.trim();
        if self.config.logging.log_to_file && !path.is_empty() {
            self.console.set_file(Some(PathBuf::from(path)));
        } else {
            self.console.set_file(None);
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        let configured = self.config.general.output_dir.trim();
        if configured.is_empty() {
            PathBuf::from(".")
        } else {
            PathBuf::from(configured)
        }
    }

    pub fn check_adb(&mut self) {
        let trace_id = Self::new_trace_id();
        let info = self.executor().check_adb(&trace_id);
        if info.available {
            self.log("ADB is available");
            self.refresh_devices();
        } else {
            self.log("ADB not found. Install it and add to PATH.");
        }
    }

    pub fn refresh_devices(&mut self) {
        let trace_id = Self::new_trace_id();
        let args = vec!["devices".to_string(), "-l".to_string()];
        match self.executor().run_adb(None, &args, &trace_id) {
            Ok(output) => {
                self.devices = parse_adb_devices(&output.stdout);
                self.selection.retain_known(&self.devices);
                if self.devices.is_empty() {
                    self.log("No devices found");
                } else {
                    self.log(format!("Devices found: {}", self.devices.len()));
                }
            }
            Err(err) => {
                self.devices.clear();
                self.selection.retain_known(&self.devices);
                self.log(format!("Failed to list devices: {err}"));
            }
        }
    }

    /// Run one adb invocation per target and log everything. This is the
    /// single code path behind every "button runs a command" control.
    pub fn run_adb_command(&mut self, command: &str, device_specific: bool) {
        let args = split_command_line(command);
        if args.is_empty() {
            self.log("Empty command");
            return;
        }
        let targets: Vec<Option<String>> = if device_specific {
            let targets = self.selection.targets();
            if targets.is_empty() {
                self.log("No device selected");
                return;
            }
            targets.into_iter().map(Some).collect()
        } else {
            vec![None]
        };

        let executor = self.executor();
        let trace_id = Self::new_trace_id();
        for target in targets {
            match &target {
                Some(serial) => self.log(format!(
                    "Executing: {} -s {serial} {command}",
                    executor.adb_program()
                )),
                None => self.log(format!("Executing: {} {command}", executor.adb_program())),
            }
            match executor.run_adb(target.as_deref(), &args, &trace_id) {
                Ok(output) => self.log_command_output(&output),
                Err(err) => self.log(format!("Error executing command: {err}")),
            }
        }
    }

    pub fn run_fastboot_command(&mut self, args: &[String]) {
        let executor = self.executor();
        let trace_id = Self::new_trace_id();
        self.log(format!(
            "Executing: {} {}",
            executor.fastboot_program(),
            args.join(" ")
        ));
        match executor.run_fastboot(args, &trace_id) {
            Ok(output) => self.log_command_output(&output),
            Err(err) => self.log(format!("Fastboot error: {err}")),
        }
    }

    pub fn log_command_output(&self, output: &CommandOutput) {
        if !output.stdout.trim().is_empty() {
            self.log("Result:");
            self.log(output.stdout.trim_end());
        }
        if !output.stderr.trim().is_empty() {
            self.log("Errors:");
            self.log(output.stderr.trim_end());
        }
        if !output.success() {
            match output.exit_code {
                Some(code) => self.log(format!("Command exited with code: {code}")),
                None => self.log("Command terminated by signal"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(serial: &str) -> DeviceSummary {
        DeviceSummary {
            serial: serial.to_string(),
            state: "device".to_string(),
            model: None,
        }
    }

    #[test]
    fn selection_targets_first_unless_run_on_all() {
        let mut selection = DeviceSelection::default();
        selection.toggle("B");
        selection.toggle("A");
        assert_eq!(selection.targets(), vec!["A"]);
        selection.run_on_all = true;
        assert_eq!(selection.targets(), vec!["A", "B"]);
    }

    #[test]
    fn selection_drops_vanished_devices() {
        let mut selection = DeviceSelection::default();
        selection.toggle("A");
        selection.toggle("B");
        selection.retain_known(&[device("B")]);
        assert!(!selection.is_selected("A"));
        assert!(selection.is_selected("B"));
    }

    fn test_context() -> AppContext {
        let mut config = AppConfig::default();
        config.general.adb_path = "/no/such/adb-binary".to_string();
        config.command.quick_timeout_secs = 1;
        AppContext::new(config)
    }

    #[test]
    fn device_specific_command_without_selection_logs_once() {
        let mut ctx = test_context();
        ctx.run_adb_command("reboot", true);
        let lines = ctx.console.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("No device selected"));
    }

    #[test]
    fn failing_command_is_logged_per_target_and_continues() {
        let mut ctx = test_context();
        ctx.selection.toggle("A");
        ctx.selection.toggle("B");
        ctx.selection.run_on_all = true;
        ctx.run_adb_command("shell getprop", true);
        let lines = ctx.console.lines();
        let errors = lines
            .iter()
            .filter(|line| line.contains("Error executing command"))
            .count();
        assert_eq!(errors, 2);
    }

    #[test]
    fn empty_command_is_rejected() {
        let mut ctx = test_context();
        ctx.run_adb_command("   ", false);
        assert!(ctx.console.lines()[0].contains("Empty command"));
    }
}
