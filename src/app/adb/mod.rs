pub mod apk;
pub mod fastboot;
pub mod locator;
pub mod parse;
pub mod paths;
pub mod runner;
pub mod scrcpy;

use std::time::Duration;

use crate::app::config::AppConfig;
use crate::app::error::AppError;
use crate::app::models::ToolInfo;

use locator::resolve_tool_program;
use runner::{run_command_with_timeout, CommandOutput};

/// The one command-execution port. Resolves tool paths and canonical
/// timeouts from settings once; tabs, plugins and workers all go through it.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    adb_program: String,
    fastboot_program: String,
    timeout: Duration,
    quick_timeout: Duration,
    install_timeout: Duration,
    fastboot_timeout: Duration,
}

impl CommandExecutor {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            adb_program: resolve_tool_program(&config.general.adb_path, "adb"),
            fastboot_program: resolve_tool_program(&config.general.fastboot_path, "fastboot"),
            timeout: Duration::from_secs(config.command.timeout_secs),
            quick_timeout: Duration::from_secs(config.command.quick_timeout_secs),
            install_timeout: Duration::from_secs(config.command.install_timeout_secs),
            fastboot_timeout: Duration::from_secs(config.command.fastboot_timeout_secs),
        }
    }

    pub fn adb_program(&self) -> &str {
        &self.adb_program
    }

    pub fn fastboot_program(&self) -> &str {
        &self.fastboot_program
    }

    pub fn install_timeout(&self) -> Duration {
        self.install_timeout
    }

    pub fn run_adb(
        &self,
        serial: Option<&str>,
        args: &[String],
        trace_id: &str,
    ) -> Result<CommandOutput, AppError> {
        self.run_adb_with_timeout(serial, args, self.timeout, trace_id)
    }

    pub fn run_adb_quick(
        &self,
        serial: Option<&str>,
        args: &[String],
        trace_id: &str,
    ) -> Result<CommandOutput, AppError> {
        self.run_adb_with_timeout(serial, args, self.quick_timeout, trace_id)
    }

    pub fn run_adb_with_timeout(
        &self,
        serial: Option<&str>,
        args: &[String],
        timeout: Duration,
        trace_id: &str,
    ) -> Result<CommandOutput, AppError> {
        let full = adb_args(serial, args);
        run_command_with_timeout(&self.adb_program, &full, timeout, trace_id)
    }

    pub fn run_fastboot(&self, args: &[String], trace_id: &str) -> Result<CommandOutput, AppError> {
        self.run_fastboot_with_timeout(args, self.fastboot_timeout, trace_id)
    }

    pub fn run_fastboot_with_timeout(
        &self,
        args: &[String],
        timeout: Duration,
        trace_id: &str,
    ) -> Result<CommandOutput, AppError> {
        run_command_with_timeout(&self.fastboot_program, args, timeout, trace_id)
    }

    pub fn check_adb(&self, trace_id: &str) -> ToolInfo {
        self.probe_tool(&self.adb_program, trace_id)
    }

    pub fn check_fastboot(&self, trace_id: &str) -> ToolInfo {
        self.probe_tool(&self.fastboot_program, trace_id)
    }

    fn probe_tool(&self, program: &str, trace_id: &str) -> ToolInfo {
        let args = vec!["--version".to_string()];
        match run_command_with_timeout(program, &args, self.quick_timeout, trace_id) {
            Ok(output) if output.success() => ToolInfo {
                available: true,
                version_output: output.stdout.trim().to_string(),
                command_path: program.to_string(),
                error: None,
            },
            Ok(output) => ToolInfo {
                available: false,
                version_output: output.stdout.trim().to_string(),
                command_path: program.to_string(),
                error: Some(format!(
                    "'{program} --version' exited with code {:?}",
                    output.exit_code
                )),
            },
            Err(err) => ToolInfo {
                available: false,
                version_output: String::new(),
                command_path: program.to_string(),
                error: Some(err.error),
            },
        }
    }
}

pub fn adb_args(serial: Option<&str>, args: &[String]) -> Vec<String> {
    let mut full = Vec::with_capacity(args.len() + 2);
    if let Some(serial) = serial {
        full.push("-s".to_string());
        full.push(serial.to_string());
    }
    full.extend(args.iter().cloned());
    full
}

/// Split a command typed by the user the way the PyQt versions did: plain
/// whitespace, no quoting.
pub fn split_command_line(command: &str) -> Vec<String> {
    command
        .split_whitespace()
        .map(|token| token.to_string())
        .collect()
}
