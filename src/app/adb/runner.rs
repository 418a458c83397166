use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::app::error::AppError;

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Run one external process to completion, capturing stdout/stderr, with a
/// hard timeout. This is the single choke point every tab and worker goes
/// through; call sites differ only in the timeout they pass.
pub fn run_command_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
    trace_id: &str,
) -> Result<CommandOutput, AppError> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| {
            AppError::dependency(format!("Failed to spawn '{program}': {err}"), trace_id)
        })?;

    // Drain stdout/stderr in parallel; otherwise a chatty child blocks once
    // the pipe buffer fills and we would incorrectly hit the timeout.
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stdout", trace_id))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| AppError::system("Failed to capture stderr", trace_id))?;
    let stdout_handle = spawn_drain(stdout);
    let stderr_handle = spawn_drain(stderr);

    let start = Instant::now();
    let exit_code = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status.code(),
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_handle.join();
                    let _ = stderr_handle.join();
                    return Err(AppError::timeout(
                        format!("Command timed out after {} sec", timeout.as_secs()),
                        trace_id,
                    ));
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(err) => {
                let _ = stdout_handle.join();
                let _ = stderr_handle.join();
                return Err(AppError::system(
                    format!("Failed to poll command: {err}"),
                    trace_id,
                ));
            }
        }
    };

    let stdout_bytes = stdout_handle.join().unwrap_or_default();
    let stderr_bytes = stderr_handle.join().unwrap_or_default();

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&stdout_bytes).to_string(),
        stderr: String::from_utf8_lossy(&stderr_bytes).to_string(),
        exit_code,
    })
}

/// Start a long-lived child (scrcpy, screenrecord) without waiting on it.
/// The caller owns the handle and is responsible for terminating it.
pub fn spawn_detached(program: &str, args: &[String], trace_id: &str) -> Result<Child, AppError> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|err| {
            AppError::dependency(format!("Failed to spawn '{program}': {err}"), trace_id)
        })
}

fn spawn_drain<R: Read + Send + 'static>(mut reader: R) -> JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buffer = Vec::<u8>::new();
        let mut chunk = [0u8; 4096];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(count) => buffer.extend_from_slice(&chunk[..count]),
                Err(_) => break,
            }
        }
        buffer
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> (String, Vec<String>) {
        if cfg!(windows) {
            ("cmd.exe".to_string(), vec!["/C".to_string(), script.to_string()])
        } else {
            ("sh".to_string(), vec!["-c".to_string(), script.to_string()])
        }
    }

    #[test]
    fn captures_output_and_exit_code() {
        let (program, args) = sh("echo out && echo err 1>&2");
        let output = run_command_with_timeout(&program, &args, Duration::from_secs(10), "trace")
            .expect("command");
        assert!(output.success());
        assert!(output.stdout.contains("out"));
        assert!(output.stderr.contains("err"));
    }

    #[test]
    fn reports_nonzero_exit_code() {
        let (program, args) = sh("exit 3");
        let output = run_command_with_timeout(&program, &args, Duration::from_secs(10), "trace")
            .expect("command");
        assert!(!output.success());
        assert_eq!(output.exit_code, Some(3));
    }

    #[test]
    fn missing_program_is_a_dependency_error() {
        let err = run_command_with_timeout(
            "/this/program/does/not/exist",
            &[],
            Duration::from_secs(1),
            "trace",
        )
        .unwrap_err();
        assert_eq!(err.code, "ERR_DEPENDENCY");
    }

    #[cfg(unix)]
    #[test]
    fn slow_command_times_out() {
        let (program, args) = sh("sleep 10");
        let err = run_command_with_timeout(&program, &args, Duration::from_millis(200), "trace")
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn does_not_deadlock_on_large_stdout() {
        // A child that fills the pipe buffer must not hang the runner.
        let (program, args, min_len) = if cfg!(windows) {
            (
                "cmd.exe".to_string(),
                vec![
                    "/C".to_string(),
                    "for /L %i in (1,1,100000) do @echo 1234567890".to_string(),
                ],
                1_000_000usize,
            )
        } else {
            (
                "sh".to_string(),
                vec![
                    "-c".to_string(),
                    "i=0; while [ $i -lt 100000 ]; do echo 1234567890; i=$((i+1)); done"
                        .to_string(),
                ],
                1_000_000usize,
            )
        };
        let output = run_command_with_timeout(&program, &args, Duration::from_secs(10), "trace")
            .expect("large output");
        assert!(output.success());
        assert!(output.stdout.len() >= min_len);
    }
}
