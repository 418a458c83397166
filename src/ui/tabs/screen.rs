use chrono::Local;
use egui::RichText;

use crate::app::adb::runner::spawn_detached;
use crate::app::adb::scrcpy::{build_scrcpy_command, check_scrcpy_availability};
use crate::app::adb::{adb_args, split_command_line};
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;
use crate::app::state::RecordingHandle;

const RECORD_REMOTE_PATH: &str = "/sdcard/xhelper_record.mp4";
const SCREENSHOT_REMOTE_PATH: &str = "/sdcard/xhelper_screenshot.png";

#[derive(Default)]
pub struct ScreenTab {
    pending_recording: Option<String>,
}

impl TabPlugin for ScreenTab {
    fn name(&self) -> &'static str {
        "Device Screen"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Screen mirroring (scrcpy)").strong());
        ui.horizontal(|ui| {
            let running = ctx.state.scrcpy_running();
            if ui
                .add_enabled(!running, egui::Button::new("Start screen cast"))
                .clicked()
            {
                start_mirror(ctx);
            }
            if ui
                .add_enabled(running, egui::Button::new("Stop screen cast"))
                .clicked()
            {
                if ctx.state.stop_scrcpy() {
                    ctx.log("Screen cast stopped");
                }
            }
        });

        ui.separator();
        ui.label(RichText::new("Screenshot").strong());
        if ui.button("Take screenshot").clicked() {
            take_screenshot(ctx);
        }

        ui.separator();
        ui.label(RichText::new("Screen recording").strong());
        ui.horizontal(|ui| {
            let recording = ctx.state.recording_running();
            if ui
                .add_enabled(!recording, egui::Button::new("Start recording"))
                .clicked()
            {
                self.start_recording(ctx);
            }
            if ui
                .add_enabled(recording, egui::Button::new("Stop recording"))
                .clicked()
            {
                if let Some(remote_path) = ctx.state.stop_recording() {
                    ctx.log("Recording stopped");
                    self.pending_recording = Some(remote_path);
                }
            }
            let savable = self.pending_recording.is_some();
            if ui
                .add_enabled(savable, egui::Button::new("Save recording"))
                .clicked()
            {
                self.save_recording(ctx);
            }
        });
    }
}

pub fn start_mirror(ctx: &mut AppContext) {
    if ctx.state.scrcpy_running() {
        ctx.log("Screen cast already running");
        return;
    }
    if !device_connected(ctx) {
        ctx.log("No device found");
        return;
    }
    let info = check_scrcpy_availability(&ctx.config.general.scrcpy_path);
    if !info.available {
        ctx.log("scrcpy not found in PATH");
        return;
    }
    let serial = ctx.selection.primary();
    let args = build_scrcpy_command(serial.as_deref());
    let trace_id = AppContext::new_trace_id();
    match spawn_detached(&info.command_path, &args, &trace_id) {
        Ok(child) => {
            ctx.state.scrcpy = Some(child);
            ctx.log("Starting scrcpy...");
        }
        Err(err) => ctx.log(format!("Failed to start scrcpy: {err}")),
    }
}

/// Capture to a device-side file and pull it; binary output never crosses
/// the text pipeline.
pub fn take_screenshot(ctx: &mut AppContext) {
    if !device_connected(ctx) {
        ctx.log("No device found");
        return;
    }
    let Some(serial) = ctx.selection.primary() else {
        ctx.log("No device selected");
        return;
    };
    let default_name = format!("screenshot_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
    let Some(target) = rfd::FileDialog::new()
        .set_file_name(&default_name)
        .add_filter("PNG files", &["png"])
        .save_file()
    else {
        return;
    };

    let executor = ctx.executor();
    let trace_id = AppContext::new_trace_id();
    let run = |ctx: &AppContext, command: String| -> bool {
        ctx.log(format!(
            "Executing: {} -s {serial} {command}",
            executor.adb_program()
        ));
        match executor.run_adb(Some(serial.as_str()), &split_command_line(&command), &trace_id) {
            Ok(output) => {
                ctx.log_command_output(&output);
                output.success()
            }
            Err(err) => {
                ctx.log(format!("Error executing command: {err}"));
                false
            }
        }
    };

    if !run(ctx, format!("shell screencap -p {SCREENSHOT_REMOTE_PATH}")) {
        return;
    }
    let pulled = run(ctx, format!("pull {SCREENSHOT_REMOTE_PATH} {}", target.display()));
    run(ctx, format!("shell rm {SCREENSHOT_REMOTE_PATH}"));
    if pulled {
        ctx.log(format!("Screenshot saved: {}", target.display()));
    }
}

impl ScreenTab {
    fn start_recording(&mut self, ctx: &mut AppContext) {
        if !device_connected(ctx) {
            ctx.log("No device found");
            return;
        }
        let serial = ctx.selection.primary();
        let command = format!("shell screenrecord {RECORD_REMOTE_PATH}");
        let args = adb_args(serial.as_deref(), &split_command_line(&command));
        let trace_id = AppContext::new_trace_id();
        let program = ctx.executor().adb_program().to_string();
        match spawn_detached(&program, &args, &trace_id) {
            Ok(child) => {
                ctx.state.recording = Some(RecordingHandle {
                    child,
                    remote_path: RECORD_REMOTE_PATH.to_string(),
                });
                ctx.log("Starting screenrecord on device...");
            }
            Err(err) => ctx.log(format!("Failed to start recording: {err}")),
        }
    }

    fn save_recording(&mut self, ctx: &mut AppContext) {
        let Some(remote_path) = self.pending_recording.clone() else {
            return;
        };
        let default_name = format!("record_{}.mp4", Local::now().format("%Y%m%d_%H%M%S"));
        let Some(target) = rfd::FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("MP4 files", &["mp4"])
            .save_file()
        else {
            return;
        };
        ctx.log(format!("Copying recording to {}...", target.display()));
        ctx.run_adb_command(&format!("pull {remote_path} {}", target.display()), true);
        ctx.run_adb_command(&format!("shell rm {remote_path}"), true);
        self.pending_recording = None;
    }
}

fn device_connected(ctx: &AppContext) -> bool {
    ctx.devices.iter().any(|device| device.is_ready())
}
