use std::time::Duration;

use egui::RichText;

use crate::app::adb::parse::parse_script_lines;
use crate::app::adb::split_command_line;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;
use crate::app::worker::{spawn_worker, WorkerEvent, WorkerHandle};

#[derive(Default)]
pub struct ScriptEditorTab {
    script: String,
    worker: Option<WorkerHandle>,
}

impl TabPlugin for ScriptEditorTab {
    fn name(&self) -> &'static str {
        "Script editor"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        self.drain_events(ctx);

        ui.label(RichText::new("ADB script").strong());
        ui.label("One adb command per line; lines starting with # are ignored.");
        ui.add(
            egui::TextEdit::multiline(&mut self.script)
                .desired_rows(14)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Monospace),
        );
        ui.horizontal(|ui| {
            if self.worker.is_none() {
                if ui.button("Run script").clicked() {
                    self.start(ctx);
                }
            } else if ui.button("Stop script").clicked() {
                if let Some(handle) = &self.worker {
                    handle.cancel();
                }
            }
        });
    }
}

impl ScriptEditorTab {
    fn start(&mut self, ctx: &mut AppContext) {
        let lines = parse_script_lines(&self.script);
        if lines.is_empty() {
            ctx.log("Script is empty");
            return;
        }
        let targets = ctx.selection.targets();
        if targets.is_empty() {
            ctx.log("No device selected");
            return;
        }
        let executor = ctx.executor();
        self.worker = Some(spawn_worker("script", move |worker_ctx| {
            let trace_id = AppContext::new_trace_id();
            for line in &lines {
                if worker_ctx.cancelled() {
                    worker_ctx.log("Script stopped by user");
                    break;
                }
                let args = split_command_line(line);
                for serial in &targets {
                    worker_ctx.log(format!("Executing: adb -s {serial} {line}"));
                    match executor.run_adb(Some(serial.as_str()), &args, &trace_id) {
                        Ok(output) => {
                            if !output.stdout.trim().is_empty() {
                                worker_ctx.log(output.stdout.trim_end().to_string());
                            }
                            if !output.stderr.trim().is_empty() {
                                worker_ctx.log(output.stderr.trim_end().to_string());
                            }
                            if !output.success() {
                                worker_ctx
                                    .log(format!("Command exited with code: {:?}", output.exit_code));
                            }
                        }
                        Err(err) => worker_ctx.log(format!("Error executing command: {err}")),
                    }
                }
                std::thread::sleep(Duration::from_millis(200));
            }
            None
        }));
    }

    fn drain_events(&mut self, ctx: &mut AppContext) {
        let Some(handle) = &self.worker else {
            return;
        };
        let mut finished = false;
        for event in handle.poll_events() {
            match event {
                WorkerEvent::Log(line) => ctx.log(line),
                WorkerEvent::Finished { .. } => finished = true,
                _ => {}
            }
        }
        if finished {
            self.worker = None;
            ctx.log("Script finished");
        }
    }
}
