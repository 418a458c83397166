use egui::RichText;

use crate::app::adb::parse::parse_rom_usage_percent;
use crate::app::adb::split_command_line;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;
use crate::ui::theme::rom_usage_color;

#[derive(Default)]
pub struct RomUsageTab {
    percent: Option<u8>,
    status: String,
}

impl TabPlugin for RomUsageTab {
    fn name(&self) -> &'static str {
        "ROM Usage"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Data partition usage").strong());
        if ui.button("Refresh").clicked() {
            self.refresh(ctx);
        }
        ui.separator();
        match self.percent {
            Some(percent) => {
                ui.label(format!("{percent}% used"));
                ui.add(
                    egui::ProgressBar::new(percent as f32 / 100.0)
                        .fill(rom_usage_color(percent))
                        .text(format!("{percent}%")),
                );
            }
            None => {
                if self.status.is_empty() {
                    ui.label("Press Refresh to read usage from the device.");
                } else {
                    ui.label(&self.status);
                }
            }
        }
    }
}

impl RomUsageTab {
    fn refresh(&mut self, ctx: &mut AppContext) {
        let serial = ctx.selection.primary();
        let executor = ctx.executor();
        let trace_id = AppContext::new_trace_id();

        let mut output = match executor.run_adb_quick(
            serial.as_deref(),
            &split_command_line("shell df -h /data"),
            &trace_id,
        ) {
            Ok(result) => result.stdout,
            Err(err) => {
                ctx.log(format!("ROM usage: adb error: {err}"));
                String::new()
            }
        };
        if parse_rom_usage_percent(&output).is_none() {
            if let Ok(fallback) = executor.run_adb_quick(
                serial.as_deref(),
                &split_command_line("shell dumpsys storage"),
                &trace_id,
            ) {
                output = fallback.stdout;
            }
        }

        match parse_rom_usage_percent(&output) {
            Some(percent) => {
                self.percent = Some(percent);
                self.status.clear();
            }
            None => {
                self.percent = None;
                self.status = "Could not determine ROM usage".to_string();
                ctx.log("Could not determine ROM usage");
            }
        }
    }
}
