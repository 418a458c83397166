use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

const SYSTEM_COMMANDS: [(&str, &str); 10] = [
    ("Get properties", "shell getprop"),
    ("Battery info", "shell dumpsys battery"),
    ("CPU info", "shell cat /proc/cpuinfo"),
    ("Memory info", "shell cat /proc/meminfo"),
    ("Network connections", "shell netstat"),
    (
        "Current activity",
        "shell dumpsys activity activities | grep mResumedActivity",
    ),
    ("Running processes", "shell ps"),
    ("Wi-Fi info", "shell dumpsys wifi"),
    ("Display info", "shell dumpsys display"),
    ("Free space", "shell df -h"),
];

#[derive(Default)]
pub struct CommandsTab {
    custom_command: String,
}

impl TabPlugin for CommandsTab {
    fn name(&self) -> &'static str {
        "Commands"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("System commands").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, command) in SYSTEM_COMMANDS {
                if ui.button(label).clicked() {
                    ctx.run_adb_command(command, true);
                }
            }
        });

        ui.separator();
        ui.label(RichText::new("Custom adb command").strong());
        ui.horizontal(|ui| {
            ui.label("adb");
            let response = ui.text_edit_singleline(&mut self.custom_command);
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            if ui.button("Run").clicked() || submitted {
                let command = self.custom_command.trim().to_string();
                if command.is_empty() {
                    ctx.log("Empty command");
                } else {
                    ctx.run_adb_command(&command, true);
                }
            }
        });
    }
}
