use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

// Dump-style logcat actions; each returns when adb exits.
const LOGCAT_COMMANDS: [(&str, &str); 4] = [
    ("Dump log", "logcat -d -t 500"),
    ("Only errors", "logcat -d -t 500 *:E"),
    ("Clear logs", "logcat -c"),
    ("Save log on device", "logcat -d -f /sdcard/logcat.txt"),
];

#[derive(Default)]
pub struct LogcatTab;

impl TabPlugin for LogcatTab {
    fn name(&self) -> &'static str {
        "Logs"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Logcat").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, command) in LOGCAT_COMMANDS {
                if ui.button(label).clicked() {
                    ctx.run_adb_command(command, true);
                }
            }
        });
        ui.label("Dumps land in the console below.");
    }
}
