use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

const REBOOT_COMMANDS: [(&str, &str); 6] = [
    ("Normal reboot", "reboot"),
    ("Reboot to Recovery", "reboot recovery"),
    ("Fastboot / Bootloader", "reboot bootloader"),
    (
        "Safe mode",
        "shell am broadcast -a android.intent.action.REBOOT --ez android.intent.extra.IS_SAFE_MODE true",
    ),
    ("EDL mode (Qualcomm)", "reboot edl"),
    ("Power off device", "shell reboot -p"),
];

#[derive(Default)]
pub struct RebootTab;

impl TabPlugin for RebootTab {
    fn name(&self) -> &'static str {
        "Reboot"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Reboot modes").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, command) in REBOOT_COMMANDS {
                if ui.button(label).clicked() {
                    ctx.run_adb_command(command, true);
                }
            }
        });
    }
}
