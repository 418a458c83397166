use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

const POWER_COMMANDS: [(&str, &str); 4] = [
    ("Reboot", "reboot"),
    ("Recovery", "reboot recovery"),
    ("Bootloader", "reboot bootloader"),
    ("Fastboot", "reboot fastboot"),
];

#[derive(Default)]
pub struct DevicesTab;

impl TabPlugin for DevicesTab {
    fn name(&self) -> &'static str {
        "Devices"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.horizontal(|ui| {
            if ui.button("Refresh device list").clicked() {
                ctx.refresh_devices();
            }
            ui.checkbox(&mut ctx.selection.run_on_all, "Run on all selected");
        });
        ui.separator();

        ui.label(RichText::new("Connected devices").strong());
        if ctx.devices.is_empty() {
            ui.label("No devices found");
        }
        let mut toggled = None;
        for device in &ctx.devices {
            let mut checked = ctx.selection.is_selected(&device.serial);
            let label = format!("{} [{}]", device.label(), device.state);
            if ui.checkbox(&mut checked, label).changed() {
                toggled = Some(device.serial.clone());
            }
        }
        if let Some(serial) = toggled {
            ctx.selection.toggle(&serial);
        }

        ui.separator();
        ui.label(RichText::new("Power management").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, command) in POWER_COMMANDS {
                if ui.button(label).clicked() {
                    ctx.run_adb_command(command, true);
                }
            }
        });
    }
}
