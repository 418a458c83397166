use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

#[derive(Default)]
pub struct WifiTab {
    ip_address: String,
}

impl TabPlugin for WifiTab {
    fn name(&self) -> &'static str {
        "Wi-Fi ADB"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("ADB over Wi-Fi").strong());
        if ui.button("Enable ADB over Wi-Fi (tcpip 5555)").clicked() {
            ctx.run_adb_command("tcpip 5555", true);
        }
        ui.horizontal(|ui| {
            ui.label("IP address:");
            ui.text_edit_singleline(&mut self.ip_address);
        });
        ui.horizontal(|ui| {
            if ui.button("Connect").clicked() {
                let ip = self.ip_address.trim();
                if ip.is_empty() {
                    ctx.log("Enter an IP address");
                } else {
                    ctx.run_adb_command(&format!("connect {ip}:5555"), false);
                }
            }
            if ui.button("Disconnect").clicked() {
                ctx.run_adb_command("disconnect", false);
            }
        });
    }
}
