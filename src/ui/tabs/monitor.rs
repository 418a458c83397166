use egui::RichText;

use crate::app::adb::parse::{parse_battery_level, parse_meminfo, parse_wlan_inet};
use crate::app::adb::split_command_line;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

pub struct MonitorTab {
    battery: String,
    memory: String,
    network: String,
}

impl Default for MonitorTab {
    fn default() -> Self {
        Self {
            battery: "N/A".to_string(),
            memory: "N/A".to_string(),
            network: "N/A".to_string(),
        }
    }
}

impl TabPlugin for MonitorTab {
    fn name(&self) -> &'static str {
        "Monitoring"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Device monitoring").strong());
        if ui.button("Refresh").clicked() {
            self.refresh(ctx);
        }
        ui.separator();
        ui.label(format!("Battery: {}", self.battery));
        ui.label(format!("Memory: {}", self.memory));
        ui.label(format!("Network (wlan0): {}", self.network));
    }
}

impl MonitorTab {
    fn refresh(&mut self, ctx: &mut AppContext) {
        let serial = ctx.selection.primary();
        let executor = ctx.executor();
        let trace_id = AppContext::new_trace_id();

        let probe = |command: &str| {
            executor
                .run_adb_quick(serial.as_deref(), &split_command_line(command), &trace_id)
                .map(|output| output.stdout)
        };

        self.battery = match probe("shell dumpsys battery") {
            Ok(output) => parse_battery_level(&output)
                .map(|level| format!("{level}%"))
                .unwrap_or_else(|| "N/A".to_string()),
            Err(_) => "N/A".to_string(),
        };
        self.memory = match probe("shell cat /proc/meminfo") {
            Ok(output) => parse_meminfo(&output)
                .map(|snapshot| snapshot.summary())
                .unwrap_or_else(|| "N/A".to_string()),
            Err(_) => "N/A".to_string(),
        };
        self.network = match probe("shell ip -f inet addr show wlan0") {
            Ok(output) => parse_wlan_inet(&output).unwrap_or_else(|| "?".to_string()),
            Err(_) => "N/A".to_string(),
        };
        ctx.log("Monitoring data refreshed");
    }
}
