use egui::RichText;

use crate::app::adb::locator::{resolve_tool_program, validate_tool_program};
use crate::app::config::{save_config, AppConfig};
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

#[derive(Default)]
pub struct SettingsTab {
    draft: Option<AppConfig>,
}

impl TabPlugin for SettingsTab {
    fn name(&self) -> &'static str {
        "Settings"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        let draft = self.draft.get_or_insert_with(|| ctx.config.clone());

        ui.label(RichText::new("Tools").strong());
        egui::Grid::new("settings_tools")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("adb path (empty = PATH):");
                ui.text_edit_singleline(&mut draft.general.adb_path);
                ui.end_row();
                ui.label("fastboot path (empty = PATH):");
                ui.text_edit_singleline(&mut draft.general.fastboot_path);
                ui.end_row();
                ui.label("scrcpy path (empty = PATH):");
                ui.text_edit_singleline(&mut draft.general.scrcpy_path);
                ui.end_row();
                ui.label("Report output dir (empty = current):");
                ui.text_edit_singleline(&mut draft.general.output_dir);
                ui.end_row();
            });

        ui.separator();
        ui.label(RichText::new("Logging").strong());
        ui.checkbox(&mut draft.logging.log_to_file, "Mirror console to a file");
        ui.horizontal(|ui| {
            ui.label("Log file:");
            ui.text_edit_singleline(&mut draft.logging.log_file_path);
        });

        ui.separator();
        ui.label(RichText::new("Hotkeys").strong());
        egui::Grid::new("settings_hotkeys")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Refresh devices:");
                ui.text_edit_singleline(&mut draft.hotkeys.refresh_devices);
                ui.end_row();
                ui.label("Screenshot:");
                ui.text_edit_singleline(&mut draft.hotkeys.screenshot);
                ui.end_row();
                ui.label("Screen mirror:");
                ui.text_edit_singleline(&mut draft.hotkeys.screen_mirror);
                ui.end_row();
            });

        ui.separator();
        ui.label(RichText::new("Timeouts (seconds)").strong());
        egui::Grid::new("settings_timeouts")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("General commands:");
                ui.add(egui::DragValue::new(&mut draft.command.timeout_secs).range(1..=3600));
                ui.end_row();
                ui.label("Quick probes:");
                ui.add(egui::DragValue::new(&mut draft.command.quick_timeout_secs).range(1..=60));
                ui.end_row();
                ui.label("APK install:");
                ui.add(
                    egui::DragValue::new(&mut draft.command.install_timeout_secs).range(1..=3600),
                );
                ui.end_row();
                ui.label("Fastboot:");
                ui.add(
                    egui::DragValue::new(&mut draft.command.fastboot_timeout_secs).range(1..=3600),
                );
                ui.end_row();
            });

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("Save settings").clicked() {
                self.save(ctx);
            }
            if ui.button("Reset to defaults").clicked() {
                self.draft = Some(AppConfig::default());
            }
        });
    }
}

impl SettingsTab {
    fn save(&mut self, ctx: &mut AppContext) {
        let Some(draft) = self.draft.clone() else {
            return;
        };
        for (configured, tool) in [
            (&draft.general.adb_path, "adb"),
            (&draft.general.fastboot_path, "fastboot"),
        ] {
            if !configured.trim().is_empty() {
                let program = resolve_tool_program(configured, tool);
                if let Err(err) = validate_tool_program(&program, tool) {
                    ctx.log(format!("Settings not saved: {err}"));
                    return;
                }
            }
        }
        ctx.config = draft;
        ctx.apply_logging_settings();
        match save_config(&ctx.config) {
            Ok(()) => ctx.log("Settings saved"),
            Err(err) => ctx.log(format!("Failed to save settings: {err}")),
        }
    }
}
