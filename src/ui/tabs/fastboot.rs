use std::time::Duration;

use egui::RichText;

use crate::app::adb::fastboot::{
    erase_args, flash_args, oem_unlock_args, parse_fastboot_devices, validate_partition_name,
};
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

const DEVICES_TIMEOUT: Duration = Duration::from_secs(15);

pub struct FastbootTab {
    flash_partition: String,
    flash_file: String,
    erase_partition: String,
}

impl Default for FastbootTab {
    fn default() -> Self {
        Self {
            flash_partition: "system".to_string(),
            flash_file: String::new(),
            erase_partition: String::new(),
        }
    }
}

impl TabPlugin for FastbootTab {
    fn name(&self) -> &'static str {
        "Fastboot"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Fastboot").strong());
        if ui.button("List Fastboot devices").clicked() {
            self.list_devices(ctx);
        }

        ui.separator();
        ui.label(RichText::new("Flash partition").strong());
        ui.horizontal(|ui| {
            ui.label("Partition:");
            ui.text_edit_singleline(&mut self.flash_partition);
            ui.label("Image:");
            ui.text_edit_singleline(&mut self.flash_file);
            if ui.button("File").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_file() {
                    self.flash_file = path.to_string_lossy().to_string();
                }
            }
            if ui.button("Flash").clicked() {
                self.flash(ctx);
            }
        });

        ui.label(RichText::new("Erase partition").strong());
        ui.horizontal(|ui| {
            ui.label("Partition:");
            ui.text_edit_singleline(&mut self.erase_partition);
            if ui.button("Erase").clicked() {
                self.erase(ctx);
            }
        });

        ui.separator();
        if ui.button("Unlock bootloader").clicked() {
            ctx.run_fastboot_command(&oem_unlock_args());
        }
    }
}

impl FastbootTab {
    fn list_devices(&self, ctx: &mut AppContext) {
        let trace_id = AppContext::new_trace_id();
        let args = vec!["devices".to_string()];
        match ctx
            .executor()
            .run_fastboot_with_timeout(&args, DEVICES_TIMEOUT, &trace_id)
        {
            Ok(output) => {
                let serials = parse_fastboot_devices(&output.stdout);
                ctx.log("Fastboot devices:");
                if serials.is_empty() {
                    ctx.log("None found");
                } else {
                    for serial in serials {
                        ctx.log(serial);
                    }
                }
            }
            Err(err) => ctx.log(format!("Fastboot devices error: {err}")),
        }
    }

    fn flash(&self, ctx: &mut AppContext) {
        let partition = self.flash_partition.trim();
        let image = self.flash_file.trim();
        if let Err(err) = validate_partition_name(partition) {
            ctx.log(err);
            return;
        }
        if image.is_empty() {
            ctx.log("Specify a file to flash");
            return;
        }
        if !std::path::Path::new(image).exists() {
            ctx.log(format!("Image not found: {image}"));
            return;
        }
        ctx.run_fastboot_command(&flash_args(partition, image));
    }

    fn erase(&self, ctx: &mut AppContext) {
        let partition = self.erase_partition.trim();
        if let Err(err) = validate_partition_name(partition) {
            ctx.log(err);
            return;
        }
        ctx.run_fastboot_command(&erase_args(partition));
    }
}
