use egui::RichText;

use crate::app::adb::paths::validate_device_path;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

pub struct FilesTab {
    push_local: String,
    push_remote: String,
    pull_remote: String,
    pull_local: String,
}

impl Default for FilesTab {
    fn default() -> Self {
        Self {
            push_local: String::new(),
            push_remote: "/sdcard/".to_string(),
            pull_remote: "/sdcard/".to_string(),
            pull_local: "./".to_string(),
        }
    }
}

impl TabPlugin for FilesTab {
    fn name(&self) -> &'static str {
        "Files"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Push files to device").strong());
        ui.horizontal(|ui| {
            ui.label("Local file:");
            ui.text_edit_singleline(&mut self.push_local);
            if ui.button("Browse file").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_file() {
                    self.push_local = path.to_string_lossy().to_string();
                }
            }
        });
        ui.horizontal(|ui| {
            ui.label("Remote path:");
            ui.text_edit_singleline(&mut self.push_remote);
        });
        if ui.button("Push").clicked() {
            self.push(ctx);
        }

        ui.separator();
        ui.label(RichText::new("Pull files from device").strong());
        ui.horizontal(|ui| {
            ui.label("Remote file:");
            ui.text_edit_singleline(&mut self.pull_remote);
        });
        ui.horizontal(|ui| {
            ui.label("Local folder:");
            ui.text_edit_singleline(&mut self.pull_local);
            if ui.button("Browse folder").clicked() {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.pull_local = folder.to_string_lossy().to_string();
                }
            }
        });
        if ui.button("Pull").clicked() {
            self.pull(ctx);
        }
    }
}

impl FilesTab {
    fn push(&self, ctx: &mut AppContext) {
        let local = self.push_local.trim();
        let remote = self.push_remote.trim();
        if local.is_empty() || remote.is_empty() {
            ctx.log("Fill in both push fields");
            return;
        }
        if !std::path::Path::new(local).exists() {
            ctx.log(format!("Local file not found: {local}"));
            return;
        }
        if let Err(err) = validate_device_path(remote) {
            ctx.log(err);
            return;
        }
        ctx.run_adb_command(&format!("push {local} {remote}"), true);
    }

    fn pull(&self, ctx: &mut AppContext) {
        let remote = self.pull_remote.trim();
        let local = self.pull_local.trim();
        if remote.is_empty() || local.is_empty() {
            ctx.log("Fill in both pull fields");
            return;
        }
        if let Err(err) = validate_device_path(remote) {
            ctx.log(err);
            return;
        }
        ctx.run_adb_command(&format!("pull {remote} {local}"), true);
    }
}
