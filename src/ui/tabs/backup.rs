use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

#[derive(Default)]
pub struct BackupTab;

impl TabPlugin for BackupTab {
    fn name(&self) -> &'static str {
        "Backup / Restore"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Device backup").strong());
        ui.label("Backups need confirmation on the device screen.");
        if ui.button("Create backup (full)").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .set_file_name("backup.ab")
                .add_filter("AB files", &["ab"])
                .save_file()
            {
                ctx.run_adb_command(
                    &format!("backup -apk -shared -all -f {}", path.display()),
                    true,
                );
            }
        }
        if ui.button("Restore backup").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("AB files", &["ab"])
                .pick_file()
            {
                ctx.run_adb_command(&format!("restore {}", path.display()), true);
            }
        }
    }
}
