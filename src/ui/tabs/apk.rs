use egui::RichText;

use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;

const LIST_COMMANDS: [(&str, &str); 3] = [
    ("List apps", "shell pm list packages"),
    ("List system apps", "shell pm list packages -s"),
    ("List third-party apps", "shell pm list packages -3"),
];

#[derive(Default)]
pub struct ApkTab {
    apk_path: String,
    package_name: String,
}

impl TabPlugin for ApkTab {
    fn name(&self) -> &'static str {
        "APK"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Install APK").strong());
        ui.horizontal(|ui| {
            ui.label("APK path:");
            ui.text_edit_singleline(&mut self.apk_path);
            if ui.button("Browse").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("APK files", &["apk"])
                    .pick_file()
                {
                    self.apk_path = path.to_string_lossy().to_string();
                }
            }
        });
        if ui.button("Install APK").clicked() {
            let path = self.apk_path.trim().to_string();
            if path.is_empty() {
                ctx.log("Select an APK file first");
            } else if !std::path::Path::new(&path).exists() {
                ctx.log(format!("File does not exist: {path}"));
            } else {
                ctx.run_adb_command(&format!("install -r {path}"), true);
            }
        }

        ui.separator();
        ui.label(RichText::new("Application management").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, command) in LIST_COMMANDS {
                if ui.button(label).clicked() {
                    ctx.run_adb_command(command, true);
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Package:");
            ui.text_edit_singleline(&mut self.package_name);
        });
        let package = self.package_name.trim().to_string();
        ui.horizontal_wrapped(|ui| {
            if ui.button("Clear data").clicked() {
                self.with_package(ctx, &package, |ctx, pkg| {
                    ctx.run_adb_command(&format!("shell pm clear {pkg}"), true);
                });
            }
            if ui.button("Uninstall app").clicked() {
                self.with_package(ctx, &package, |ctx, pkg| {
                    ctx.run_adb_command(&format!("uninstall {pkg}"), true);
                });
            }
            if ui.button("Launch app").clicked() {
                self.with_package(ctx, &package, |ctx, pkg| {
                    ctx.run_adb_command(
                        &format!("shell monkey -p {pkg} -c android.intent.category.LAUNCHER 1"),
                        true,
                    );
                });
            }
        });
    }
}

impl ApkTab {
    fn with_package(
        &self,
        ctx: &mut AppContext,
        package: &str,
        action: impl FnOnce(&mut AppContext, &str),
    ) {
        if package.is_empty() {
            ctx.log("Enter the full package name (e.g., com.example.app)");
        } else {
            action(ctx, package);
        }
    }
}
