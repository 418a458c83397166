use std::path::PathBuf;

use egui::RichText;

use crate::app::adb::apk::collect_apk_files;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;
use crate::app::tasks::install::{self, MassInstallJob};
use crate::app::worker::{spawn_worker, WorkerEvent, WorkerHandle};

#[derive(Default)]
pub struct MassInstallTab {
    folder: String,
    apk_files: Vec<PathBuf>,
    worker: Option<WorkerHandle>,
    progress: (usize, usize),
}

impl TabPlugin for MassInstallTab {
    fn name(&self) -> &'static str {
        "Mass APK"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        self.drain_events(ctx);

        ui.label(RichText::new("Select APK folder").strong());
        ui.horizontal(|ui| {
            ui.label("Folder path:");
            ui.text_edit_singleline(&mut self.folder);
            if ui.button("Browse APK folder").clicked() {
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.folder = folder.to_string_lossy().to_string();
                    self.rescan(ctx);
                }
            }
            if ui.button("Rescan").clicked() {
                self.rescan(ctx);
            }
        });
        if self.apk_files.is_empty() {
            ui.label("No APK files selected");
        } else {
            ui.label(format!("APK files found: {}", self.apk_files.len()));
        }

        ui.separator();
        ui.label(RichText::new("Mass installation").strong());
        match &self.worker {
            None => {
                let enabled = !self.apk_files.is_empty();
                if ui
                    .add_enabled(enabled, egui::Button::new("Start installation"))
                    .clicked()
                {
                    self.start(ctx);
                }
            }
            Some(handle) => {
                let (done, total) = self.progress;
                ui.add(
                    egui::ProgressBar::new(done as f32 / total.max(1) as f32)
                        .text(format!("{done}/{total}")),
                );
                if ui.button("Stop installation").clicked() {
                    handle.cancel();
                    ctx.log("Installation aborted by user");
                }
            }
        }
    }
}

impl MassInstallTab {
    fn rescan(&mut self, ctx: &mut AppContext) {
        let folder = PathBuf::from(self.folder.trim());
        self.apk_files = collect_apk_files(&folder);
        ctx.log(format!(
            "APK files found in {}: {}",
            folder.display(),
            self.apk_files.len()
        ));
    }

    fn start(&mut self, ctx: &mut AppContext) {
        let job = MassInstallJob {
            executor: ctx.executor(),
            apk_files: self.apk_files.clone(),
            serial: ctx.selection.primary(),
            output_dir: ctx.output_dir(),
        };
        self.progress = (0, self.apk_files.len());
        self.worker = Some(spawn_worker("mass-install", move |worker_ctx| {
            install::run(worker_ctx, job)
        }));
    }

    fn drain_events(&mut self, ctx: &mut AppContext) {
        let Some(handle) = &self.worker else {
            return;
        };
        let mut finished = false;
        for event in handle.poll_events() {
            match event {
                WorkerEvent::Log(line) => ctx.log(line),
                WorkerEvent::Progress { done, total } => self.progress = (done, total),
                WorkerEvent::ItemStatus { .. } => {}
                WorkerEvent::Finished { .. } => finished = true,
            }
        }
        if finished {
            self.worker = None;
        }
    }
}
