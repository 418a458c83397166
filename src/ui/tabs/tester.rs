use egui::{Color32, RichText};

use crate::app::adb::parse::parse_package_list;
use crate::app::context::AppContext;
use crate::app::plugins::TabPlugin;
use crate::app::reports::{STATUS_CRASHED, STATUS_OK};
use crate::app::tasks::tester::{self, CrashSweepJob};
use crate::app::worker::{spawn_worker, WorkerEvent, WorkerHandle};

struct PackageRow {
    package: String,
    status: String,
    details: String,
}

pub struct AppTesterTab {
    delay_secs: u64,
    rows: Vec<PackageRow>,
    worker: Option<WorkerHandle>,
    progress: (usize, usize),
}

impl Default for AppTesterTab {
    fn default() -> Self {
        Self {
            delay_secs: 10,
            rows: Vec::new(),
            worker: None,
            progress: (0, 0),
        }
    }
}

impl TabPlugin for AppTesterTab {
    fn name(&self) -> &'static str {
        "App Testing"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        self.drain_events(ctx);

        ui.label(RichText::new("Testing management").strong());
        ui.horizontal(|ui| {
            ui.label("Delay between tests (seconds):");
            ui.add(egui::DragValue::new(&mut self.delay_secs).range(5..=60));
        });
        ui.horizontal(|ui| {
            let idle = self.worker.is_none();
            if ui.add_enabled(idle, egui::Button::new("Get apps")).clicked() {
                self.fetch_packages(ctx);
            }
            let can_start = idle && !self.rows.is_empty();
            if ui
                .add_enabled(can_start, egui::Button::new("Start testing"))
                .clicked()
            {
                self.start(ctx);
            }
            if let Some(handle) = &self.worker {
                if ui.button("Stop testing").clicked() {
                    handle.cancel();
                    ctx.log("Testing stop requested");
                }
            }
        });
        if self.worker.is_some() {
            let (done, total) = self.progress;
            ui.add(
                egui::ProgressBar::new(done as f32 / total.max(1) as f32)
                    .text(format!("{done}/{total}")),
            );
        }

        ui.separator();
        ui.label(RichText::new("Testing results").strong());
        egui::Grid::new("tester_results")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                ui.label(RichText::new("Package").strong());
                ui.label(RichText::new("Status").strong());
                ui.label(RichText::new("Details").strong());
                ui.end_row();
                for row in &self.rows {
                    ui.label(&row.package);
                    ui.colored_label(status_color(&row.status), &row.status);
                    ui.label(&row.details);
                    ui.end_row();
                }
            });

        let crashed: Vec<String> = self
            .rows
            .iter()
            .filter(|row| row.status == STATUS_CRASHED)
            .map(|row| row.package.clone())
            .collect();
        if !crashed.is_empty() && self.worker.is_none() {
            ui.separator();
            if ui
                .button(format!("Uninstall all problematic ({})", crashed.len()))
                .clicked()
            {
                for package in &crashed {
                    ctx.run_adb_command(&format!("uninstall {package}"), true);
                }
                self.rows.retain(|row| row.status != STATUS_CRASHED);
            }
        }
    }
}

impl AppTesterTab {
    fn fetch_packages(&mut self, ctx: &mut AppContext) {
        ctx.log("Fetching list of user applications...");
        let trace_id = AppContext::new_trace_id();
        let args = vec![
            "shell".to_string(),
            "pm".to_string(),
            "list".to_string(),
            "packages".to_string(),
            "-3".to_string(),
        ];
        let serial = ctx.selection.primary();
        match ctx.executor().run_adb(serial.as_deref(), &args, &trace_id) {
            Ok(output) => {
                let packages = parse_package_list(&output.stdout);
                ctx.log(format!("Found {} user applications", packages.len()));
                self.rows = packages
                    .into_iter()
                    .map(|package| PackageRow {
                        package,
                        status: "waiting".to_string(),
                        details: String::new(),
                    })
                    .collect();
            }
            Err(err) => ctx.log(format!("Error fetching packages: {err}")),
        }
    }

    fn start(&mut self, ctx: &mut AppContext) {
        for row in &mut self.rows {
            row.status = "waiting".to_string();
            row.details.clear();
        }
        let job = CrashSweepJob {
            executor: ctx.executor(),
            packages: self.rows.iter().map(|row| row.package.clone()).collect(),
            serial: ctx.selection.primary(),
            delay_secs: self.delay_secs,
            output_dir: ctx.output_dir(),
        };
        self.progress = (0, self.rows.len());
        self.worker = Some(spawn_worker("crash-sweep", move |worker_ctx| {
            tester::run(worker_ctx, job)
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
                WorkerEvent::ItemStatus {
                    index,
                    status,
                    details,
                } => {
                    if let Some(row) = self.rows.get_mut(index) {
                        row.status = status;
                        row.details = details;
                    }
                }
                WorkerEvent::Finished { .. } => finished = true,
            }
        }
        if finished {
            self.worker = None;
        }
    }
}

fn status_color(status: &str) -> Color32 {
    if status == STATUS_CRASHED {
        Color32::from_rgb(220, 68, 68)
    } else if status == STATUS_OK {
        Color32::from_rgb(60, 160, 60)
    } else {
        Color32::GRAY
    }
}
