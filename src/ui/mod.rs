pub mod tabs;
pub mod theme;

use std::time::Duration;

use eframe::egui;

use crate::app::config::{load_config, save_config, AppConfig};
use crate::app::context::AppContext;
use crate::app::diagnostics::export_diagnostics_bundle;
use crate::app::plugins::{PluginRegistry, TabPlugin};

pub struct XHelperApp {
    ctx: AppContext,
    tabs: Vec<Box<dyn TabPlugin>>,
    active: usize,
}

impl XHelperApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_config().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Falling back to default config");
            AppConfig::default()
        });
        let mut ctx = AppContext::new(config);
        ctx.log(format!("xHelper {} starting", env!("CARGO_PKG_VERSION")));

        let mut registry = PluginRegistry::new();
        for plugin in tabs::builtin_plugins() {
            registry.register(plugin);
        }
        let tabs = registry.mount_all(&mut ctx);

        ctx.check_adb();
        theme::apply_theme(&cc.egui_ctx, ctx.config.ui.dark_theme);
        Self {
            ctx,
            tabs,
            active: 0,
        }
    }

    fn handle_hotkeys(&mut self, egui_ctx: &egui::Context) {
        if hotkey_pressed(egui_ctx, &self.ctx.config.hotkeys.refresh_devices) {
            self.ctx.refresh_devices();
        }
        if hotkey_pressed(egui_ctx, &self.ctx.config.hotkeys.screenshot) {
            tabs::take_screenshot(&mut self.ctx);
        }
        if hotkey_pressed(egui_ctx, &self.ctx.config.hotkeys.screen_mirror) {
            tabs::start_mirror(&mut self.ctx);
        }
    }

    fn top_bar(&mut self, egui_ctx: &egui::Context) {
        egui::TopBottomPanel::top("top").show(egui_ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(format!("xHelper {}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                let mut dark = self.ctx.config.ui.dark_theme;
                if ui.checkbox(&mut dark, "Dark theme").changed() {
                    self.ctx.config.ui.dark_theme = dark;
                    self.persist_config();
                }
                let mut show_console = self.ctx.config.ui.show_console;
                if ui.checkbox(&mut show_console, "Console").changed() {
                    self.ctx.config.ui.show_console = show_console;
                    self.persist_config();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Export diagnostics").clicked() {
                        let trace_id = AppContext::new_trace_id();
                        match export_diagnostics_bundle(
                            &self.ctx.executor(),
                            &self.ctx.config,
                            None,
                            &trace_id,
                        ) {
                            Ok(path) => self
                                .ctx
                                .log(format!("Diagnostics bundle saved: {}", path.display())),
                            Err(err) => {
                                self.ctx.log(format!("Failed to export diagnostics: {err}"))
                            }
                        }
                    }
                });
            });
        });
    }

    fn persist_config(&mut self) {
        if let Err(err) = save_config(&self.ctx.config) {
            self.ctx.log(format!("Failed to save settings: {err}"));
        }
    }

    fn console_panel(&mut self, egui_ctx: &egui::Context) {
        if !self.ctx.config.ui.show_console {
            return;
        }
        egui::TopBottomPanel::bottom("console")
            .resizable(true)
            .default_height(self.ctx.config.ui.console_height)
            .show(egui_ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Console").strong());
                    if ui.small_button("Clear").clicked() {
                        self.ctx.console.clear();
                    }
                });
                egui::ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        for line in self.ctx.console.lines() {
                            ui.monospace(line);
                        }
                    });
            });
    }
}

impl eframe::App for XHelperApp {
    fn update(&mut self, egui_ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_theme(egui_ctx, self.ctx.config.ui.dark_theme);
        self.handle_hotkeys(egui_ctx);
        self.top_bar(egui_ctx);
        self.console_panel(egui_ctx);

        egui::CentralPanel::default().show(egui_ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, tab) in self.tabs.iter().enumerate() {
                    if ui
                        .selectable_label(self.active == index, tab.name())
                        .clicked()
                    {
                        self.active = index;
                    }
                }
            });
            ui.separator();
            if let Some(tab) = self.tabs.get_mut(self.active) {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .id_salt("active_tab")
                    .show(ui, |ui| {
                        tab.ui(ui, &mut self.ctx);
                    });
            }
        });

        // keep draining worker channels while a batch action runs
        egui_ctx.request_repaint_after(Duration::from_millis(200));
    }
}

fn hotkey_pressed(egui_ctx: &egui::Context, sequence: &str) -> bool {
    match parse_hotkey(sequence) {
        Some((modifiers, key)) => egui_ctx.input_mut(|input| input.consume_key(modifiers, key)),
        None => false,
    }
}

/// "Ctrl+R"-style sequences from settings, tolerant of case and spacing.
pub fn parse_hotkey(sequence: &str) -> Option<(egui::Modifiers, egui::Key)> {
    let mut modifiers = egui::Modifiers::NONE;
    let mut key = None;
    for part in sequence.split('+') {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "alt" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "cmd" | "meta" | "super" => modifiers.command = true,
            _ => {
                key = egui::Key::from_name(part)
                    .or_else(|| egui::Key::from_name(&part.to_uppercase()));
            }
        }
    }
    key.map(|key| (modifiers, key))
}
