use egui::RichText;

use crate::app::context::AppContext;
use crate::app::keymap::{is_valid_keycode, keycode_name, parse_keycode, QUICK_KEYS};
use crate::app::plugins::TabPlugin;

const HISTORY_LIMIT: usize = 10;

#[derive(Default)]
pub struct HardwareKeysTab {
    filter: String,
    selected: Option<u8>,
    custom: String,
    history: Vec<u8>,
}

impl TabPlugin for HardwareKeysTab {
    fn name(&self) -> &'static str {
        "Hardware Keys"
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext) {
        ui.label(RichText::new("Quick keys").strong());
        ui.horizontal_wrapped(|ui| {
            for (label, code) in QUICK_KEYS {
                if ui.button(label).clicked() {
                    send_keycode(ctx, code);
                }
            }
        });

        ui.separator();
        ui.label(RichText::new("All keycodes (0-255)").strong());
        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.text_edit_singleline(&mut self.filter);
            let enabled = self.selected.is_some();
            if ui
                .add_enabled(enabled, egui::Button::new("Send selected"))
                .clicked()
            {
                if let Some(code) = self.selected {
                    send_keycode(ctx, code);
                }
            }
        });
        let filter = self.filter.trim().to_lowercase();
        egui::ScrollArea::vertical()
            .max_height(260.0)
            .id_salt("keycode_list")
            .show(ui, |ui| {
                for code in 0u16..=255 {
                    let code = code as u8;
                    let entry = format!("{code:3} - {}", keycode_name(code));
                    if !filter.is_empty() && !entry.to_lowercase().contains(&filter) {
                        continue;
                    }
                    let response = ui.selectable_label(self.selected == Some(code), &entry);
                    if response.clicked() {
                        self.selected = Some(code);
                    }
                    if response.double_clicked() {
                        send_keycode(ctx, code);
                    }
                }
            });

        ui.separator();
        ui.label(RichText::new("Custom keycode (0-255)").strong());
        ui.horizontal(|ui| {
            ui.label("Code:");
            ui.add(egui::TextEdit::singleline(&mut self.custom).desired_width(80.0));
            let valid = is_valid_keycode(&self.custom);
            if ui.add_enabled(valid, egui::Button::new("Send")).clicked() {
                if let Some(code) = parse_keycode(&self.custom) {
                    send_keycode(ctx, code);
                    self.remember(code);
                }
            }
        });

        if !self.history.is_empty() {
            ui.label(RichText::new("History").strong());
            ui.horizontal_wrapped(|ui| {
                let history = self.history.clone();
                for code in history {
                    if ui
                        .button(format!("{code} ({})", keycode_name(code)))
                        .clicked()
                    {
                        send_keycode(ctx, code);
                        self.remember(code);
                    }
                }
            });
        }
    }
}

impl HardwareKeysTab {
    fn remember(&mut self, code: u8) {
        self.history.retain(|known| *known != code);
        self.history.insert(0, code);
        self.history.truncate(HISTORY_LIMIT);
    }
}

fn send_keycode(ctx: &mut AppContext, code: u8) {
    ctx.run_adb_command(&format!("shell input keyevent {code}"), true);
    ctx.log(format!("[KeyEmu] Sent keycode {code} ({})", keycode_name(code)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_dedups_and_caps_at_ten() {
        let mut tab = HardwareKeysTab::default();
        for code in 0..12u8 {
            tab.remember(code);
        }
        assert_eq!(tab.history.len(), HISTORY_LIMIT);
        assert_eq!(tab.history[0], 11);

        tab.remember(5);
        assert_eq!(tab.history[0], 5);
        assert_eq!(
            tab.history.iter().filter(|code| **code == 5).count(),
            1
        );
    }
}
