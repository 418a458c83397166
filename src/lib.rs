pub mod app;
pub mod ui;

use app::logging::init_logging;

pub fn run() -> eframe::Result<()> {
    init_logging();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "xHelper",
        native_options,
        Box::new(|cc| Ok(Box::new(ui::XHelperApp::new(cc)))),
    )
}
