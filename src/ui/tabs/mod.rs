mod apk;
mod backup;
mod commands;
mod devices;
mod fastboot;
mod files;
mod hardware_keys;
mod logcat;
mod mass_install;
mod monitor;
mod reboot;
mod rom_usage;
mod screen;
mod scripts;
mod settings;
mod tester;
mod wifi;

pub use screen::{start_mirror, take_screenshot};

use crate::app::plugins::TabPlugin;

/// Built-in tabs plus the bundled extras, in display order. Everything goes
/// through the same registry an external tab would.
pub fn builtin_plugins() -> Vec<Box<dyn TabPlugin>> {
    vec![
        Box::new(devices::DevicesTab::default()),
        Box::new(apk::ApkTab::default()),
        Box::new(mass_install::MassInstallTab::default()),
        Box::new(files::FilesTab::default()),
        Box::new(commands::CommandsTab::default()),
        Box::new(logcat::LogcatTab::default()),
        Box::new(reboot::RebootTab::default()),
        Box::new(tester::AppTesterTab::default()),
        Box::new(screen::ScreenTab::default()),
        Box::new(monitor::MonitorTab::default()),
        Box::new(wifi::WifiTab::default()),
        Box::new(backup::BackupTab::default()),
        Box::new(scripts::ScriptEditorTab::default()),
        Box::new(fastboot::FastbootTab::default()),
        Box::new(hardware_keys::HardwareKeysTab::default()),
        Box::new(rom_usage::RomUsageTab::default()),
        Box::new(settings::SettingsTab::default()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::AppConfig;
    use crate::app::context::AppContext;
    use crate::app::plugins::PluginRegistry;
    use std::collections::HashSet;

    #[test]
    fn builtin_plugins_have_unique_names() {
        let plugins = builtin_plugins();
        let names: HashSet<&str> = plugins.iter().map(|plugin| plugin.name()).collect();
        assert_eq!(names.len(), plugins.len());
    }

    #[test]
    fn every_builtin_plugin_mounts() {
        let mut ctx = AppContext::new(AppConfig::default());
        let mut registry = PluginRegistry::new();
        let expected = builtin_plugins().len();
        for plugin in builtin_plugins() {
            registry.register(plugin);
        }
        let mounted = registry.mount_all(&mut ctx);
        assert_eq!(mounted.len(), expected);
    }
}
