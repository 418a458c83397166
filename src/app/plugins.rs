use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::app::context::AppContext;
use crate::app::error::AppError;

/// A tab contributed to the main window. Implementations are registered at
/// startup; there is no directory scanning and no dynamic code loading.
pub trait TabPlugin {
    fn name(&self) -> &'static str;

    /// One-time initialization before the first frame. The default is a
    /// no-op; plugins that probe tools or read files override it.
    fn mount(&mut self, ctx: &mut AppContext) -> Result<(), AppError> {
        let _ = ctx;
        Ok(())
    }

    fn ui(&mut self, ui: &mut egui::Ui, ctx: &mut AppContext);
}

pub struct PluginRegistry {
    plugins: Vec<Box<dyn TabPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn TabPlugin>) {
        self.plugins.push(plugin);
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Mount every plugin in registration order. A plugin that errors or
    /// panics gets exactly one console line and is dropped; the rest keep
    /// loading.
    pub fn mount_all(self, ctx: &mut AppContext) -> Vec<Box<dyn TabPlugin>> {
        let mut mounted = Vec::with_capacity(self.plugins.len());
        for mut plugin in self.plugins {
            let name = plugin.name();
            match catch_unwind(AssertUnwindSafe(|| plugin.mount(ctx))) {
                Ok(Ok(())) => {
                    ctx.log(format!("Plugin loaded: {name}"));
                    mounted.push(plugin);
                }
                Ok(Err(err)) => {
                    ctx.log(format!("Error loading plugin {name}: {err}"));
                }
                Err(_) => {
                    ctx.log(format!("Error loading plugin {name}: panicked during mount"));
                }
            }
        }
        mounted
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
