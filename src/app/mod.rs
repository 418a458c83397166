pub mod adb;
pub mod config;
pub mod console;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod keymap;
pub mod logging;
pub mod models;
pub mod plugins;
pub mod reports;
pub mod state;
pub mod tasks;
pub mod worker;
