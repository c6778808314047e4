#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_runtime;
mod app_types;
mod browser_launcher;
mod form_state;
mod launcher_commands;
mod launcher_config;
mod logging;
mod pc_user;
mod registration_client;
mod registration_flow;
mod validation;
mod window_actions;

pub(crate) use app_constants::*;
pub(crate) use app_types::{AtomicFlagGuard, LauncherSnapshot, LauncherState};
pub(crate) use logging::append_launcher_log;

fn main() {
    app_runtime::run();
}
