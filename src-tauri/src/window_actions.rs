use tauri::{AppHandle, Manager};

use crate::MAIN_WINDOW_LABEL;

pub fn focus_main_window<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        log("focus_main_window skipped: main window not found");
        return;
    };

    if let Ok(true) = window.is_minimized() {
        if let Err(error) = window.unminimize() {
            log(&format!("failed to unminimize main window: {error}"));
        }
    }
    if let Err(error) = window.show() {
        log(&format!("failed to show main window: {error}"));
    }
    if let Err(error) = window.set_focus() {
        log(&format!("failed to focus main window: {error}"));
    }
}

/// Keeps the platform default icon when the bundled one cannot be applied.
pub fn apply_window_icon<F>(app_handle: &AppHandle, log: F)
where
    F: Fn(&str),
{
    let Some(window) = app_handle.get_webview_window(MAIN_WINDOW_LABEL) else {
        return;
    };
    let Some(icon) = app_handle.default_window_icon().cloned() else {
        log("no bundled window icon; keeping platform default");
        return;
    };

    if let Err(error) = window.set_icon(icon) {
        log(&format!("failed to apply window icon: {error}"));
    }
}
