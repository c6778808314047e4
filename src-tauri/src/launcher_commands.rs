use tauri::{AppHandle, Manager};

use crate::{
    append_launcher_log, browser_launcher,
    form_state::{FormState, PcUserSuggestion, StatusMessage, SubmitOutcome},
    registration_flow, LauncherSnapshot, LauncherState,
};

#[tauri::command]
pub(crate) fn launcher_get_snapshot(app_handle: AppHandle) -> LauncherSnapshot {
    let state = app_handle.state::<LauncherState>();
    state.snapshot()
}

#[tauri::command]
pub(crate) fn launcher_use_pc_user(app_handle: AppHandle) -> PcUserSuggestion {
    let state = app_handle.state::<LauncherState>();
    let suggestion = registration_flow::use_pc_user(&state.pc_user_name);
    append_launcher_log(&format!(
        "username set from pc user: \"{}\"",
        suggestion.username
    ));
    suggestion
}

#[tauri::command]
pub(crate) async fn launcher_register(app_handle: AppHandle, form: FormState) -> SubmitOutcome {
    let state = app_handle.state::<LauncherState>();
    registration_flow::submit_registration(
        form,
        state.config.form_config(),
        &state.client,
        &state.is_registering,
        append_launcher_log,
    )
    .await
}

#[tauri::command]
pub(crate) fn launcher_open_website(site_url: String) -> Option<StatusMessage> {
    registration_flow::open_website(&site_url, browser_launcher::open_website, append_launcher_log)
}
