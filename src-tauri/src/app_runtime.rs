use tauri::{Manager, RunEvent};

use crate::{
    append_launcher_log, launcher_config::LauncherConfig, logging, pc_user, window_actions,
    LauncherState,
};

pub(crate) fn run() {
    logging::init_tracing();
    append_launcher_log("launcher process starting");
    append_launcher_log(&format!(
        "launcher log path: {}",
        logging::launcher_log_path().display()
    ));

    let config = LauncherConfig::from_env();
    append_launcher_log(&format!(
        "config: variant={:?} api_base={} site_url={}",
        config.variant, config.api_base, config.site_url
    ));

    let state = match LauncherState::new(config, pc_user::os_user_name()) {
        Ok(state) => state,
        Err(error) => {
            append_launcher_log(&format!("failed to build http client: {error}"));
            std::process::exit(1);
        }
    };

    tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|app_handle, _args, _cwd| {
            append_launcher_log("second launch detected, focusing existing window");
            window_actions::focus_main_window(app_handle, append_launcher_log);
        }))
        .manage(state)
        .invoke_handler(tauri::generate_handler![
            crate::launcher_commands::launcher_get_snapshot,
            crate::launcher_commands::launcher_use_pc_user,
            crate::launcher_commands::launcher_register,
            crate::launcher_commands::launcher_open_website,
        ])
        .setup(|app| {
            window_actions::apply_window_icon(app.handle(), append_launcher_log);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                let registering = app_handle
                    .try_state::<LauncherState>()
                    .map(|state| {
                        state
                            .is_registering
                            .load(std::sync::atomic::Ordering::Acquire)
                    })
                    .unwrap_or(false);
                append_launcher_log(&format!(
                    "launcher exiting (registration in flight: {registering})"
                ));
            }
        });
}
