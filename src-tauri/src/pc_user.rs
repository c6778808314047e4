use std::env;

#[cfg(target_os = "windows")]
const USER_NAME_ENV_KEYS: [&str; 3] = ["USERNAME", "USER", "LOGNAME"];
#[cfg(not(target_os = "windows"))]
const USER_NAME_ENV_KEYS: [&str; 3] = ["USER", "LOGNAME", "USERNAME"];

/// Login name of the current OS user, or an empty string when none can be found.
pub fn os_user_name() -> String {
    resolve_os_user_name(|key| env::var(key).ok(), home::home_dir)
}

fn resolve_os_user_name<F, H>(lookup: F, home_dir: H) -> String
where
    F: Fn(&str) -> Option<String>,
    H: Fn() -> Option<std::path::PathBuf>,
{
    for key in USER_NAME_ENV_KEYS {
        if let Some(value) = lookup(key) {
            let value = value.trim();
            if !value.is_empty() {
                return value.to_string();
            }
        }
    }

    home_dir()
        .and_then(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().to_string())
        })
        .unwrap_or_default()
}
