pub const DEFAULT_API_BASE: &str = "https://n14.se";
pub const DEFAULT_SITE_URL: &str = "https://n14.se";
pub const DEFAULT_LAUNCHER_TOKEN: &str = "n14-launcher";

pub const API_BASE_ENV: &str = "N14_API_BASE";
pub const SITE_URL_ENV: &str = "N14_SITE_URL";
pub const LAUNCHER_TOKEN_ENV: &str = "N14_LAUNCHER_REGISTER_TOKEN";
pub const LAUNCHER_VARIANT_ENV: &str = "N14_LAUNCHER_VARIANT";
pub const LAUNCHER_LOG_ENV: &str = "N14_LAUNCHER_LOG";

pub const REGISTER_PATH: &str = "/api/register";
pub const LAUNCHER_TOKEN_HEADER: &str = "x-n14-launcher-token";
pub const REGISTER_TIMEOUT_SECS: u64 = 30;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const WINDOW_TITLE: &str = "N14 Launcher";

pub const LAUNCHER_DATA_DIR: &str = ".n14-launcher";
pub const LAUNCHER_LOG_FILE: &str = "launcher.log";
