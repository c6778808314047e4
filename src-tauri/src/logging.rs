use std::{
    env,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{LAUNCHER_DATA_DIR, LAUNCHER_LOG_ENV, LAUNCHER_LOG_FILE};

const DEFAULT_LOG_FILTER: &str = "info";

static LAUNCHER_LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_tracing() {
    let filter = env::var(LAUNCHER_LOG_ENV)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests, re-entry) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

pub fn resolve_launcher_log_path(home_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    home_dir
        .map(|home| home.join(LAUNCHER_DATA_DIR).join("logs"))
        .unwrap_or_else(|| env::temp_dir().join("n14-launcher"))
        .join(file_name)
}

pub fn launcher_log_path() -> &'static Path {
    LAUNCHER_LOG_PATH.get_or_init(|| resolve_launcher_log_path(home::home_dir(), LAUNCHER_LOG_FILE))
}

pub fn append_log_line(path: &Path, message: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "[{timestamp}] {message}")
}

/// Writes to the launcher log file and the tracing subscriber. Never fails the caller.
pub fn append_launcher_log(message: &str) {
    tracing::info!(target: "n14_launcher", "{message}");
    if let Err(error) = append_log_line(launcher_log_path(), message) {
        tracing::warn!(
            target: "n14_launcher",
            "failed to write launcher log {}: {error}",
            launcher_log_path().display()
        );
    }
}
