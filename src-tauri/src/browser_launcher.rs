use std::{
    io,
    process::{Command, ExitStatus, Stdio},
    thread::{self, JoinHandle},
};
use thiserror::Error;
use url::Url;

use crate::validation::{validate_site_url, ValidationError};

#[derive(Debug, Error)]
pub enum BrowserLaunchError {
    #[error(transparent)]
    InvalidUrl(#[from] ValidationError),

    #[error("Failed to run '{opener}': {source}")]
    Spawn {
        opener: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Starts the opener without waiting for it. The child is reaped on a
/// background thread so it does not linger as a zombie.
fn spawn_reaped(
    mut command: Command,
    opener: &'static str,
) -> Result<JoinHandle<Option<ExitStatus>>, BrowserLaunchError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| BrowserLaunchError::Spawn { opener, source })?;

    Ok(thread::spawn(move || child.wait().ok()))
}

fn spawn_detached(command: Command, opener: &'static str) -> Result<(), BrowserLaunchError> {
    spawn_reaped(command, opener).map(|_| ())
}

#[cfg(target_os = "macos")]
pub fn open_url_with_system_browser(url: &Url) -> Result<(), BrowserLaunchError> {
    let mut command = Command::new("open");
    command.arg(url.as_str());
    spawn_detached(command, "open")
}

#[cfg(target_os = "windows")]
pub fn open_url_with_system_browser(url: &Url) -> Result<(), BrowserLaunchError> {
    let mut command = Command::new("rundll32");
    command.args(["url.dll,FileProtocolHandler", url.as_str()]);
    spawn_detached(command, "rundll32")
}

#[cfg(all(unix, not(target_os = "macos")))]
pub fn open_url_with_system_browser(url: &Url) -> Result<(), BrowserLaunchError> {
    let mut command = Command::new("xdg-open");
    command.arg(url.as_str());
    spawn_detached(command, "xdg-open")
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
pub fn open_url_with_system_browser(_url: &Url) -> Result<(), BrowserLaunchError> {
    Err(BrowserLaunchError::Spawn {
        opener: "system browser",
        source: io::Error::new(
            io::ErrorKind::Unsupported,
            "opening external URLs is not supported on this platform",
        ),
    })
}

/// Validates `raw_url` and hands it to `opener`. Nothing is opened when validation fails.
pub fn open_website_with<O>(raw_url: &str, opener: O) -> Result<Url, BrowserLaunchError>
where
    O: FnOnce(&Url) -> Result<(), BrowserLaunchError>,
{
    let url = validate_site_url(raw_url)?;
    opener(&url)?;
    Ok(url)
}

pub fn open_website(raw_url: &str) -> Result<Url, BrowserLaunchError> {
    open_website_with(raw_url, open_url_with_system_browser)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn open_website_with_rejects_relative_url_without_opening() {
        let opened = RefCell::new(Vec::new());
        let result = open_website_with("n14.se", |url| {
            opened.borrow_mut().push(url.to_string());
            Ok(())
        });

        assert!(matches!(
            result,
            Err(BrowserLaunchError::InvalidUrl(ValidationError::InvalidSiteUrl))
        ));
        assert!(opened.borrow().is_empty());
    }

    #[test]
    fn open_website_with_passes_trimmed_url_to_opener() {
        let opened = RefCell::new(Vec::new());
        let result = open_website_with("  https://n14.se ", |url| {
            opened.borrow_mut().push(url.to_string());
            Ok(())
        });

        assert_eq!(result.unwrap().as_str(), "https://n14.se/");
        assert_eq!(opened.borrow().as_slice(), ["https://n14.se/"]);
    }

    #[test]
    fn open_website_with_surfaces_opener_failure() {
        let result = open_website_with("https://n14.se", |_| {
            Err(BrowserLaunchError::Spawn {
                opener: "xdg-open",
                source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            })
        });

        let error = result.unwrap_err();
        assert_eq!(error.to_string(), "Failed to run 'xdg-open': missing");
    }

    #[cfg(unix)]
    #[test]
    fn spawn_reaped_collects_the_exit_status_of_the_opener() {
        let handle = spawn_reaped(Command::new("true"), "true").expect("spawn true");
        let status = handle.join().expect("reaper thread should not panic");
        assert!(status.is_some_and(|status| status.success()));
    }

    #[test]
    fn spawn_reaped_reports_missing_opener() {
        let error = spawn_reaped(Command::new("n14-launcher-missing-opener"), "missing")
            .expect_err("missing binary should fail to spawn");
        assert!(matches!(
            error,
            BrowserLaunchError::Spawn { opener: "missing", .. }
        ));
    }

    #[test]
    fn invalid_url_error_uses_status_text() {
        let error = BrowserLaunchError::from(ValidationError::InvalidSiteUrl);
        assert_eq!(error.to_string(), "Website URL is invalid.");
    }
}
