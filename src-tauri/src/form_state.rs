use serde::{Deserialize, Serialize};

use crate::{launcher_config::LauncherConfig, registration_client::RegistrationOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusSeverity {
    #[default]
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub severity: StatusSeverity,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Error,
        }
    }
}

/// Current text of every form field plus the status line.
///
/// The UI page sends its copy with each submit. The register button's enabled
/// flag stays on the page; the in-flight guard lives in `LauncherState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub api_base: String,
    pub site_url: String,
    #[serde(default)]
    pub launcher_token: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
    #[serde(default)]
    pub status: StatusMessage,
}

/// What a finished submit changes on the page. Fields the user may have
/// edited while the request was out are not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub status: StatusMessage,
    pub clear_passwords: bool,
}

/// Result of "Use PC User": the new username and the status to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PcUserSuggestion {
    pub username: String,
    pub status: StatusMessage,
}

impl FormState {
    pub fn from_config(config: &LauncherConfig) -> Self {
        Self {
            api_base: config.api_base.clone(),
            site_url: config.site_url.clone(),
            launcher_token: config.launcher_token.clone(),
            username: String::new(),
            password: String::new(),
            confirm: String::new(),
            status: StatusMessage::default(),
        }
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = status;
    }

    /// Folds a finished registration into the form and returns the part the page applies.
    pub fn complete_submit(&mut self, outcome: &RegistrationOutcome) -> SubmitOutcome {
        let clear_passwords = match outcome {
            RegistrationOutcome::Registered { username } => {
                self.set_status(StatusMessage::info(format!(
                    "Registered \"{username}\". Login on website now."
                )));
                self.password.clear();
                self.confirm.clear();
                true
            }
            RegistrationOutcome::Failed { message, .. } => {
                self.set_status(StatusMessage::error(message.clone()));
                false
            }
        };

        SubmitOutcome {
            status: self.status.clone(),
            clear_passwords,
        }
    }

    pub fn rejected(&mut self, status: StatusMessage) -> SubmitOutcome {
        self.set_status(status);
        SubmitOutcome {
            status: self.status.clone(),
            clear_passwords: false,
        }
    }
}
