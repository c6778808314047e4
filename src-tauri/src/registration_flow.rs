use std::sync::atomic::AtomicBool;

use crate::{
    browser_launcher::BrowserLaunchError,
    form_state::{FormState, PcUserSuggestion, StatusMessage, SubmitOutcome},
    launcher_config::FormConfig,
    registration_client::{RegistrationClient, RegistrationOutcome, RegistrationTransport},
    validation::{derive_username, validate_registration},
    AtomicFlagGuard,
};

pub const ALREADY_IN_PROGRESS_MESSAGE: &str = "Registration already in progress.";

pub fn use_pc_user(os_user_name: &str) -> PcUserSuggestion {
    let username = derive_username(os_user_name);
    PcUserSuggestion {
        status: StatusMessage::info(format!("Username set to \"{username}\"")),
        username,
    }
}

/// Validates the form, posts the registration and reports what the page should change.
///
/// `in_flight` is held for the whole exchange; a submit while it is set only gets an
/// error status back.
pub async fn submit_registration<T, F>(
    mut form: FormState,
    form_config: FormConfig,
    client: &RegistrationClient<T>,
    in_flight: &AtomicBool,
    log: F,
) -> SubmitOutcome
where
    T: RegistrationTransport,
    F: Fn(&str),
{
    let validated = match validate_registration(
        &form.api_base,
        &form.username,
        &form.password,
        &form.confirm,
    ) {
        Ok(validated) => validated,
        Err(error) => return form.rejected(StatusMessage::error(error.to_string())),
    };

    let Some(_in_flight_guard) = AtomicFlagGuard::try_set(in_flight) else {
        log("registration submit ignored: request already in flight");
        return form.rejected(StatusMessage::error(ALREADY_IN_PROGRESS_MESSAGE));
    };

    log(&format!(
        "registering \"{}\" against {}",
        validated.username, validated.api_base
    ));

    let launcher_token = form_config
        .include_launcher_token
        .then_some(form.launcher_token.as_str());
    let outcome = client
        .register(
            &validated.api_base,
            &validated.username,
            &validated.password,
            launcher_token,
        )
        .await;

    match &outcome {
        RegistrationOutcome::Registered { username } => {
            log(&format!("registered \"{username}\""));
        }
        RegistrationOutcome::Failed { kind, message } => {
            log(&format!("registration failed ({kind:?}): {message}"));
        }
    }

    form.complete_submit(&outcome)
}

/// Opens the site URL. Returns a status only on failure.
pub fn open_website<O, F>(site_url: &str, opener: O, log: F) -> Option<StatusMessage>
where
    O: FnOnce(&str) -> Result<url::Url, BrowserLaunchError>,
    F: Fn(&str),
{
    match opener(site_url) {
        Ok(url) => {
            log(&format!("opened website {url}"));
            None
        }
        Err(error) => {
            log(&format!("failed to open website: {error}"));
            Some(StatusMessage::error(error.to_string()))
        }
    }
}
