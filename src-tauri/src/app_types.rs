use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{
    form_state::FormState,
    launcher_config::{FormConfig, LauncherConfig, Theme},
    registration_client::{RegistrationClient, ReqwestTransport, TransportError},
    WINDOW_TITLE,
};

pub(crate) struct LauncherState {
    pub(crate) config: LauncherConfig,
    pub(crate) client: RegistrationClient<ReqwestTransport>,
    pub(crate) pc_user_name: String,
    pub(crate) is_registering: AtomicBool,
}

impl LauncherState {
    pub(crate) fn new(config: LauncherConfig, pc_user_name: String) -> Result<Self, TransportError> {
        let mut client = RegistrationClient::new(ReqwestTransport::new()?);
        if config.form_config().include_pc_name {
            client = client.with_pc_name(pc_user_name.clone());
        }

        Ok(Self {
            config,
            client,
            pc_user_name,
            is_registering: AtomicBool::new(false),
        })
    }

    pub(crate) fn snapshot(&self) -> LauncherSnapshot {
        LauncherSnapshot {
            title: WINDOW_TITLE,
            form: FormState::from_config(&self.config),
            form_config: self.config.form_config(),
            theme: self.config.variant.theme(),
        }
    }
}

/// Everything the UI page needs to render its first frame.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LauncherSnapshot {
    pub(crate) title: &'static str,
    pub(crate) form: FormState,
    pub(crate) form_config: FormConfig,
    pub(crate) theme: Theme,
}

pub(crate) struct AtomicFlagGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> AtomicFlagGuard<'a> {
    pub(crate) fn try_set(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(Self { flag })
    }
}

impl Drop for AtomicFlagGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
