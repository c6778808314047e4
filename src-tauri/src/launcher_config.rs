use serde::Serialize;
use std::env;

use crate::{
    API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_LAUNCHER_TOKEN, DEFAULT_SITE_URL, LAUNCHER_TOKEN_ENV,
    LAUNCHER_VARIANT_ENV, SITE_URL_ENV,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LauncherVariant {
    Plain,
    Themed,
}

impl LauncherVariant {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "plain" => Some(Self::Plain),
            "themed" => Some(Self::Themed),
            _ => None,
        }
    }

    pub fn form_config(self) -> FormConfig {
        match self {
            Self::Plain => FormConfig {
                include_launcher_token: false,
                include_pc_name: false,
            },
            Self::Themed => FormConfig {
                include_launcher_token: true,
                include_pc_name: true,
            },
        }
    }

    pub fn theme(self) -> Theme {
        match self {
            Self::Plain => Theme::plain(),
            Self::Themed => Theme::terminal(),
        }
    }
}

/// Which optional request parts the form sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormConfig {
    pub include_launcher_token: bool,
    pub include_pc_name: bool,
}

/// Colors and fonts handed to the UI page as CSS custom properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub background: &'static str,
    pub panel_background: &'static str,
    pub border: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub input_background: &'static str,
    pub button_background: &'static str,
    pub error: &'static str,
    pub font_family: &'static str,
    pub button_label_style: ButtonLabelStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonLabelStyle {
    Plain,
    Bracketed,
}

impl Theme {
    pub fn terminal() -> Self {
        Self {
            background: "#080e08",
            panel_background: "#0c180c",
            border: "#2e5c2e",
            text: "#b8ffb8",
            muted: "#82be82",
            input_background: "#071007",
            button_background: "#103010",
            error: "#ff8a8a",
            font_family: "Consolas, 'DejaVu Sans Mono', monospace",
            button_label_style: ButtonLabelStyle::Bracketed,
        }
    }

    pub fn plain() -> Self {
        Self {
            background: "#f0f0f0",
            panel_background: "#ffffff",
            border: "#c8c8c8",
            text: "#1e1e1e",
            muted: "#5a5a5a",
            input_background: "#ffffff",
            button_background: "#e6e6e6",
            error: "#b42318",
            font_family: "'Segoe UI', system-ui, sans-serif",
            button_label_style: ButtonLabelStyle::Plain,
        }
    }
}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    pub api_base: String,
    pub site_url: String,
    pub launcher_token: String,
    pub variant: LauncherVariant,
}

impl LauncherConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            non_blank(lookup(key)).unwrap_or_else(|| default.to_string())
        };

        let variant = non_blank(lookup(LAUNCHER_VARIANT_ENV))
            .and_then(|raw| LauncherVariant::parse(&raw))
            .unwrap_or(LauncherVariant::Themed);

        Self {
            api_base: read(API_BASE_ENV, DEFAULT_API_BASE),
            site_url: read(SITE_URL_ENV, DEFAULT_SITE_URL),
            launcher_token: read(LAUNCHER_TOKEN_ENV, DEFAULT_LAUNCHER_TOKEN),
            variant,
        }
    }

    pub fn form_config(&self) -> FormConfig {
        self.variant.form_config()
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            site_url: DEFAULT_SITE_URL.to_string(),
            launcher_token: DEFAULT_LAUNCHER_TOKEN.to_string(),
            variant: LauncherVariant::Themed,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
