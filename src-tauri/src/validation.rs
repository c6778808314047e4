use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use url::Url;

pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 3;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]{2,20}$").unwrap());
static USERNAME_STRIP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_]").unwrap());

/// Local form checks. The display text is what the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Username must be 2-20 chars (a-z, 0-9, _).")]
    InvalidUsername,
    #[error("Password must be at least 3 characters.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("API Base URL is invalid.")]
    InvalidApiBase,
    #[error("Website URL is invalid.")]
    InvalidSiteUrl,
}

/// Inputs that passed every check, ready for the registration client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistration {
    pub api_base: String,
    pub username: String,
    pub password: String,
}

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Pattern check on an already normalized username.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn validate_username(raw: &str) -> Result<String, ValidationError> {
    let username = normalize_username(raw);
    if is_valid_username(&username) {
        Ok(username)
    } else {
        Err(ValidationError::InvalidUsername)
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_password_match(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

fn parse_absolute_url(raw: &str) -> Option<Url> {
    if raw.is_empty() {
        return None;
    }
    Url::parse(raw).ok()
}

/// Trims the API base and strips trailing slashes so `/api/register` can be appended.
pub fn normalize_api_base(raw: &str) -> Result<String, ValidationError> {
    let api_base = raw.trim().trim_end_matches('/');
    parse_absolute_url(api_base)
        .map(|_| api_base.to_string())
        .ok_or(ValidationError::InvalidApiBase)
}

pub fn validate_site_url(raw: &str) -> Result<Url, ValidationError> {
    parse_absolute_url(raw.trim()).ok_or(ValidationError::InvalidSiteUrl)
}

/// Checks run in the order the form reports them; the first failure wins.
pub fn validate_registration(
    api_base: &str,
    username: &str,
    password: &str,
    confirm: &str,
) -> Result<ValidatedRegistration, ValidationError> {
    let username = validate_username(username)?;
    validate_password(password)?;
    validate_password_match(password, confirm)?;
    let api_base = normalize_api_base(api_base)?;

    Ok(ValidatedRegistration {
        api_base,
        username,
        password: password.to_string(),
    })
}

/// Suggested username from an OS login name. May be empty.
pub fn derive_username(os_user_name: &str) -> String {
    let lowered = os_user_name.trim().to_lowercase();
    let stripped = USERNAME_STRIP_RE.replace_all(&lowered, "");
    stripped.chars().take(USERNAME_MAX_LEN).collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    static DERIVED_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-z0-9_]{0,20}$").unwrap());

    #[test]
    fn validate_username_accepts_only_the_allowed_pattern() {
        assert_eq!(validate_username("ab"), Ok("ab".to_string()));
        assert_eq!(validate_username("user_01"), Ok("user_01".to_string()));
        assert_eq!(
            validate_username("a"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_username(&"a".repeat(21)),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_username("bad-name"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(validate_username(""), Err(ValidationError::InvalidUsername));
    }

    #[test]
    fn validate_username_lowercases_and_trims_before_matching() {
        assert_eq!(validate_username("  ABC "), Ok("abc".to_string()));
        assert_eq!(validate_username(&"z".repeat(20)), Ok("z".repeat(20)));
    }

    #[test]
    fn is_valid_username_matches_exactly_the_username_alphabet() {
        assert!(is_valid_username("ab"));
        assert!(!is_valid_username("a"));
        assert!(!is_valid_username("ABC"));
        assert!(!is_valid_username(" ab"));
        assert!(!is_valid_username(&format!("{}x", "abc1".repeat(5))));
    }

    #[test]
    fn validate_password_requires_three_characters() {
        assert_eq!(
            validate_password("ab"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(validate_password("abc"), Ok(()));
    }

    #[test]
    fn validate_password_match_compares_exactly() {
        assert_eq!(
            validate_password_match("abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(validate_password_match("abc", "abc"), Ok(()));
    }

    #[test]
    fn normalize_api_base_strips_trailing_slashes() {
        assert_eq!(
            normalize_api_base(" https://n14.se// "),
            Ok("https://n14.se".to_string())
        );
        assert_eq!(
            normalize_api_base("n14.se"),
            Err(ValidationError::InvalidApiBase)
        );
        assert_eq!(normalize_api_base(""), Err(ValidationError::InvalidApiBase));
        assert_eq!(
            normalize_api_base("///"),
            Err(ValidationError::InvalidApiBase)
        );
    }

    #[test]
    fn validate_site_url_requires_absolute_url() {
        assert!(validate_site_url("https://n14.se").is_ok());
        assert_eq!(
            validate_site_url("n14.se"),
            Err(ValidationError::InvalidSiteUrl)
        );
        assert_eq!(validate_site_url(""), Err(ValidationError::InvalidSiteUrl));
    }

    #[test]
    fn validate_registration_reports_first_failure_in_form_order() {
        assert_eq!(
            validate_registration("bad", "x", "a", "b"),
            Err(ValidationError::InvalidUsername)
        );
        assert_eq!(
            validate_registration("bad", "alice", "a", "b"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("bad", "alice", "abc", "abd"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_registration("bad", "alice", "abc", "abc"),
            Err(ValidationError::InvalidApiBase)
        );
    }

    #[test]
    fn validate_registration_returns_normalized_inputs() {
        let validated =
            validate_registration("https://n14.se/", " Alice ", "secret", "secret")
                .expect("inputs should validate");
        assert_eq!(
            validated,
            ValidatedRegistration {
                api_base: "https://n14.se".to_string(),
                username: "alice".to_string(),
                password: "secret".to_string(),
            }
        );
    }

    #[test]
    fn derive_username_strips_disallowed_characters_and_truncates() {
        assert_eq!(derive_username("John.Doe"), "johndoe");
        assert_eq!(derive_username("  Admin User  "), "adminuser");
        assert_eq!(derive_username("ÅSA-Ö"), "sa");
        assert_eq!(derive_username("---"), "");
        assert_eq!(
            derive_username("abcdefghijklmnopqrstuvwxyz"),
            "abcdefghijklmnopqrst"
        );
    }

    proptest! {
        #[test]
        fn derive_username_output_fits_the_username_alphabet(raw in any::<String>()) {
            let derived = derive_username(&raw);
            prop_assert!(
                DERIVED_RE.is_match(&derived),
                "{:?} -> {:?}",
                raw,
                derived
            );
        }

        #[test]
        fn derive_username_output_fits_for_printable_names(raw in "\\PC{0,40}") {
            let derived = derive_username(&raw);
            prop_assert!(derived.chars().count() <= USERNAME_MAX_LEN);
            prop_assert!(DERIVED_RE.is_match(&derived));
        }

        #[test]
        fn is_valid_username_agrees_with_the_username_pattern(raw in "[a-zA-Z0-9_ .-]{0,24}") {
            let expected = Regex::new(r"^[a-z0-9_]{2,20}$").unwrap().is_match(&raw);
            prop_assert_eq!(is_valid_username(&raw), expected);
        }
    }

    #[test]
    fn derive_username_handles_unicode_and_separators() {
        assert_eq!(derive_username("Ünïcödé_Üser"), "ncd_ser");
        assert_eq!(derive_username("DOMAIN\\someone"), "domainsomeone");
        assert_eq!(derive_username("tab\tand\nnewline"), "tabandnewline");
        assert_eq!(derive_username("emoji🙂name"), "emojiname");
        assert_eq!(derive_username(&"x".repeat(64)), "x".repeat(20));
    }
}
