//! Shared helpers for connector adapters.

use mw_domain::config::AuthConfig;
use mw_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Resolve a bearer credential from an [`AuthConfig`].
///
/// Precedence:
/// 1. `key` field (plaintext — warn)
/// 2. `service` + `account` → OS keychain via `keyring`
/// 3. `env` field (reads environment variable)
/// 4. Fallback for keychain mode: env var `{SERVICE}_{ACCOUNT}` uppercased
/// 5. Error
pub fn resolve_credential(auth: &AuthConfig) -> Result<String> {
    // 1. Plaintext key (warn the user)
    if let Some(ref key) = auth.key {
        tracing::warn!(
            "credential loaded from plaintext config field 'key' — \
             prefer 'env' or keychain 'service'+'account' instead"
        );
        return Ok(key.clone());
    }

    // 2. OS keychain via service + account
    if let (Some(ref service), Some(ref account)) = (&auth.service, &auth.account) {
        match resolve_from_keychain(service, account) {
            Ok(secret) => return Ok(secret),
            Err(e) => {
                tracing::warn!(
                    service = %service,
                    account = %account,
                    error = %e,
                    "keychain lookup failed, falling through to env"
                );
            }
        }
    }

    // 3. Env var
    if let Some(ref env_var) = auth.env {
        return std::env::var(env_var).map_err(|_| {
            Error::Auth(format!(
                "environment variable '{}' not set or not valid UTF-8",
                env_var
            ))
        });
    }

    // 4. Headless fallback: {SERVICE}_{ACCOUNT} uppercased
    if let (Some(ref service), Some(ref account)) = (&auth.service, &auth.account) {
        let fallback_var = keychain_fallback_env_name(service, account);
        if let Ok(val) = std::env::var(&fallback_var) {
            tracing::info!(
                env_var = %fallback_var,
                "credential resolved from keychain headless fallback env var"
            );
            return Ok(val);
        }
    }

    // 5. No credential found
    Err(Error::Auth(
        "no credential configured: set 'key', 'env', or keychain \
         'service'+'account' in AuthConfig"
            .into(),
    ))
}

/// Try to read a secret from the OS keychain.
///
/// Uses the `keyring` crate which wraps platform-native credential stores.
/// Returns an error on headless systems where no keychain daemon runs.
pub fn resolve_from_keychain(service: &str, account: &str) -> Result<String> {
    let entry = keyring::Entry::new(service, account)
        .map_err(|e| Error::Auth(format!("keyring entry creation failed: {e}")))?;
    entry
        .get_password()
        .map_err(|e| Error::Auth(format!("keyring get_password failed: {e}")))
}

/// Build the headless fallback env var name for a keychain service/account.
///
/// Uppercases both parts and replaces hyphens with underscores, then joins
/// with `_`. Example: `("msgwatch", "slack-bot-token")` → `"MSGWATCH_SLACK_BOT_TOKEN"`.
pub fn keychain_fallback_env_name(service: &str, account: &str) -> String {
    format!(
        "{}_{}",
        service.to_uppercase().replace('-', "_"),
        account.to_uppercase().replace('-', "_"),
    )
}
