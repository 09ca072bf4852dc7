//! Register argument construction

use crate::config::{RegistrationConfig, is_set};
use crate::error::ReconcileError;

/// Build the argument vector for a `register` invocation
///
/// Argument order is fixed: `register`, `--force`, credentials,
/// `--environment`, `--org`. Environment is never emitted with an
/// activation key; the server rejects that combination.
///
/// # Errors
/// Fails when neither or both credential modes are set, or when `org` is
/// empty. No command has run at that point.
pub fn build_register_args(config: &RegistrationConfig) -> Result<Vec<String>, ReconcileError> {
    let has_credentials = config.has_credentials();
    let has_activationkey = config.has_activationkey();

    if has_credentials == has_activationkey {
        return Err(ReconcileError::CredentialConflict);
    }
    if config.org.trim().is_empty() {
        return Err(ReconcileError::MissingOrg);
    }

    let mut args = vec!["register".to_string()];

    if config.force {
        args.push("--force".to_string());
    }

    if has_credentials {
        args.push("--username".to_string());
        args.push(config.username.clone().unwrap_or_default());
        args.push("--password".to_string());
        args.push(config.password.clone().unwrap_or_default());
        if config.autosubscribe {
            args.push("--autosubscribe".to_string());
        }
    } else {
        args.push("--activationkey".to_string());
        args.push(config.activationkey.clone().unwrap_or_default());
    }

    if is_set(&config.environment) && !has_activationkey {
        args.push("--environment".to_string());
        args.push(config.environment.clone().unwrap_or_default());
    }

    args.push("--org".to_string());
    args.push(config.org.clone());

    Ok(args)
}
