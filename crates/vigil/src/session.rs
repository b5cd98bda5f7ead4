//! Backend session setup: profile resolution, credential chain, login.

use std::io::IsTerminal;
use std::time::Duration;

use secrecy::SecretString;

use vigil_config::{Config, ConfigError, Defaults, Profile};
use vigil_core::{CoreError, Monitor, MonitorConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `MonitorConfig` from the config file, profile, and flag
/// overrides.
pub fn build_monitor_config(global: &GlobalOpts) -> Result<(String, MonitorConfig), CliError> {
    let cfg = vigil_config::load_config_or_default();

    let (name, mut monitor_config) = match resolve_profile(&cfg, global) {
        Ok((name, profile)) => (
            name.to_owned(),
            vigil_config::profile_to_monitor_config(profile, &cfg.defaults)?,
        ),
        // No usable profile -- fall back to flags alone.
        Err(e) => {
            let Some(server) = global.server.as_deref() else {
                return Err(e);
            };
            let profile = Profile {
                server: server.to_owned(),
                ..Profile::default()
            };
            (
                "(flags)".to_owned(),
                vigil_config::profile_to_monitor_config(&profile, &Defaults::default())?,
            )
        }
    };

    if global.insecure {
        monitor_config.accept_invalid_certs = true;
    }
    if let Some(timeout) = global.timeout {
        monitor_config.timeout = Duration::from_secs(timeout);
    }
    if let Some(server) = global.server.as_deref() {
        monitor_config.base_url = server.parse().map_err(|_| CliError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {server}"),
        })?;
    }

    Ok((name, monitor_config))
}

fn resolve_profile<'a>(
    cfg: &'a Config,
    global: &'a GlobalOpts,
) -> Result<(&'a str, &'a Profile), CliError> {
    cfg.profile(global.profile.as_deref()).map_err(|e| match e {
        ConfigError::UnknownProfile(name) if global.profile.is_some() => {
            CliError::ProfileNotFound { name }
        }
        _ => CliError::NoConfig {
            path: vigil_config::config_path().display().to_string(),
        },
    })
}

/// Connect and authenticate, returning a live `Monitor`.
pub async fn connect(global: &GlobalOpts) -> Result<Monitor, CliError> {
    let cfg = vigil_config::load_config_or_default();
    let (profile_name, monitor_config) = build_monitor_config(global)?;

    let profile = cfg.profiles.get(&profile_name);

    let username = global
        .username
        .clone()
        .or_else(|| profile.and_then(|p| p.username.clone()))
        .ok_or_else(|| CliError::Validation {
            field: "username".into(),
            reason: "no username configured; pass --username or set one in the profile".into(),
        })?;

    let password = resolve_password(profile, &profile_name)?;

    let monitor = Monitor::new(monitor_config)?;
    monitor.login(&username, password).await.map_err(|e| match e {
        CoreError::InvalidCredentials => CliError::AuthFailed {
            profile: profile_name.clone(),
        },
        other => other.into(),
    })?;

    Ok(monitor)
}

/// Resolve a password from the configured chain, falling back to an
/// interactive prompt on a terminal.
fn resolve_password(
    profile: Option<&Profile>,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    let from_chain = profile.map_or_else(
        || std::env::var("VIGIL_PASSWORD").map(SecretString::from).map_err(|_| {
            ConfigError::NoCredentials {
                profile: profile_name.to_owned(),
            }
        }),
        |p| vigil_config::resolve_password(p, profile_name),
    );

    match from_chain {
        Ok(secret) => Ok(secret),
        Err(ConfigError::NoCredentials { profile }) => {
            if std::io::stdin().is_terminal() {
                let pw = rpassword::prompt_password("Password: ")?;
                Ok(SecretString::from(pw))
            } else {
                Err(CliError::NoCredentials { profile })
            }
        }
        Err(e) => Err(e.into()),
    }
}
