//! `vigil config` -- profile management. Never touches the backend.

use vigil_config::{Config, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),
        ConfigCommand::Show => show(),
        ConfigCommand::Path => {
            println!("{}", vigil_config::config_path().display());
            Ok(())
        }
        ConfigCommand::SetPassword => set_password(global),
    }
}

fn init() -> Result<(), CliError> {
    let path = vigil_config::config_path();
    if path.exists() {
        return Err(CliError::Validation {
            field: "config".into(),
            reason: format!("config already exists at {}", path.display()),
        });
    }

    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            server: "https://localhost:8443".into(),
            username: Some("admin".into()),
            ..Profile::default()
        },
    );
    vigil_config::save_config(&cfg)?;

    println!("wrote starter config to {}", path.display());
    println!("store a password with: vigil config set-password");
    Ok(())
}

fn show() -> Result<(), CliError> {
    let mut cfg = vigil_config::load_config_or_default();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".into());
        }
    }

    let rendered = toml::to_string_pretty(&cfg).map_err(vigil_config::ConfigError::from)?;
    print!("{rendered}");
    Ok(())
}

fn set_password(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = vigil_config::load_config_or_default();
    let profile_name = global
        .profile
        .clone()
        .or(cfg.default_profile)
        .unwrap_or_else(|| "default".into());

    let password = rpassword::prompt_password(format!("Password for '{profile_name}': "))?;
    vigil_config::store_password(&profile_name, &password)?;

    println!("password stored in the system keyring for '{profile_name}'");
    Ok(())
}
