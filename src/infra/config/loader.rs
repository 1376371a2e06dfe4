use std::{
    env, fs,
    path::{Path, PathBuf},
};

use url::Url;

use crate::infra::{
    config::{file_config::FileConfig, AppConfig},
    error::AppError,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const TOKEN_ENV_VAR: &str = "LINKSY_TOKEN";

pub fn load(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let mut config = load_file(path)?;
    apply_token_override(&mut config, env::var(TOKEN_ENV_VAR).ok());
    validate(&config)?;

    Ok(config)
}

fn load_file(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let mut config = AppConfig::default();

    if !config_path.exists() {
        return Ok(config);
    }

    let raw = fs::read_to_string(&config_path).map_err(|source| AppError::ConfigRead {
        path: config_path.clone(),
        source,
    })?;

    let file_config: FileConfig = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
        path: config_path,
        source,
    })?;

    file_config.merge_into(&mut config);
    Ok(config)
}

fn apply_token_override(config: &mut AppConfig, token: Option<String>) {
    if let Some(token) = token.filter(|value| !value.trim().is_empty()) {
        config.session.token = Some(token);
    }
}

fn validate(config: &AppConfig) -> Result<(), AppError> {
    let url = Url::parse(&config.server.base_url).map_err(|error| AppError::ConfigInvalid {
        field: "server.base_url",
        details: error.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::ConfigInvalid {
            field: "server.base_url",
            details: format!("unsupported scheme `{}`", url.scheme()),
        });
    }

    if config.server.request_timeout_ms == 0 {
        return Err(AppError::ConfigInvalid {
            field: "server.request_timeout_ms",
            details: "must be greater than zero".to_owned(),
        });
    }

    Ok(())
}
