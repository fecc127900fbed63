use std::{fs, path::Path};

use log::info;

use crate::error::{AppError, Context, Result};

use super::{validate_config, Config};

/// Load the dashboard config from a JSON file. A missing file yields the builtin defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        info!(
            "No dashboard config at {}; using builtin defaults",
            path.display()
        );
        return finalize(Config::builtin());
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read dashboard config at {}", path.display()))?;
    let config: Config = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse dashboard config at {}", path.display()))?;

    finalize(config)
}

/// Parse and validate a config document held in memory.
pub fn parse_config(json: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(json)?;
    finalize(config)
}

fn finalize(mut config: Config) -> Result<Config> {
    config.api.base_url = expand_env_vars(&config.api.base_url)?;
    validate_config(&config)?;
    Ok(config)
}

/// Replace `${NAME}` placeholders with values from the process environment.
pub fn expand_env_vars(value: &str) -> Result<String> {
    expand_placeholders(value, |name| std::env::var(name).ok())
}

pub fn expand_placeholders<F>(value: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for next in chars.by_ref() {
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if !closed {
                return Err(AppError::message(
                    "Unterminated environment placeholder in config value",
                ));
            }

            if name.is_empty() {
                return Err(AppError::message(
                    "Encountered empty environment placeholder in config value",
                ));
            }

            let value = lookup(&name).ok_or_else(|| {
                AppError::message(format!(
                    "Environment variable {name} required by the dashboard config is not set"
                ))
            })?;
            result.push_str(&value);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}
