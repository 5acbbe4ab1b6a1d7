#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::Flow;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

pub const LOCAL_API_URL: &str = "http://localhost:8000";
pub const PRODUCTION_API_URL: &str = "https://spanish-flashcards-production.up.railway.app";

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    #[strum(serialize = "api-url")]
    ApiURL,
    ConfigFile,
    Environment,
    Flow,
    HealthCheckTimeout,
    SaveConfirmationDelay,
}

/// Where the flashcards API lives when no explicit URL is configured.
#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn parse(text: &str) -> Option<Environment> {
        return Environment::iter().find(|e| return e.to_string() == text);
    }

    pub fn api_url(&self) -> &'static str {
        return match self {
            Environment::Local => LOCAL_API_URL,
            Environment::Production => PRODUCTION_API_URL,
        };
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let default_environment = Environment::Production.to_string();
        let default_flow = Flow::TwoStage.to_string();

        #[cfg(not(target_os = "macos"))]
        let config_path = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("verbcards/config.toml");
        #[cfg(target_os = "macos")]
        let config_path = path::PathBuf::from(env::var("HOME").unwrap_or_default())
            .join(".config/verbcards/config.toml");

        let res = match key {
            ConfigKey::ApiURL => "",
            ConfigKey::Environment => &default_environment,
            ConfigKey::Flow => &default_flow,
            ConfigKey::HealthCheckTimeout => "1000",
            ConfigKey::SaveConfirmationDelay => "2000",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    /// Resolves the API base URL. An explicit `api-url` wins, otherwise the
    /// environment picks between the local dev server and production.
    pub fn api_url() -> String {
        return Config::resolve_api_url(
            &Config::get(ConfigKey::ApiURL),
            &Config::get(ConfigKey::Environment),
        );
    }

    pub fn resolve_api_url(api_url: &str, environment: &str) -> String {
        if !api_url.trim().is_empty() {
            return api_url.trim().trim_end_matches('/').to_string();
        }

        let environment = Environment::parse(environment).unwrap_or(Environment::Production);

        return environment.api_url().to_string();
    }

    pub fn flow() -> Flow {
        return Flow::parse(&Config::get(ConfigKey::Flow)).unwrap_or(Flow::TwoStage);
    }

    /// Reads a millisecond setting, falling back to its default when the
    /// configured value is not a number.
    pub fn millis(key: ConfigKey) -> u64 {
        if let Ok(val) = Config::get(key).parse::<u64>() {
            return val;
        }

        return Config::default(key).parse::<u64>().unwrap_or_default();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            api_url = Config::api_url(),
            environment = Config::get(ConfigKey::Environment),
            flow = Config::get(ConfigKey::Flow),
            save_confirmation_delay = Config::get(ConfigKey::SaveConfirmationDelay),
            "config"
        );

        return Ok(());
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
