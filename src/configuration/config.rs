#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::AspectRatio;
use crate::domain::models::KeySelectorName;
use crate::domain::models::SceneCount;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    AspectRatio,
    ConfigFile,
    GeminiToken,
    GeminiURL,
    ImageModel,
    KeySelector,
    OutputDir,
    SceneCount,
    TextModel,
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
        match key {
            ConfigKey::AspectRatio => return AspectRatio::default().to_string(),
            ConfigKey::GeminiToken => return "".to_string(),
            ConfigKey::GeminiURL => {
                return "https://generativelanguage.googleapis.com".to_string();
            }
            ConfigKey::ImageModel => return "gemini-2.5-flash-image".to_string(),
            ConfigKey::KeySelector => return KeySelectorName::Prompt.to_string(),
            ConfigKey::OutputDir => return ".".to_string(),
            ConfigKey::SceneCount => return SceneCount::default().to_string(),
            ConfigKey::TextModel => return "gemini-3-flash-preview".to_string(),

            // Special
            ConfigKey::ConfigFile => {
                return dirs::config_dir()
                    .unwrap_or_else(|| return path::PathBuf::from("."))
                    .join("storyreel/config.toml")
                    .to_string_lossy()
                    .to_string();
            }
        }
    }

    fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
        let arg = cmd.get_arguments().find(|arg| {
            return arg.get_long().unwrap_or_default() == key.to_string();
        });

        return match arg {
            Some(arg) => arg
                .get_possible_values()
                .iter()
                .map(|e| return e.get_name().to_string())
                .collect(),
            None => vec![],
        };
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
        Config::set(ConfigKey::ConfigFile, &config_file);

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }

                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let possible_values = Config::possible_values(&cmd, key);

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

        if let Err(err) = SceneCount::parse(&Config::get(ConfigKey::SceneCount)) {
            bail!(format!("Invalid value for key 'scene-count': {err}"));
        }

        tracing::debug!(
            gemini_url = Config::get(ConfigKey::GeminiURL),
            text_model = Config::get(ConfigKey::TextModel),
            image_model = Config::get(ConfigKey::ImageModel),
            aspect_ratio = Config::get(ConfigKey::AspectRatio),
            scene_count = Config::get(ConfigKey::SceneCount),
            key_selector = Config::get(ConfigKey::KeySelector),
            output_dir = Config::get(ConfigKey::OutputDir),
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
                    .find(|e| return e.get_long().unwrap_or_default() == key.to_string())?;

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

                let possible_values = Config::possible_values(&cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
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
