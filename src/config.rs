//! src/config.rs

use crate::errors::ConfigError;
use log::debug;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const BASE_URL_VAR: &str = "DEEPSEEK_BASE_URL";
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";
pub const PROXY_VAR: &str = "ALL_PROXY";

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一名专业的中文商务邮件写作助手。请根据用户的要求撰写一封正式、得体、内容真实的中文邮件。\
第一行请以“主题：”开头给出邮件主题，随后空一行再写正文。";

/// Returns the default configuration file path (~/.config/deepmail/config.toml).
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(windows) {
        // Windows: %APPDATA%\deepmail
        dirs::data_dir()
    } else {
        // Linux/macOS: ~/.config/deepmail
        dirs::config_dir()
    };
    base.map(|p| p.join("deepmail").join("config.toml"))
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub llm: LlmSection,
}

/// The `[llm]` table of the configuration file.
#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct LlmSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub system_prompt: Option<String>,
}

/// Loads the configuration file.
///
/// An explicitly requested file must exist; the default location is optional.
pub async fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("未找到配置文件，使用环境变量与默认值");
                return Ok(FileConfig::default());
            }
        },
    };

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
    let config =
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
    debug!("已加载配置文件: {}", path.display());
    Ok(config)
}

/// Per-run values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

/// Fully resolved settings handed to the client at construction time.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
    pub system_prompt: String,
    pub proxy: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            proxy: None,
        }
    }
}

impl Config {
    /// Merges CLI overrides, the process environment and the file config.
    pub fn load(file: FileConfig, overrides: Overrides) -> Self {
        Self::resolve(file, overrides, |key| env::var(key).ok())
    }

    /// Resolves settings with precedence: overrides, then `lookup`, then file, then defaults.
    /// Empty strings count as unset at every level.
    pub fn resolve<F>(file: FileConfig, overrides: Overrides, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm = file.llm;
        let defaults = Config::default();

        let api_key = first_non_empty([overrides.api_key, lookup(API_KEY_VAR), llm.api_key])
            .unwrap_or(defaults.api_key);
        let base_url = first_non_empty([overrides.base_url, lookup(BASE_URL_VAR), llm.base_url])
            .unwrap_or(defaults.base_url);
        let model = first_non_empty([overrides.model, lookup(MODEL_VAR), llm.model])
            .unwrap_or(defaults.model);
        let system_prompt =
            first_non_empty([llm.system_prompt]).unwrap_or(defaults.system_prompt);

        let config = Self {
            api_key,
            base_url,
            model,
            temperature: llm.temperature.unwrap_or(defaults.temperature),
            max_tokens: llm.max_tokens.unwrap_or(defaults.max_tokens),
            timeout: llm
                .timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            system_prompt,
            proxy: first_non_empty([lookup(PROXY_VAR)]),
        };
        debug!(
            "配置解析完成: base_url={}, model={}, api_key 已设置={}",
            config.base_url,
            config.model,
            !config.api_key.is_empty()
        );
        config
    }

    /// The chat-completions URL derived from the base URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn first_non_empty<const N: usize>(candidates: [Option<String>; N]) -> Option<String> {
    candidates.into_iter().flatten().find(|value| !value.is_empty())
}
