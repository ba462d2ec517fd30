//! src/errors.rs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while talking to the chat-completion endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("未设置 API Key，请通过 --api-key 参数或 DEEPSEEK_API_KEY 环境变量提供")]
    MissingApiKey,

    #[error("无法创建 HTTP 客户端，请检查代理等配置: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("请求发送失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API 请求失败，状态码 {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("无法解析 API 响应: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("API 调用成功，但返回的 'choices' 数组为空")]
    EmptyChoices,
}

/// Errors raised before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("未设置 API Key，请通过 --api-key 参数或 DEEPSEEK_API_KEY 环境变量提供")]
    MissingApiKey,

    #[error("缺少提示词，请通过 --prompt 参数或命令行参数提供")]
    MissingPrompt,

    #[error("配置文件不存在: {0}")]
    FileNotFound(PathBuf),

    #[error("无法读取配置文件 {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("无法解析配置文件 {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
