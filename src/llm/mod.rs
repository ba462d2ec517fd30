//! src/llm/mod.rs

use crate::config::Config;
use crate::errors::LlmError;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Duration;

pub mod deepseek;
pub mod mock;

pub use deepseek::DeepSeekClient;
pub use mock::MockClient;

/// The `LLMClient` trait defines the interface for a chat-completion client.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Returns the name of the LLM client.
    fn name(&self) -> &str;
    /// Sends one system/user exchange and returns the text of the first choice.
    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError>;
}

pub enum LLM {
    DeepSeek(DeepSeekClient),
    Mock(MockClient),
}

impl LLM {
    /// Picks the offline client when `mock` is set, the remote one otherwise.
    pub fn from_config(config: &Config, mock: bool) -> Result<Self, LlmError> {
        if mock {
            Ok(LLM::Mock(MockClient))
        } else {
            Ok(LLM::DeepSeek(DeepSeekClient::new(config)?))
        }
    }

    pub fn as_client(&self) -> &dyn LLMClient {
        match self {
            LLM::DeepSeek(c) => c,
            LLM::Mock(c) => c,
        }
    }
}

/// Asks the model for an email, showing a spinner while the request is in flight.
pub async fn generate_email(
    client: &dyn LLMClient,
    system_prompt: &str,
    prompt: &str,
) -> Result<String, LlmError> {
    info!("调用 {} 生成邮件内容", client.name());

    let progress_bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        progress_bar.set_style(style);
    }
    progress_bar.set_message("正在生成邮件内容...");
    progress_bar.enable_steady_tick(Duration::from_millis(100));

    let result = client.call(system_prompt, prompt).await;
    match &result {
        Ok(_) => progress_bar.finish_with_message("✓ 邮件内容生成完成"),
        Err(_) => progress_bar.abandon(),
    }
    result
}
