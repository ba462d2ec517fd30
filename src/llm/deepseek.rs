//! src/llm/deepseek.rs
use super::LLMClient;
use crate::config::Config;
use crate::errors::LlmError;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// --- 数据结构定义 (适配 DeepSeek / OpenAI 兼容接口) ---
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

const USER_AGENT: &str = concat!("deepmail/", env!("CARGO_PKG_VERSION"));

// --- 客户端实现 ---
pub struct DeepSeekClient {
    api_key: String,
    model_name: String,
    endpoint: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl DeepSeekClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT);

        // 显式代理优先，否则沿用 reqwest 对系统代理的默认处理
        let builder = match &config.proxy {
            Some(url) => {
                let proxy = reqwest::Proxy::all(url.as_str()).map_err(LlmError::ClientSetup)?;
                builder.proxy(proxy)
            }
            None => builder,
        };

        let client = builder.build().map_err(LlmError::ClientSetup)?;

        Ok(Self {
            api_key: config.api_key.clone(),
            model_name: config.model.clone(),
            endpoint: config.endpoint(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }
}

/// Pulls the human-readable message out of an error response body.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => match error.kind {
            Some(kind) => format!("{} ({})", error.message, kind),
            None => error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}

#[async_trait::async_trait]
impl LLMClient for DeepSeekClient {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn call(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        if self.api_key.is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let request_payload = ChatCompletionRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("POST {} (model={})", self.endpoint, self.model_name);
        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_payload)
            .send()
            .await?;

        let res_status = res.status();
        let body = res.text().await?;
        debug!("响应状态: {}", res_status);

        if !res_status.is_success() {
            let detail = error_detail(&body);
            return Err(LlmError::Api {
                status: res_status.as_u16(),
                detail: if detail.is_empty() {
                    res_status.canonical_reason().unwrap_or("").to_string()
                } else {
                    detail
                },
            });
        }

        let response: ChatCompletionResponse = serde_json::from_str(&body)?;
        if let Some(usage) = &response.usage {
            debug!(
                "token 用量: prompt={}, completion={}, total={}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::EmptyChoices)
    }
}
