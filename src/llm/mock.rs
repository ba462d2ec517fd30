//! src/llm/mock.rs
use super::LLMClient;
use crate::errors::LlmError;
use log::debug;

/// Canned reply used by `--mock`, shaped like a real model answer.
pub const MOCK_EMAIL: &str = "主题：【项目进度】本周工作安排

各位同事：

大家好！以下是本周的工作安排，请查收：

1. **周三前**完成需求评审；
2. 周五下午召开项目例会，地点在三楼会议室。

更多细节请参阅[项目看板](https://example.com/board)。

如有疑问，请随时与我联系。

此致
敬礼";

/// Offline client that never touches the network.
#[derive(Debug, Default)]
pub struct MockClient;

#[async_trait::async_trait]
impl LLMClient for MockClient {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn call(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        debug!("mock 模式，忽略提示词: {}", user_prompt);
        Ok(MOCK_EMAIL.to_string())
    }
}
