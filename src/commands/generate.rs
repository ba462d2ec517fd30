//! src/commands/generate.rs

use crate::cli::Cli;
use crate::config::{self, Config};
use crate::email::{EmailDraft, HtmlOptions};
use crate::errors::ConfigError;
use crate::llm::{generate_email, LLM};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use tokio::fs;

/// Runs one generation: configure, call the model, extract the subject, render, write.
pub async fn handle_generate(cli: Cli) -> Result<()> {
    let file_config = config::load_file_config(cli.config.as_deref())
        .await
        .context("无法加载配置文件。")?;
    let config = Config::load(file_config, cli.overrides());

    // 先检查 API Key，再检查提示词
    if !cli.mock && config.api_key.is_empty() {
        return Err(ConfigError::MissingApiKey.into());
    }
    let prompt = cli.prompt_text().ok_or(ConfigError::MissingPrompt)?;

    let llm_client = LLM::from_config(&config, cli.mock).context("无法创建 API 客户端。")?;
    let content = generate_email(llm_client.as_client(), &config.system_prompt, &prompt)
        .await
        .context("生成邮件失败。")?;

    let draft = EmailDraft::from_generated(&content);
    info!("邮件主题: {}", draft.subject);

    let output = draft.render(
        cli.format,
        HtmlOptions {
            markdown: !cli.no_markdown,
        },
    );

    match &cli.output {
        Some(path) => {
            fs::write(path, &output)
                .await
                .with_context(|| format!("无法写入文件: {}", path.display()))?;
            println!("{} {}", "✅ 邮件已写入".green(), path.display());
        }
        None => {
            println!("\n--- Generated Email ---");
            println!("{output}");
        }
    }

    Ok(())
}
