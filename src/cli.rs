//! src/cli.rs
use crate::config::Overrides;
use crate::email::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DEEPMAIL_BUILD_TARGET"),
    ")"
);

/// 一个调用大模型生成中文邮件并输出为文本或 HTML 的 CLI 工具
#[derive(Parser, Debug)]
#[command(author, version, long_version = LONG_VERSION, about, long_about = None)]
pub struct Cli {
    /// DeepSeek API Key，优先于 DEEPSEEK_API_KEY 环境变量
    #[arg(long)]
    pub api_key: Option<String>,

    /// 输出文件路径，不指定时输出到标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出格式
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// 生成邮件所用的提示词
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// 覆盖 API 基础地址
    #[arg(long)]
    pub base_url: Option<String>,

    /// 覆盖模型名称
    #[arg(long)]
    pub model: Option<String>,

    /// 指定配置文件路径
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 不调用 API，使用内置的示例邮件内容
    #[arg(long)]
    pub mock: bool,

    /// 生成 HTML 时不处理 Markdown 标记
    #[arg(long)]
    pub no_markdown: bool,

    /// 未使用 --prompt 时，剩余参数拼接为提示词
    #[arg(value_name = "PROMPT")]
    pub words: Vec<String>,
}

impl Cli {
    /// The prompt from `--prompt`, or the positional words joined by spaces.
    pub fn prompt_text(&self) -> Option<String> {
        if let Some(prompt) = self.prompt.as_deref().filter(|p| !p.trim().is_empty()) {
            return Some(prompt.to_string());
        }

        let joined = self.words.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deepmail").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn prompt_flag_wins_over_positional_words() {
        let cli = parse(&["--prompt", "写一封请假邮件", "ignored"]);
        assert_eq!(cli.prompt_text().as_deref(), Some("写一封请假邮件"));
    }

    #[test]
    fn positional_words_are_joined() {
        let cli = parse(&["写一封", "会议", "通知"]);
        assert_eq!(cli.prompt_text().as_deref(), Some("写一封 会议 通知"));
    }

    #[test]
    fn blank_prompt_flag_falls_back_to_words() {
        let cli = parse(&["-p", "  ", "年会", "邀请"]);
        assert_eq!(cli.prompt_text().as_deref(), Some("年会 邀请"));
    }

    #[test]
    fn missing_prompt_is_none() {
        let cli = parse(&["--format", "html"]);
        assert_eq!(cli.prompt_text(), None);
        assert_eq!(cli.format, OutputFormat::Html);
    }

    #[test]
    fn format_defaults_to_text_and_rejects_unknown_values() {
        assert_eq!(parse(&["x"]).format, OutputFormat::Text);
        assert!(Cli::try_parse_from(["deepmail", "--format", "pdf", "x"]).is_err());
    }

    #[test]
    fn overrides_carry_flag_values() {
        let cli = parse(&["--api-key", "k", "--model", "deepseek-reasoner", "x"]);
        let overrides = cli.overrides();
        assert_eq!(overrides.api_key.as_deref(), Some("k"));
        assert_eq!(overrides.model.as_deref(), Some("deepseek-reasoner"));
        assert_eq!(overrides.base_url, None);
    }
}
