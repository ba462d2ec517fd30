//! src/email/mod.rs

use clap::ValueEnum;

pub mod extract;
pub mod render;

pub use extract::EmailDraft;
pub use render::HtmlOptions;

/// How the finished email is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// 仅输出正文
    #[default]
    Text,
    /// 输出完整的 HTML 文档
    Html,
}

impl EmailDraft {
    pub fn render(&self, format: OutputFormat, options: HtmlOptions) -> String {
        match format {
            OutputFormat::Text => render::render_text(self),
            OutputFormat::Html => render::render_html(self, options),
        }
    }
}
