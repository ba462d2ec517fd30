//! src/email/render.rs

use super::extract::EmailDraft;

/// Switches for the HTML renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOptions {
    /// Apply the minimal Markdown pass to the body.
    pub markdown: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self { markdown: true }
    }
}

/// Plain-text output is the body alone.
pub fn render_text(draft: &EmailDraft) -> String {
    draft.body.clone()
}

/// Renders a self-contained HTML document.
pub fn render_html(draft: &EmailDraft, options: HtmlOptions) -> String {
    let subject = escape_html(&draft.subject);
    let content = body_to_html(&draft.body, options.markdown);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{subject}</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            line-height: 1.6;
            margin: 0;
            padding: 20px;
            color: #333;
        }}
        .container {{
            max-width: 600px;
            margin: 0 auto;
            border: 1px solid #ddd;
            border-radius: 5px;
            padding: 20px;
        }}
        .header {{
            border-bottom: 1px solid #eee;
            padding-bottom: 10px;
            margin-bottom: 20px;
        }}
        .footer {{
            margin-top: 30px;
            padding-top: 10px;
            border-top: 1px solid #eee;
            font-size: 12px;
            color: #777;
        }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h2>{subject}</h2>
        </div>
        <div class="content">
            {content}
        </div>
        <div class="footer">
            <p>此邮件由AI自动生成，仅用于演示目的。</p>
        </div>
    </div>
</body>
</html>
"#
    )
}

/// Escapes the characters that would otherwise be read as markup.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escapes the body, turns newlines into `<br>`, then optionally applies the Markdown pass.
///
/// The Markdown pass only ever emits opening tags for `**` and `*`; it is not a parser.
pub fn body_to_html(body: &str, markdown: bool) -> String {
    let html = escape_html(body).replace('\n', "<br>");
    if !markdown {
        return html;
    }

    let html = html.replace("**", "<strong>").replace('*', "<em>");
    convert_links(&html)
}

/// Rewrites `[text](url)` into anchors by scanning for brackets and parentheses.
fn convert_links(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('[') {
        let Some(close_paren) = rest[open..].find(')').map(|i| open + i) else {
            break;
        };

        match parse_link(&rest[open..=close_paren]) {
            Some((text, url)) => {
                out.push_str(&rest[..open]);
                out.push_str(&format!(r#"<a href="{url}">{text}</a>"#));
                rest = &rest[close_paren + 1..];
            }
            None => {
                // 无法解析，保留原样并跳过这个 '['
                out.push_str(&rest[..=open]);
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Splits a `[...](...)` segment into link text and URL; both must be non-empty.
fn parse_link(segment: &str) -> Option<(&str, &str)> {
    let close_bracket = segment.find(']')?;
    let open_paren = segment.find('(')?;
    if open_paren < close_bracket {
        return None;
    }

    let text = &segment[1..close_bracket];
    let url = &segment[open_paren + 1..segment.len() - 1];
    (!text.is_empty() && !url.is_empty()).then_some((text, url))
}
