//! src/email/extract.rs
//!
//! Splits generated text into a subject line and the remaining body.
//!
//! Only the first [`SCAN_WINDOW`] lines are searched for an explicit marker such as
//! `主题：` or `Subject:`. When none is found, the first short colon-free line stands in
//! as the subject. Exactly one line, identified by its index in the original text, is
//! removed from the body.

use log::debug;

/// Subject used when nothing usable is found.
pub const DEFAULT_SUBJECT: &str = "Generated Email";

/// Number of leading lines searched for a subject marker.
const SCAN_WINDOW: usize = 11;

/// Fallback subjects must be shorter than this many characters.
const MAX_FALLBACK_CHARS: usize = 100;

/// Ordered marker list; the first match on a line wins.
pub const SUBJECT_MARKERS: &[&str] = &[
    "subject:",
    "主题:",
    "标题:",
    "邮件主题:",
    "email subject:",
    // 全角冒号
    "subject：",
    "主题：",
    "标题：",
    "邮件主题：",
    "email subject：",
    // 常见的回复/转发前缀
    "re:",
    "fw:",
    "fwd:",
    "回复:",
    "转发:",
    // 中文邮件里常见的主题括号
    "【",
    "[",
];

const DECORATORS: &[char] = &[
    '[', ']', '(', ')', '"', '【', '】', '《', '》', '（', '）', '“', '”',
];

const COLONS: &[char] = &[':', '：'];

/// A subject/body pair ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    /// Builds a draft from raw model output.
    pub fn from_generated(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();

        let found = find_marked_subject(&lines).or_else(|| find_fallback_subject(&lines));

        let Some((index, raw_subject)) = found else {
            debug!("未找到主题行，使用默认主题");
            return Self {
                subject: DEFAULT_SUBJECT.to_string(),
                body: text.to_string(),
            };
        };

        let subject = clean_subject(raw_subject);
        Self {
            subject: if subject.is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                subject
            },
            body: without_line(&lines, index),
        }
    }
}

/// Looks for a marker within the scan window, first as a prefix, then anywhere in the line.
fn find_marked_subject<'a>(lines: &[&'a str]) -> Option<(usize, &'a str)> {
    for (index, line) in lines.iter().enumerate().take(SCAN_WINDOW) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let prefixed = SUBJECT_MARKERS
            .iter()
            .find_map(|marker| strip_marker_prefix(trimmed, marker).map(|rest| (*marker, rest)));
        let matched = prefixed.or_else(|| {
            SUBJECT_MARKERS
                .iter()
                .find_map(|marker| text_after_marker(trimmed, marker).map(|rest| (*marker, rest)))
        });

        if let Some((marker, rest)) = matched {
            debug!("第 {} 行匹配主题标记 {:?}", index, marker);
            return Some((index, rest));
        }
    }
    None
}

/// First non-blank line anywhere in the text that is short and has no colon.
fn find_fallback_subject<'a>(lines: &[&'a str]) -> Option<(usize, &'a str)> {
    lines.iter().enumerate().find_map(|(index, line)| {
        let trimmed = line.trim();
        let usable = !trimmed.is_empty()
            && trimmed.chars().count() < MAX_FALLBACK_CHARS
            && !trimmed.contains(COLONS);
        usable.then(|| {
            debug!("第 {} 行被用作推测主题", index);
            (index, trimmed)
        })
    })
}

fn strip_marker_prefix<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let head = line.get(..marker.len())?;
    head.eq_ignore_ascii_case(marker)
        .then(|| &line[marker.len()..])
}

/// Text following the first occurrence of `marker`; `None` if nothing follows it.
fn text_after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let start = find_ignore_ascii_case(line, marker)?;
    let rest = &line[start + marker.len()..];
    (!rest.is_empty()).then_some(rest)
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        haystack
            .get(i..i + needle.len())
            .is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}

/// Removes bracket and quote decorators, then surrounding whitespace.
pub fn clean_subject(raw: &str) -> String {
    raw.trim().replace(DECORATORS, "").trim().to_string()
}

fn without_line(lines: &[&str], index: usize) -> String {
    lines
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(text: &str) -> (String, String) {
        let d = EmailDraft::from_generated(text);
        (d.subject, d.body)
    }

    #[test]
    fn explicit_subject_marker_on_first_line() {
        let (subject, body) = draft("Subject: Urgent Action Required\nPlease click here.");
        assert_eq!(subject, "Urgent Action Required");
        assert_eq!(body, "Please click here.");
    }

    #[test]
    fn short_first_line_without_marker_becomes_subject() {
        let (subject, body) = draft("Quarterly Bonus Notice\nDetails inside.");
        assert_eq!(subject, "Quarterly Bonus Notice");
        assert_eq!(body, "Details inside.");
    }

    #[test]
    fn long_line_without_marker_keeps_default_and_body() {
        let text = "a".repeat(120);
        let (subject, body) = draft(&text);
        assert_eq!(subject, DEFAULT_SUBJECT);
        assert_eq!(body, text);
    }

    #[test]
    fn marker_matching_ignores_ascii_case() {
        let (subject, body) = draft("SUBJECT: Team Offsite\n\nSee you there.");
        assert_eq!(subject, "Team Offsite");
        assert_eq!(body, "\nSee you there.");
    }

    #[test]
    fn full_width_colon_and_brackets_are_cleaned() {
        let (subject, body) = draft("主题：【年会通知】请查收\n\n各位同事：\n年会将于周五举行。");
        assert_eq!(subject, "年会通知请查收");
        assert_eq!(body, "\n各位同事：\n年会将于周五举行。");
    }

    #[test]
    fn leading_blank_lines_are_skipped() {
        let (subject, body) = draft("\n\n  标题: 系统维护公告  \n正文");
        assert_eq!(subject, "系统维护公告");
        assert_eq!(body, "\n\n正文");
    }

    #[test]
    fn longer_marker_matches_when_shorter_one_is_not_a_prefix() {
        let (subject, _) = draft("Email Subject: Budget Review\nbody");
        assert_eq!(subject, "Budget Review");
    }

    #[test]
    fn marker_inside_line_is_found() {
        let (subject, body) = draft("以下是邮件内容。主题：季度总结\n正文第一段");
        assert_eq!(subject, "季度总结");
        assert_eq!(body, "正文第一段");
    }

    #[test]
    fn bracket_prefix_counts_as_marker() {
        let (subject, body) = draft("【重要】账户安全提醒\n请及时更新密码。");
        assert_eq!(subject, "重要账户安全提醒");
        assert_eq!(body, "请及时更新密码。");
    }

    // The contains-check also fires inside ordinary words such as "here:".
    #[test]
    fn contains_match_can_fire_inside_words() {
        let (subject, body) = draft("The details are here: attached\nThanks");
        assert_eq!(subject, "attached");
        assert_eq!(body, "Thanks");
    }

    #[test]
    fn marker_outside_scan_window_is_ignored() {
        let mut lines: Vec<String> = (0..11).map(|i| format!("第{i}行：内容")).collect();
        lines.push("Subject: Too Late".to_string());
        lines.push("短行".to_string());
        let text = lines.join("\n");

        let (subject, body) = draft(&text);
        assert_eq!(subject, "短行");
        assert!(body.contains("Subject: Too Late"));
        assert!(!body.ends_with("短行"));
    }

    #[test]
    fn marker_at_last_window_line_is_found() {
        let mut lines: Vec<String> = (0..10).map(|i| format!("第{i}行：内容")).collect();
        lines.push("Subject: Just In Time".to_string());
        let (subject, _) = draft(&lines.join("\n"));
        assert_eq!(subject, "Just In Time");
    }

    #[test]
    fn fallback_skips_lines_with_colons() {
        let (subject, body) = draft("尊敬的客户：\n年终回馈活动\n详情见附件");
        assert_eq!(subject, "年终回馈活动");
        assert_eq!(body, "尊敬的客户：\n详情见附件");
    }

    #[test]
    fn fallback_counts_characters_not_bytes() {
        let line = "通".repeat(60);
        let (subject, _) = draft(&format!("{line}\n正文"));
        assert_eq!(subject, line);
    }

    #[test]
    fn empty_marker_text_falls_back_to_default_subject() {
        let (subject, body) = draft("Subject:\n正文内容");
        assert_eq!(subject, DEFAULT_SUBJECT);
        assert_eq!(body, "正文内容");
    }

    #[test]
    fn only_the_matched_line_index_is_removed() {
        let (subject, body) = draft("Subject: Hello\nSubject: Hello\nbody");
        assert_eq!(subject, "Hello");
        assert_eq!(body, "Subject: Hello\nbody");
    }

    #[test]
    fn empty_text_yields_default() {
        let (subject, body) = draft("");
        assert_eq!(subject, DEFAULT_SUBJECT);
        assert_eq!(body, "");
    }

    #[test]
    fn clean_subject_is_idempotent() {
        for raw in ["  [《通知》] ", "\"Quoted\" (draft)", "“双引号”（附件）", "plain"] {
            let once = clean_subject(raw);
            assert_eq!(clean_subject(&once), once);
        }
        assert_eq!(clean_subject("  [《通知》] "), "通知");
    }
}
