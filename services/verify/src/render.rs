//! HTML rendering of verdicts for the legacy `/verify` page.
//!
//! Pure functions of the verdict; nothing here touches the registry.

use veritag_core::serde::format_rfc3339_ms;

use crate::domain::verdict::{Verdict, VerdictStatus};

fn title(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Valid => "Verified",
        VerdictStatus::Used => "Already used",
        VerdictStatus::Invalid => "Invalid code",
        VerdictStatus::Unknown => "Code not found",
        VerdictStatus::Error => "Try again later",
    }
}

/// Accent color per verdict.
fn color(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Valid => "#1b7f3b",
        VerdictStatus::Used => "#b36b00",
        VerdictStatus::Invalid | VerdictStatus::Unknown => "#b3261e",
        VerdictStatus::Error => "#5f6368",
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a standalone HTML page for a verdict.
pub fn render_verdict_page(verdict: &Verdict) -> String {
    let status = verdict.status();
    let mut details = String::new();
    if let Some(activated) = verdict.activated() {
        details.push_str("<dl>");
        details.push_str(&format!(
            "<dt>Code</dt><dd>{}</dd>",
            escape_html(&activated.code.to_string())
        ));
        details.push_str(&format!(
            "<dt>Batch</dt><dd>{}</dd>",
            escape_html(&activated.batch_id)
        ));
        details.push_str(&format!(
            "<dt>Activated</dt><dd><time>{}</time></dd>",
            format_rfc3339_ms(&activated.activated_at)
        ));
        details.push_str(&format!(
            "<dt>Last checked</dt><dd><time>{}</time></dd>",
            format_rfc3339_ms(&activated.last_checked_at)
        ));
        details.push_str("</dl>");
    }

    format!(
        concat!(
            "<!DOCTYPE html>",
            "<html lang=\"en\"><head><meta charset=\"utf-8\">",
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
            "<title>{title}</title></head>",
            "<body style=\"font-family: sans-serif; text-align: center; padding: 2rem;\">",
            "<h2 data-status=\"{status}\" style=\"color: {color};\">{title}</h2>",
            "<p>{message}</p>{details}",
            "</body></html>"
        ),
        title = title(status),
        status = status.as_str(),
        color = color(status),
        message = escape_html(verdict.message()),
        details = details,
    )
}
