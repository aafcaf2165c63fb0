const MAX_VISIBLE_CHARS: usize = 500;

/// Sanitizes a remote error body before it is logged or echoed back to a client.
pub fn sanitize_backend_message(message: &str) -> String {
    let trimmed = message.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let sanitized = if total > MAX_VISIBLE_CHARS {
        let visible: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", visible, total)
    } else {
        trimmed.to_string()
    };

    redact_sensitive_patterns(&sanitized)
}

fn redact_sensitive_patterns(text: &str) -> String {
    let patterns = [
        ("Bearer ", "Bearer [REDACTED]"),
        ("access_token=", "access_token=[REDACTED]"),
        ("token=", "token=[REDACTED]"),
        ("sig=", "sig=[REDACTED]"),
        ("ghp_", "ghp_[REDACTED]"),
        ("github_pat_", "github_pat_[REDACTED]"),
    ];

    let mut result = text.to_string();
    for (pattern, replacement) in patterns {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(pattern) {
            let idx = search_from + found;
            let value_start = idx + pattern.len();
            let end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            if result[value_start..end].starts_with("[REDACTED]") {
                search_from = end;
                continue;
            }
            result = format!("{}{}{}", &result[..idx], replacement, &result[end..]);
            search_from = idx + replacement.len();
        }
    }

    result
}
