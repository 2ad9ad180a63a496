//! 日志脱敏：截断响应体，遮盖凭证

/// 日志中保留的响应体最大字节数
const LOG_BODY_MAX_BYTES: usize = 256;

/// 凭证在日志中保留的前缀字符数
const MASK_VISIBLE_CHARS: usize = 4;

/// 超过上限时只保留前 256 字节（落在字符边界上），并附上总长度
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= LOG_BODY_MAX_BYTES {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= LOG_BODY_MAX_BYTES)
        .last()
        .unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// `"LTAI5tAbCdEf"` → `"LTAI****"`；不长于前缀的值整体遮盖
pub fn mask_secret(s: &str) -> String {
    match s.char_indices().nth(MASK_VISIBLE_CHARS) {
        Some((end, _)) => format!("{}****", &s[..end]),
        None => "****".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_within_limit_kept() {
        let body = "x".repeat(LOG_BODY_MAX_BYTES);
        assert_eq!(truncate_for_log(&body), body);
    }

    #[test]
    fn long_body_reports_dropped_bytes() {
        let body = "x".repeat(LOG_BODY_MAX_BYTES + 44);
        let logged = truncate_for_log(&body);
        assert!(logged.ends_with("…(+44 bytes)"), "{logged}");
        assert!(logged.starts_with(&"x".repeat(LOG_BODY_MAX_BYTES)));
    }

    #[test]
    fn cut_lands_on_char_boundary() {
        // 3 字节字符：256 不是边界，应退到 255
        let body = "解".repeat(100);
        let logged = truncate_for_log(&body);
        assert!(logged.starts_with(&"解".repeat(85)));
        assert!(logged.ends_with("…(+45 bytes)"), "{logged}");
    }

    #[test]
    fn mask_keeps_prefix() {
        assert_eq!(mask_secret("LTAI5tAbCdEf"), "LTAI****");
    }

    #[test]
    fn mask_short_value_fully() {
        assert_eq!(mask_secret("LTAI"), "****");
        assert_eq!(mask_secret(""), "****");
    }
}
