/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Short preview of a secret value (client secret, bearer token) for diagnostics.
/// Never reveals more than `visible` leading characters, and nothing at all
/// for values too short to hide their tail.
pub fn preview(secret: &str, visible: usize) -> String {
    let len = secret.chars().count();
    if len <= visible * 2 {
        return "***".to_string();
    }
    let head: String = secret.chars().take(visible).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello", 10), "Hello");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hi", 2), "Hi");
        assert_eq!(truncate_string("Hello", 2), "He");
    }

    #[test]
    fn test_preview_hides_tail() {
        assert_eq!(preview("abcdefghijklmnopqrstuvwxyz", 4), "abcd...");
    }

    #[test]
    fn test_preview_short_secret_fully_masked() {
        assert_eq!(preview("xyz", 4), "***");
        assert_eq!(preview("abcdefgh", 4), "***");
        assert_eq!(preview("", 4), "***");
    }
}
