use std::collections::HashSet;

/// Reduces user-supplied display text to plain text.
///
/// Every tag is dropped (script and style with their content), the rest is
/// entity-escaped by ammonia, and surrounding whitespace trimmed.
pub fn clean_display_name(input: &str) -> String {
    ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(clean_display_name("  Alice Smith "), "Alice Smith");
    }

    #[test]
    fn test_tags_removed() {
        assert_eq!(clean_display_name("<b>Bob</b>"), "Bob");
        assert_eq!(clean_display_name("<script>alert(1)</script>Eve"), "Eve");
    }
}
