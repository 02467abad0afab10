use std::sync::LazyLock;

use regex::Regex;

// Narrow on purpose: single-label domain, `.com` only. Rows whose guardian
// address fails this check lose their contact email and message, so
// subdomains and other TLDs are rejected too.
// `$` here does not match before a trailing newline; callers should trim input.
static GUARDIAN_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*@[a-zA-Z0-9]+\.com$").expect("guardian email pattern")
});

pub fn is_valid_email(email: &str) -> bool {
    GUARDIAN_EMAIL.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_simple_com_addresses() {
        assert!(is_valid_email("parent1@gmail.com"));
        assert!(is_valid_email("a_1@ab12.com"));
        assert!(is_valid_email("_x@Z9.com"));
    }

    #[test]
    fn rejects_what_the_pattern_excludes() {
        assert!(!is_valid_email("invalidemail@.com"));
        assert!(!is_valid_email("x@sub.domain.com"));
        assert!(!is_valid_email("1parent@gmail.com"));
        assert!(!is_valid_email("first.last@gmail.com"));
        assert!(!is_valid_email("parent@gmail.org"));
        assert!(!is_valid_email("parent@gmail.com "));
        assert!(!is_valid_email("parent1@gmail.com\n"));
        assert!(!is_valid_email(""));
    }
}
