//! GitHub profile URL validation.

/// Extract the username from a strict GitHub profile URL.
///
/// Accepts exactly `https://github.com/<username>` where the username
/// is one or more ASCII alphanumerics or hyphens, with nothing after
/// it. Anything else (empty field, trailing path, other hosts, query
/// strings) returns `None`, which callers treat as a skip.
#[must_use]
pub fn username_from_profile(url: &str) -> Option<&str> {
    let username = url.strip_prefix("https://github.com/")?;

    if username.is_empty() {
        return None;
    }
    if !username
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
    {
        return None;
    }

    Some(username)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_profile_urls() {
        assert_eq!(
            username_from_profile("https://github.com/alice"),
            Some("alice")
        );
        assert_eq!(
            username_from_profile("https://github.com/octo-cat42"),
            Some("octo-cat42")
        );
    }

    #[test]
    fn rejects_empty_and_malformed_urls() {
        assert_eq!(username_from_profile(""), None);
        assert_eq!(username_from_profile("https://github.com/"), None);
        assert_eq!(username_from_profile("https://github.com/alice/repo"), None);
        assert_eq!(username_from_profile("https://github.com/alice?tab=repos"), None);
        assert_eq!(username_from_profile("http://github.com/alice"), None);
        assert_eq!(username_from_profile("https://gitlab.com/alice"), None);
        assert_eq!(username_from_profile("alice"), None);
        assert_eq!(username_from_profile("https://github.com/ali ce"), None);
    }
}
