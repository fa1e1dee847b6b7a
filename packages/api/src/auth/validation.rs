/// Simple `local@domain.tld` shape check.
///
/// Accepts any address with a single `@`, no whitespace, a non-empty local
/// part and a domain with a dot that is neither its first nor last character.
/// Deliverability is the server's concern.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c == '@' || c.is_whitespace());
    if !clean(local) || !clean(domain) {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("nguyen.van.a@mail.skyplan.vn"));
        assert!(is_valid_email("a+tag@b.co"));
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@.com"));
        assert!(!is_valid_email("user@example."));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("a@b@c.com"));
    }
}
