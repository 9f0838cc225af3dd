/// Punctuation that counts as a special character for password checks.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Check that an email looks like `someone@somewhere.tld`: a non-empty
/// local part, an `@`, and a domain containing at least one dot, with no
/// whitespace or second `@` anywhere. This is a UI-layer gate, not an RFC
/// parser; the user store is the source of truth.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    [local, host, tld].iter().all(|part| {
        !part.is_empty() && !part.contains('@') && !part.chars().any(char::is_whitespace)
    })
}

/// Check that a password is acceptable for a new account: at least 8
/// characters with at least one ASCII uppercase letter, one lowercase
/// letter, one digit, and one special character.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_plain_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
    }

    #[test]
    fn rejects_missing_at() {
        assert!(!is_valid_email("nobody.example.com"));
    }

    #[test]
    fn rejects_missing_dot_in_domain() {
        assert!(!is_valid_email("a@localhost"));
    }

    #[test]
    fn rejects_double_at() {
        assert!(!is_valid_email("a@b@c.com"));
    }

    #[test]
    fn rejects_whitespace() {
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@b .com"));
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@b."));
    }

    #[test]
    fn accepts_full_variety() {
        assert!(is_strong_password("Abcdef1!"));
        assert!(is_strong_password("Tr0ub4dor&Three"));
    }

    #[test]
    fn rejects_missing_classes() {
        // short
        assert!(!is_strong_password("Ab1!"));
        // no uppercase
        assert!(!is_strong_password("abcdef1!"));
        // no lowercase
        assert!(!is_strong_password("ABCDEF1!"));
        // no digit
        assert!(!is_strong_password("Abcdefg!"));
        // no special character
        assert!(!is_strong_password("Abcdefg1"));
    }

    proptest! {
        #[test]
        fn short_is_never_strong(password in ".{0,7}") {
            prop_assume!(password.chars().count() < 8);
            prop_assert!(!is_strong_password(&password));
        }

        #[test]
        fn all_classes_at_length_is_strong(
            password in "[A-Z]{2}[a-z]{2}[0-9]{2}[!@#$%^&*]{2}"
        ) {
            prop_assert!(is_strong_password(&password));
        }
    }
}
