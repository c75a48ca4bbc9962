//! Input validation for profile fields.
//!
//! Usernames:
//! - Length: 3-32 characters
//! - Characters: ASCII letters, digits, `_`, `.`, `-`
//!
//! Emails are checked for syntactic plausibility only:
//! - Length: 5-254 bytes
//! - Exactly one `@`, local part of 1-64 bytes
//! - Domain of at least two dot-separated labels
//! - TLD alphabetic, or an IDN punycode label (`xn--...`)
//!
//! Free-text fields (full name, bio, avatar URL) are bounded in length.

use soroban_sdk::String;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: u32 = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: u32 = 32;

/// Minimum email length (`a@b.c`).
pub const MIN_EMAIL_LENGTH: u32 = 5;

/// Maximum email length (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: u32 = 254;

/// Maximum local-part length.
const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Maximum length of optional free-text fields.
pub const MAX_TEXT_LENGTH: u32 = 512;

/// Validate a username.
pub fn validate_username(username: &String) -> bool {
    let len = username.len();
    if len < MIN_USERNAME_LENGTH || len > MAX_USERNAME_LENGTH {
        return false;
    }

    let mut buf = [0u8; MAX_USERNAME_LENGTH as usize];
    let bytes = &mut buf[..len as usize];
    username.copy_into_slice(bytes);

    is_valid_username(bytes)
}

/// Validate an email address.
pub fn validate_email(email: &String) -> bool {
    let len = email.len();
    if len < MIN_EMAIL_LENGTH || len > MAX_EMAIL_LENGTH {
        return false;
    }

    let mut buf = [0u8; MAX_EMAIL_LENGTH as usize];
    let bytes = &mut buf[..len as usize];
    email.copy_into_slice(bytes);

    is_valid_email(bytes)
}

/// Validate an optional free-text field.
pub fn validate_text(text: &String) -> bool {
    text.len() <= MAX_TEXT_LENGTH
}

/// Validate every present field of `details`.
pub fn validate_details(
    full_name: &Option<String>,
    bio: &Option<String>,
    avatar_url: &Option<String>,
) -> bool {
    [full_name, bio, avatar_url]
        .iter()
        .all(|field| field.as_ref().map_or(true, validate_text))
}

fn is_valid_username(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|&b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-')
}

fn is_valid_email(bytes: &[u8]) -> bool {
    let mut parts = bytes.split(|&b| b == b'@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &[u8]) -> bool {
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LENGTH {
        return false;
    }

    // No leading, trailing or doubled dots
    if local[0] == b'.' || local[local.len() - 1] == b'.' {
        return false;
    }
    if local.windows(2).any(|w| w == b"..") {
        return false;
    }

    local.iter().all(|&b| is_local_char(b))
}

fn is_valid_domain(domain: &[u8]) -> bool {
    let mut labels = 0;
    let mut last: &[u8] = &[];

    for label in domain.split(|&b| b == b'.') {
        if !is_valid_label(label) {
            return false;
        }
        labels += 1;
        last = label;
    }

    labels >= 2 && is_valid_tld(last)
}

fn is_valid_tld(tld: &[u8]) -> bool {
    if let Some(encoded) = tld.strip_prefix(b"xn--") {
        return !encoded.is_empty() && encoded.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-');
    }
    tld.len() >= 2 && tld.iter().all(u8::is_ascii_alphabetic)
}

fn is_valid_label(label: &[u8]) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label[0] == b'-' || label[label.len() - 1] == b'-' {
        return false;
    }
    label.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
}

/// Characters permitted unquoted in the local part.
#[inline]
fn is_local_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+/=?^_`{|}~.-".contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    #[test]
    fn test_valid_usernames() {
        let env = Env::default();

        assert!(validate_username(&String::from_str(&env, "bob")));
        assert!(validate_username(&String::from_str(&env, "Alice_01")));
        assert!(validate_username(&String::from_str(&env, "jane.doe-99")));
        assert!(validate_username(&String::from_str(
            &env,
            "abcdefghijklmnopqrstuvwxyz012345"
        ))); // 32 chars max
    }

    #[test]
    fn test_invalid_usernames() {
        let env = Env::default();

        assert!(!validate_username(&String::from_str(&env, "bo"))); // too short
        assert!(!validate_username(&String::from_str(&env, ""))); // empty
        assert!(!validate_username(&String::from_str(
            &env,
            "abcdefghijklmnopqrstuvwxyz0123456"
        ))); // 33 chars
        assert!(!validate_username(&String::from_str(&env, "bob smith"))); // space
        assert!(!validate_username(&String::from_str(&env, "bob@home"))); // @
    }

    #[test]
    fn test_valid_emails() {
        let env = Env::default();

        assert!(validate_email(&String::from_str(&env, "bob@x.com")));
        assert!(validate_email(&String::from_str(&env, "a@b.co")));
        assert!(validate_email(&String::from_str(&env, "first.last+tag@mail.example.org")));
        assert!(validate_email(&String::from_str(&env, "x_y@sub-domain.io")));
        assert!(validate_email(&String::from_str(&env, "bob@x.xn--p1ai"))); // punycode TLD
    }

    #[test]
    fn test_invalid_emails() {
        let env = Env::default();

        assert!(!validate_email(&String::from_str(&env, "bad"))); // too short
        assert!(!validate_email(&String::from_str(&env, "bob.example.com"))); // no @
        assert!(!validate_email(&String::from_str(&env, "bob@@x.com"))); // two @
        assert!(!validate_email(&String::from_str(&env, "@x.com"))); // empty local
        assert!(!validate_email(&String::from_str(&env, "bob@localhost"))); // single label
        assert!(!validate_email(&String::from_str(&env, "bob@x.c"))); // short TLD
        assert!(!validate_email(&String::from_str(&env, "bob@x..com"))); // empty label
        assert!(!validate_email(&String::from_str(&env, ".bob@x.com"))); // leading dot
        assert!(!validate_email(&String::from_str(&env, "b..ob@x.com"))); // doubled dot
        assert!(!validate_email(&String::from_str(&env, "bob@-x.com"))); // label hyphen
        assert!(!validate_email(&String::from_str(&env, "bo b@x.com"))); // space
        assert!(!validate_email(&String::from_str(&env, "bob@x.c0m"))); // numeric TLD
        assert!(!validate_email(&String::from_str(&env, "bob@x.xn--"))); // empty punycode
    }

    #[test]
    fn test_text_length_bound() {
        let env = Env::default();
        let long = [b'a'; MAX_TEXT_LENGTH as usize + 1];

        assert!(validate_text(&String::from_str(&env, "")));
        assert!(validate_text(&String::from_str(&env, "Hello, I am Bob!")));
        assert!(!validate_text(&String::from_bytes(&env, &long)));
        assert!(validate_text(&String::from_bytes(
            &env,
            &long[..MAX_TEXT_LENGTH as usize]
        )));
    }
}
