use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Kinds of variable token recognised by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Timestamp,
    Date,
    Time,
    Url,
    Ip,
    Email,
    Uuid,
    Path,
    Hex,
    Num,
}

impl VariableKind {
    pub fn placeholder(self) -> &'static str {
        match self {
            VariableKind::Timestamp => "<TIMESTAMP>",
            VariableKind::Date => "<DATE>",
            VariableKind::Time => "<TIME>",
            VariableKind::Url => "<URL>",
            VariableKind::Ip => "<IP>",
            VariableKind::Email => "<EMAIL>",
            VariableKind::Uuid => "<UUID>",
            VariableKind::Path => "<PATH>",
            VariableKind::Hex => "<HEX>",
            VariableKind::Num => "<NUM>",
        }
    }
}

// All patterns are anchored: a token is either entirely variable or left alone.

static RE_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    // 2025-08-07T06:41:18Z, 2025-08-07T06:41:18.123456+01:00
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})?(?:Z|[+-]\d{2}(?::?\d{2})?)?$").unwrap()
});

static RE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{4}-\d{2}-\d{2}|\d{4}/\d{2}/\d{2}|\d{2}/\d{2}/\d{4})$").unwrap()
});

static RE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}:\d{2}(?:[.,]\d{1,9})?(?:Z|[+-]\d{2}(?::?\d{2})?)?$").unwrap()
});

static RE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[a-zA-Z][a-zA-Z0-9+.-]*://[^\s"']+$"#).unwrap()
});

static RE_IPV4: Lazy<Regex> = Lazy::new(|| {
    // Optional :port suffix
    Regex::new(r"^(?:(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(?:25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)(?::\d{1,5})?$").unwrap()
});

static RE_IPV6: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}$").unwrap()
});

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

static RE_UUID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$").unwrap()
});

static RE_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:/|\./|\.\./|~/)[\w.\-]+(?:/[\w.\-]+)*/?$").unwrap()
});

static RE_HEX: Lazy<Regex> = Lazy::new(|| {
    // 0x-prefixed of any length, or bare runs of 16+ hex digits
    Regex::new(r"^(?:0[xX][0-9a-fA-F]+|[0-9a-fA-F]{16,})$").unwrap()
});

static RE_NUM: Lazy<Regex> = Lazy::new(|| {
    // Plain integers and floats, optionally followed by a common unit
    Regex::new(r"(?i)^[-+]?\d+(?:\.\d+)?(?:ms|us|µs|ns|s|m|h|kb|mb|gb|kib|mib|gib|b|%)?$").unwrap()
});

/// Identify a token that is obviously a variable field.
pub fn classify(token: &str) -> Option<VariableKind> {
    // Plain words are never masked: only tokens with a digit, '/' or '@' are checked.
    if !token.bytes().any(|b| b.is_ascii_digit() || b == b'/' || b == b'@') {
        return None;
    }
    // Order matters: the more specific shapes are tried first.
    let checks: [(&Lazy<Regex>, VariableKind); 11] = [
        (&RE_TIMESTAMP, VariableKind::Timestamp),
        (&RE_DATE, VariableKind::Date),
        (&RE_TIME, VariableKind::Time),
        (&RE_URL, VariableKind::Url),
        (&RE_IPV4, VariableKind::Ip),
        (&RE_IPV6, VariableKind::Ip),
        (&RE_EMAIL, VariableKind::Email),
        (&RE_UUID, VariableKind::Uuid),
        (&RE_PATH, VariableKind::Path),
        (&RE_NUM, VariableKind::Num),
        (&RE_HEX, VariableKind::Hex),
    ];
    checks
        .iter()
        .find(|(re, _)| re.is_match(token))
        .map(|(_, kind)| *kind)
}

/// Replace a variable token with its placeholder. For `key=value` tokens only
/// the value is masked, so `pid=4242` becomes `pid=<NUM>`.
pub fn mask_token(token: &str) -> Cow<'_, str> {
    if let Some(kind) = classify(token) {
        return Cow::Borrowed(kind.placeholder());
    }
    if let Some((key, value)) = token.split_once('=') {
        if !key.is_empty() {
            if let Some(kind) = classify(value) {
                return Cow::Owned(format!("{key}={}", kind.placeholder()));
            }
        }
    }
    Cow::Borrowed(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_with_units_are_masked() {
        assert_eq!(classify("150ms"), Some(VariableKind::Num));
        assert_eq!(classify("-3.5"), Some(VariableKind::Num));
        assert_eq!(classify("99%"), Some(VariableKind::Num));
    }

    #[test]
    fn numeric_looking_ids_prefer_num_over_hex() {
        assert_eq!(classify("1234567890123456"), Some(VariableKind::Num));
        assert_eq!(classify("deadbeefdeadbee1"), Some(VariableKind::Hex));
        assert_eq!(classify("0xff"), Some(VariableKind::Hex));
    }

    #[test]
    fn network_and_identity_tokens() {
        assert_eq!(classify("192.168.1.1"), Some(VariableKind::Ip));
        assert_eq!(classify("10.0.0.5:8080"), Some(VariableKind::Ip));
        assert_eq!(classify("bob@example.com"), Some(VariableKind::Email));
        assert_eq!(classify("https://example.com/a?b=1"), Some(VariableKind::Url));
        assert_eq!(
            classify("123e4567-e89b-12d3-a456-426614174000"),
            Some(VariableKind::Uuid)
        );
        assert_eq!(classify("/var/log/syslog"), Some(VariableKind::Path));
    }

    #[test]
    fn time_shapes() {
        assert_eq!(classify("2024-01-01T12:00:00Z"), Some(VariableKind::Timestamp));
        assert_eq!(classify("2024-01-01"), Some(VariableKind::Date));
        assert_eq!(classify("12:00:00.123"), Some(VariableKind::Time));
    }

    #[test]
    fn plain_words_pass_through() {
        assert_eq!(mask_token("connected"), "connected");
        assert_eq!(mask_token("v2"), "v2");
    }

    #[test]
    fn key_value_masks_only_value() {
        assert_eq!(mask_token("pid=4242"), "pid=<NUM>");
        assert_eq!(mask_token("user=alice"), "user=alice");
        assert_eq!(mask_token("=42"), "=42");
    }
}
