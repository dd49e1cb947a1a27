use std::sync::LazyLock;

use regex::Regex;

/// A sensitive-data detection rule: a category label and the regex that
/// fires it. Only the label ever leaves the detector.
pub struct SensitivePattern {
    pub label: &'static str,
    pub regex: &'static LazyLock<Regex>,
}

static BASIC_AUTH: LazyLock<Regex> = LazyLock::new(|| {
    // user:pass@ embedded in a URL authority
    Regex::new(r"[a-zA-Z][a-zA-Z0-9+.-]*://[^\s/:@]+:[^\s/@]+@").unwrap()
});

static PASSWORD_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    // password=..., pwd: ... with a value of at least 4 non-space chars
    Regex::new(r#"(?i)\b(?:password|pwd)\s*[=:]\s*["']?[^\s"']{4,}"#).unwrap()
});

static AWS_ACCESS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAKIA[0-9A-Z]{16}\b").unwrap());

static GOOGLE_API_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bAIza[0-9A-Za-z_\-]{35}\b").unwrap());

static STRIPE_SECRET_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bsk_(?:live|test)_[0-9a-zA-Z]{16,}\b").unwrap());

static PRIVATE_KEY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-----BEGIN (?:RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----").unwrap()
});

static JWT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_\-]*\.[A-Za-z0-9_\-]+\.[A-Za-z0-9_\-]+").unwrap()
});

static CREDIT_CARD: LazyLock<Regex> = LazyLock::new(|| {
    // Visa, Mastercard, Amex, Discover prefixes and lengths
    Regex::new(
        r"\b(?:4[0-9]{12}(?:[0-9]{3})?|5[1-5][0-9]{14}|3[47][0-9]{13}|6(?:011|5[0-9]{2})[0-9]{12})\b",
    )
    .unwrap()
});

static EMAIL_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}\b").unwrap()
});

/// Fires when the text contains an absolute URL. Shared with the
/// indicator extractor so the URL-presence threat and the indicator list
/// always agree. The orchestrator strips the resulting threat entry;
/// reputation lookups own URL risk.
pub(crate) use crate::extractor::indicators::URL_PATTERN as URL_PRESENT;

pub static SENSITIVE_PATTERNS: &[SensitivePattern] = &[
    SensitivePattern {
        label: "Basic auth credentials",
        regex: &BASIC_AUTH,
    },
    SensitivePattern {
        label: "Password assignment",
        regex: &PASSWORD_ASSIGNMENT,
    },
    SensitivePattern {
        label: "AWS access key ID",
        regex: &AWS_ACCESS_KEY,
    },
    SensitivePattern {
        label: "Google API key",
        regex: &GOOGLE_API_KEY,
    },
    SensitivePattern {
        label: "Stripe secret key",
        regex: &STRIPE_SECRET_KEY,
    },
    SensitivePattern {
        label: "Private key material",
        regex: &PRIVATE_KEY_HEADER,
    },
    SensitivePattern {
        label: "JWT-like token",
        regex: &JWT_TOKEN,
    },
    SensitivePattern {
        label: "Credit card number",
        regex: &CREDIT_CARD,
    },
    SensitivePattern {
        label: "Email address",
        regex: &EMAIL_ADDRESS,
    },
];
