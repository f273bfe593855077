//! Masking of secret values in free text.
//!
//! Command traces and log lines may carry secrets as `--flag=value`
//! arguments. [`redact`] replaces the value of every `--secret=` argument
//! with [`PLACEHOLDER`] and leaves everything else byte-for-byte intact.
//!
//! Matching rules:
//! - the flag must start a token: the byte before `--` is start-of-text or
//!   anything other than an ASCII alphanumeric, `_` or `-`;
//! - the flag name is followed immediately by `=` (so `--secretary=` is a
//!   different flag);
//! - the value is the longest non-empty run of ASCII alphanumerics and `_`.
//!
//! The placeholder is itself a valid value, so redaction is idempotent.

/// Replacement for every redacted value.
pub const PLACEHOLDER: &str = "HIDDEN_KEY";

const DEFAULT_PATTERNS: &[&str] = &["--secret="];

/// Redact `--secret=<value>` arguments in `text`.
pub fn redact(text: &str) -> String {
    redact_patterns(text, DEFAULT_PATTERNS)
}

/// A redactor for a custom set of flag names.
#[derive(Clone, Debug)]
pub struct Redactor {
    patterns: Vec<String>,
}

impl Redactor {
    /// Build a redactor for the given flag names, without the leading `--`.
    pub fn with_flags<I, S>(flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: flags
                .into_iter()
                .map(|flag| format!("--{}=", flag.as_ref()))
                .collect(),
        }
    }

    pub fn redact(&self, text: &str) -> String {
        redact_patterns(text, &self.patterns)
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::with_flags(["secret"])
    }
}

fn is_value_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_token_boundary(text: &[u8], at: usize) -> bool {
    at == 0 || !(is_value_byte(text[at - 1]) || text[at - 1] == b'-')
}

/// Byte range of the secret value for a flag starting at `at`, if any.
fn value_range<P: AsRef<str>>(text: &str, at: usize, patterns: &[P]) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    if !is_token_boundary(bytes, at) {
        return None;
    }
    let rest = &text[at..];
    patterns.iter().find_map(|pattern| {
        let pattern = pattern.as_ref();
        if !rest.starts_with(pattern) {
            return None;
        }
        let start = at + pattern.len();
        let len = bytes[start..]
            .iter()
            .take_while(|&&b| is_value_byte(b))
            .count();
        (len > 0).then_some((start, start + len))
    })
}

fn redact_patterns<P: AsRef<str>>(text: &str, patterns: &[P]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find("--") {
        let at = search + offset;
        match value_range(text, at, patterns) {
            Some((start, end)) => {
                out.push_str(&text[copied..start]);
                out.push_str(PLACEHOLDER);
                copied = end;
                search = end;
            }
            None => search = at + 1,
        }
    }

    out.push_str(&text[copied..]);
    out
}
