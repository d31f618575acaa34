use regex::Regex;
use std::sync::OnceLock;

/// Short option followed by its long form, e.g. `-O, --output-document=FILE`.
const SHORT_AND_LONG_PATTERN: &str = r"-[a-zA-Z]*, *--[-a-zA-Z=]+";
/// Long-only option, e.g. `--no-dns-cache`.
const LONG_ONLY_PATTERN: &str = r"--[-a-zA-Z=]+";

fn short_and_long_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(SHORT_AND_LONG_PATTERN).expect("valid short+long pattern"))
}

fn long_only_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(LONG_ONLY_PATTERN).expect("valid long pattern"))
}

/// One option definition scraped from a help line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionToken {
    raw: String,
    short: Option<String>,
    long: String,
    value: Option<String>,
}

impl OptionToken {
    /// Extracts the first option definition on `line`, preferring the
    /// short+long form over a bare long option.
    pub fn from_line(line: &str) -> Option<Self> {
        let matched = short_and_long_regex()
            .find(line)
            .or_else(|| long_only_regex().find(line))?;

        Self::from_match(matched.as_str())
    }

    fn from_match(matched: &str) -> Option<Self> {
        let raw: String = matched
            .chars()
            .filter(|c| !matches!(c, '\n' | '\r' | ' '))
            .map(|c| if c == ',' { '|' } else { c })
            .collect();

        let long_start = raw.find("--")?;
        let short = raw[..long_start]
            .strip_suffix('|')
            .map(|short| short.to_string());

        let (long, value) = match raw[long_start..].split_once('=') {
            Some((long, value)) => (long.to_string(), Some(value.to_string())),
            None => (raw[long_start..].to_string(), None),
        };

        Some(Self {
            raw,
            short,
            long,
            value,
        })
    }

    /// Normalized token: no whitespace, `|` between short and long forms.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn short(&self) -> Option<&str> {
        self.short.as_deref()
    }

    /// Long form including the leading `--`, without any value placeholder.
    pub fn long(&self) -> &str {
        &self.long
    }

    /// Placeholder after `=`, e.g. `FILE`.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn takes_value(&self) -> bool {
        self.value.is_some()
    }

    /// `=` plus the placeholder, exactly as it appears in the raw token.
    pub fn value_suffix(&self) -> Option<String> {
        self.value.as_ref().map(|value| format!("={}", value))
    }

    /// Raw token with the value suffix removed.
    pub fn definition(&self) -> &str {
        match self.raw.find('=') {
            Some(idx) => &self.raw[..idx],
            None => &self.raw,
        }
    }

    /// Long name without dashes, lowercased, hyphens turned into
    /// underscores: `--dry-run` becomes `dry_run`.
    pub fn canonical_identifier(&self) -> String {
        self.long
            .trim_start_matches("--")
            .chars()
            .take_while(|c| c.is_ascii_alphabetic() || *c == '-')
            .map(|c| if c == '-' { '_' } else { c.to_ascii_lowercase() })
            .collect()
    }
}

/// Scans help text line by line, keeping encounter order.
pub fn scan_help_text(help_text: &str) -> Vec<OptionToken> {
    help_text.lines().filter_map(OptionToken::from_line).collect()
}
