//! Purpose: Provide the runtime JSON decode entrypoint and parse-failure classification.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `categorize_message`,
//!          `hint_for_error`.
//! Role: Parser boundary; callers map failures to their own error kinds with this context.
//! Invariants: Category labels are stable strings; new categories are additive.
//! Invariants: Hints never echo the input payload, only category, context, and position.

use serde::de::DeserializeOwned;
use serde_json::error::Category;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Truncated,
    Data,
    DepthLimit,
    Io,
    Unknown,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Truncated => "truncated",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::DepthLimit => "depth-limit",
            ParseFailureCategory::Io => "io",
            ParseFailureCategory::Unknown => "unknown",
        }
    }
}

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    // Recursion-limit failures are reported as syntax errors; only the message tells them apart.
    if let ParseFailureCategory::DepthLimit = categorize_message(&err.to_string()) {
        return ParseFailureCategory::DepthLimit;
    }
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Truncated,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn categorize_message(message: &str) -> ParseFailureCategory {
    let lower = message.to_ascii_lowercase();
    if lower.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if lower.contains("eof while parsing") {
        ParseFailureCategory::Truncated
    } else if lower.contains("expected") || lower.contains("trailing") {
        ParseFailureCategory::Syntax
    } else {
        ParseFailureCategory::Unknown
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; context: {context}; line {}, column {}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}
