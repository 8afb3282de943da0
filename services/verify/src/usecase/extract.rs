//! Pull a canonical product code out of whatever the scanner handed us.
//!
//! Inputs range from a bare code to a full verification URL printed in the QR
//! image, sometimes with the code percent-encoded. Strategies run in a fixed
//! order and the first one that yields a code wins.

use std::sync::LazyLock;

use regex::Regex;
use url::{Url, form_urlencoded};

use crate::domain::types::ProductCode;

/// Inputs longer than this are rejected without scanning.
pub const MAX_INPUT_LEN: usize = 2048;

/// Query parameter / fragment key carrying the code.
const CODE_PARAM: &str = "code";
const CODE_FRAGMENT: &str = "code=";

/// The code must not sit inside a longer hex run. A percent escape such as
/// `%3D` right before it still counts as a boundary even though it ends in a
/// hex digit.
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?:^|[^0-9A-Fa-f]|%[0-9A-Fa-f]{2})",
        r"([0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12})",
        r"(?:$|[^0-9A-Fa-f])",
    ))
    .expect("code pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    /// Canonical pattern found verbatim in the raw input.
    DirectPattern,
    /// Input is an absolute URL with a `code` query parameter.
    UrlParameter,
    /// A `code=` fragment somewhere in a string that is not a usable URL.
    CodeFragment,
}

/// Strategies in the order they are tried.
pub const STRATEGIES: [ExtractStrategy; 3] = [
    ExtractStrategy::DirectPattern,
    ExtractStrategy::UrlParameter,
    ExtractStrategy::CodeFragment,
];

impl ExtractStrategy {
    pub fn apply(self, input: &str) -> Option<ProductCode> {
        match self {
            Self::DirectPattern => scan(input),
            Self::UrlParameter => {
                let url = Url::parse(input).ok()?;
                let value = url
                    .query_pairs()
                    .find(|(key, _)| key == CODE_PARAM)
                    .map(|(_, value)| value)?;
                scan(&value)
            }
            // `barcode=` and friends are not our key; keep looking past them.
            Self::CodeFragment => input
                .match_indices(CODE_FRAGMENT)
                .filter(|(start, _)| {
                    !input[..*start]
                        .chars()
                        .next_back()
                        .is_some_and(char::is_alphanumeric)
                })
                .find_map(|(start, _)| fragment_value(&input[start..])),
        }
    }
}

/// Extract a code using the first strategy that succeeds, reporting which one did.
pub fn extract_with_strategy(raw: &str) -> Option<(ProductCode, ExtractStrategy)> {
    let input = raw.trim();
    if input.is_empty() || input.len() > MAX_INPUT_LEN {
        return None;
    }
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy.apply(input).map(|code| (code, *strategy)))
}

pub fn extract_code(raw: &str) -> Option<ProductCode> {
    extract_with_strategy(raw).map(|(code, _)| code)
}

fn fragment_value(rest: &str) -> Option<ProductCode> {
    let end = rest
        .find(|c: char| c == '&' || c == '#' || c.is_whitespace())
        .unwrap_or(rest.len());
    let (_, value) = form_urlencoded::parse(rest[..end].as_bytes()).next()?;
    scan(&value)
}

fn scan(haystack: &str) -> Option<ProductCode> {
    CODE_PATTERN
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
