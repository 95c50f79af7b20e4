//! Parsing of model selections such as `1,5-7,12` or `all`.

use mdlsplit_error::MdlSplitError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator pattern is valid"));

/// Parse a selection against a list of `count` items.
///
/// Indices are 1-based. The result keeps first-mention order without
/// duplicates. Out-of-range indices are dropped, reversed ranges are
/// swapped, and any token that is not a number or range is an error.
pub fn parse_selection(spec: &str, count: usize) -> Result<Vec<usize>, MdlSplitError> {
    let spec = spec.trim().to_lowercase();
    if spec == "all" || spec == "*" {
        return Ok((1..=count).collect());
    }

    let mut picked = Vec::new();
    let mut seen = HashSet::new();
    let mut pick = |index: usize| {
        if (1..=count).contains(&index) && seen.insert(index) {
            picked.push(index);
        }
    };

    for token in SEPARATOR_RE.split(&spec).filter(|t| !t.is_empty()) {
        match token.split_once('-') {
            Some((start, end)) => {
                let (Some(start), Some(end)) = (parse_index(start), parse_index(end)) else {
                    return Err(MdlSplitError::cli_invalid_arguments(format!(
                        "Bad range token: {token}"
                    )));
                };
                let (start, end) = if start > end { (end, start) } else { (start, end) };
                for index in start..=end.min(count) {
                    pick(index);
                }
            }
            None => {
                let index = parse_index(token).ok_or_else(|| {
                    MdlSplitError::cli_invalid_arguments(format!("Bad index token: {token}"))
                })?;
                pick(index);
            }
        }
    }
    Ok(picked)
}

fn parse_index(text: &str) -> Option<usize> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // too large for usize is still a number, just out of range
    Some(text.parse().unwrap_or(usize::MAX))
}
