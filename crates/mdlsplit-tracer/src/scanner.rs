//! Heuristic material discovery in compiled model binaries.
//!
//! Compiled models store material names and search directories as plain
//! ASCII somewhere in the file. Rather than decode the format, the scanner
//! pulls out every run of path-safe characters and keeps the ones that look
//! like paths. It over-collects on purpose: anything that does not name an
//! indexed file is dropped later by the collector.

use crate::lpath::LogicalPath;
use crate::options::CollectorOptions;
use regex::bytes::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PATH_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_\-/\\.]+").expect("path run pattern is valid"));

#[derive(Debug, Clone)]
pub struct ModelScanner {
    min_token_len: usize,
    material_root: String,
    material_extension: String,
}

impl Default for ModelScanner {
    fn default() -> Self {
        Self::new(&CollectorOptions::default())
    }
}

impl ModelScanner {
    pub fn new(options: &CollectorOptions) -> Self {
        Self {
            min_token_len: options.min_token_len.max(1),
            material_root: options.material_root.clone(),
            material_extension: options.material_extension.clone(),
        }
    }

    /// Path-like tokens in `bytes`: runs of at least `min_token_len`
    /// path-safe bytes that contain a separator or end in the material
    /// extension. Normalized and deduplicated.
    pub fn scan_tokens(&self, bytes: &[u8]) -> BTreeSet<LogicalPath> {
        let suffix = format!(".{}", self.material_extension);
        PATH_RUN_RE
            .find_iter(bytes)
            .map(|m| m.as_bytes())
            .filter(|run| run.len() >= self.min_token_len)
            .filter(|run| {
                run.iter().any(|&b| b == b'/' || b == b'\\')
                    || ends_with_ignore_case(run, suffix.as_bytes())
            })
            // the pattern only admits ASCII
            .map(|run| LogicalPath::new(String::from_utf8_lossy(run)))
            .filter(|token| !token.is_empty())
            .collect()
    }

    /// Material candidates in `bytes`: every token rooted at the material
    /// directory, with the material extension appended when absent.
    pub fn scan(&self, bytes: &[u8]) -> BTreeSet<LogicalPath> {
        self.scan_tokens(bytes)
            .into_iter()
            .map(|token| self.material_candidate(token))
            .collect()
    }

    pub fn material_candidate(&self, token: LogicalPath) -> LogicalPath {
        token
            .ensure_extension(&self.material_extension)
            .ensure_prefix(&self.material_root)
    }
}

fn ends_with_ignore_case(haystack: &[u8], suffix: &[u8]) -> bool {
    haystack.len() >= suffix.len()
        && haystack[haystack.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}
