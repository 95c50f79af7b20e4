//! Material (`.vmt`) parsing
//!
//! Materials are KeyValues text: a shader name followed by a brace-delimited
//! body of `key value` pairs, possibly with nested sections (proxies, patch
//! blocks, fallbacks). Only two things matter here: values of texture-bearing
//! keys, and values of the include directive. Everything else is skipped.
//!
//! The parser never fails. Unterminated quotes, stray braces or binary noise
//! only reduce what it finds.

use crate::lpath::LogicalPath;
use crate::options::{CollectorOptions, normalize_key};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

// Comment | quoted string (possibly unterminated) | brace | bare word.
// A bare word stops before `//` so trailing comments are not glued to values.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"//[^\n]*|"([^"\n]*)"?|([{}])|((?:[^\s{}"/]|/[^\s{}"/])+)"#)
        .expect("token pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Text(String),
}

fn tokenize(text: &str) -> Vec<Token> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            if let Some(quoted) = caps.get(1) {
                Some(Token::Text(quoted.as_str().to_string()))
            } else if let Some(brace) = caps.get(2) {
                Some(if brace.as_str() == "{" {
                    Token::Open
                } else {
                    Token::Close
                })
            } else {
                // comments carry no capture group
                caps.get(3)
                    .map(|bare| Token::Text(bare.as_str().to_string()))
            }
        })
        .collect()
}

/// References found in one material file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMaterial {
    pub textures: BTreeSet<LogicalPath>,
    pub includes: BTreeSet<LogicalPath>,
}

impl ParsedMaterial {
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty() && self.includes.is_empty()
    }
}

/// A parsed material, keyed by its own logical path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialRecord {
    pub path: LogicalPath,
    pub textures: BTreeSet<LogicalPath>,
    pub includes: BTreeSet<LogicalPath>,
}

impl MaterialRecord {
    pub fn new(path: LogicalPath, parsed: ParsedMaterial) -> Self {
        Self {
            path,
            textures: parsed.textures,
            includes: parsed.includes,
        }
    }
}

/// Extracts texture and include references from material text.
#[derive(Debug, Clone)]
pub struct MaterialParser {
    texture_keys: HashSet<String>,
    include_keyword: String,
    material_root: String,
    material_extension: String,
    texture_extension: String,
}

impl Default for MaterialParser {
    fn default() -> Self {
        Self::new(&CollectorOptions::default())
    }
}

impl MaterialParser {
    pub fn new(options: &CollectorOptions) -> Self {
        Self {
            texture_keys: options
                .texture_keys
                .iter()
                .map(|key| normalize_key(key))
                .collect(),
            include_keyword: normalize_key(&options.include_keyword),
            material_root: options.material_root.clone(),
            material_extension: options.material_extension.clone(),
            texture_extension: options.texture_extension.clone(),
        }
    }

    /// Parse material content. Invalid UTF-8 is replaced, not rejected.
    pub fn parse<C: AsRef<[u8]>>(&self, content: C) -> ParsedMaterial {
        let text = String::from_utf8_lossy(content.as_ref());
        let tokens = tokenize(&text);
        let mut parsed = ParsedMaterial::default();

        let mut i = 0;
        while i < tokens.len() {
            match (&tokens[i], tokens.get(i + 1)) {
                (Token::Text(key), Some(Token::Text(value))) => {
                    self.classify(key, value, &mut parsed);
                    i += 2;
                    // `"$key" "value" [$WIN32]`: platform conditional
                    if matches!(tokens.get(i), Some(Token::Text(tag)) if is_conditional(tag)) {
                        i += 1;
                    }
                }
                // section names, dangling keys and braces
                _ => i += 1,
            }
        }
        parsed
    }

    fn classify(&self, key: &str, value: &str, parsed: &mut ParsedMaterial) {
        let key = normalize_key(key);
        if self.texture_keys.contains(&key) {
            if let Some(path) = self.reference(value, &self.texture_extension) {
                parsed.textures.insert(path);
            }
        } else if key == self.include_keyword {
            if let Some(path) = self.reference(value, &self.material_extension) {
                parsed.includes.insert(path);
            }
        }
    }

    /// Turn a raw value into a logical path under the material root.
    fn reference(&self, value: &str, ext: &str) -> Option<LogicalPath> {
        let value = value.trim();
        if !looks_like_path(value) {
            return None;
        }
        let path = LogicalPath::new(value);
        if path.is_empty() {
            return None;
        }
        Some(path.ensure_extension(ext).ensure_prefix(&self.material_root))
    }
}

/// KeyValues platform conditionals such as `[$WIN32]` or `[!$X360]`.
fn is_conditional(token: &str) -> bool {
    token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|inner| inner.starts_with(['$', '!']))
}

/// Rejects vector literals (`[1 1 1]`, `{0 0 0}`) and plain numbers.
fn looks_like_path(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with(['[', '{'])
        && value.parse::<f64>().is_err()
}
