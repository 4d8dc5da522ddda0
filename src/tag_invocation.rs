//! Webtag invocation parsing: a tag name followed by `key=value` and
//! `key="value with spaces"` pairs.

use log::debug;

/// Split a raw invocation into tokens. The first token is the tag name; key
/// tokens keep their trailing `=` so the caller can tell them from values.
///
/// Whitespace inside double quotes is literal; the quote characters
/// themselves are never part of a token. Unbalanced quotes are not rejected,
/// the scanner simply treats the rest of the input as quoted.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut pending = String::new();
    let mut has_pending = false;
    let mut inside_quotes = false;
    for c in text.chars() {
        match c {
            '"' => {
                if has_pending {
                    tokens.push(std::mem::take(&mut pending));
                    has_pending = false;
                }
                inside_quotes = !inside_quotes;
            }
            '=' if !inside_quotes => {
                pending.push('=');
                tokens.push(std::mem::take(&mut pending));
                has_pending = false;
            }
            c if c.is_whitespace() && !inside_quotes => {
                if has_pending {
                    tokens.push(std::mem::take(&mut pending));
                    has_pending = false;
                }
            }
            c => {
                pending.push(c);
                has_pending = true;
            }
        }
    }
    if has_pending {
        tokens.push(pending);
    }
    tokens
}

/// One parsed tag occurrence: name plus ordered parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagInvocation {
    name: String,
    params: Vec<(String, String)>,
}

impl TagInvocation {
    /// Parse a raw invocation string. Returns None for blank input.
    pub fn new_from_text(text: &str) -> Option<Self> {
        let tokens = tokenize(text);
        let mut iter = tokens.into_iter();
        let name = iter.next()?;
        let mut params = Vec::new();
        let mut key: Option<String> = None;
        for token in iter {
            match token.strip_suffix('=') {
                Some(k) => {
                    // A key with no value before the next key reads as empty.
                    if let Some(prev) = key.take() {
                        params.push((prev, String::new()));
                    }
                    key = Some(k.to_string());
                }
                None => match key.take() {
                    Some(k) => params.push((k, token)),
                    None => {
                        debug!("webtag '{name}': stray parameter token '{token}' ignored");
                    }
                },
            }
        }
        if let Some(k) = key {
            params.push((k, String::new()));
        }
        Some(Self { name, params })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
