use crate::error::{DecodeError, EncodeError};
use base64::{
    engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine,
};
use levelbook_types::Level;
use std::fmt;

/// An encoded level collection, ready to place in a URL fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareToken(String);

impl ShareToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShareToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Encodes the full collection into a share token.
///
/// # Errors
///
/// Returns [`EncodeError::Empty`] when there are no levels.
pub fn encode(levels: &[Level]) -> Result<ShareToken, EncodeError> {
    if levels.is_empty() {
        return Err(EncodeError::Empty);
    }
    let json = serde_json::to_vec(levels)?;
    Ok(ShareToken(URL_SAFE_NO_PAD.encode(json)))
}

/// Decodes a share token into candidate levels for import.
///
/// Individual classification codes are not checked against the taxonomy;
/// display falls back for codes it does not recognize.
///
/// # Errors
///
/// Returns a [`DecodeError`] when the text is not base64, when the decoded
/// payload is not a JSON array of levels, or when that array is empty.
pub fn decode(token: &str) -> Result<Vec<Level>, DecodeError> {
    let token = token.trim();
    let token = token.strip_prefix('#').unwrap_or(token);
    let token = token.trim_end_matches('=');
    if token.is_empty() {
        return Err(DecodeError::InvalidToken("token is empty".to_string()));
    }

    // Older clients used the standard alphabet.
    let engine = if token.contains(['+', '/']) {
        &STANDARD_NO_PAD
    } else {
        &URL_SAFE_NO_PAD
    };
    let bytes = engine
        .decode(token)
        .map_err(|e| DecodeError::InvalidToken(e.to_string()))?;

    let text = match String::from_utf8(bytes) {
        Ok(text) => text,
        // Older clients encoded Latin-1 text byte-for-byte.
        Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
    };

    let value: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| DecodeError::InvalidPayload(format!("invalid JSON: {e}")))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(DecodeError::InvalidPayload(format!(
                "expected a list of levels, found {}",
                json_kind(&other)
            )));
        }
    };
    if items.is_empty() {
        return Err(DecodeError::Empty);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            serde_json::from_value(item)
                .map_err(|e| DecodeError::InvalidPayload(format!("level {i}: {e}")))
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Builds a share link: `base` with any fragment replaced by the token.
#[must_use]
pub fn share_url(base: &str, token: &ShareToken) -> String {
    let page = base.split('#').next().unwrap_or(base);
    format!("{page}#{token}")
}

/// Extracts the token from a share link, or from bare token text.
///
/// Returns `None` when there is no token to read.
#[must_use]
pub fn token_from_url(text: &str) -> Option<&str> {
    let text = text.trim();
    let token = match text.split_once('#') {
        Some((_, fragment)) => fragment,
        None => text,
    };
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
