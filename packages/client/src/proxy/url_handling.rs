//! URL handling and authentication utilities for proxy specifiers

use std::borrow::Cow;

use base64::Engine;

use crate::error::{self, Error};

/// Encode basic authentication credentials into a `Proxy-Authorization` value.
#[must_use]
pub fn encode_basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{username}:{password}");
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
    format!("Basic {encoded}")
}

/// Percent-decode a userinfo component, mapping the empty string to `None`.
pub(crate) fn decode_userinfo(raw: &str) -> Result<Option<String>, Error> {
    if raw.is_empty() {
        return Ok(None);
    }

    let decoded: Cow<'_, str> = urlencoding::decode(raw).map_err(|e| {
        error::invalid_argument(format!("proxy credentials are not valid UTF-8: {e}"))
    })?;

    if decoded.is_empty() {
        Ok(None)
    } else {
        Ok(Some(decoded.into_owned()))
    }
}
