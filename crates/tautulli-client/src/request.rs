//! Command URL construction and URL redaction

use crate::error::{Result, TautulliError};
use crate::params::encode_parameters;
use serde::Serialize;
use url::{form_urlencoded, Url};

/// API path joined onto the base URL
pub const DEFAULT_API_PATH: &str = "api/v2";

/// Output format requested on every call
pub const OUTPUT_FORMAT: &str = "json";

/// Placeholder substituted for secret query values
pub const REDACTED: &str = "REDACTED";

/// Query parameters whose values never appear in errors or logs
const SENSITIVE_PARAMETERS: &[&str] = &["client_secret", "apikey"];

/// Keys owned by [`CommonParameters`]; command parameters may not reuse them
const RESERVED_PARAMETERS: &[&str] = &["apikey", "callback", "cmd", "debug", "out_type"];

/// Parameters sent with every command
#[derive(Debug, Clone, Serialize)]
pub struct CommonParameters<'a> {
    /// API key for the Tautulli API
    pub apikey: &'a str,
    /// Command name
    pub cmd: &'a str,
    /// Output format of the response
    pub out_type: &'static str,
    /// Debug mode, 0 or 1
    pub debug: u8,
    /// Optional callback token echoed back by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback: Option<&'a str>,
}

impl<'a> CommonParameters<'a> {
    /// Common parameters for `command`
    pub fn new(api_key: &'a str, command: &'a str, debug: bool) -> Self {
        Self {
            apikey: api_key,
            cmd: command,
            out_type: OUTPUT_FORMAT,
            debug: u8::from(debug),
            callback: None,
        }
    }

    /// Attach a callback token
    pub fn with_callback(mut self, callback: Option<&'a str>) -> Self {
        self.callback = callback;
        self
    }
}

/// Build the absolute URL for one command
///
/// `base_url` must end with `/`; `api_path` is resolved relative to it. The query is
/// the common parameters followed by `encoded_params`. No I/O happens here.
pub fn build_command_url(
    base_url: &Url,
    api_path: &str,
    common: &CommonParameters<'_>,
    encoded_params: &str,
) -> Result<Url> {
    if base_url.cannot_be_a_base() {
        return Err(TautulliError::config(format!(
            "Base URL {} cannot carry an API path",
            sanitize_url(base_url)
        )));
    }
    if !base_url.path().ends_with('/') {
        return Err(TautulliError::config(format!(
            "Base URL must have a trailing slash, got {}",
            sanitize_url(base_url)
        )));
    }

    if let Some((key, _)) = form_urlencoded::parse(encoded_params.as_bytes())
        .find(|(key, _)| RESERVED_PARAMETERS.contains(&key.as_ref()))
    {
        return Err(TautulliError::encoding(format!(
            "Command parameter `{key}` would override a common parameter"
        )));
    }

    let mut url = base_url
        .join(api_path.trim_start_matches('/'))
        .map_err(|e| TautulliError::config_with_source("Invalid API path", e))?;

    let common = encode_parameters(Some(common))?;
    let query = if encoded_params.is_empty() {
        common
    } else {
        format!("{common}&{encoded_params}")
    };
    url.set_query(Some(&query));

    Ok(url)
}

/// Copy of `url` with secret query values replaced by [`REDACTED`]
pub fn sanitize_url(url: &Url) -> Url {
    let is_secret =
        |key: &str, value: &str| SENSITIVE_PARAMETERS.contains(&key) && !value.is_empty();

    if !url
        .query_pairs()
        .any(|(key, value)| is_secret(key.as_ref(), value.as_ref()))
    {
        return url.clone();
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if is_secret(key.as_ref(), value.as_ref()) {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    let mut sanitized = url.clone();
    sanitized.query_pairs_mut().clear().extend_pairs(pairs);
    sanitized
}
