//! Responses and status classification
//!
//! [`check_response`] turns a raw [`Response`] into success, an [`AcceptedError`]
//! for 202, or an [`ErrorResponse`] for everything outside 2xx. Error bodies are
//! buffered before decoding and left on the response, so callers can still read the
//! raw bytes afterwards.

use crate::error::{Result, TautulliError};
use crate::models::TautulliResponse;
use crate::request::sanitize_url;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};
use url::Url;

enum Body {
    /// Not read yet
    Stream(reqwest::Response),
    /// Read into memory; every reader sees the same bytes
    Buffered(Bytes),
    /// Consumed or released
    Closed,
}

/// A Tautulli API response
///
/// The body is released when the response is dropped.
pub struct Response {
    method: Method,
    url: Url,
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
}

impl Response {
    /// Wrap a raw transport response
    pub fn new(method: Method, inner: reqwest::Response) -> Self {
        Self {
            method,
            url: inner.url().clone(),
            status: inner.status(),
            headers: inner.headers().clone(),
            body: Body::Stream(inner),
        }
    }

    /// Build a response around an in-memory body
    pub fn from_bytes(method: Method, url: Url, status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            url,
            status,
            headers: HeaderMap::new(),
            body: Body::Buffered(body.into()),
        }
    }

    /// HTTP method of the request that produced this response
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Final request URL, including the API key
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request URL with secrets redacted
    pub fn sanitized_url(&self) -> Url {
        sanitize_url(&self.url)
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the body has been read into memory
    pub fn is_buffered(&self) -> bool {
        matches!(self.body, Body::Buffered(_))
    }

    /// Whether the body has been consumed or released
    pub fn is_closed(&self) -> bool {
        matches!(self.body, Body::Closed)
    }

    /// Read the whole body, keeping a copy so it can be read again
    ///
    /// A closed body reads as empty.
    pub async fn bytes(&mut self) -> Result<Bytes> {
        match std::mem::replace(&mut self.body, Body::Closed) {
            Body::Stream(inner) => {
                let data = inner.bytes().await.map_err(|e| {
                    TautulliError::transport("Failed to read response body", &self.url, e)
                })?;
                self.body = Body::Buffered(data.clone());
                Ok(data)
            }
            Body::Buffered(data) => {
                self.body = Body::Buffered(data.clone());
                Ok(data)
            }
            Body::Closed => Ok(Bytes::new()),
        }
    }

    /// Read the whole body as UTF-8 text, replacing invalid sequences
    pub async fn text(&mut self) -> Result<String> {
        let data = self.bytes().await?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }

    /// Decode the body as JSON; an empty body yields `None`
    pub async fn json<T>(&mut self) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut target = None;
        crate::decode::decode(self, crate::decode::Destination::Json(&mut target)).await?;
        Ok(target)
    }

    /// Take the next chunk of the body, consuming it
    pub(crate) async fn chunk(&mut self) -> Result<Option<Bytes>> {
        match &mut self.body {
            Body::Stream(inner) => inner.chunk().await.map_err(|e| {
                TautulliError::transport("Failed to read response body", &self.url, e)
            }),
            Body::Buffered(data) => {
                let data = std::mem::take(data);
                self.body = Body::Closed;
                Ok((!data.is_empty()).then_some(data))
            }
            Body::Closed => Ok(None),
        }
    }

    /// Release the body without reading the rest of it
    pub fn close(&mut self) {
        self.body = Body::Closed;
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = match &self.body {
            Body::Stream(_) => "<stream>",
            Body::Buffered(_) => "<buffered>",
            Body::Closed => "<closed>",
        };
        f.debug_struct("Response")
            .field("method", &self.method)
            .field("url", &self.sanitized_url().as_str())
            .field("status", &self.status)
            .field("body", &body)
            .finish()
    }
}

/// The server accepted the request but the result is not ready yet
///
/// A 202 is not a hard failure; the request can be repeated later. Two values are
/// equal when their raw payloads are byte-identical.
#[derive(Debug, Clone, Default)]
pub struct AcceptedError {
    /// Raw response body
    pub raw: Bytes,
}

impl AcceptedError {
    /// Wrap a raw 202 body
    pub fn new(raw: impl Into<Bytes>) -> Self {
        Self { raw: raw.into() }
    }
}

impl PartialEq for AcceptedError {
    fn eq(&self, other: &Self) -> bool {
        self.raw[..] == other.raw[..]
    }
}

impl Eq for AcceptedError {}

impl fmt::Display for AcceptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("job scheduled on the Tautulli side; try again later")
    }
}

impl std::error::Error for AcceptedError {}

/// One structured error reported by the server
///
/// Error bodies are not always field errors. A Tautulli envelope contributes its
/// `message`, and a bare JSON string or plain text ends up in `message` whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    /// Resource on which the error occurred
    #[serde(default)]
    pub resource: String,
    /// Field on which the error occurred
    #[serde(default)]
    pub field: String,
    /// Error code
    #[serde(default)]
    pub code: String,
    /// Message describing the error
    #[serde(default)]
    pub message: String,
}

impl FieldError {
    /// Decode an error body, falling back to treating it as a message string
    pub fn from_body(body: &[u8]) -> Self {
        let structured = serde_json::from_slice::<FieldError>(body).ok();
        if let Some(error) = structured.as_ref().filter(|error| !error.is_empty()) {
            return error.clone();
        }
        if let Ok(envelope) = serde_json::from_slice::<TautulliResponse<serde_json::Value>>(body) {
            return Self {
                message: envelope.response.message.unwrap_or_default(),
                ..Self::default()
            };
        }
        if let Some(error) = structured {
            return error;
        }
        let message = serde_json::from_slice::<String>(body)
            .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_string());
        Self {
            message,
            ..Self::default()
        }
    }
}

impl FieldError {
    fn is_empty(&self) -> bool {
        self.resource.is_empty()
            && self.field.is_empty()
            && self.code.is_empty()
            && self.message.is_empty()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.code.is_empty() && self.field.is_empty() && self.resource.is_empty() {
            return f.write_str(&self.message);
        }
        write!(
            f,
            "{} error caused by {} field on {} resource",
            self.code, self.field, self.resource
        )
    }
}

impl std::error::Error for FieldError {}

/// A request the server answered with a status outside 2xx
#[derive(Debug)]
pub struct ErrorResponse {
    /// Method of the failed request
    pub method: Method,
    /// Request URL with secrets redacted
    pub url: String,
    /// HTTP status code
    pub status: StatusCode,
    /// Decoded error body
    pub error: FieldError,
    /// The response, with its body buffered and still readable
    pub response: Box<Response>,
}

impl ErrorResponse {
    /// Message reported by the server
    pub fn message(&self) -> &str {
        &self.error.message
    }

    /// Mutable access to the response, e.g. to re-read the raw body
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.method, self.url, self.status.as_u16())?;
        if !self.error.message.is_empty() {
            write!(f, " {}", self.error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Classify a response by status code
///
/// 2xx other than 202 passes through with the body untouched.
pub async fn check_response(mut response: Response) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::ACCEPTED {
        let raw = response.bytes().await?;
        response.close();
        debug!(url = %response.sanitized_url(), "Request accepted, result not ready");
        return Err(AcceptedError::new(raw).into());
    }
    if status.is_success() {
        return Ok(response);
    }

    let data = match response.bytes().await {
        Ok(data) => data,
        Err(e) => {
            debug!("Failed to read error body: {}", e);
            response.close();
            Bytes::new()
        }
    };
    let error = FieldError::from_body(&data);
    let url = response.sanitized_url().to_string();
    warn!(status = status.as_u16(), url = %url, "Tautulli returned an error: {}", error);

    Err(ErrorResponse {
        method: response.method().clone(),
        url,
        status,
        error,
        response: Box::new(response),
    }
    .into())
}
