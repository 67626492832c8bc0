//! Notification commands

use crate::client::Client;
use crate::context::Context;
use crate::decode::Destination;
use crate::error::Result;
use crate::params::is_zero;
use crate::response::Response;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const COMMAND_NOTIFY: &str = "notify";

/// Parameters for sending a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyParameters {
    /// The ID number of the notification agent
    pub notifier_id: i64,
    /// The subject of the message
    pub subject: String,
    /// The body of the message
    pub body: String,
    /// Optional. The JSON headers for webhook notifications
    #[serde(default, skip_serializing_if = "is_zero")]
    pub headers: String,
    /// Optional. The arguments for script notifications
    #[serde(default, skip_serializing_if = "is_zero")]
    pub script_args: String,
}

impl NotifyParameters {
    /// Parameters for a plain notification
    pub fn new(notifier_id: i64, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notifier_id,
            subject: subject.into(),
            body: body.into(),
            ..Self::default()
        }
    }

    /// Attach webhook headers
    pub fn with_headers(mut self, headers: impl Into<String>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Attach script arguments
    pub fn with_script_args(mut self, script_args: impl Into<String>) -> Self {
        self.script_args = script_args.into();
        self
    }
}

/// Notification commands of the Tautulli API
#[derive(Debug, Clone, Copy)]
pub struct Notifications<'a> {
    client: &'a Client,
}

impl<'a> Notifications<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Send a notification through a notification agent
    ///
    /// The response body is left unread.
    #[instrument(skip(self, ctx, params), fields(notifier_id = params.notifier_id))]
    pub async fn notify(&self, ctx: &Context, params: &NotifyParameters) -> Result<Response> {
        let request = self.client.new_request(COMMAND_NOTIFY, Some(params))?;
        let response = self
            .client
            .do_request(Some(ctx), request, Destination::unread())
            .await?;
        info!("Notification sent");
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::encode_parameters;

    #[test]
    fn test_optional_fields_are_omitted() {
        let params = NotifyParameters::new(1, "test", "test");
        let encoded = encode_parameters(Some(&params)).unwrap();
        assert_eq!(encoded, "body=test&notifier_id=1&subject=test");
        assert!(!encoded.contains("headers"));
        assert!(!encoded.contains("script_args"));
    }

    #[test]
    fn test_optional_fields_are_sent_when_set() {
        let params = NotifyParameters::new(2, "Hi", "There")
            .with_headers(r#"{"X-Token":"1"}"#)
            .with_script_args("--flag value");
        let encoded = encode_parameters(Some(&params)).unwrap();
        assert_eq!(
            encoded,
            "body=There&headers=%7B%22X-Token%22%3A%221%22%7D&notifier_id=2&script_args=--flag+value&subject=Hi"
        );
    }

    #[test]
    fn test_required_fields_are_sent_when_empty() {
        let encoded = encode_parameters(Some(&NotifyParameters::default())).unwrap();
        assert_eq!(encoded, "body=&notifier_id=0&subject=");
    }
}
