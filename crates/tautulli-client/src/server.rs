//! Server information commands

use crate::client::Client;
use crate::context::Context;
use crate::error::{Result, TautulliError};
use crate::models::TautulliResponse;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const COMMAND_GET_SERVER_IDENTITY: &str = "get_server_identity";

/// Identity of the Plex Media Server that Tautulli monitors
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerIdentity {
    /// Unique machine identifier of the server
    pub machine_identifier: Option<String>,
    /// Server version
    pub version: Option<String>,
}

/// Server commands of the Tautulli API
#[derive(Debug, Clone, Copy)]
pub struct Server<'a> {
    client: &'a Client,
}

impl<'a> Server<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get the identity of the monitored server
    ///
    /// Handy as a health check for the URL and API key.
    #[instrument(skip(self, ctx))]
    pub async fn get_server_identity(&self, ctx: &Context) -> Result<ServerIdentity> {
        info!("Fetching server identity");
        let response: Option<TautulliResponse<ServerIdentity>> = self
            .client
            .call::<(), _>(ctx, COMMAND_GET_SERVER_IDENTITY, None)
            .await?;

        response
            .ok_or_else(|| TautulliError::api("Server identity response was empty"))?
            .into_data()?
            .ok_or_else(|| TautulliError::api("Server identity response contained no data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_identity_deserialization() {
        let json = r#"{
            "response": {
                "result": "success",
                "message": null,
                "data": {"machine_identifier": "abc123", "version": "1.40.0"}
            }
        }"#;
        let response: TautulliResponse<ServerIdentity> = serde_json::from_str(json).unwrap();
        let identity = response.into_data().unwrap().unwrap();
        assert_eq!(identity.machine_identifier.as_deref(), Some("abc123"));
        assert_eq!(identity.version.as_deref(), Some("1.40.0"));
    }
}
