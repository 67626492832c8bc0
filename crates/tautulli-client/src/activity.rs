//! Current activity (active streams)

use crate::client::Client;
use crate::context::Context;
use crate::error::{Result, TautulliError};
use crate::models::{lenient_i64, TautulliResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const COMMAND_GET_ACTIVITY: &str = "get_activity";

/// Response model for the get_activity command
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ActivityResponse {
    /// Number of active streams
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stream_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stream_count_direct_play: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stream_count_direct_stream: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stream_count_transcode: Option<i64>,
    /// Total bandwidth in kbps
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_bandwidth: Option<i64>,
    /// List of active sessions
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Individual session information
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Session {
    pub session_key: Option<String>,
    pub user: Option<String>,
    pub friendly_name: Option<String>,
    pub media_type: Option<String>,
    pub full_title: Option<String>,
    pub title: Option<String>,
    /// playing, paused, buffering
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub progress_percent: Option<i64>,
    /// direct play, copy, transcode
    pub transcode_decision: Option<String>,
    pub platform: Option<String>,
    pub player: Option<String>,
}

/// Activity commands of the Tautulli API
#[derive(Debug, Clone, Copy)]
pub struct Activity<'a> {
    client: &'a Client,
}

impl<'a> Activity<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Get current activity
    ///
    /// Returns stream counts, bandwidth usage, and one entry per active session.
    #[instrument(skip(self, ctx))]
    pub async fn get_activity(&self, ctx: &Context) -> Result<ActivityResponse> {
        info!("Fetching current activity");
        let response: Option<TautulliResponse<ActivityResponse>> =
            self.client.call::<(), _>(ctx, COMMAND_GET_ACTIVITY, None).await?;

        response
            .ok_or_else(|| TautulliError::api("Activity response was empty"))?
            .into_data()?
            .ok_or_else(|| TautulliError::api("Activity response contained no data"))
    }
}
