//! Decoding successful response bodies

use crate::error::{Result, TautulliError};
use crate::response::Response;
use serde::de::DeserializeOwned;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Where a successful response body goes
pub enum Destination<'a, T> {
    /// Leave the body unread for the caller
    Unread,
    /// Copy the body verbatim into a writer
    Raw(&'a mut (dyn AsyncWrite + Unpin + Send)),
    /// Decode the body as JSON into the target
    Json(&'a mut T),
}

impl Destination<'_, ()> {
    /// A destination that leaves the body unread
    pub fn unread() -> Self {
        Self::Unread
    }
}

/// Deliver the body of `response` to `destination`
///
/// For JSON targets, only the first JSON value in the body is decoded, and an empty
/// or whitespace-only body leaves the target untouched.
pub async fn decode<T>(response: &mut Response, destination: Destination<'_, T>) -> Result<()>
where
    T: DeserializeOwned,
{
    match destination {
        Destination::Unread => Ok(()),
        Destination::Raw(sink) => {
            while let Some(chunk) = response.chunk().await? {
                sink.write_all(&chunk).await?;
            }
            sink.flush().await?;
            Ok(())
        }
        Destination::Json(target) => {
            let data = response.bytes().await?;
            let mut values = serde_json::Deserializer::from_slice(&data).into_iter::<T>();
            match values.next() {
                None => Ok(()),
                Some(Ok(value)) => {
                    *target = value;
                    Ok(())
                }
                Some(Err(source)) => Err(TautulliError::Decode { source }),
            }
        }
    }
}
