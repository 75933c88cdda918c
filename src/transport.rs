//! Transport Invoker: exactly one HTTP call, cancellable, never retried.

use tokio_util::sync::CancellationToken;

use crate::error::{DatasourceError, Result};

/// Performs the outbound call, racing it against `cancel`.
///
/// A cancelled token aborts the in-flight call and yields
/// [`DatasourceError::Cancelled`] promptly instead of waiting for a
/// network-level timeout. Transport failures propagate as-is; the caller
/// does not retry.
pub async fn send(
    client: &reqwest::Client,
    request: reqwest::Request,
    cancel: &CancellationToken,
) -> Result<reqwest::Response> {
    tokio::select! {
        _ = cancel.cancelled() => Err(DatasourceError::Cancelled),
        res = client.execute(request) => {
            res.map_err(|e| DatasourceError::Transport(e.to_string()))
        }
    }
}
