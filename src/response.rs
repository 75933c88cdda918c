//! Response Normalizer: status policy and payload decoding.

use tracing::warn;

use crate::error::{DatasourceError, Result};
use crate::wire::TargetResponse;

/// Consumes the HTTP response and decodes the series array.
///
/// Any non-2xx status is a failure regardless of body content; the status
/// text and raw body travel with the error for diagnosis. On 2xx the body
/// must decode as a JSON array of series; a malformed payload is reported
/// distinctly from a backend failure status. The body is fully consumed on
/// every path.
pub async fn parse(res: reqwest::Response) -> Result<Vec<TargetResponse>> {
    let status = res.status();
    let body = res
        .bytes()
        .await
        .map_err(|e| DatasourceError::Transport(e.to_string()))?;

    if !status.is_success() {
        let body = String::from_utf8_lossy(&body).into_owned();
        warn!(status = %status, body = %body, "Request failed");
        return Err(DatasourceError::BackendStatus {
            status: status.to_string(),
            body,
        });
    }

    serde_json::from_slice(&body).map_err(|e| {
        warn!(
            error = %e,
            status = %status,
            body = %String::from_utf8_lossy(&body),
            "Failed to unmarshal response"
        );
        DatasourceError::Decode(e.to_string())
    })
}
