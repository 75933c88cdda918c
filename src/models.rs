use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DatasourceError, Result};

/// Result key under which a batch's series are exposed.
///
/// The backend answers every batch with one flat array, so series cannot
/// be attributed back to individual `ref_id`s; the whole batch lands under
/// this single key.
pub const RESULT_KEY: &str = "A";

/// The shared time window for one batch.
///
/// `from` and `to` are opaque to this crate: absolute timestamps or
/// relative expressions like "now-1h" are interpreted by the backend.
/// Both must be non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

/// One requested series, as handed in by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetQuery {
    /// Backend-specific query string or identifier.
    pub target: String,
    /// Host-assigned correlation id, unique within a batch.
    pub ref_id: String,
    /// Output hint, e.g. "timeserie" or "table".
    pub query_type: String,
    /// Destination resolved by the host for this query. Must be the same
    /// for every query in a batch.
    pub datasource_url: String,
}

/// Connection settings for one datasource instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasourceSettings {
    pub basic_auth: bool,
    pub basic_auth_user: String,
    pub basic_auth_password: String,
    /// Overall request timeout in seconds; 0 means no client-side timeout.
    pub timeout_secs: u64,
}

impl DatasourceSettings {
    /// Builds the shared HTTP client for this datasource. The client owns
    /// a connection pool and is safe to reuse across concurrent calls.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if self.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(self.timeout_secs));
        }
        builder
            .build()
            .map_err(|e| DatasourceError::Config(format!("Failed to build HTTP client: {}", e)))
    }
}

/// One data point of a projected series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub value: f64,
    pub timestamp: f64,
}

/// A named series as exposed to the host, points in backend-reported order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    pub name: String,
    pub points: Vec<Point>,
}

/// The aggregated series for one result key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub series: Vec<TimeSeries>,
}

/// Outcome of one `execute` call: either an error or a mapping from
/// [`RESULT_KEY`] to the batch's series. Populated exactly once.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub query_results: HashMap<String, QueryResult>,
    pub error: Option<DatasourceError>,
}

impl BatchResult {
    pub fn from_error(error: DatasourceError) -> Self {
        BatchResult {
            query_results: HashMap::new(),
            error: Some(error),
        }
    }

    pub fn from_result(result: QueryResult) -> Self {
        let mut query_results = HashMap::new();
        query_results.insert(RESULT_KEY.to_string(), result);
        BatchResult {
            query_results,
            error: None,
        }
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}
