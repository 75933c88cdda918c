//! JSON document shapes exchanged with the backend.
//!
//! Field names and nesting are fixed by the backend protocol and must be
//! reproduced byte-for-byte. Unknown response fields are ignored; a missing
//! expected field fails the decode for the whole call.

use serde::{Deserialize, Serialize};

use crate::models::{TargetQuery, TimeRange};

/// `range` object of the outbound query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRange {
    pub from: String,
    pub to: String,
}

/// One element of the outbound `targets` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryTarget {
    pub target: String,
    #[serde(rename = "refId")]
    pub ref_id: String,
    #[serde(rename = "type")]
    pub query_type: String,
}

impl From<&TargetQuery> for QueryTarget {
    fn from(query: &TargetQuery) -> Self {
        QueryTarget {
            target: query.target.clone(),
            ref_id: query.ref_id.clone(),
            query_type: query.query_type.clone(),
        }
    }
}

/// The single document POSTed to `<base>/query` per batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundQuery {
    pub range: QueryRange,
    pub interval: String,
    pub format: String,
    #[serde(rename = "maxDataPoints")]
    pub max_data_points: i64,
    pub targets: Vec<QueryTarget>,
}

impl OutboundQuery {
    /// Starts an outbound query for one time range: format fixed to
    /// "json", no interval, no point cap, targets appended by the caller.
    pub fn new(range: &TimeRange) -> Self {
        OutboundQuery {
            range: QueryRange {
                from: range.from.clone(),
                to: range.to.clone(),
            },
            interval: String::new(),
            format: "json".to_string(),
            max_data_points: 0,
            targets: Vec::new(),
        }
    }
}

/// One `[value, timestamp]` pair as reported by the backend. Carried
/// opaquely; no ordering or range validation beyond a successful decode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint(pub f64, pub f64);

impl DataPoint {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn timestamp(&self) -> f64 {
        self.1
    }
}

/// One decoded series of the response array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetResponse {
    pub target: String,
    pub datapoints: Vec<DataPoint>,
}
