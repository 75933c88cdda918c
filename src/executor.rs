//! Query Executor: drives collect → build → send → parse → project.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{DatasourceError, Result};
use crate::models::{
    BatchResult, DatasourceSettings, Point, QueryResult, TargetQuery, TimeRange, TimeSeries,
};
use crate::registry::Executor;
use crate::wire::{OutboundQuery, QueryTarget};
use crate::{request, response, transport};

/// Executes batches against one JSON time-series backend.
///
/// Holds the datasource settings and the shared HTTP client; each
/// `execute` call is independent and shares no mutable state with any
/// other call.
pub struct JsonExecutor {
    settings: DatasourceSettings,
    http_client: reqwest::Client,
}

impl JsonExecutor {
    pub fn new(settings: DatasourceSettings) -> Result<Self> {
        let http_client = settings.http_client()?;
        Ok(JsonExecutor {
            settings,
            http_client,
        })
    }

    /// Folds the batch into one outbound query document and resolves the
    /// destination URL. Every target must reference the same URL; the
    /// wire protocol answers with one flat array per call, so a batch
    /// cannot span backends.
    fn collect(
        queries: &[TargetQuery],
        time_range: &TimeRange,
    ) -> Result<(String, OutboundQuery)> {
        if queries.is_empty() {
            return Err(DatasourceError::Config(
                "batch contains no targets".to_string(),
            ));
        }
        if time_range.from.is_empty() || time_range.to.is_empty() {
            return Err(DatasourceError::Config(
                "time range bounds must be non-empty".to_string(),
            ));
        }

        let url = queries[0].datasource_url.clone();
        let mut outbound = OutboundQuery::new(time_range);
        for query in queries {
            if query.datasource_url != url {
                return Err(DatasourceError::Config(format!(
                    "targets reference multiple datasource URLs: {} and {}",
                    url, query.datasource_url
                )));
            }
            outbound.targets.push(QueryTarget::from(query));
        }

        Ok((url, outbound))
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        queries: &[TargetQuery],
        time_range: &TimeRange,
    ) -> Result<QueryResult> {
        let (url, outbound) = Self::collect(queries, time_range)?;

        let req = request::build_request(&self.http_client, &url, &outbound, &self.settings)?;
        let res = transport::send(&self.http_client, req, cancel).await?;
        let data = response::parse(res).await?;

        let mut result = QueryResult::default();
        for series in data {
            debug!(
                target = %series.target,
                datapoints = series.datapoints.len(),
                "Json response"
            );
            result.series.push(TimeSeries {
                name: series.target,
                points: series
                    .datapoints
                    .iter()
                    .map(|p| Point {
                        value: p.value(),
                        timestamp: p.timestamp(),
                    })
                    .collect(),
            });
        }

        Ok(result)
    }

    /// Runs one batch. Any single-stage failure aborts the whole batch;
    /// there is never a partial-target success/failure split.
    pub async fn execute(
        &self,
        cancel: &CancellationToken,
        queries: &[TargetQuery],
        time_range: &TimeRange,
    ) -> BatchResult {
        match self.run(cancel, queries, time_range).await {
            Ok(result) => BatchResult::from_result(result),
            Err(err) => BatchResult::from_error(err),
        }
    }
}

#[async_trait]
impl Executor for JsonExecutor {
    async fn execute(
        &self,
        cancel: &CancellationToken,
        queries: &[TargetQuery],
        time_range: &TimeRange,
    ) -> BatchResult {
        JsonExecutor::execute(self, cancel, queries, time_range).await
    }
}
