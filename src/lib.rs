//! Protocol adapter for JSON time-series backends.
//!
//! Translates a batch of named target queries sharing one time range into
//! a single HTTP POST against `<base>/query` and normalizes the backend's
//! array-of-series reply into typed series for the visualization host.
//! One batch, one round trip: all targets travel in one request document
//! and any single-stage failure aborts the whole batch.

pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod registry;
pub mod request;
pub mod response;
pub mod transport;
pub mod wire;

pub use error::{DatasourceError, Result};
pub use executor::JsonExecutor;
pub use models::{
    BatchResult, DatasourceSettings, Point, QueryResult, TargetQuery, TimeRange, TimeSeries,
    RESULT_KEY,
};
pub use registry::{create_executor, register_json_executor, Executor, PLUGIN_ID};
