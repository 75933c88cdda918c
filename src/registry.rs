//! Process-wide executor registry.
//!
//! Hosts register executor factories once at startup and later resolve
//! them by plugin id when a datasource of that kind is queried.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::{DatasourceError, Result};
use crate::executor::JsonExecutor;
use crate::models::{BatchResult, DatasourceSettings, TargetQuery, TimeRange};

/// Plugin id under which the JSON executor registers itself.
pub const PLUGIN_ID: &str = "grafana-simple-json-datasource";

/// One batch in, one [`BatchResult`] out.
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(
        &self,
        cancel: &CancellationToken,
        queries: &[TargetQuery],
        time_range: &TimeRange,
    ) -> BatchResult;
}

/// Builds an executor bound to one datasource's settings.
pub type ExecutorFactory = fn(DatasourceSettings) -> Result<Arc<dyn Executor>>;

lazy_static! {
    static ref EXECUTORS: RwLock<HashMap<String, ExecutorFactory>> = RwLock::new(HashMap::new());
}

pub fn register_executor(plugin_id: &str, factory: ExecutorFactory) {
    EXECUTORS.write().insert(plugin_id.to_string(), factory);
}

pub fn create_executor(plugin_id: &str, settings: DatasourceSettings) -> Result<Arc<dyn Executor>> {
    let factory = EXECUTORS.read().get(plugin_id).copied();
    match factory {
        Some(factory) => factory(settings),
        None => Err(DatasourceError::Config(format!(
            "no executor registered for plugin {}",
            plugin_id
        ))),
    }
}

fn new_json_executor(settings: DatasourceSettings) -> Result<Arc<dyn Executor>> {
    Ok(Arc::new(JsonExecutor::new(settings)?))
}

/// Registers the JSON executor under [`PLUGIN_ID`]. Called once at host
/// startup.
pub fn register_json_executor() {
    info!("Registering Json tsdb");
    register_executor(PLUGIN_ID, new_json_executor);
}

#[cfg(test)]
impl std::fmt::Debug for dyn Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Executor")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_plugin_resolves_to_an_executor() {
        register_json_executor();
        let executor = create_executor(PLUGIN_ID, DatasourceSettings::default());
        assert!(executor.is_ok());
    }

    #[test]
    fn unknown_plugin_is_an_error() {
        let err = create_executor("no-such-plugin", DatasourceSettings::default()).unwrap_err();
        assert!(matches!(err, DatasourceError::Config(_)));
    }
}
