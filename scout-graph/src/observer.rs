use serde_json::Value;

use crate::GraphError;

#[async_trait::async_trait]
pub trait Observer: Send + Sync {
    async fn on_node_start(&self, _node_id: &str, _input: &Value) {}
    async fn on_node_end(&self, _node_id: &str, _output: &Value, _duration_ms: u128) {}
    async fn on_error(&self, _node_id: &str, _error: &GraphError) {}
}

/// Reports node lifecycle through `tracing`.
#[derive(Clone, Debug, Default)]
pub struct TracingObserver;

#[async_trait::async_trait]
impl Observer for TracingObserver {
    async fn on_node_start(&self, node_id: &str, _input: &Value) {
        tracing::debug!(node = node_id, "node started");
    }

    async fn on_node_end(&self, node_id: &str, _output: &Value, duration_ms: u128) {
        tracing::info!(node = node_id, duration_ms = duration_ms as u64, "node finished");
    }

    async fn on_error(&self, node_id: &str, error: &GraphError) {
        tracing::error!(node = node_id, error = %error, "node failed");
    }
}
