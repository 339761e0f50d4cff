//! Mounted-widget registry.
//!
//! The registry is owned by the embedding host and passed into every mount,
//! so two widget builds on one page share the same bookkeeping without any
//! global state. One mounted widget per container, enforced here.

use std::collections::HashMap;

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::WidgetError;

/// Tracks which containers currently hold a mounted widget.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    mounted: Mutex<HashMap<String, Uuid>>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a container for a new widget instance.
    pub async fn register(&self, container: &str) -> Result<Uuid, WidgetError> {
        let mut mounted = self.mounted.lock().await;
        if mounted.contains_key(container) {
            return Err(WidgetError::ContainerOccupied {
                container: container.to_string(),
            });
        }
        let instance_id = Uuid::new_v4();
        mounted.insert(container.to_string(), instance_id);
        debug!(%container, %instance_id, "Widget registered");
        Ok(instance_id)
    }

    /// Release a container. Unknown containers are ignored, so calling this
    /// twice is harmless.
    pub async fn unregister(&self, container: &str) {
        if self.mounted.lock().await.remove(container).is_some() {
            debug!(%container, "Widget unregistered");
        }
    }

    pub async fn is_mounted(&self, container: &str) -> bool {
        self.mounted.lock().await.contains_key(container)
    }

    pub async fn mounted_count(&self) -> usize {
        self.mounted.lock().await.len()
    }
}
