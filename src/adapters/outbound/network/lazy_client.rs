use super::pyxis_client::{ClientSettings, PyxisClient};
use crate::catalog::services::QueryParams;
use crate::ports::outbound::{CatalogRepository, HttpMethod};
use crate::shared::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::info;

/// LazyPyxisClient defers building the [`PyxisClient`] until the first
/// request, then reuses it for the lifetime of the process.
///
/// Initialization goes through a `OnceCell`, so concurrent first calls still
/// create at most one client. A failed initialization (e.g. no credential)
/// is not cached; the next request tries again.
pub struct LazyPyxisClient {
    settings: ClientSettings,
    client: OnceCell<PyxisClient>,
}

impl LazyPyxisClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            client: OnceCell::new(),
        }
    }

    /// Returns the shared client, building it on first use
    pub async fn client(&self) -> Result<&PyxisClient> {
        self.client
            .get_or_try_init(|| async {
                let client = PyxisClient::new(self.settings.clone())?;
                info!(base_url = %client.base_url(), "Pyxis client initialized");
                Ok::<_, anyhow::Error>(client)
            })
            .await
    }

    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }
}

#[async_trait]
impl CatalogRepository for LazyPyxisClient {
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &QueryParams,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.client()
            .await?
            .request(method, endpoint, params, body)
            .await
    }
}
