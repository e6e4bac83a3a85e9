use pyxis_mcp::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// One request seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

/// Mock CatalogRepository answering per endpoint
///
/// Endpoints without a configured answer respond with an empty search page.
pub struct MockCatalogRepository {
    responses: HashMap<String, std::result::Result<Value, PyxisError>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockCatalogRepository {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, endpoint: &str, body: Value) -> Self {
        self.responses.insert(endpoint.to_string(), Ok(body));
        self
    }

    pub fn with_failure(mut self, endpoint: &str, error: PyxisError) -> Self {
        self.responses.insert(endpoint.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockCatalogRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: &QueryParams,
        _body: Option<&Value>,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            endpoint: endpoint.to_string(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        match self.responses.get(endpoint) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(error)) => Err(error.clone().into()),
            None => Ok(serde_json::json!({ "data": [], "total": 0, "page": 0, "page_size": 0 })),
        }
    }
}
