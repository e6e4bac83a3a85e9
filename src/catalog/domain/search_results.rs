use crate::shared::error::PyxisError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// One page of a paginated catalog listing.
///
/// `page` is 0-based. The counters default to zero when the service leaves
/// them out.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
pub struct SearchResults<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_size: u64,
}

impl<T> SearchResults<T> {
    /// Whether pages beyond this one exist
    pub fn has_more(&self) -> bool {
        self.page.saturating_add(1).saturating_mul(self.page_size) < self.total
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Matches not shown on this page
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.data.len() as u64)
    }
}

/// Coerces a raw payload into an entity, reporting schema mismatches as
/// `PyxisError::Validation`.
pub fn parse_entity<T: DeserializeOwned>(entity: &'static str, raw: Value) -> Result<T, PyxisError> {
    serde_json::from_value(raw).map_err(|e| PyxisError::validation(entity, e))
}

/// Same as [`parse_entity`] for a result envelope
pub fn parse_results<T: DeserializeOwned>(
    entity: &'static str,
    raw: Value,
) -> Result<SearchResults<T>, PyxisError> {
    serde_json::from_value(raw).map_err(|e| PyxisError::validation(entity, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::{ContainerImage, Vulnerability};
    use serde_json::json;

    fn envelope(page: u64, page_size: u64, total: u64) -> SearchResults<Vulnerability> {
        SearchResults {
            data: Vec::new(),
            total,
            page,
            page_size,
        }
    }

    #[test]
    fn test_has_more_matches_formula() {
        for page in 0..5u64 {
            for page_size in 0..6u64 {
                for total in 0..40u64 {
                    let results = envelope(page, page_size, total);
                    assert_eq!(
                        results.has_more(),
                        (page + 1) * page_size < total,
                        "page={} page_size={} total={}",
                        page,
                        page_size,
                        total
                    );
                }
            }
        }
    }

    #[test]
    fn test_has_more_boundaries() {
        assert!(!envelope(0, 20, 20).has_more());
        assert!(envelope(0, 20, 21).has_more());
        assert!(!envelope(1, 20, 40).has_more());
    }

    #[test]
    fn test_has_more_with_extreme_counters() {
        assert!(!envelope(u64::MAX, 20, u64::MAX).has_more());
        assert!(!envelope(u64::MAX, 0, 5).has_more());
        assert!(!envelope(0, u64::MAX, u64::MAX).has_more());

        let results: SearchResults<Vulnerability> = parse_results(
            "vulnerability",
            json!({"data": [], "total": 10, "page": u64::MAX, "page_size": 20}),
        )
        .unwrap();
        assert!(!results.has_more());
    }

    #[test]
    fn test_remaining() {
        let results: SearchResults<Vulnerability> = SearchResults {
            data: vec![Vulnerability::default(); 3],
            total: 10,
            page: 0,
            page_size: 3,
        };
        assert_eq!(results.remaining(), 7);
    }

    #[test]
    fn test_parse_results_defaults_counters() {
        let results: SearchResults<ContainerImage> =
            parse_results("container image", json!({"data": [{"_id": "a"}]})).unwrap();
        assert_eq!(results.data.len(), 1);
        assert_eq!(results.total, 0);
        assert_eq!(results.page_size, 0);
    }

    #[test]
    fn test_parse_results_missing_data_is_empty() {
        let results: SearchResults<ContainerImage> =
            parse_results("container image", json!({"total": 0})).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_parse_results_entity_without_identity_fails() {
        let err = parse_results::<ContainerImage>(
            "container image",
            json!({"data": [{"architecture": "amd64"}], "total": 1, "page": 0, "page_size": 20}),
        )
        .unwrap_err();
        match err {
            PyxisError::Validation { entity, details } => {
                assert_eq!(entity, "container image");
                assert!(details.contains("_id"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_entity_validation_error() {
        let err = parse_entity::<ContainerImage>("container image", json!({})).unwrap_err();
        assert!(matches!(err, PyxisError::Validation { .. }));
    }
}
