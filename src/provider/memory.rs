//! In-memory provider implementations.
//!
//! These backends keep everything in process memory behind `RwLock`s.
//! Suitable for tests, embedding, and single-process tools; nothing
//! survives a restart.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{builtin_components, Component, GeneratedNameRecord, ResourceType};
use crate::error::{OracleResult, ProviderResult};
use crate::provider::traits::{
    CatalogProvider, ExistenceCheck, ExistenceOracle, NameHistorySink,
};

/// In-memory naming catalog.
///
/// Starts with the reserved built-in components and a hyphen delimiter;
/// both can be replaced before handing the catalog to the engine.
pub struct MemoryCatalog {
    /// Components in catalog order.
    components: RwLock<Vec<Component>>,
    /// Active delimiter, stored as its raw configuration string.
    delimiter: RwLock<String>,
    /// Resource type definitions, keyed by lowercased short name.
    resource_types: RwLock<HashMap<String, ResourceType>>,
}

impl MemoryCatalog {
    /// Create a catalog seeded with the built-in components and a hyphen
    /// delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            components: RwLock::new(builtin_components()),
            delimiter: RwLock::new("-".to_string()),
            resource_types: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the component list.
    pub fn set_components(&self, components: Vec<Component>) {
        *self.components.write() = components;
    }

    /// Replace the active delimiter.
    pub fn set_delimiter(&self, delimiter: impl Into<String>) {
        *self.delimiter.write() = delimiter.into();
    }

    /// Add or replace a resource type definition.
    pub fn upsert_resource_type(&self, resource_type: ResourceType) {
        self.resource_types
            .write()
            .insert(resource_type.short_name.to_lowercase(), resource_type);
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for MemoryCatalog {
    async fn enabled_components(&self) -> ProviderResult<Vec<Component>> {
        let mut components: Vec<Component> = self
            .components
            .read()
            .iter()
            .filter(|c| c.enabled)
            .cloned()
            .collect();
        components.sort_by_key(|c| c.sort_order);
        Ok(components)
    }

    async fn active_delimiter(&self) -> ProviderResult<String> {
        Ok(self.delimiter.read().clone())
    }

    async fn resource_type(&self, key: &str) -> ProviderResult<Option<ResourceType>> {
        let types = self.resource_types.read();
        if let Some(rtype) = types.get(&key.to_lowercase()) {
            return Ok(Some(rtype.clone()));
        }
        // Fall back to a full scan so the fully-qualified resource string
        // works as a key too.
        Ok(types.values().find(|t| t.matches(key)).cloned())
    }
}

/// In-memory existence oracle backed by a set of taken names.
///
/// Counts every check it answers, so tests can assert how many times the
/// engine consulted it.
pub struct MemoryOracle {
    /// Taken names, lowercased.
    taken: RwLock<HashSet<String>>,
    /// Number of checks answered so far.
    calls: AtomicU32,
}

impl MemoryOracle {
    /// Create an oracle that knows no taken names.
    #[must_use]
    pub fn new() -> Self {
        Self {
            taken: RwLock::new(HashSet::new()),
            calls: AtomicU32::new(0),
        }
    }

    /// Create an oracle pre-seeded with taken names.
    #[must_use]
    pub fn with_taken<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let oracle = Self::new();
        for name in names {
            oracle.mark_taken(name);
        }
        oracle
    }

    /// Mark a name as taken.
    pub fn mark_taken(&self, name: impl Into<String>) {
        self.taken.write().insert(name.into().to_lowercase());
    }

    /// Release a name.
    pub fn release(&self, name: &str) {
        self.taken.write().remove(&name.to_lowercase());
    }

    /// Number of checks answered since construction.
    #[must_use]
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MemoryOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExistenceOracle for MemoryOracle {
    async fn check_exists(&self, name: &str, resource_type: &str) -> OracleResult<ExistenceCheck> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = name.to_lowercase();
        if self.taken.read().contains(&key) {
            Ok(ExistenceCheck::conflicting(vec![format!(
                "{resource_type}/{key}"
            )]))
        } else {
            Ok(ExistenceCheck::available())
        }
    }

    async fn check_name_availability(
        &self,
        name: &str,
        _resource_type: &str,
        _api_version: &str,
    ) -> OracleResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(!self.taken.read().contains(&name.to_lowercase()))
    }
}

/// In-memory naming history.
pub struct MemoryHistory {
    records: RwLock<Vec<GeneratedNameRecord>>,
}

impl MemoryHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of all recorded entries, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<GeneratedNameRecord> {
        self.records.read().clone()
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NameHistorySink for MemoryHistory {
    async fn record(&self, record: GeneratedNameRecord) -> ProviderResult<()> {
        self.records.write().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComponentContribution;

    #[tokio::test]
    async fn test_catalog_filters_disabled_components() {
        let catalog = MemoryCatalog::new();
        let mut components = builtin_components();
        components[2].enabled = false;
        catalog.set_components(components);

        let enabled = catalog.enabled_components().await.unwrap();
        assert_eq!(enabled.len(), 7);
        assert!(enabled.iter().all(|c| c.enabled));
    }

    #[tokio::test]
    async fn test_catalog_orders_by_sort_order() {
        let catalog = MemoryCatalog::new();
        let mut components = builtin_components();
        components.reverse();
        catalog.set_components(components);

        let enabled = catalog.enabled_components().await.unwrap();
        let orders: Vec<u32> = enabled.iter().map(|c| c.sort_order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[tokio::test]
    async fn test_resource_type_lookup_by_either_key() {
        let catalog = MemoryCatalog::new();
        catalog.upsert_resource_type(ResourceType::basic(
            "Microsoft.Storage/storageAccounts",
            "st",
        ));

        assert!(catalog.resource_type("st").await.unwrap().is_some());
        assert!(catalog.resource_type("ST").await.unwrap().is_some());
        assert!(catalog
            .resource_type("Microsoft.Storage/storageAccounts")
            .await
            .unwrap()
            .is_some());
        assert!(catalog.resource_type("vm").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oracle_counts_calls() {
        let oracle = MemoryOracle::with_taken(["st-app-dev"]);

        let hit = oracle.check_exists("st-app-dev", "st").await.unwrap();
        let miss = oracle.check_exists("st-app-prod", "st").await.unwrap();

        assert!(hit.exists);
        assert_eq!(hit.conflicting_ids, vec!["st/st-app-dev".to_string()]);
        assert!(!miss.exists);
        assert_eq!(oracle.call_count(), 2);
    }

    #[tokio::test]
    async fn test_oracle_availability_is_inverse_of_taken() {
        let oracle = MemoryOracle::with_taken(["stdevapp"]);

        assert!(!oracle
            .check_name_availability("stdevapp", "st", "2023-01-01")
            .await
            .unwrap());
        assert!(oracle
            .check_name_availability("stprodapp", "st", "2023-01-01")
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_history_records_in_order() {
        let history = MemoryHistory::new();
        assert!(history.is_empty());

        let contributions = vec![
            ComponentContribution::new("ResourceType", "st"),
            ComponentContribution::new("ResourceInstance", "001"),
        ];
        let first = GeneratedNameRecord::new("st-app-001", "st", contributions.clone(), None, "ok");
        let second = GeneratedNameRecord::new("st-app-002", "st", contributions, None, "ok");
        history.record(first).await.unwrap();
        history.record(second).await.unwrap();

        let records = history.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].resource_name, "st-app-001");
        assert_eq!(records[1].resource_name, "st-app-002");
    }
}
