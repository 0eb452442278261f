//! Existence checking against the external oracle.
//!
//! Wraps the oracle with scope-aware routing, a per-call timeout, and the
//! validation result cache. Globally-scoped resource types whose provider
//! namespace has a pinned availability API version go through the
//! provider-level availability endpoint; everything else uses the
//! namespace-scoped existence check.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CacheConfig, OracleConfig};
use crate::domain::ResourceType;
use crate::error::{OracleError, OracleResult};
use crate::provider::{availability_api_version, ExistenceCheck, ExistenceOracle};
use crate::service::cache::ResultCache;

/// Cached, timeout-guarded front end over the existence oracle.
pub struct ExistenceChecker {
    /// External oracle.
    oracle: Arc<dyn ExistenceOracle>,
    /// Answer cache.
    cache: ResultCache,
    /// Whether cache lookups are enabled.
    cache_enabled: bool,
    /// Lifetime of a cached answer.
    cache_ttl: Duration,
    /// Per-call oracle deadline.
    timeout: Duration,
}

impl ExistenceChecker {
    /// Create a checker over the given oracle.
    #[must_use]
    pub fn new(oracle: Arc<dyn ExistenceOracle>, cache: &CacheConfig, oracle_cfg: &OracleConfig) -> Self {
        Self {
            oracle,
            cache: ResultCache::new(),
            cache_enabled: cache.enabled,
            cache_ttl: cache.ttl(),
            timeout: oracle_cfg.timeout(),
        }
    }

    /// Check whether `name` is already taken for the given resource type.
    ///
    /// Successful answers are cached; failures are returned to the caller
    /// and never cached, so the next attempt asks the oracle again.
    ///
    /// # Errors
    ///
    /// Returns an error when the oracle fails or exceeds the configured
    /// timeout. Callers must treat that as "unknown", not as availability.
    pub async fn check(&self, name: &str, resource_type: &ResourceType) -> OracleResult<ExistenceCheck> {
        let key = ResultCache::key(&resource_type.short_name, name);

        if self.cache_enabled {
            if let Some(cached) = self.cache.get(&key) {
                tracing::debug!(%key, exists = cached.exists, "Existence answer served from cache");
                return Ok(cached);
            }
        }

        let check = self.consult_oracle(name, resource_type).await?;

        if self.cache_enabled {
            self.cache.set(&key, check.clone(), self.cache_ttl);
        }

        Ok(check)
    }

    /// Ask the oracle directly, routing by resource type scope.
    async fn consult_oracle(
        &self,
        name: &str,
        resource_type: &ResourceType,
    ) -> OracleResult<ExistenceCheck> {
        let global_version = resource_type
            .is_global_scope()
            .then(|| availability_api_version(resource_type.provider_namespace()))
            .flatten();

        if let Some(api_version) = global_version {
            let available = self
                .with_timeout(self.oracle.check_name_availability(
                    name,
                    &resource_type.short_name,
                    api_version,
                ))
                .await?;
            return Ok(if available {
                ExistenceCheck::available()
            } else {
                ExistenceCheck::conflicting(Vec::new())
            });
        }

        self.with_timeout(self.oracle.check_exists(name, &resource_type.short_name))
            .await
    }

    /// Run an oracle call under the configured deadline.
    async fn with_timeout<T>(
        &self,
        fut: impl std::future::Future<Output = OracleResult<T>>,
    ) -> OracleResult<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| OracleError::Timeout(self.timeout))?
    }

    /// Drop cached answers for one resource type.
    pub fn invalidate_type(&self, resource_type: &str) {
        self.cache
            .invalidate(&format!("{}:", resource_type.to_lowercase()));
    }

    /// Drop all cached answers.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
