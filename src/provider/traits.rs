//! External-collaborator trait definitions.
//!
//! These traits define the interface to the configuration catalog, the
//! existence oracle, and the naming-history store, enabling swapping between
//! different implementations without changing engine logic. The engine only
//! ever reads configuration and hands off history entries; it owns no
//! storage of its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Component, GeneratedNameRecord, ResourceType};
use crate::error::{OracleResult, ProviderResult};

/// Read access to the naming configuration.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Get the enabled components in catalog order.
    ///
    /// Consumed once per composition call.
    async fn enabled_components(&self) -> ProviderResult<Vec<Component>>;

    /// Get the currently-active delimiter as its raw configuration string.
    ///
    /// The engine parses and validates it; a string outside `-`, `_`, `.`,
    /// and empty is surfaced as a configuration failure.
    async fn active_delimiter(&self) -> ProviderResult<String>;

    /// Look up a resource type by short name or fully-qualified resource
    /// string.
    async fn resource_type(&self, key: &str) -> ProviderResult<Option<ResourceType>>;
}

/// Answer from the existence oracle for one candidate name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceCheck {
    /// Whether a resource with the candidate name already exists.
    pub exists: bool,

    /// Identifiers of the conflicting resources, when the provider supplied
    /// them.
    #[serde(default)]
    pub conflicting_ids: Vec<String>,
}

impl ExistenceCheck {
    /// An answer reporting the name as free.
    #[must_use]
    pub const fn available() -> Self {
        Self {
            exists: false,
            conflicting_ids: Vec::new(),
        }
    }

    /// An answer reporting a conflict with the given resource identifiers.
    #[must_use]
    pub const fn conflicting(conflicting_ids: Vec<String>) -> Self {
        Self {
            exists: true,
            conflicting_ids,
        }
    }
}

/// External service answering "does a resource with this name already exist".
///
/// Both methods may fail transiently; callers must treat any failure as
/// "unknown, do not assume uniqueness" and either retry within their own
/// attempt limit or surface the failure. A failure is never an availability
/// signal.
#[async_trait]
pub trait ExistenceOracle: Send + Sync {
    /// Check whether a name is taken within the namespace of the given
    /// resource type.
    async fn check_exists(&self, name: &str, resource_type: &str) -> OracleResult<ExistenceCheck>;

    /// Provider-level availability check for globally-scoped resource types.
    ///
    /// `api_version` comes from the static per-provider mapping and is passed
    /// through verbatim, not re-derived. Returns `true` when the name is
    /// available.
    async fn check_name_availability(
        &self,
        name: &str,
        resource_type: &str,
        api_version: &str,
    ) -> OracleResult<bool>;
}

/// External store receiving the accepted name and its contribution breakdown.
#[async_trait]
pub trait NameHistorySink: Send + Sync {
    /// Record one accepted name.
    async fn record(&self, record: GeneratedNameRecord) -> ProviderResult<()>;
}
