//! Integration tests for the naming pipeline.
//!
//! These tests wire a real `GenerationService` over the in-memory providers
//! and drive complete requests through composition, validation, existence
//! checking, and conflict resolution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use namebuilder::config::{EngineConfig, OracleConfig, ResolutionSettings};
use namebuilder::domain::{ComponentChoice, ConflictStrategy, NameRequest, ResourceType};
use namebuilder::error::OracleResult;
use namebuilder::provider::{
    CatalogProvider, ExistenceCheck, ExistenceOracle, MemoryCatalog, MemoryHistory, MemoryOracle,
    NameHistorySink,
};
use namebuilder::service::GenerationService;

// ============================================================================
// Test Harness
// ============================================================================

/// A full pipeline over in-memory providers, with handles kept for
/// assertions.
struct NamingHarness {
    service: GenerationService,
    catalog: Arc<MemoryCatalog>,
    oracle: Arc<MemoryOracle>,
    history: Arc<MemoryHistory>,
}

impl NamingHarness {
    fn new() -> Self {
        Self::with_taken::<[&str; 0]>([])
    }

    fn with_taken<I>(taken: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let catalog = Arc::new(seeded_catalog());
        let oracle = Arc::new(MemoryOracle::with_taken(taken));
        let history = Arc::new(MemoryHistory::new());

        let service = GenerationService::new(
            Arc::clone(&catalog) as Arc<dyn CatalogProvider>,
            Arc::clone(&oracle) as Arc<dyn ExistenceOracle>,
            Arc::clone(&history) as Arc<dyn NameHistorySink>,
            EngineConfig::default(),
        );

        Self {
            service,
            catalog,
            oracle,
            history,
        }
    }
}

/// Catalog with the built-in components and three representative types.
fn seeded_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();

    let mut rg = ResourceType::basic("Microsoft.Resources/resourceGroups", "rg");
    rg.optional = "Environment, Location, UnitDept, Function, Org".to_string();
    catalog.upsert_resource_type(rg);

    let mut vm = ResourceType::basic("Microsoft.Compute/virtualMachines", "vm");
    vm.optional = "ProjAppSvc, UnitDept, Function, Org".to_string();
    catalog.upsert_resource_type(vm);

    let mut st = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
    st.scope = "global".to_string();
    st.optional = "ProjAppSvc, Location, UnitDept, Function, Org, Instance".to_string();
    st.invalid_characters = "-_.".to_string();
    st.regex = "^[a-z0-9]{3,24}$".to_string();
    st.length_min = Some(3);
    st.length_max = Some(24);
    catalog.upsert_resource_type(st);

    catalog
}

fn rg_request(app: &str, instance: &str) -> NameRequest {
    NameRequest {
        proj_app_svc: Some(ComponentChoice::new(app, app)),
        instance: Some(instance.to_string()),
        ..NameRequest::for_type("rg")
    }
}

fn vm_request() -> NameRequest {
    NameRequest {
        environment: Some(ComponentChoice::new("Production", "prod")),
        location: Some(ComponentChoice::new("West US", "wus")),
        instance: Some("001".to_string()),
        ..NameRequest::for_type("vm")
    }
}

fn st_request() -> NameRequest {
    NameRequest {
        environment: Some(ComponentChoice::new("Development", "dev")),
        ..NameRequest::for_type("st")
    }
}

fn settings(strategy: ConflictStrategy) -> ResolutionSettings {
    ResolutionSettings {
        strategy,
        ..ResolutionSettings::default()
    }
}

// ============================================================================
// Composition
// ============================================================================

#[tokio::test]
async fn test_components_compose_in_catalog_order() {
    let harness = NamingHarness::new();
    let request = NameRequest {
        unit_dept: Some(ComponentChoice::new("Finance", "fin")),
        org: Some(ComponentChoice::new("Contoso", "cto")),
        ..vm_request()
    };

    let generated = harness.service.generate(&request).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "vm-prod-wus-fin-cto-001");
    let order: Vec<&str> = generated
        .contributions
        .iter()
        .map(|c| c.component.as_str())
        .collect();
    assert_eq!(
        order,
        vec![
            "ResourceType",
            "ResourceEnvironment",
            "ResourceLocation",
            "ResourceUnitDept",
            "ResourceOrg",
            "ResourceInstance",
        ]
    );
}

#[tokio::test]
async fn test_forbidden_delimiter_produces_compact_name_with_warning() {
    let harness = NamingHarness::new();

    let generated = harness.service.generate(&st_request()).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "stdev");
    assert!(generated.message.contains("was omitted"));
}

#[tokio::test]
async fn test_active_delimiter_is_read_from_the_catalog() {
    let harness = NamingHarness::new();
    harness.catalog.set_delimiter("_");

    let generated = harness.service.generate(&vm_request()).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "vm_prod_wus_001");
}

#[tokio::test]
async fn test_unsupported_delimiter_is_a_configuration_failure() {
    let harness = NamingHarness::new();
    harness.catalog.set_delimiter("+");

    let generated = harness.service.generate(&vm_request()).await;

    assert!(!generated.success);
    assert!(generated.message.contains("unsupported delimiter"));
}

#[tokio::test]
async fn test_missing_required_components_report_in_one_message() {
    let harness = NamingHarness::new();

    let generated = harness.service.generate(&NameRequest::for_type("vm")).await;

    assert!(!generated.success);
    assert!(generated.message.contains("Environment"));
    assert!(generated.message.contains("Location"));
    assert!(generated.message.contains("Instance"));
    assert!(harness.history.is_empty());
}

#[tokio::test]
async fn test_static_value_bypasses_validation_and_resolution() {
    let harness = NamingHarness::new();
    let mut dns = ResourceType::basic("Microsoft.Network/dnsZones", "dns");
    dns.static_value = "Corp-Shared-Zone".to_string();
    harness.catalog.upsert_resource_type(dns);

    let generated = harness.service.generate(&NameRequest::for_type("dns")).await;

    assert!(generated.success);
    // Static values are returned verbatim, not lowercased.
    assert_eq!(generated.resource_name, "Corp-Shared-Zone");
    assert_eq!(harness.oracle.call_count(), 0);
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_composed_name_over_length_limit_is_rejected() {
    let harness = NamingHarness::new();
    let request = NameRequest {
        environment: Some(ComponentChoice::new(
            "Development",
            "averylongenvironmentvalue",
        )),
        ..NameRequest::for_type("st")
    };

    let generated = harness.service.generate(&request).await;

    assert!(!generated.success);
    assert!(generated.message.contains("maximum"));
    assert!(harness.history.is_empty());
}

#[tokio::test]
async fn test_validation_failure_reports_the_pattern() {
    let harness = NamingHarness::new();
    let mut aks = ResourceType::basic("Microsoft.ContainerService/managedClusters", "aks");
    aks.optional = "ProjAppSvc, Location, UnitDept, Function, Org, Instance".to_string();
    aks.regex = "^aks-x-".to_string();
    harness.catalog.upsert_resource_type(aks);
    let request = NameRequest {
        environment: Some(ComponentChoice::new("Development", "dev")),
        ..NameRequest::for_type("aks")
    };

    let generated = harness.service.generate(&request).await;

    assert!(!generated.success);
    assert!(generated.message.contains("naming pattern"));
}

// ============================================================================
// Conflict Resolution
// ============================================================================

#[tokio::test]
async fn test_auto_increment_walks_past_taken_names() {
    let harness =
        NamingHarness::with_taken(["rg-app-001", "rg-app-002", "rg-app-003"]);

    let generated = harness.service.generate(&rg_request("app", "001")).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "rg-app-004");
    let resolution = generated.resolution.expect("resolution should have run");
    assert_eq!(resolution.original_name, "rg-app-001");
    assert_eq!(resolution.final_name, "rg-app-004");
    assert_eq!(resolution.attempts, 3);
    assert_eq!(harness.history.records()[0].resource_name, "rg-app-004");
}

#[tokio::test]
async fn test_auto_increment_widens_past_the_padding_boundary() {
    let harness = NamingHarness::with_taken(["rg-app-999"]);

    let generated = harness.service.generate(&rg_request("app", "999")).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "rg-app-1000");
}

#[tokio::test]
async fn test_auto_increment_exhaustion_reports_the_last_candidate() {
    let harness = NamingHarness::with_taken([
        "rg-app-001",
        "rg-app-002",
        "rg-app-003",
        "rg-app-004",
    ]);
    let limited = ResolutionSettings {
        max_attempts: 2,
        ..settings(ConflictStrategy::AutoIncrement)
    };

    let generated = harness
        .service
        .generate_with(&rg_request("app", "001"), limited)
        .await;

    assert!(!generated.success);
    let resolution = generated.resolution.expect("resolution should have run");
    assert_eq!(resolution.attempts, 2);
    assert_eq!(resolution.final_name, "rg-app-003");
    assert!(generated.message.contains("rg-app-003"));
    assert!(harness.history.is_empty());
}

#[tokio::test]
async fn test_fail_strategy_makes_no_resolution_oracle_calls() {
    let harness = NamingHarness::with_taken(["rg-app-001"]);

    let generated = harness
        .service
        .generate_with(&rg_request("app", "001"), settings(ConflictStrategy::Fail))
        .await;

    assert!(!generated.success);
    let resolution = generated.resolution.expect("resolution should have run");
    assert_eq!(resolution.attempts, 0);
    // One call total: the pipeline's own existence check.
    assert_eq!(harness.oracle.call_count(), 1);
}

#[tokio::test]
async fn test_notify_only_keeps_the_colliding_name() {
    let harness = NamingHarness::with_taken(["rg-app-001"]);

    let generated = harness
        .service
        .generate_with(
            &rg_request("app", "001"),
            settings(ConflictStrategy::NotifyOnly),
        )
        .await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "rg-app-001");
    assert!(generated.message.contains("already in use"));
    assert_eq!(harness.history.records()[0].resource_name, "rg-app-001");
}

#[tokio::test]
async fn test_suffix_random_appends_a_six_character_suffix() {
    let harness = NamingHarness::with_taken(["rg-app-001"]);

    let generated = harness
        .service
        .generate_with(
            &rg_request("app", "001"),
            settings(ConflictStrategy::SuffixRandom),
        )
        .await;

    assert!(generated.success);
    let suffix = generated
        .resource_name
        .strip_prefix("rg-app-001-")
        .expect("suffix should be appended to the original");
    assert_eq!(suffix.len(), 6);
    assert!(suffix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
}

#[tokio::test]
async fn test_global_scope_conflicts_resolve_through_availability_checks() {
    let harness = NamingHarness::with_taken(["stdev"]);
    let advisory = settings(ConflictStrategy::NotifyOnly);

    let generated = harness.service.generate_with(&st_request(), advisory).await;

    assert!(generated.success);
    assert_eq!(generated.resource_name, "stdev");
    assert!(generated.message.contains("already in use"));
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn test_repeat_generation_hits_the_cache() {
    let harness = NamingHarness::new();

    harness.service.generate(&vm_request()).await;
    harness.service.generate(&vm_request()).await;

    assert_eq!(harness.oracle.call_count(), 1);
}

#[tokio::test]
async fn test_type_invalidation_restores_oracle_consultation() {
    let harness = NamingHarness::new();

    harness.service.generate(&vm_request()).await;
    harness.service.invalidate_type("vm");
    harness.service.generate(&vm_request()).await;

    assert_eq!(harness.oracle.call_count(), 2);
}

#[tokio::test]
async fn test_name_exists_reflects_the_oracle() {
    let harness = NamingHarness::with_taken(["vm-prod-wus-001"]);

    assert!(harness
        .service
        .name_exists("vm-prod-wus-001", "vm")
        .await
        .unwrap());
    assert!(!harness
        .service
        .name_exists("vm-prod-wus-002", "vm")
        .await
        .unwrap());
    assert!(harness.service.name_exists("vm-x", "unknown").await.is_err());
}

// ============================================================================
// Oracle Boundary
// ============================================================================

/// Oracle that never answers within any reasonable deadline.
struct SlowOracle;

#[async_trait]
impl ExistenceOracle for SlowOracle {
    async fn check_exists(&self, _: &str, _: &str) -> OracleResult<ExistenceCheck> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(ExistenceCheck::available())
    }

    async fn check_name_availability(&self, _: &str, _: &str, _: &str) -> OracleResult<bool> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(true)
    }
}

#[tokio::test]
async fn test_slow_oracle_times_out_into_a_failure() {
    let history = Arc::new(MemoryHistory::new());
    let config = EngineConfig {
        oracle: OracleConfig { timeout_seconds: 1 },
        ..EngineConfig::default()
    };
    let service = GenerationService::new(
        Arc::new(seeded_catalog()),
        Arc::new(SlowOracle),
        Arc::clone(&history) as Arc<dyn NameHistorySink>,
        config,
    );

    let generated = service.generate(&vm_request()).await;

    assert!(!generated.success);
    assert!(generated.message.contains("timed out"));
    assert!(history.is_empty());
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_carries_requester_and_breakdown() {
    let harness = NamingHarness::new();
    let request = NameRequest {
        requested_by: Some("jordan".to_string()),
        ..vm_request()
    };

    let generated = harness.service.generate(&request).await;
    assert!(generated.success);

    let records = harness.history.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.resource_name, "vm-prod-wus-001");
    assert_eq!(record.resource_type, "vm");
    assert_eq!(record.requested_by.as_deref(), Some("jordan"));
    assert!(record
        .components
        .iter()
        .any(|c| c.component == "ResourceEnvironment" && c.value == "Production (prod)"));
}

#[tokio::test]
async fn test_failed_generation_is_never_recorded() {
    let harness = NamingHarness::with_taken(["rg-app-001"]);

    harness
        .service
        .generate_with(&rg_request("app", "001"), settings(ConflictStrategy::Fail))
        .await;

    assert!(harness.history.is_empty());
}
