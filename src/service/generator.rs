//! The name generation pipeline.
//!
//! `GenerationService` ties the catalog, the existence checker, and the
//! history sink together: compose, validate, check the namespace, resolve
//! a collision if one is found, then hand the accepted name to history.
//! Failures never escape as errors; every call produces a structured
//! [`GeneratedName`] with a human-readable message.

use std::sync::Arc;

use crate::config::{EngineConfig, ResolutionSettings};
use crate::domain::{
    Delimiter, GeneratedName, GeneratedNameRecord, NameRequest, ResourceType,
};
use crate::error::{EngineError, Result};
use crate::provider::{CatalogProvider, ExistenceOracle, NameHistorySink};
use crate::service::composer::{compose, ComposeOptions};
use crate::service::existence::ExistenceChecker;
use crate::service::resolver::resolve;
use crate::service::validator::validate;

/// End-to-end naming pipeline over pluggable collaborators.
pub struct GenerationService {
    /// Naming configuration source.
    catalog: Arc<dyn CatalogProvider>,
    /// Cached, timeout-guarded oracle front end.
    checker: ExistenceChecker,
    /// Store for accepted names.
    history: Arc<dyn NameHistorySink>,
    /// Engine defaults, including the per-call resolution snapshot.
    config: EngineConfig,
}

impl GenerationService {
    /// Create a pipeline over the given collaborators.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        oracle: Arc<dyn ExistenceOracle>,
        history: Arc<dyn NameHistorySink>,
        config: EngineConfig,
    ) -> Self {
        let checker = ExistenceChecker::new(oracle, &config.cache, &config.oracle);
        Self {
            catalog,
            checker,
            history,
            config,
        }
    }

    /// Generate a name using the configured resolution defaults.
    pub async fn generate(&self, request: &NameRequest) -> GeneratedName {
        self.generate_with(request, self.config.resolution).await
    }

    /// Generate a name with an explicit resolution settings snapshot.
    ///
    /// Settings are taken by value so concurrent configuration changes
    /// cannot shift strategy mid-request.
    pub async fn generate_with(
        &self,
        request: &NameRequest,
        settings: ResolutionSettings,
    ) -> GeneratedName {
        match self.run_pipeline(request, settings).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    resource_type = %request.resource_type,
                    error = %e,
                    "Name generation failed"
                );
                GeneratedName::failure(format!("name generation failed: {e}"))
            }
        }
    }

    /// Check whether a name is already taken, through the cache.
    ///
    /// # Errors
    ///
    /// Returns an error when the resource type is unknown or the oracle
    /// fails; a failure means "unknown", not "available".
    pub async fn name_exists(&self, name: &str, resource_type: &str) -> Result<bool> {
        let rtype = self.resource_type(resource_type).await?;
        let check = self.checker.check(name, &rtype).await?;
        Ok(check.exists)
    }

    /// Drop all cached oracle answers.
    ///
    /// Call after configuration changes that affect how names are judged.
    pub fn clear_validation_cache(&self) {
        self.checker.clear_cache();
    }

    /// Drop cached oracle answers for one resource type.
    pub fn invalidate_type(&self, resource_type: &str) {
        self.checker.invalidate_type(resource_type);
    }

    async fn resource_type(&self, key: &str) -> Result<ResourceType> {
        let rtype = self
            .catalog
            .resource_type(key)
            .await?
            .ok_or_else(|| EngineError::UnknownResourceType(key.to_string()))?;
        if !rtype.enabled {
            return Err(EngineError::DisabledResourceType(key.to_string()));
        }
        Ok(rtype)
    }

    async fn run_pipeline(
        &self,
        request: &NameRequest,
        settings: ResolutionSettings,
    ) -> Result<GeneratedName> {
        let rtype = self.resource_type(&request.resource_type).await?;

        let components = self.catalog.enabled_components().await?;
        if components.is_empty() {
            return Err(EngineError::NoComponents);
        }

        let raw_delimiter = self.catalog.active_delimiter().await?;
        let delimiter = Delimiter::parse(&raw_delimiter)
            .map_err(EngineError::InvalidDelimiter)?;

        let composition = compose(
            request,
            &rtype,
            &components,
            delimiter,
            ComposeOptions::default(),
        );

        if composition.from_static_value {
            let response = GeneratedName {
                success: true,
                resource_name: composition.name,
                message: format!(
                    "resource type {} uses a configured fixed name",
                    rtype.short_name
                ),
                contributions: Vec::new(),
                resolution: None,
            };
            self.record_history(request, &rtype, &response).await;
            return Ok(response);
        }

        if let Some(message) = composition.error_message() {
            return Ok(GeneratedName::failure(format!(
                "name generation failed: {message}"
            )));
        }

        // The validator's returned name supersedes the composed one.
        let validation = validate(&rtype, &composition.name, delimiter);
        if !validation.valid {
            return Ok(GeneratedName::failure(format!(
                "generated name {:?} is invalid: {}",
                validation.name,
                validation.message.unwrap_or_default()
            )));
        }
        let mut name = validation.name;

        let mut notes = composition.warnings;
        let mut resolution = None;

        if settings.check_existence {
            let check = self.checker.check(&name, &rtype).await?;
            if check.exists {
                let outcome = resolve(&self.checker, &name, &rtype, &settings).await;
                if !outcome.success {
                    let message = outcome
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "conflict resolution failed".to_string());
                    return Ok(GeneratedName {
                        success: false,
                        resource_name: String::new(),
                        message: format!("name generation failed: {message}"),
                        contributions: composition.contributions,
                        resolution: Some(outcome),
                    });
                }
                name.clone_from(&outcome.final_name);
                if let Some(warning) = outcome.warning.clone() {
                    notes.push(warning);
                }
                resolution = Some(outcome);
            }
        }

        let message = if notes.is_empty() {
            "name generated successfully".to_string()
        } else {
            notes.join("; ")
        };

        let response = GeneratedName {
            success: true,
            resource_name: name,
            message,
            contributions: composition.contributions,
            resolution,
        };
        self.record_history(request, &rtype, &response).await;

        tracing::debug!(
            name = %response.resource_name,
            resource_type = %rtype.short_name,
            "Name generated"
        );
        Ok(response)
    }

    /// Hand the accepted name to the history sink.
    ///
    /// Sink failures are logged and do not fail the request.
    async fn record_history(
        &self,
        request: &NameRequest,
        rtype: &ResourceType,
        response: &GeneratedName,
    ) {
        let record = GeneratedNameRecord::new(
            &response.resource_name,
            &rtype.short_name,
            response.contributions.clone(),
            request.requested_by.clone(),
            &response.message,
        );
        if let Err(e) = self.history.record(record).await {
            tracing::warn!(
                name = %response.resource_name,
                error = %e,
                "Failed to record generated name"
            );
        }
    }
}
