//! # NameBuilder
//!
//! A resource naming engine for cloud environments: composes names from
//! configured components, validates them against per-type rules, and
//! resolves collisions against the live namespace.
//!
//! - **Composition**: walks the enabled naming components in catalog order
//!   and assembles a delimited, lowercased candidate name
//! - **Validation**: character, length, and regex rules per resource type
//! - **Conflict resolution**: `Fail`, `NotifyOnly`, `AutoIncrement`, and
//!   `SuffixRandom` strategies against a pluggable existence oracle
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           Naming Engine                              │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────────┐ │
//! │  │  Composer   │→ │  Validator  │→ │  Conflict   │  │  Provider  │ │
//! │  │             │  │             │  │  Resolver   │→ │  Layer     │ │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use namebuilder::config::EngineConfig;
//! use namebuilder::domain::{ComponentChoice, NameRequest, ResourceType};
//! use namebuilder::provider::{MemoryCatalog, MemoryHistory, MemoryOracle};
//! use namebuilder::service::GenerationService;
//!
//! # tokio_test::block_on(async {
//! let catalog = MemoryCatalog::new();
//! let mut vm = ResourceType::basic("Microsoft.Compute/virtualMachines", "vm");
//! vm.optional = "ProjAppSvc, Location, UnitDept, Function, Org".to_string();
//! catalog.upsert_resource_type(vm);
//!
//! let service = GenerationService::new(
//!     Arc::new(catalog),
//!     Arc::new(MemoryOracle::new()),
//!     Arc::new(MemoryHistory::new()),
//!     EngineConfig::default(),
//! );
//!
//! let request = NameRequest {
//!     environment: Some(ComponentChoice::new("Development", "dev")),
//!     instance: Some("001".to_string()),
//!     ..NameRequest::for_type("vm")
//! };
//! let generated = service.generate(&request).await;
//! assert!(generated.success);
//! assert_eq!(generated.resource_name, "vm-dev-001");
//! # });
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod service;

pub use config::{EngineConfig, ResolutionSettings};
pub use domain::{ConflictStrategy, GeneratedName, NameRequest};
pub use error::{EngineError, Result};
pub use service::GenerationService;
