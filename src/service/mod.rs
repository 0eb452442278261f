//! Service layer module.
//!
//! Contains the naming pipeline: composition, validation, existence
//! checking, and conflict resolution.

pub mod cache;
pub mod composer;
pub mod existence;
pub mod generator;
pub mod resolver;
pub mod validator;

pub use cache::ResultCache;
pub use composer::{compose, ComposeOptions, Composition};
pub use existence::ExistenceChecker;
pub use generator::GenerationService;
pub use resolver::resolve;
pub use validator::validate;
