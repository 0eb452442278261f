//! Provider abstraction layer.
//!
//! Defines the traits the engine depends on and the in-memory
//! implementations used by tests and embedded callers:
//! - [`CatalogProvider`]: read access to components, delimiter, and
//!   resource type definitions
//! - [`ExistenceOracle`]: external "is this name taken" answers
//! - [`NameHistorySink`]: write-side store for accepted names

pub mod memory;
pub mod traits;
pub mod versions;

pub use memory::{MemoryCatalog, MemoryHistory, MemoryOracle};
pub use traits::{CatalogProvider, ExistenceCheck, ExistenceOracle, NameHistorySink};
pub use versions::availability_api_version;
