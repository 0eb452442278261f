//! Domain model: components, delimiters, resource types, requests, and the
//! structured outcomes the engine returns.

mod component;
mod delimiter;
mod outcome;
mod request;
mod resource_type;

pub use component::{
    BUILTIN_COMPONENT_NAMES, BuiltinComponent, Component, ResolvedComponent, builtin_components,
    normalize_component_name,
};
pub use delimiter::Delimiter;
pub use outcome::{
    ComponentContribution, ConflictResolutionOutcome, ConflictStrategy, GeneratedName,
    GeneratedNameRecord, ValidationOutcome,
};
pub use request::{ComponentChoice, NameRequest};
pub use resource_type::ResourceType;
