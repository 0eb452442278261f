//! Name generation requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A selected option for one built-in component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentChoice {
    /// Display name of the option, e.g. `Development`.
    pub name: String,

    /// Short name contributed to the composed name, e.g. `dev`.
    pub short_name: String,
}

impl ComponentChoice {
    /// Create a choice from its display and short names.
    #[must_use]
    pub fn new(name: &str, short_name: &str) -> Self {
        Self {
            name: name.to_string(),
            short_name: short_name.to_string(),
        }
    }
}

/// One naming request: the resolved value for each component the caller
/// supplies. Immutable during a composition pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NameRequest {
    /// Key of the target resource type: short name or fully-qualified
    /// resource string.
    pub resource_type: String,

    /// Project, application, or service selection.
    #[serde(default)]
    pub proj_app_svc: Option<ComponentChoice>,

    /// Environment selection.
    #[serde(default)]
    pub environment: Option<ComponentChoice>,

    /// Location selection.
    #[serde(default)]
    pub location: Option<ComponentChoice>,

    /// Unit or department selection.
    #[serde(default)]
    pub unit_dept: Option<ComponentChoice>,

    /// Function selection.
    #[serde(default)]
    pub function: Option<ComponentChoice>,

    /// Organization selection.
    #[serde(default)]
    pub org: Option<ComponentChoice>,

    /// Instance number, taken verbatim; must be decimal digits only.
    #[serde(default)]
    pub instance: Option<String>,

    /// Values for custom and free-text components, keyed by component name
    /// (keys are normalized before lookup, so any spelling of the name works).
    #[serde(default)]
    pub custom_components: HashMap<String, String>,

    /// Requesting user recorded on the history entry.
    #[serde(default)]
    pub requested_by: Option<String>,
}

impl NameRequest {
    /// Start a request for the given resource type key.
    #[must_use]
    pub fn for_type(resource_type: &str) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            ..Self::default()
        }
    }

    /// Add a custom or free-text component value.
    #[must_use]
    pub fn with_custom(mut self, component_name: &str, value: &str) -> Self {
        self.custom_components
            .insert(component_name.to_string(), value.to_string());
        self
    }
}
