//! Naming components and the typed accessors for built-in ones.
//!
//! A component is a named, orderable contributor to a composed resource name.
//! The built-in set is reserved and always present in the catalog (possibly
//! disabled); custom and free-text components are added alongside it.

use serde::{Deserialize, Serialize};

use super::request::NameRequest;
use super::resource_type::ResourceType;

/// Reserved built-in component names in default sort order.
pub const BUILTIN_COMPONENT_NAMES: [&str; 8] = [
    "ResourceType",
    "ResourceProjAppSvc",
    "ResourceEnvironment",
    "ResourceLocation",
    "ResourceUnitDept",
    "ResourceFunction",
    "ResourceOrg",
    "ResourceInstance",
];

/// A named, orderable contributor to a composed resource name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Identifier, e.g. `ResourceEnvironment` or a custom name.
    pub name: String,

    /// Human-readable name shown in contribution labels.
    pub display_name: String,

    /// Whether the component participates in composition.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Whether this is a user-defined component.
    #[serde(default)]
    pub is_custom: bool,

    /// Whether values for this component are free text rather than
    /// configured options.
    #[serde(default)]
    pub is_free_text: bool,

    /// Position in the composition order (dense 1..N among enabled
    /// components; maintained by the configuration store).
    pub sort_order: u32,

    /// Parent component for option sub-lists, if any.
    #[serde(default)]
    pub parent_component: Option<String>,
}

const fn default_enabled() -> bool {
    true
}

impl Component {
    /// Create a built-in component.
    #[must_use]
    pub fn builtin(name: &str, display_name: &str, sort_order: u32) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            enabled: true,
            is_custom: false,
            is_free_text: false,
            sort_order,
            parent_component: None,
        }
    }

    /// Create a custom component.
    #[must_use]
    pub fn custom(name: &str, sort_order: u32) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            enabled: true,
            is_custom: true,
            is_free_text: false,
            sort_order,
            parent_component: None,
        }
    }

    /// The component name in normalized form.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_component_name(&self.name)
    }
}

/// Normalize a component name for membership and map-key comparisons.
///
/// Strips the literal `Resource` marker and whitespace, then lowercases, so
/// `ResourceUnitDept`, `UnitDept`, and `unitdept` all compare equal.
#[must_use]
pub fn normalize_component_name(name: &str) -> String {
    name.replace("Resource", "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// Typed accessor for a built-in component.
///
/// Replaces by-name property reflection with an explicit dispatch table:
/// the composer maps each catalog entry to its accessor once per pass and
/// resolves values through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinComponent {
    /// Resolves from the resource type's own short name.
    Type,
    /// Project, application, or service selection.
    ProjAppSvc,
    /// Environment selection.
    Environment,
    /// Location selection.
    Location,
    /// Unit or department selection.
    UnitDept,
    /// Function selection.
    Function,
    /// Organization selection.
    Org,
    /// Verbatim numeric instance string.
    Instance,
}

impl BuiltinComponent {
    /// Look up the accessor for a component name (any normalization accepted).
    #[must_use]
    pub fn from_component_name(name: &str) -> Option<Self> {
        match normalize_component_name(name).as_str() {
            "type" => Some(Self::Type),
            "projappsvc" => Some(Self::ProjAppSvc),
            "environment" => Some(Self::Environment),
            "location" => Some(Self::Location),
            "unitdept" => Some(Self::UnitDept),
            "function" => Some(Self::Function),
            "org" => Some(Self::Org),
            "instance" => Some(Self::Instance),
            _ => None,
        }
    }

    /// Resolve this component's value from a request.
    ///
    /// Returns the value to append (short names case-folded, instance
    /// verbatim) and the label recorded in the contribution breakdown.
    /// `None` when the request supplies nothing usable for it.
    #[must_use]
    pub fn resolve(&self, request: &NameRequest, resource_type: &ResourceType) -> Option<ResolvedComponent> {
        match self {
            Self::Type => Some(ResolvedComponent {
                value: resource_type.short_name.to_lowercase(),
                label: format!("{} ({})", resource_type.resource, resource_type.short_name),
            }),
            Self::Instance => request
                .instance
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| ResolvedComponent {
                    value: v.to_string(),
                    label: v.to_string(),
                }),
            Self::ProjAppSvc => resolve_choice(request.proj_app_svc.as_ref()),
            Self::Environment => resolve_choice(request.environment.as_ref()),
            Self::Location => resolve_choice(request.location.as_ref()),
            Self::UnitDept => resolve_choice(request.unit_dept.as_ref()),
            Self::Function => resolve_choice(request.function.as_ref()),
            Self::Org => resolve_choice(request.org.as_ref()),
        }
    }

    /// Whether this accessor is the numeric instance component.
    #[must_use]
    pub const fn is_instance(&self) -> bool {
        matches!(self, Self::Instance)
    }
}

/// A value resolved for one component, plus its contribution label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedComponent {
    /// The string appended to the composed name.
    pub value: String,
    /// The label recorded in the contribution breakdown.
    pub label: String,
}

fn resolve_choice(choice: Option<&super::request::ComponentChoice>) -> Option<ResolvedComponent> {
    choice
        .filter(|c| !c.short_name.is_empty())
        .map(|c| ResolvedComponent {
            value: c.short_name.to_lowercase(),
            label: format!("{} ({})", c.name, c.short_name),
        })
}

/// The reserved built-in components with their default catalog ordering.
#[must_use]
pub fn builtin_components() -> Vec<Component> {
    let display = [
        "Resource Type",
        "Project/App/Service",
        "Environment",
        "Location",
        "Unit/Department",
        "Function",
        "Organization",
        "Instance",
    ];

    BUILTIN_COMPONENT_NAMES
        .iter()
        .zip(display.iter())
        .enumerate()
        .map(|(i, (name, display_name))| {
            #[allow(clippy::cast_possible_truncation)]
            Component::builtin(name, display_name, i as u32 + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::ComponentChoice;

    #[test]
    fn test_normalize_strips_marker_and_case() {
        assert_eq!(normalize_component_name("ResourceUnitDept"), "unitdept");
        assert_eq!(normalize_component_name("UnitDept"), "unitdept");
        assert_eq!(normalize_component_name("unit dept"), "unitdept");
        assert_eq!(normalize_component_name("Project Code"), "projectcode");
    }

    #[test]
    fn test_builtin_lookup_accepts_both_forms() {
        assert_eq!(
            BuiltinComponent::from_component_name("ResourceEnvironment"),
            Some(BuiltinComponent::Environment)
        );
        assert_eq!(
            BuiltinComponent::from_component_name("Environment"),
            Some(BuiltinComponent::Environment)
        );
        assert_eq!(BuiltinComponent::from_component_name("ProjectCode"), None);
    }

    #[test]
    fn test_type_resolves_from_resource_type() {
        let rtype = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
        let request = NameRequest::default();

        let resolved = BuiltinComponent::Type.resolve(&request, &rtype).unwrap();
        assert_eq!(resolved.value, "st");
        assert_eq!(resolved.label, "Microsoft.Storage/storageAccounts (st)");
    }

    #[test]
    fn test_choice_value_is_case_folded_but_label_is_not() {
        let rtype = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
        let request = NameRequest {
            environment: Some(ComponentChoice::new("Development", "DEV")),
            ..NameRequest::default()
        };

        let resolved = BuiltinComponent::Environment
            .resolve(&request, &rtype)
            .unwrap();
        assert_eq!(resolved.value, "dev");
        assert_eq!(resolved.label, "Development (DEV)");
    }

    #[test]
    fn test_empty_short_name_counts_as_missing() {
        let rtype = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
        let request = NameRequest {
            location: Some(ComponentChoice::new("West US", "")),
            instance: Some(String::new()),
            ..NameRequest::default()
        };

        assert!(BuiltinComponent::Location.resolve(&request, &rtype).is_none());
        assert!(BuiltinComponent::Instance.resolve(&request, &rtype).is_none());
    }

    #[test]
    fn test_builtin_components_are_densely_ordered() {
        let components = builtin_components();
        assert_eq!(components.len(), 8);
        for (i, component) in components.iter().enumerate() {
            assert_eq!(component.sort_order as usize, i + 1);
            assert!(component.enabled);
            assert!(!component.is_custom);
        }
    }
}
