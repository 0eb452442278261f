//! Name composition.
//!
//! Walks the enabled components in catalog order, resolves each one's value
//! from the request, and assembles the delimited, lowercased candidate name.
//! Composition never fails at the type level; every deficiency is
//! accumulated and rendered into one message by the pipeline.

use std::collections::HashMap;

use crate::domain::{
    BuiltinComponent, Component, ComponentContribution, Delimiter, NameRequest, ResourceType,
    normalize_component_name,
};

/// Composition pass options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComposeOptions {
    /// Include disabled components, for preview and admin tooling.
    pub include_disabled: bool,
}

/// Result of one composition pass.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Assembled candidate name, lowercased.
    pub name: String,
    /// One entry per appended component value, in order.
    pub contributions: Vec<ComponentContribution>,
    /// Non-fatal notes, e.g. a suppressed delimiter.
    pub warnings: Vec<String>,
    /// Accumulated deficiencies. Non-empty means the name is unusable.
    pub errors: Vec<String>,
    /// Whether the name came from the type's static value.
    pub from_static_value: bool,
}

impl Composition {
    /// Whether the pass produced a usable name.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// All accumulated errors joined into one message.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.join("; "))
        }
    }

    fn from_static(value: &str) -> Self {
        Self {
            name: value.to_string(),
            contributions: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            from_static_value: true,
        }
    }
}

/// Compose a candidate name for the request.
///
/// Components are walked ascending by sort order; excluded ones are
/// skipped, missing non-optional ones accumulate errors. A resource type
/// whose character rules forbid the active delimiter gets the parts joined
/// bare, with a single warning recorded the first time the delimiter would
/// have been inserted.
#[must_use]
pub fn compose(
    request: &NameRequest,
    resource_type: &ResourceType,
    components: &[Component],
    delimiter: Delimiter,
    options: ComposeOptions,
) -> Composition {
    if let Some(value) = resource_type.static_value() {
        return Composition::from_static(value);
    }

    let mut ordered: Vec<&Component> = components
        .iter()
        .filter(|c| c.enabled || options.include_disabled)
        .collect();
    ordered.sort_by_key(|c| c.sort_order);

    let custom_values: HashMap<String, &str> = request
        .custom_components
        .iter()
        .map(|(name, value)| (normalize_component_name(name), value.as_str()))
        .collect();

    let delimiter_forbidden = resource_type.forbids_delimiter(&delimiter);
    let mut delimiter_warned = false;

    let mut name = String::new();
    let mut contributions = Vec::new();
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    for component in ordered {
        if resource_type.is_excluded(&component.name) {
            continue;
        }

        let builtin = if component.is_custom {
            None
        } else {
            BuiltinComponent::from_component_name(&component.name)
        };

        let resolved = match builtin {
            Some(accessor) => accessor
                .resolve(request, resource_type)
                .map(|r| (r.value, r.label)),
            None => custom_values
                .get(&component.normalized_name())
                .filter(|v| !v.is_empty())
                .map(|v| ((*v).to_string(), (*v).to_string())),
        };

        let Some((value, label)) = resolved else {
            if !resource_type.is_optional(&component.name) {
                errors.push(format!(
                    "{} is required for this resource type",
                    component.display_name
                ));
            }
            continue;
        };

        if builtin.is_some_and(|b| b.is_instance())
            && !value.chars().all(|c| c.is_ascii_digit())
        {
            errors.push(format!("instance value {value:?} must contain only digits"));
        }

        if !name.is_empty() {
            if delimiter_forbidden {
                if !delimiter_warned {
                    warnings.push(format!(
                        "delimiter {:?} is not allowed for {} and was omitted",
                        delimiter.as_str(),
                        resource_type.short_name
                    ));
                    delimiter_warned = true;
                }
            } else {
                name.push_str(delimiter.as_str());
            }
        }

        name.push_str(&value);
        contributions.push(ComponentContribution::new(&component.name, &label));
    }

    Composition {
        name: name.to_lowercase(),
        contributions,
        warnings,
        errors,
        from_static_value: false,
    }
}
