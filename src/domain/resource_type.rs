//! Resource type definitions and their naming constraints.

use serde::{Deserialize, Serialize};

use super::component::normalize_component_name;
use super::delimiter::Delimiter;

/// A target resource type whose naming constraints govern composition and
/// validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceType {
    /// Fully-qualified provider/type string,
    /// e.g. `Microsoft.Storage/storageAccounts`.
    pub resource: String,

    /// Short name contributed by the `ResourceType` component, e.g. `st`.
    pub short_name: String,

    /// Naming scope; `global` selects the provider availability check.
    #[serde(default)]
    pub scope: String,

    /// When non-empty, composition short-circuits and returns this value
    /// verbatim; validation and conflict resolution are skipped.
    #[serde(default)]
    pub static_value: String,

    /// Comma-set of component names exempt from required-ness.
    #[serde(default)]
    pub optional: String,

    /// Comma-set of component names never included.
    #[serde(default)]
    pub exclude: String,

    /// Free-form sub-kind qualifier carried through from the configuration.
    #[serde(default)]
    pub property: Option<String>,

    /// Characters forbidden anywhere in a name of this type.
    #[serde(default)]
    pub invalid_characters: String,

    /// Characters forbidden as the first character.
    #[serde(default)]
    pub invalid_characters_start: String,

    /// Characters forbidden as the last character.
    #[serde(default)]
    pub invalid_characters_end: String,

    /// Characters forbidden when they appear twice in a row.
    #[serde(default)]
    pub invalid_characters_consecutive: String,

    /// Validation pattern applied after the character and length rules.
    #[serde(default)]
    pub regex: String,

    /// Minimum name length, when the type specifies one.
    #[serde(default)]
    pub length_min: Option<u32>,

    /// Maximum name length, when the type specifies one.
    #[serde(default)]
    pub length_max: Option<u32>,

    /// Whether names may be generated for this type.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl ResourceType {
    /// Create a type with only an identity and short name; every rule field
    /// starts empty. Intended for tests and simple catalogs.
    #[must_use]
    pub fn basic(resource: &str, short_name: &str) -> Self {
        Self {
            resource: resource.to_string(),
            short_name: short_name.to_string(),
            scope: String::new(),
            static_value: String::new(),
            optional: String::new(),
            exclude: String::new(),
            property: None,
            invalid_characters: String::new(),
            invalid_characters_start: String::new(),
            invalid_characters_end: String::new(),
            invalid_characters_consecutive: String::new(),
            regex: String::new(),
            length_min: None,
            length_max: None,
            enabled: true,
        }
    }

    /// The type's static value, when one is configured.
    #[must_use]
    pub fn static_value(&self) -> Option<&str> {
        let trimmed = self.static_value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }

    /// Whether the component is exempt from required-ness for this type.
    #[must_use]
    pub fn is_optional(&self, component_name: &str) -> bool {
        comma_set_contains(&self.optional, component_name)
    }

    /// Whether the component is never included for this type.
    #[must_use]
    pub fn is_excluded(&self, component_name: &str) -> bool {
        comma_set_contains(&self.exclude, component_name)
    }

    /// Whether the delimiter is forbidden by this type's character set.
    #[must_use]
    pub fn forbids_delimiter(&self, delimiter: &Delimiter) -> bool {
        delimiter
            .char()
            .is_some_and(|c| self.invalid_characters.contains(c))
    }

    /// Whether names of this type live in a provider-global namespace.
    #[must_use]
    pub fn is_global_scope(&self) -> bool {
        self.scope.eq_ignore_ascii_case("global")
    }

    /// The provider namespace portion of the resource string,
    /// e.g. `Microsoft.Storage` for `Microsoft.Storage/storageAccounts`.
    #[must_use]
    pub fn provider_namespace(&self) -> &str {
        self.resource
            .split_once('/')
            .map_or(self.resource.as_str(), |(ns, _)| ns)
    }

    /// Whether the given key identifies this type by short name or by the
    /// fully-qualified resource string.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(key) || self.resource.eq_ignore_ascii_case(key)
    }
}

/// Membership test over a comma-separated set of component names, compared
/// in normalized form.
fn comma_set_contains(set: &str, component_name: &str) -> bool {
    let needle = normalize_component_name(component_name);
    set.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .any(|entry| normalize_component_name(entry) == needle)
}
