//! Candidate name validation against resource type rules.
//!
//! Runs once after composition. Rules apply in a fixed order: character
//! rules, then length bounds, then the type regex. The first failure wins;
//! a name that is too long is rejected, never truncated.

use crate::domain::{Delimiter, ResourceType, ValidationOutcome};

/// Validate a composed candidate against its resource type's rules.
///
/// A trailing delimiter left over from composition is trimmed before any
/// rule runs, and the trimmed name is the one returned. Callers adopt the
/// returned name whether or not the outcome is valid.
#[must_use]
pub fn validate(resource_type: &ResourceType, name: &str, delimiter: Delimiter) -> ValidationOutcome {
    let name = trim_trailing_delimiter(name, delimiter);

    if let Some(c) = first_forbidden(&name, &resource_type.invalid_characters) {
        return ValidationOutcome::invalid(
            &name,
            format!("name contains invalid character {c:?}"),
        );
    }

    if let Some(c) = name
        .chars()
        .next()
        .filter(|c| resource_type.invalid_characters_start.contains(*c))
    {
        return ValidationOutcome::invalid(&name, format!("name must not start with {c:?}"));
    }

    if let Some(c) = name
        .chars()
        .last()
        .filter(|c| resource_type.invalid_characters_end.contains(*c))
    {
        return ValidationOutcome::invalid(&name, format!("name must not end with {c:?}"));
    }

    if let Some(c) = first_consecutive(&name, &resource_type.invalid_characters_consecutive) {
        return ValidationOutcome::invalid(
            &name,
            format!("name must not repeat {c:?} consecutively"),
        );
    }

    #[allow(clippy::cast_possible_truncation)]
    let length = name.chars().count() as u32;
    if let Some(min) = resource_type.length_min {
        if length < min {
            return ValidationOutcome::invalid(
                &name,
                format!("name is {length} characters, minimum is {min}"),
            );
        }
    }
    if let Some(max) = resource_type.length_max {
        if length > max {
            return ValidationOutcome::invalid(
                &name,
                format!("name is {length} characters, maximum is {max}"),
            );
        }
    }

    if !resource_type.regex.trim().is_empty() {
        match regex::Regex::new(&resource_type.regex) {
            Ok(pattern) => {
                if !pattern.is_match(&name) {
                    return ValidationOutcome::invalid(
                        &name,
                        format!(
                            "name does not match the {} naming pattern",
                            resource_type.short_name
                        ),
                    );
                }
            }
            Err(e) => {
                return ValidationOutcome::invalid(
                    &name,
                    format!(
                        "naming pattern for {} is not a valid regex: {e}",
                        resource_type.short_name
                    ),
                );
            }
        }
    }

    ValidationOutcome::valid(name)
}

/// Drop one trailing delimiter left behind by an empty final component.
fn trim_trailing_delimiter(name: &str, delimiter: Delimiter) -> String {
    match delimiter.char() {
        Some(c) => name.strip_suffix(c).unwrap_or(name).to_string(),
        None => name.to_string(),
    }
}

fn first_forbidden(name: &str, forbidden: &str) -> Option<char> {
    name.chars().find(|c| forbidden.contains(*c))
}

fn first_consecutive(name: &str, watched: &str) -> Option<char> {
    if watched.is_empty() {
        return None;
    }
    let mut previous = None;
    for c in name.chars() {
        if previous == Some(c) && watched.contains(c) {
            return Some(c);
        }
        previous = Some(c);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict_type() -> ResourceType {
        let mut rtype = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
        rtype.invalid_characters = "-_.".to_string();
        rtype.length_min = Some(3);
        rtype.length_max = Some(24);
        rtype.regex = "^[a-z0-9]+$".to_string();
        rtype
    }

    #[test]
    fn test_clean_name_passes() {
        let outcome = validate(&strict_type(), "stdevapp001", Delimiter::Hyphen);
        assert!(outcome.valid);
        assert_eq!(outcome.name, "stdevapp001");
        assert!(outcome.message.is_none());
    }

    #[test]
    fn test_trailing_delimiter_is_trimmed_before_rules() {
        let rtype = ResourceType::basic("Microsoft.Compute/virtualMachines", "vm");
        let outcome = validate(&rtype, "vm-prod-", Delimiter::Hyphen);
        assert!(outcome.valid);
        assert_eq!(outcome.name, "vm-prod");
    }

    #[test]
    fn test_forbidden_character_is_reported() {
        let outcome = validate(&strict_type(), "st_dev", Delimiter::Hyphen);
        assert!(!outcome.valid);
        assert!(outcome.message.unwrap().contains("invalid character"));
    }

    #[test]
    fn test_start_and_end_rules() {
        let mut rtype = ResourceType::basic("Microsoft.Compute/virtualMachines", "vm");
        rtype.invalid_characters_start = "0123456789".to_string();
        rtype.invalid_characters_end = "-".to_string();

        let leading = validate(&rtype, "1vm-prod", Delimiter::None);
        assert!(!leading.valid);
        assert!(leading.message.unwrap().contains("start"));

        let trailing = validate(&rtype, "vm-prod-", Delimiter::None);
        assert!(!trailing.valid);
        assert!(trailing.message.unwrap().contains("end"));
    }

    #[test]
    fn test_consecutive_rule() {
        let mut rtype = ResourceType::basic("Microsoft.Network/dnsZones", "dns");
        rtype.invalid_characters_consecutive = ".".to_string();

        let outcome = validate(&rtype, "dns..zone", Delimiter::Hyphen);
        assert!(!outcome.valid);
        assert!(outcome.message.unwrap().contains("consecutively"));

        assert!(validate(&rtype, "dns.zone", Delimiter::Hyphen).valid);
    }

    #[test]
    fn test_length_bounds_reject_without_truncating() {
        let short = validate(&strict_type(), "st", Delimiter::Hyphen);
        assert!(!short.valid);
        assert_eq!(short.name, "st");
        assert!(short.message.unwrap().contains("minimum"));

        let long_name = "st".repeat(13);
        let long = validate(&strict_type(), &long_name, Delimiter::Hyphen);
        assert!(!long.valid);
        assert_eq!(long.name, long_name);
        assert!(long.message.unwrap().contains("maximum"));
    }

    #[test]
    fn test_regex_mismatch_is_reported() {
        let outcome = validate(&strict_type(), "stDevApp", Delimiter::Hyphen);
        assert!(!outcome.valid);
        assert!(outcome.message.unwrap().contains("naming pattern"));
    }

    #[test]
    fn test_broken_regex_is_a_configuration_failure() {
        let mut rtype = ResourceType::basic("Microsoft.Storage/storageAccounts", "st");
        rtype.regex = "[unclosed".to_string();

        let outcome = validate(&rtype, "stdevapp", Delimiter::Hyphen);
        assert!(!outcome.valid);
        assert!(outcome.message.unwrap().contains("not a valid regex"));
    }

    #[test]
    fn test_rule_order_reports_characters_before_length() {
        let outcome = validate(&strict_type(), "s_", Delimiter::Hyphen);
        assert!(!outcome.valid);
        assert!(outcome.message.unwrap().contains("invalid character"));
    }
}
