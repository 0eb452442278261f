//! Provider API-version mapping for global availability checks.

/// API versions for the provider namespaces that expose a name-availability
/// endpoint. Versions are pinned, not discovered at runtime.
const AVAILABILITY_API_VERSIONS: &[(&str, &str)] = &[
    ("Microsoft.ApiManagement", "2022-08-01"),
    ("Microsoft.AppConfiguration", "2023-03-01"),
    ("Microsoft.Batch", "2022-10-01"),
    ("Microsoft.CognitiveServices", "2023-05-01"),
    ("Microsoft.ContainerRegistry", "2023-01-01-preview"),
    ("Microsoft.DBforMariaDB", "2018-06-01"),
    ("Microsoft.DBforMySQL", "2017-12-01"),
    ("Microsoft.DBforPostgreSQL", "2017-12-01"),
    ("Microsoft.DataFactory", "2018-06-01"),
    ("Microsoft.DocumentDB", "2023-04-15"),
    ("Microsoft.EventHub", "2021-11-01"),
    ("Microsoft.KeyVault", "2022-07-01"),
    ("Microsoft.Relay", "2021-11-01"),
    ("Microsoft.Search", "2022-09-01"),
    ("Microsoft.ServiceBus", "2021-11-01"),
    ("Microsoft.SignalRService", "2023-02-01"),
    ("Microsoft.Sql", "2022-05-01-preview"),
    ("Microsoft.Storage", "2023-01-01"),
    ("Microsoft.Web", "2022-09-01"),
];

/// Look up the pinned availability-check API version for a provider
/// namespace. Returns `None` for providers without a name-availability
/// endpoint; callers fall back to the namespace-scoped existence check.
#[must_use]
pub fn availability_api_version(provider_namespace: &str) -> Option<&'static str> {
    AVAILABILITY_API_VERSIONS
        .iter()
        .find(|(ns, _)| ns.eq_ignore_ascii_case(provider_namespace))
        .map(|(_, version)| *version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_provider_resolves() {
        assert_eq!(
            availability_api_version("Microsoft.Storage"),
            Some("2023-01-01")
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(
            availability_api_version("microsoft.keyvault"),
            Some("2022-07-01")
        );
    }

    #[test]
    fn test_unknown_provider_is_none() {
        assert_eq!(availability_api_version("Microsoft.Unknown"), None);
    }
}
