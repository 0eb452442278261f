//! Structured outcomes returned across the engine boundary.
//!
//! Failures are always carried in these types as a success flag plus a
//! message; no error enum crosses out of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One component's contribution to a composed name, in composition order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentContribution {
    /// Component name, e.g. `ResourceEnvironment`.
    pub component: String,

    /// Value label: `"<DisplayName> (<shortValue>)"` for built-ins, the raw
    /// value for custom and free-text components.
    pub value: String,
}

impl ComponentContribution {
    /// Create a contribution entry.
    #[must_use]
    pub fn new(component: &str, value: &str) -> Self {
        Self {
            component: component.to_string(),
            value: value.to_string(),
        }
    }
}

/// Result of validating a candidate name against a resource type's rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether the name passed every rule.
    pub valid: bool,

    /// The candidate, possibly normalized (e.g. trailing delimiter trimmed).
    /// Supersedes the composed name when non-empty.
    pub name: String,

    /// Why validation failed, when it did.
    pub message: Option<String>,
}

impl ValidationOutcome {
    /// A passing outcome carrying the (possibly normalized) name.
    #[must_use]
    pub fn valid(name: String) -> Self {
        Self {
            valid: true,
            name,
            message: None,
        }
    }

    /// A failing outcome with the reason.
    #[must_use]
    pub fn invalid(name: &str, message: String) -> Self {
        Self {
            valid: false,
            name: name.to_string(),
            message: Some(message),
        }
    }
}

/// Strategy applied when a candidate name collides with an existing resource.
///
/// Each strategy is a terminal, self-contained procedure; they do not chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictStrategy {
    /// Report the conflict and stop without consulting the oracle.
    Fail,
    /// Keep the name, attach an advisory warning about the conflict.
    NotifyOnly,
    /// Count the trailing instance number up until a free name is found.
    #[default]
    AutoIncrement,
    /// Append random lowercase-alphanumeric suffixes until a free name is
    /// found.
    SuffixRandom,
}

impl std::fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::NotifyOnly => write!(f, "notify-only"),
            Self::AutoIncrement => write!(f, "auto-increment"),
            Self::SuffixRandom => write!(f, "suffix-random"),
        }
    }
}

/// Outcome of one conflict-resolution call. Created fresh per call and never
/// persisted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictResolutionOutcome {
    /// The colliding candidate the resolver was given.
    pub original_name: String,

    /// The resolved name. Equal to `original_name` on failure, except that
    /// AutoIncrement exhaustion keeps the last tried candidate for
    /// diagnostics.
    pub final_name: String,

    /// Strategy that produced this outcome.
    pub strategy: ConflictStrategy,

    /// Whether a usable name was produced.
    pub success: bool,

    /// Oracle attempts consumed (1-based). Zero means the oracle was never
    /// consulted.
    pub attempts: u32,

    /// Advisory text attached on success paths when warnings are enabled.
    pub warning: Option<String>,

    /// Failure description: exhaustion reports the attempt count and last
    /// candidate, oracle failures are reported distinctly.
    pub error_message: Option<String>,
}

/// The pipeline's response to one naming request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedName {
    /// Whether a name was produced.
    pub success: bool,

    /// The generated name; empty on failure.
    pub resource_name: String,

    /// Accumulated informational, warning, or failure text.
    pub message: String,

    /// Per-component breakdown of the composed name.
    #[serde(default)]
    pub contributions: Vec<ComponentContribution>,

    /// Conflict-resolution bookkeeping, when resolution ran.
    #[serde(default)]
    pub resolution: Option<ConflictResolutionOutcome>,
}

impl GeneratedName {
    /// A failure response carrying only the accumulated message.
    #[must_use]
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            resource_name: String::new(),
            message,
            contributions: Vec::new(),
            resolution: None,
        }
    }
}

/// Entry handed to the external naming-history store after a successful
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedNameRecord {
    /// Record identifier.
    pub id: Uuid,

    /// When the name was generated.
    pub created_on: DateTime<Utc>,

    /// The accepted name.
    pub resource_name: String,

    /// Short name of the resource type the name was generated for.
    pub resource_type: String,

    /// Per-component breakdown.
    pub components: Vec<ComponentContribution>,

    /// Requesting user, when supplied.
    pub requested_by: Option<String>,

    /// The response message that accompanied the name.
    pub message: String,
}

impl GeneratedNameRecord {
    /// Create a record for an accepted name.
    #[must_use]
    pub fn new(
        resource_name: &str,
        resource_type: &str,
        components: Vec<ComponentContribution>,
        requested_by: Option<String>,
        message: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_on: Utc::now(),
            resource_name: resource_name.to_string(),
            resource_type: resource_type.to_string(),
            components,
            requested_by,
            message: message.to_string(),
        }
    }
}
