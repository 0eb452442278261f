//! Conflict resolution strategies.
//!
//! When a candidate name collides with an existing resource, one of four
//! terminal strategies decides what happens next. Strategies never chain
//! and never re-validate; the caller picks one per request via
//! `ResolutionSettings`.

use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;

use crate::config::ResolutionSettings;
use crate::domain::{ConflictResolutionOutcome, ConflictStrategy, ResourceType};
use crate::service::existence::ExistenceChecker;

/// Trailing number preceded by a hyphen, e.g. `rg-app-001`.
static HYPHENATED_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-(\d+)$").unwrap());

/// Bare trailing number, e.g. `stor99`.
static BARE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)$").unwrap());

/// Hard ceiling on random-suffix oracle calls, independent of
/// `max_attempts`.
const RANDOM_SUFFIX_ATTEMPT_CAP: u32 = 50;

/// Length of the appended random suffix.
const RANDOM_SUFFIX_LEN: usize = 6;

/// Resolve a name collision using the configured strategy.
///
/// The returned outcome is self-describing: `success` plus `attempts`
/// (oracle calls consumed; zero means the oracle was never asked), with
/// warnings attached only when `settings.include_warnings`.
pub async fn resolve(
    checker: &ExistenceChecker,
    original_name: &str,
    resource_type: &ResourceType,
    settings: &ResolutionSettings,
) -> ConflictResolutionOutcome {
    match settings.strategy {
        ConflictStrategy::Fail => fail(original_name),
        ConflictStrategy::NotifyOnly => {
            notify_only(checker, original_name, resource_type, settings).await
        }
        ConflictStrategy::AutoIncrement => {
            auto_increment(checker, original_name, resource_type, settings).await
        }
        ConflictStrategy::SuffixRandom => {
            suffix_random(checker, original_name, resource_type, settings).await
        }
    }
}

fn base_outcome(original_name: &str, strategy: ConflictStrategy) -> ConflictResolutionOutcome {
    ConflictResolutionOutcome {
        original_name: original_name.to_string(),
        final_name: original_name.to_string(),
        strategy,
        success: false,
        attempts: 0,
        warning: None,
        error_message: None,
    }
}

/// Fast-fail: the caller already knows the name conflicts, so no oracle
/// call is made.
fn fail(original_name: &str) -> ConflictResolutionOutcome {
    let mut outcome = base_outcome(original_name, ConflictStrategy::Fail);
    outcome.error_message = Some(
        "a resource with this name already exists and conflict resolution is set to fail"
            .to_string(),
    );
    outcome
}

/// Advisory-only: one existence check, the name is handed back unchanged
/// either way.
async fn notify_only(
    checker: &ExistenceChecker,
    original_name: &str,
    resource_type: &ResourceType,
    settings: &ResolutionSettings,
) -> ConflictResolutionOutcome {
    let mut outcome = base_outcome(original_name, ConflictStrategy::NotifyOnly);
    outcome.success = true;
    outcome.attempts = 1;

    match checker.check(original_name, resource_type).await {
        Ok(check) if check.exists => {
            if settings.include_warnings {
                outcome.warning = Some(if check.conflicting_ids.is_empty() {
                    format!("name {original_name:?} is already in use")
                } else {
                    format!(
                        "name {original_name:?} is already in use by {} existing resource(s)",
                        check.conflicting_ids.len()
                    )
                });
            }
        }
        Ok(_) => {}
        Err(e) => {
            // The name still goes out unchanged, but the unknown conflict
            // status is surfaced rather than dropped.
            outcome.error_message =
                Some(format!("existence check failed, conflict status unknown: {e}"));
        }
    }

    outcome
}

async fn auto_increment(
    checker: &ExistenceChecker,
    original_name: &str,
    resource_type: &ResourceType,
    settings: &ResolutionSettings,
) -> ConflictResolutionOutcome {
    let mut outcome = base_outcome(original_name, ConflictStrategy::AutoIncrement);

    let Some(number) = TrailingNumber::extract(original_name) else {
        outcome.error_message = Some(format!(
            "no instance number pattern found in {original_name:?}"
        ));
        return outcome;
    };

    let mut last_candidate = original_name.to_string();
    let mut attempts_used = 0;

    for attempt in 1..=settings.max_attempts {
        let Some(next) = number.value.checked_add(u128::from(attempt)) else {
            break;
        };
        let candidate = number.candidate(next);
        last_candidate.clone_from(&candidate);
        attempts_used = attempt;

        match checker.check(&candidate, resource_type).await {
            Ok(check) if !check.exists => {
                outcome.success = true;
                outcome.final_name = candidate;
                outcome.attempts = attempt;
                if settings.include_warnings {
                    outcome.warning = Some(format!(
                        "name {original_name:?} was taken; incremented to {:?} after {attempt} check(s)",
                        outcome.final_name
                    ));
                }
                return outcome;
            }
            Ok(_) => {}
            Err(e) => {
                outcome.attempts = attempt;
                outcome.error_message = Some(format!(
                    "existence check failed on attempt {attempt}: {e}"
                ));
                return outcome;
            }
        }
    }

    // Exhausted: keep the last tried candidate for diagnostics.
    outcome.attempts = attempts_used;
    outcome.final_name.clone_from(&last_candidate);
    outcome.error_message = Some(format!(
        "no available name found after {attempts_used} attempt(s); last tried {last_candidate:?}"
    ));
    outcome
}

async fn suffix_random(
    checker: &ExistenceChecker,
    original_name: &str,
    resource_type: &ResourceType,
    settings: &ResolutionSettings,
) -> ConflictResolutionOutcome {
    let mut outcome = base_outcome(original_name, ConflictStrategy::SuffixRandom);
    let bound = settings.max_attempts.min(RANDOM_SUFFIX_ATTEMPT_CAP);
    let mut attempts_used = 0;

    for attempt in 1..=bound {
        let candidate = format!("{original_name}-{}", random_suffix(RANDOM_SUFFIX_LEN));
        attempts_used = attempt;

        match checker.check(&candidate, resource_type).await {
            Ok(check) if !check.exists => {
                outcome.success = true;
                outcome.final_name = candidate;
                outcome.attempts = attempt;
                if settings.include_warnings {
                    outcome.warning = Some(format!(
                        "name {original_name:?} was taken; appended a random suffix after {attempt} check(s)"
                    ));
                }
                return outcome;
            }
            Ok(_) => {}
            Err(e) => {
                outcome.attempts = attempt;
                outcome.error_message = Some(format!(
                    "existence check failed on attempt {attempt}: {e}"
                ));
                return outcome;
            }
        }
    }

    // Exhausted: unlike AutoIncrement, the original name is handed back.
    outcome.attempts = attempts_used;
    outcome.error_message = Some(format!(
        "no available name found after {attempts_used} random suffix attempt(s)"
    ));
    outcome
}

/// A trailing instance number and how it was attached.
struct TrailingNumber {
    prefix: String,
    value: u128,
    width: usize,
    hyphenated: bool,
}

impl TrailingNumber {
    /// Extract the trailing number, preferring the hyphen-delimited form.
    ///
    /// A digit run too large for `u128` is treated as no usable pattern.
    fn extract(name: &str) -> Option<Self> {
        for (pattern, hyphenated) in [(&HYPHENATED_SUFFIX, true), (&BARE_SUFFIX, false)] {
            if let Some(caps) = pattern.captures(name) {
                let whole = caps.get(0)?;
                let digits = caps.get(1)?.as_str();
                return digits.parse::<u128>().ok().map(|value| Self {
                    prefix: name[..whole.start()].to_string(),
                    value,
                    width: digits.len(),
                    hyphenated,
                });
            }
        }
        None
    }

    /// Render a candidate for the given number, zero-padded to the original
    /// width. Numbers that outgrow the width produce a wider string.
    fn candidate(&self, value: u128) -> String {
        let padded = format!("{value:0width$}", width = self.width);
        if self.hyphenated {
            format!("{}-{padded}", self.prefix)
        } else {
            format!("{}{padded}", self.prefix)
        }
    }
}

/// Generate random lowercase alphanumeric characters.
fn random_suffix(len: usize) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();

    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
