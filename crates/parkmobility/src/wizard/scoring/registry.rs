use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use crate::wizard::domain::{MobilitySolution, MotivationReason, ReasonId};

const DEFAULT_WEIGHT: f64 = 1.0;

/// How one motivation reason reads a solution's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ReasonBinding {
    pub identifier: Option<String>,
    pub weight: f64,
}

/// Reason id to score-field mapping, derived from the current reasons catalog.
///
/// Built per request from the content it is handed, so there is no shared
/// lookup table to go stale between catalog refreshes.
#[derive(Debug, Clone, Default)]
pub struct ScoreFieldRegistry {
    bindings: BTreeMap<ReasonId, ReasonBinding>,
    unknown_identifiers: BTreeSet<String>,
}

impl ScoreFieldRegistry {
    /// Bindings for every reason, checking identifiers against the numeric
    /// fields present on `solutions`. Identifiers no solution carries are
    /// logged and still bound; they read as zero.
    pub fn build(reasons: &[MotivationReason], solutions: &[MobilitySolution]) -> Self {
        let known_fields: BTreeSet<&str> = solutions
            .iter()
            .flat_map(|solution| solution.scores.keys().map(String::as_str))
            .collect();

        let mut registry = Self::from_reasons(reasons);
        if solutions.is_empty() {
            return registry;
        }

        for (reason_id, binding) in &registry.bindings {
            let Some(identifier) = &binding.identifier else {
                continue;
            };
            if !known_fields.contains(identifier.as_str()) {
                warn!(
                    reason = %reason_id,
                    identifier = %identifier,
                    "reason identifier matches no numeric solution field"
                );
                registry.unknown_identifiers.insert(identifier.clone());
            }
        }

        registry
    }

    /// Bindings without checking identifiers against solution fields.
    pub fn from_reasons(reasons: &[MotivationReason]) -> Self {
        let bindings = reasons
            .iter()
            .map(|reason| {
                let identifier = reason
                    .identifier
                    .as_deref()
                    .map(str::trim)
                    .filter(|identifier| !identifier.is_empty())
                    .map(str::to_string);
                let weight = reason
                    .weight
                    .filter(|weight| weight.is_finite() && *weight != 0.0)
                    .unwrap_or(DEFAULT_WEIGHT);
                (reason.id.clone(), ReasonBinding { identifier, weight })
            })
            .collect();

        Self {
            bindings,
            unknown_identifiers: BTreeSet::new(),
        }
    }

    pub fn binding(&self, reason_id: &ReasonId) -> Option<&ReasonBinding> {
        self.bindings.get(reason_id)
    }

    /// Unweighted score the reason reads from the solution.
    pub fn raw_score(&self, reason_id: &ReasonId, solution: &MobilitySolution) -> f64 {
        self.binding(reason_id)
            .and_then(|binding| binding.identifier.as_deref())
            .map(|identifier| solution.score_field(identifier))
            .unwrap_or(0.0)
    }

    /// Weighted contribution of one reason to a solution's score.
    pub fn contribution(&self, reason_id: &ReasonId, solution: &MobilitySolution) -> f64 {
        match self.binding(reason_id) {
            Some(binding) if binding.identifier.is_some() => {
                self.raw_score(reason_id, solution) * binding.weight
            }
            _ => 0.0,
        }
    }

    pub fn unknown_identifiers(&self) -> impl Iterator<Item = &str> {
        self.unknown_identifiers.iter().map(String::as_str)
    }
}
