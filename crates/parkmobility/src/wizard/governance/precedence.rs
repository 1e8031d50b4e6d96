use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::wizard::domain::{GovernanceModelId, GovernanceRef, ImplementationVariation};

/// Classification tier of a governance model relative to a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GovernanceTier {
    Recommended,
    Conditional,
    Unsuitable,
}

impl GovernanceTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recommended => "Aanbevolen",
            Self::Conditional => "Aanbevolen, mits",
            Self::Unsuitable => "Ongeschikt",
        }
    }
}

/// Tier order used by the wizard: unsuitable beats conditional beats recommended.
pub const STANDARD_PRECEDENCE: [GovernanceTier; 3] = [
    GovernanceTier::Unsuitable,
    GovernanceTier::Conditional,
    GovernanceTier::Recommended,
];

/// Raw reference lists, before conflicts between tiers are resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierLists {
    pub recommended: Vec<GovernanceModelId>,
    pub conditional: Vec<GovernanceModelId>,
    pub unsuitable: Vec<GovernanceModelId>,
}

impl TierLists {
    pub fn from_variation(variation: &ImplementationVariation) -> Self {
        Self {
            recommended: ids(&variation.governance_models),
            conditional: ids(&variation.governance_models_mits),
            unsuitable: ids(&variation.governance_models_nietgeschikt),
        }
    }

    /// Direct-on-solution references only know "recommended".
    pub fn recommended_only(references: &[GovernanceRef]) -> Self {
        Self {
            recommended: ids(references),
            ..Self::default()
        }
    }

    pub fn raw(&self, tier: GovernanceTier) -> &[GovernanceModelId] {
        match tier {
            GovernanceTier::Recommended => &self.recommended,
            GovernanceTier::Conditional => &self.conditional,
            GovernanceTier::Unsuitable => &self.unsuitable,
        }
    }

    /// Every referenced id once, in tier order then list order.
    pub fn referenced_ids(&self) -> Vec<&GovernanceModelId> {
        let mut seen = HashSet::new();
        STANDARD_PRECEDENCE
            .iter()
            .flat_map(|tier| self.raw(*tier))
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

fn ids(references: &[GovernanceRef]) -> Vec<GovernanceModelId> {
    references
        .iter()
        .map(|reference| reference.id().clone())
        .collect()
}

/// Disjoint tiers after precedence resolution, ids in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedTiers {
    pub recommended: Vec<GovernanceModelId>,
    pub conditional: Vec<GovernanceModelId>,
    pub unsuitable: Vec<GovernanceModelId>,
}

impl ResolvedTiers {
    pub fn get(&self, tier: GovernanceTier) -> &[GovernanceModelId] {
        match tier {
            GovernanceTier::Recommended => &self.recommended,
            GovernanceTier::Conditional => &self.conditional,
            GovernanceTier::Unsuitable => &self.unsuitable,
        }
    }

    fn slot(&mut self, tier: GovernanceTier) -> &mut Vec<GovernanceModelId> {
        match tier {
            GovernanceTier::Recommended => &mut self.recommended,
            GovernanceTier::Conditional => &mut self.conditional,
            GovernanceTier::Unsuitable => &mut self.unsuitable,
        }
    }

    pub fn tier_of(&self, id: &GovernanceModelId) -> Option<GovernanceTier> {
        STANDARD_PRECEDENCE
            .into_iter()
            .find(|tier| self.get(*tier).contains(id))
    }
}

/// Resolves overlapping tier lists. Tiers are walked highest precedence
/// first; every id a tier lists, resolved or not, is withheld from all lower
/// tiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceResolver {
    order: Vec<GovernanceTier>,
}

impl Default for PrecedenceResolver {
    fn default() -> Self {
        Self::new(STANDARD_PRECEDENCE.to_vec())
    }
}

impl PrecedenceResolver {
    /// Tiers missing from `order` resolve to empty; repeated tiers count once.
    pub fn new(order: Vec<GovernanceTier>) -> Self {
        let mut seen = HashSet::new();
        let order = order.into_iter().filter(|tier| seen.insert(*tier)).collect();
        Self { order }
    }

    pub fn order(&self) -> &[GovernanceTier] {
        &self.order
    }

    pub fn resolve(&self, lists: &TierLists) -> ResolvedTiers {
        let mut resolved = ResolvedTiers::default();
        let mut claimed: HashSet<&GovernanceModelId> = HashSet::new();

        for tier in &self.order {
            let raw = lists.raw(*tier);
            let slot = resolved.slot(*tier);
            for id in raw {
                if !claimed.contains(id) && !slot.contains(id) {
                    slot.push(id.clone());
                }
            }
            claimed.extend(raw.iter());
        }

        resolved
    }
}
