//! Governance model classification for a chosen implementation variant.

mod precedence;
mod selection;

pub use precedence::{
    GovernanceTier, PrecedenceResolver, ResolvedTiers, TierLists, STANDARD_PRECEDENCE,
};
pub use selection::select_active_variant;

use serde::Serialize;
use tracing::warn;

use crate::wizard::domain::{
    GovernanceModel, GovernanceModelId, GovernanceRef, ImplementationVariation,
};

/// Stateless classifier applying a precedence resolver to reference lists.
#[derive(Debug, Clone, Default)]
pub struct GovernanceClassifier {
    resolver: PrecedenceResolver,
}

impl GovernanceClassifier {
    pub fn new(resolver: PrecedenceResolver) -> Self {
        Self { resolver }
    }

    pub fn classify_variation(
        &self,
        variation: &ImplementationVariation,
        catalog: &[GovernanceModel],
        current: Option<&GovernanceModelId>,
    ) -> GovernanceClassification {
        self.classify(&TierLists::from_variation(variation), catalog, current)
    }

    /// Direct-on-solution references: recommended or not, nothing in between.
    pub fn classify_legacy(
        &self,
        recommended: &[GovernanceRef],
        catalog: &[GovernanceModel],
        current: Option<&GovernanceModelId>,
    ) -> GovernanceClassification {
        self.classify(&TierLists::recommended_only(recommended), catalog, current)
    }

    pub fn classify(
        &self,
        lists: &TierLists,
        catalog: &[GovernanceModel],
        current: Option<&GovernanceModelId>,
    ) -> GovernanceClassification {
        let resolved = self.resolver.resolve(lists);
        let mut classification = GovernanceClassification::default();

        for model in catalog {
            let bucket = match resolved.tier_of(&model.id) {
                Some(GovernanceTier::Recommended) => &mut classification.recommended,
                Some(GovernanceTier::Conditional) => &mut classification.conditional,
                Some(GovernanceTier::Unsuitable) => &mut classification.unsuitable,
                None => &mut classification.other,
            };
            bucket.push(model.clone());
        }

        classification.dangling_references = lists
            .referenced_ids()
            .into_iter()
            .filter(|id| !catalog.iter().any(|model| &model.id == *id))
            .cloned()
            .collect();
        if !classification.dangling_references.is_empty() {
            warn!(
                dangling = ?classification.dangling_references,
                "governance references point at models missing from the catalog"
            );
        }

        if let Some(model) = current.and_then(|id| catalog.iter().find(|model| &model.id == id)) {
            classification.current_model_tier = resolved.tier_of(&model.id);
            classification.current_model_is_recommended =
                classification.current_model_tier == Some(GovernanceTier::Recommended);
            classification.current_model = Some(model.clone());
        }

        classification
    }
}

/// Catalog partitioned into four tiers. Every catalog model lands in exactly
/// one of `recommended`, `conditional`, `unsuitable` and `other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GovernanceClassification {
    pub recommended: Vec<GovernanceModel>,
    pub conditional: Vec<GovernanceModel>,
    pub unsuitable: Vec<GovernanceModel>,
    pub other: Vec<GovernanceModel>,
    pub current_model: Option<GovernanceModel>,
    pub current_model_is_recommended: bool,
    pub current_model_tier: Option<GovernanceTier>,
    pub dangling_references: Vec<GovernanceModelId>,
}

impl GovernanceClassification {
    pub fn tier_models(&self, tier: GovernanceTier) -> &[GovernanceModel] {
        match tier {
            GovernanceTier::Recommended => &self.recommended,
            GovernanceTier::Conditional => &self.conditional,
            GovernanceTier::Unsuitable => &self.unsuitable,
        }
    }

    /// Lists for display: the current model is shown on its own and left out
    /// of the tier lists.
    pub fn presentation(&self) -> GovernancePresentation {
        let without_current = |models: &[GovernanceModel]| -> Vec<GovernanceModel> {
            models
                .iter()
                .filter(|model| {
                    self.current_model
                        .as_ref()
                        .map_or(true, |current| current.id != model.id)
                })
                .cloned()
                .collect()
        };

        GovernancePresentation {
            current_model: self.current_model.clone(),
            current_model_is_recommended: self.current_model_is_recommended,
            recommended: without_current(&self.recommended),
            conditional: without_current(&self.conditional),
            unsuitable: without_current(&self.unsuitable),
            other: without_current(&self.other),
        }
    }
}

/// Display lists with the current model split off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GovernancePresentation {
    pub current_model: Option<GovernanceModel>,
    pub current_model_is_recommended: bool,
    pub recommended: Vec<GovernanceModel>,
    pub conditional: Vec<GovernanceModel>,
    pub unsuitable: Vec<GovernanceModel>,
    pub other: Vec<GovernanceModel>,
}
