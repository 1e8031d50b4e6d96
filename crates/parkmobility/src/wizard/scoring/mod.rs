//! Solution ranking against selected motivations, traffic types and pickup
//! preference.

mod ordering;
mod registry;
mod rules;

pub use ordering::{compare_scored, UNKNOWN_CATEGORY};
pub use registry::{ReasonBinding, ScoreFieldRegistry};
pub use rules::{
    filter_candidates, pickup_preference_match, traffic_match_score, FULL_TRAFFIC_MATCH_BONUS,
};

use indexmap::IndexMap;
use serde::Serialize;

use crate::wizard::domain::{
    MobilitySolution, MotivationReason, PickupPreference, ReasonId, SelectionState, TrafficType,
};

/// Filters active for one ranking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankingCriteria {
    pub active_reason_ids: Vec<ReasonId>,
    pub traffic_types: Vec<TrafficType>,
    pub pickup_preference: Option<PickupPreference>,
}

impl RankingCriteria {
    pub fn from_selection(selection: &SelectionState) -> Self {
        Self {
            active_reason_ids: selection.selected_reasons.clone(),
            traffic_types: selection.business_park.traffic_types.clone(),
            pickup_preference: selection.employee_pickup_preference,
        }
    }
}

/// Stateless scorer over a reasons catalog.
pub struct SolutionScorer {
    registry: ScoreFieldRegistry,
}

impl SolutionScorer {
    pub fn new(registry: ScoreFieldRegistry) -> Self {
        Self { registry }
    }

    pub fn from_catalog(reasons: &[MotivationReason], solutions: &[MobilitySolution]) -> Self {
        Self::new(ScoreFieldRegistry::build(reasons, solutions))
    }

    pub fn registry(&self) -> &ScoreFieldRegistry {
        &self.registry
    }

    pub fn score(
        &self,
        solution: &MobilitySolution,
        criteria: &RankingCriteria,
    ) -> ScoredSolution {
        let (contributing_reasons, score) =
            rules::score_contributions(solution, &criteria.active_reason_ids, &self.registry);

        ScoredSolution {
            solution: solution.clone(),
            score,
            traffic_match: traffic_match_score(&solution.traffic_types, &criteria.traffic_types),
            pickup_match: pickup_preference_match(
                &solution.pickup_options,
                criteria.pickup_preference,
            ),
            contributing_reasons,
        }
    }

    /// Scores and orders `solutions`. The caller passes the candidate set,
    /// see [`filter_candidates`].
    pub fn rank(
        &self,
        solutions: &[MobilitySolution],
        criteria: &RankingCriteria,
    ) -> RankedSolutions {
        let mut items: Vec<ScoredSolution> = solutions
            .iter()
            .map(|solution| self.score(solution, criteria))
            .collect();
        ordering::sort_scored(&mut items);
        RankedSolutions { items }
    }
}

/// One solution with its ranking keys and per-reason breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSolution {
    pub solution: MobilitySolution,
    pub score: f64,
    pub traffic_match: u32,
    pub pickup_match: bool,
    pub contributing_reasons: IndexMap<ReasonId, f64>,
}

/// Solutions in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedSolutions {
    pub items: Vec<ScoredSolution>,
}

impl RankedSolutions {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoredSolution> {
        self.items.iter()
    }

    /// Ranking split by solution category, `"Onbekend"` for uncategorized.
    pub fn grouped_by_category(&self) -> IndexMap<String, Vec<ScoredSolution>> {
        ordering::group_by_category(&self.items)
    }
}
