use indexmap::IndexMap;

use super::registry::ScoreFieldRegistry;
use crate::wizard::domain::{MobilitySolution, PickupPreference, ReasonId, TrafficType};

/// Bonus for a solution that serves every traffic type the park declared.
/// Large enough that full coverage outranks any base score difference.
pub const FULL_TRAFFIC_MATCH_BONUS: u32 = 1000;

/// Weighted contribution per active reason and their sum.
pub(crate) fn score_contributions(
    solution: &MobilitySolution,
    active_reason_ids: &[ReasonId],
    registry: &ScoreFieldRegistry,
) -> (IndexMap<ReasonId, f64>, f64) {
    let mut contributions = IndexMap::with_capacity(active_reason_ids.len());
    for reason_id in active_reason_ids {
        if contributions.contains_key(reason_id) {
            continue;
        }
        contributions.insert(reason_id.clone(), registry.contribution(reason_id, solution));
    }

    let total: f64 = contributions.values().sum();
    (contributions, total)
}

/// `1000 + matches` when the solution covers every active traffic type,
/// otherwise the plain number of matches. Each traffic type counts once on
/// either side.
pub fn traffic_match_score(solution_types: &[TrafficType], active_types: &[TrafficType]) -> u32 {
    if active_types.is_empty() || solution_types.is_empty() {
        return 0;
    }

    let required = TrafficType::ALL
        .iter()
        .filter(|traffic_type| active_types.contains(traffic_type))
        .count();
    let matches = TrafficType::ALL
        .iter()
        .filter(|traffic_type| {
            active_types.contains(traffic_type) && solution_types.contains(traffic_type)
        })
        .count();

    if matches == required {
        FULL_TRAFFIC_MATCH_BONUS + matches as u32
    } else {
        matches as u32
    }
}

/// Solutions without pickup options, or requests without a preference, match.
pub fn pickup_preference_match(
    pickup_options: &[String],
    preference: Option<PickupPreference>,
) -> bool {
    let Some(preference) = preference else {
        return true;
    };
    if pickup_options.is_empty() {
        return true;
    }
    let Some(needle) = preference.needle() else {
        return true;
    };

    pickup_options
        .iter()
        .any(|option| option.to_lowercase().contains(needle))
}

/// Candidates for ranking: with active reasons, only solutions scoring
/// strictly positive on at least one of them; otherwise every solution.
pub fn filter_candidates(
    solutions: &[MobilitySolution],
    active_reason_ids: &[ReasonId],
    registry: &ScoreFieldRegistry,
) -> Vec<MobilitySolution> {
    if active_reason_ids.is_empty() {
        return solutions.to_vec();
    }

    solutions
        .iter()
        .filter(|solution| {
            active_reason_ids
                .iter()
                .any(|reason_id| registry.raw_score(reason_id, solution) > 0.0)
        })
        .cloned()
        .collect()
}
