use std::cmp::Ordering;

use indexmap::IndexMap;

use super::ScoredSolution;

/// Group label for solutions without a category.
pub const UNKNOWN_CATEGORY: &str = "Onbekend";

/// Pickup match first, then traffic match, then score; all descending.
pub fn compare_scored(a: &ScoredSolution, b: &ScoredSolution) -> Ordering {
    b.pickup_match
        .cmp(&a.pickup_match)
        .then_with(|| b.traffic_match.cmp(&a.traffic_match))
        .then_with(|| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal))
}

/// Stable: equal keys keep their input order.
pub(crate) fn sort_scored(items: &mut [ScoredSolution]) {
    items.sort_by(compare_scored);
}

/// Groups keep the order in which their category first appears.
pub(crate) fn group_by_category<'a, I>(items: I) -> IndexMap<String, Vec<ScoredSolution>>
where
    I: IntoIterator<Item = &'a ScoredSolution>,
{
    let mut groups: IndexMap<String, Vec<ScoredSolution>> = IndexMap::new();
    for item in items {
        let category = item
            .solution
            .category
            .as_deref()
            .map(str::trim)
            .filter(|category| !category.is_empty())
            .unwrap_or(UNKNOWN_CATEGORY);
        groups
            .entry(category.to_string())
            .or_default()
            .push(item.clone());
    }
    groups
}
