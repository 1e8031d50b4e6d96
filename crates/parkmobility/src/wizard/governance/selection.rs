use tracing::debug;

use crate::wizard::domain::{ImplementationVariation, SelectionState};

/// Variant whose governance lists drive classification.
///
/// Walks the selected solutions in selection order and takes the chosen
/// variant of the first one that has a choice resolvable among `relevant`.
/// Without any such choice the first relevant variation is used.
pub fn select_active_variant<'a>(
    selection: &SelectionState,
    relevant: &'a [ImplementationVariation],
) -> Option<&'a ImplementationVariation> {
    for solution_id in &selection.selected_solutions {
        let Some(choice) = selection.variant_choice(solution_id) else {
            continue;
        };

        let chosen = relevant.iter().find(|variation| {
            &variation.solution_id == solution_id && variation.matches_choice(choice)
        });
        match chosen {
            Some(variation) => return Some(variation),
            None => debug!(
                solution = %solution_id,
                choice,
                "chosen variant is not among the relevant variations"
            ),
        }
    }

    relevant.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::domain::SolutionId;

    fn relevant() -> Vec<ImplementationVariation> {
        vec![
            ImplementationVariation::new("v1", "Zelf inkopen", "s1"),
            ImplementationVariation::new("v2", "Aanbieder exploiteert", "s1"),
            ImplementationVariation::new("v3", "Zelf inkopen", "s2"),
        ]
    }

    fn selection(solutions: &[&str], variants: &[(&str, Option<&str>)]) -> SelectionState {
        SelectionState {
            selected_solutions: solutions.iter().map(|id| SolutionId::from(*id)).collect(),
            selected_variants: variants
                .iter()
                .map(|(solution, choice)| {
                    (SolutionId::from(*solution), choice.map(str::to_string))
                })
                .collect(),
            ..SelectionState::default()
        }
    }

    #[test]
    fn first_selected_solution_with_choice_wins() {
        let relevant = relevant();
        let selection = selection(
            &["s2", "s1"],
            &[("s1", Some("v2")), ("s2", Some("Zelf inkopen"))],
        );

        let active = select_active_variant(&selection, &relevant).expect("variant chosen");

        assert_eq!(active.id.as_str(), "v3");
    }

    #[test]
    fn skips_solutions_without_choice() {
        let relevant = relevant();
        let selection = selection(&["s2", "s1"], &[("s2", None), ("s1", Some("v2"))]);

        let active = select_active_variant(&selection, &relevant).expect("variant chosen");

        assert_eq!(active.id.as_str(), "v2");
    }

    #[test]
    fn falls_back_to_first_relevant_variation() {
        let relevant = relevant();
        let selection = selection(&["s1", "s2"], &[("s1", None), ("s2", Some("Onbekend"))]);

        let active = select_active_variant(&selection, &relevant).expect("fallback");

        assert_eq!(active.id.as_str(), "v1");
    }

    #[test]
    fn no_relevant_variations_means_no_variant() {
        let selection = selection(&["s1"], &[("s1", Some("v1"))]);
        assert!(select_active_variant(&selection, &[]).is_none());
    }
}
