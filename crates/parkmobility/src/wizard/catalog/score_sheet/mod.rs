mod normalizer;

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use serde::Serialize;
use tracing::warn;

use super::snapshot::ContentLoadError;
use crate::wizard::domain::MobilitySolution;
use normalizer::{normalize_header, parse_score, FieldResolver};

const ID_COLUMNS: &[&str] = &["solution_id", "id", "oplossing_id"];

/// One score sheet row: a solution id and the parsed score cells.
#[derive(Debug)]
pub(crate) struct ScoreRow {
    pub(crate) solution_id: String,
    pub(crate) scores: BTreeMap<String, f64>,
    pub(crate) invalid_cells: usize,
}

/// Outcome of applying a score sheet to a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreSheetReport {
    pub updated_solutions: usize,
    pub applied_scores: usize,
    pub invalid_cells: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unknown_solutions: Vec<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ScoreRow>, ContentLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let id_index = headers
        .iter()
        .position(|header| ID_COLUMNS.contains(&header.to_lowercase().as_str()))
        .ok_or(ContentLoadError::MissingIdColumn)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let solution_id = match record.get(id_index).map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => continue,
        };

        let mut scores = BTreeMap::new();
        let mut invalid_cells = 0;
        for (index, cell) in record.iter().enumerate() {
            if index == id_index || cell.trim().is_empty() {
                continue;
            }
            let Some(field) = headers.get(index).filter(|field| !field.is_empty()) else {
                continue;
            };
            match parse_score(cell) {
                Some(score) => {
                    scores.insert(field.clone(), score);
                }
                None => {
                    warn!(
                        solution = %solution_id,
                        field = %field,
                        cell = %cell,
                        "ignoring non-numeric score cell"
                    );
                    invalid_cells += 1;
                }
            }
        }

        rows.push(ScoreRow {
            solution_id,
            scores,
            invalid_cells,
        });
    }

    Ok(rows)
}

/// `identifiers` are the reason identifiers of the catalog. Headers naming
/// one of them, or an existing score field, in any case land on that name.
pub(crate) fn apply_rows(
    solutions: &mut [MobilitySolution],
    rows: Vec<ScoreRow>,
    identifiers: &[&str],
) -> ScoreSheetReport {
    let resolver = FieldResolver::new(
        identifiers.iter().copied().chain(
            solutions
                .iter()
                .flat_map(|solution| solution.scores.keys().map(String::as_str)),
        ),
    );
    let positions: HashMap<String, usize> = solutions
        .iter()
        .enumerate()
        .map(|(index, solution)| (solution.id.as_str().to_string(), index))
        .collect();

    let mut report = ScoreSheetReport::default();
    let mut touched = vec![false; solutions.len()];

    for row in rows {
        report.invalid_cells += row.invalid_cells;
        let Some(&index) = positions.get(&row.solution_id) else {
            warn!(solution = %row.solution_id, "score sheet references unknown solution");
            report.unknown_solutions.push(row.solution_id);
            continue;
        };

        if row.scores.is_empty() {
            continue;
        }
        report.applied_scores += row.scores.len();
        touched[index] = true;
        solutions[index].scores.extend(
            row.scores
                .into_iter()
                .map(|(field, score)| (resolver.resolve(&field), score)),
        );
    }

    report.updated_solutions = touched.iter().filter(|flag| **flag).count();
    report
}
