use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Identifier wrapper for motivation reasons ("BusinessParkReason").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReasonId(pub String);

/// Identifier wrapper for mobility solutions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SolutionId(pub String);

/// Identifier wrapper for governance models.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GovernanceModelId(pub String);

/// Identifier wrapper for implementation variations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariationId(pub String);

macro_rules! id_conversions {
    ($($name:ident),*) => {
        $(
            impl $name {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl From<&str> for $name {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

id_conversions!(ReasonId, SolutionId, GovernanceModelId, VariationId);

/// A business-park pain point used as a scoring and filter dimension.
///
/// `identifier` names the numeric score field on a [`MobilitySolution`] this
/// reason reads; `weight` multiplies that raw score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationReason {
    pub id: ReasonId,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_order",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

/// Travel categories a business park declares and a solution serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrafficType {
    #[serde(rename = "woon-werkverkeer", alias = "commuter", alias = "COMMUTER")]
    Commuter,
    #[serde(rename = "zakelijk verkeer", alias = "business", alias = "BUSINESS")]
    Business,
    #[serde(
        rename = "bezoekers",
        alias = "bezoekersverkeer",
        alias = "visitor",
        alias = "VISITOR"
    )]
    Visitor,
}

impl TrafficType {
    pub const ALL: [TrafficType; 3] = [Self::Commuter, Self::Business, Self::Visitor];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Commuter => "woon-werkverkeer",
            Self::Business => "zakelijk verkeer",
            Self::Visitor => "bezoekers",
        }
    }

    /// Accepts the content labels as well as the English names, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "woon-werkverkeer" | "commuter" => Some(Self::Commuter),
            "zakelijk verkeer" | "business" => Some(Self::Business),
            "bezoekers" | "bezoekersverkeer" | "visitor" => Some(Self::Visitor),
            _ => None,
        }
    }
}

impl fmt::Display for TrafficType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where employees prefer to be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickupPreference {
    Thuis,
    Locatie,
    Ov,
}

impl PickupPreference {
    /// Substring a solution's pickup option must contain to satisfy this
    /// preference. `Ov` has no rule and is satisfied by every solution.
    pub const fn needle(self) -> Option<&'static str> {
        match self {
            Self::Thuis => Some("thuis"),
            Self::Locatie => Some("locatie"),
            Self::Ov => None,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "thuis" => Some(Self::Thuis),
            "locatie" => Some(Self::Locatie),
            "ov" => Some(Self::Ov),
            _ => None,
        }
    }
}

/// Content link to another entry, shaped `{ "sys": { "id": ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawRef")]
pub struct GovernanceRef {
    pub sys: RefSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefSys {
    pub id: GovernanceModelId,
}

impl GovernanceRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            sys: RefSys {
                id: GovernanceModelId(id.into()),
            },
        }
    }

    pub fn id(&self) -> &GovernanceModelId {
        &self.sys.id
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRef {
    Linked { sys: RefSys },
    Bare(String),
}

impl From<RawRef> for GovernanceRef {
    fn from(raw: RawRef) -> Self {
        match raw {
            RawRef::Linked { sys } => Self { sys },
            RawRef::Bare(id) => Self::new(id),
        }
    }
}

/// Candidate collective-transport offering.
///
/// Every numeric attribute on the content record lands in `scores`, keyed by
/// the attribute name. Reasons read these through their `identifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MobilitySolutionRecord")]
pub struct MobilitySolution {
    pub id: SolutionId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "typeVervoer")]
    pub traffic_types: Vec<TrafficType>,
    #[serde(rename = "ophalen")]
    pub pickup_options: Vec<String>,
    #[serde(rename = "governanceModels")]
    pub governance_models: Vec<GovernanceRef>,
    #[serde(flatten)]
    pub scores: BTreeMap<String, f64>,
}

impl MobilitySolution {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: SolutionId::from(id),
            title: title.to_string(),
            category: None,
            traffic_types: Vec::new(),
            pickup_options: Vec::new(),
            governance_models: Vec::new(),
            scores: BTreeMap::new(),
        }
    }

    pub fn with_score(mut self, field: &str, value: f64) -> Self {
        self.scores.insert(field.to_string(), value);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_traffic_types(mut self, traffic_types: &[TrafficType]) -> Self {
        self.traffic_types = traffic_types.to_vec();
        self
    }

    pub fn with_pickup_options(mut self, options: &[&str]) -> Self {
        self.pickup_options = options.iter().map(|option| option.to_string()).collect();
        self
    }

    /// Raw score for a field; missing fields read as zero.
    pub fn score_field(&self, field: &str) -> f64 {
        self.scores.get(field).copied().unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
struct MobilitySolutionRecord {
    id: SolutionId,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    category: Option<String>,
    #[serde(
        default,
        rename = "typeVervoer",
        alias = "traffic_types",
        deserialize_with = "traffic_type_list"
    )]
    traffic_types: Vec<TrafficType>,
    #[serde(
        default,
        rename = "ophalen",
        alias = "pickup_options",
        deserialize_with = "string_list"
    )]
    pickup_options: Vec<String>,
    #[serde(
        default,
        rename = "governanceModels",
        alias = "governance_models",
        deserialize_with = "ref_list"
    )]
    governance_models: Vec<GovernanceRef>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

impl From<MobilitySolutionRecord> for MobilitySolution {
    fn from(record: MobilitySolutionRecord) -> Self {
        let scores = record
            .attributes
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_f64()
                    .filter(|number| number.is_finite())
                    .map(|number| (key, number))
            })
            .collect();

        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            category: record.category,
            traffic_types: record.traffic_types,
            pickup_options: record.pickup_options,
            governance_models: record.governance_models,
            scores,
        }
    }
}

/// Procurement or operating model for one mobility solution, carrying the
/// three governance-model reference lists used for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VariationRecord")]
pub struct ImplementationVariation {
    pub id: VariationId,
    pub title: String,
    #[serde(rename = "mobiliteitsdienstVariantId")]
    pub solution_id: SolutionId,
    #[serde(rename = "governanceModels")]
    pub governance_models: Vec<GovernanceRef>,
    #[serde(rename = "governanceModelsMits")]
    pub governance_models_mits: Vec<GovernanceRef>,
    #[serde(rename = "governanceModelsNietgeschikt")]
    pub governance_models_nietgeschikt: Vec<GovernanceRef>,
    /// Free text per governance model, keyed by [`governance_field_name`].
    #[serde(flatten)]
    pub notes: BTreeMap<String, String>,
}

impl ImplementationVariation {
    pub fn new(id: &str, title: &str, solution_id: &str) -> Self {
        Self {
            id: VariationId::from(id),
            title: title.to_string(),
            solution_id: SolutionId::from(solution_id),
            governance_models: Vec::new(),
            governance_models_mits: Vec::new(),
            governance_models_nietgeschikt: Vec::new(),
            notes: BTreeMap::new(),
        }
    }

    pub fn note_for(&self, model: &GovernanceModel) -> Option<&str> {
        self.notes
            .get(&governance_field_name(&model.title))
            .map(String::as_str)
            .filter(|note| !note.trim().is_empty())
    }

    /// Matches a stored variant choice, which may hold either the id or the title.
    pub fn matches_choice(&self, choice: &str) -> bool {
        let choice = choice.trim();
        self.id.as_str() == choice || self.title.trim().eq_ignore_ascii_case(choice)
    }
}

#[derive(Deserialize)]
struct VariationRecord {
    id: VariationId,
    #[serde(default, deserialize_with = "lenient_string")]
    title: Option<String>,
    #[serde(rename = "mobiliteitsdienstVariantId", alias = "solution_id")]
    solution_id: SolutionId,
    #[serde(
        default,
        rename = "governanceModels",
        alias = "governance_models",
        deserialize_with = "ref_list"
    )]
    governance_models: Vec<GovernanceRef>,
    #[serde(
        default,
        rename = "governanceModelsMits",
        alias = "governance_models_mits",
        deserialize_with = "ref_list"
    )]
    governance_models_mits: Vec<GovernanceRef>,
    #[serde(
        default,
        rename = "governanceModelsNietgeschikt",
        alias = "governance_models_nietgeschikt",
        deserialize_with = "ref_list"
    )]
    governance_models_nietgeschikt: Vec<GovernanceRef>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

impl From<VariationRecord> for ImplementationVariation {
    fn from(record: VariationRecord) -> Self {
        let notes = record
            .attributes
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(text) => Some((key, text)),
                _ => None,
            })
            .collect();

        Self {
            id: record.id,
            title: record.title.unwrap_or_default(),
            solution_id: record.solution_id,
            governance_models: record.governance_models,
            governance_models_mits: record.governance_models_mits,
            governance_models_nietgeschikt: record.governance_models_nietgeschikt,
            notes,
        }
    }
}

/// Legal or organizational structure for running a chosen solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceModel {
    pub id: GovernanceModelId,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub advantages: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub disadvantages: Vec<String>,
}

impl GovernanceModel {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: GovernanceModelId::from(id),
            title: title.to_string(),
            summary: None,
            description: None,
            advantages: Vec::new(),
            disadvantages: Vec::new(),
        }
    }
}

/// Wizard answers owned by the front-end store, consumed read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionState {
    #[serde(alias = "selectedReasons")]
    pub selected_reasons: Vec<ReasonId>,
    #[serde(alias = "selectedSolutions")]
    pub selected_solutions: Vec<SolutionId>,
    /// Chosen variant per solution, stored as a variation id or title.
    #[serde(alias = "selectedVariants")]
    pub selected_variants: BTreeMap<SolutionId, Option<String>>,
    #[serde(alias = "businessParkInfo")]
    pub business_park: BusinessParkInfo,
    #[serde(
        alias = "employeePickupPreference",
        deserialize_with = "lenient_pickup",
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_pickup_preference: Option<PickupPreference>,
}

impl SelectionState {
    /// Variant choice for a solution, ignoring blank entries.
    pub fn variant_choice(&self, solution_id: &SolutionId) -> Option<&str> {
        self.selected_variants
            .get(solution_id)
            .and_then(|choice| choice.as_deref())
            .map(str::trim)
            .filter(|choice| !choice.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessParkInfo {
    #[serde(alias = "trafficTypes", deserialize_with = "traffic_type_list")]
    pub traffic_types: Vec<TrafficType>,
    #[serde(
        alias = "currentGovernanceModelId",
        skip_serializing_if = "Option::is_none"
    )]
    pub current_governance_model_id: Option<GovernanceModelId>,
}

/// Field name under which a variation stores its text for a governance model:
/// the title's alphanumeric words joined in lower camel case.
pub fn governance_field_name(title: &str) -> String {
    let mut field = String::with_capacity(title.len());
    for (index, word) in title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .enumerate()
    {
        let lower = word.to_lowercase();
        if index == 0 {
            field.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            field.extend(first.to_uppercase());
            field.push_str(chars.as_str());
        }
    }
    field
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite()))
}

fn lenient_order<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|value| {
        value
            .as_i64()
            .or_else(|| value.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))
    }))
}

fn lenient_pickup<'de, D>(deserializer: D) -> Result<Option<PickupPreference>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => {
            let parsed = PickupPreference::parse(&raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                warn!(preference = %raw, "ignoring unknown pickup preference");
            }
            parsed
        }
        _ => None,
    })
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        Some(Value::String(single)) => vec![single],
        _ => Vec::new(),
    })
}

fn traffic_type_list<'de, D>(deserializer: D) -> Result<Vec<TrafficType>, D::Error>
where
    D: Deserializer<'de>,
{
    let labels = string_list(deserializer)?;
    let mut traffic_types = Vec::with_capacity(labels.len());
    for label in &labels {
        match TrafficType::parse(label) {
            Some(parsed) if !traffic_types.contains(&parsed) => traffic_types.push(parsed),
            Some(_) => {}
            None => warn!(label = %label, "skipping unknown traffic type"),
        }
    }
    Ok(traffic_types)
}

fn ref_list<'de, D>(deserializer: D) -> Result<Vec<GovernanceRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<GovernanceRef>>::deserialize(deserializer)?.unwrap_or_default())
}
