use std::collections::HashMap;

/// Header cells become field names: BOM and zero-width characters stripped,
/// inner whitespace joined with underscores. Case is kept; matching against
/// known fields happens case-insensitively in `FieldResolver`.
pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Maps score sheet headers onto the field names content already uses.
pub(crate) struct FieldResolver {
    known: HashMap<String, String>,
}

impl FieldResolver {
    /// Earlier names win when two differ only in case.
    pub(crate) fn new<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut known = HashMap::new();
        for name in names {
            known
                .entry(name.to_lowercase())
                .or_insert_with(|| name.to_string());
        }
        Self { known }
    }

    /// Known field with the same name ignoring case, else the lowercased header.
    pub(crate) fn resolve(&self, header: &str) -> String {
        let key = header.to_lowercase();
        self.known.get(&key).cloned().unwrap_or(key)
    }
}

/// Dutch spreadsheets export decimals with a comma.
pub(crate) fn parse_score(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
