//! Loads and saves the whole [`Document`] as one JSON blob.
//!
//! Loading never fails. A missing, unparsable or oddly shaped blob is repaired
//! into the closest valid document and each repair is reported as a warning.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

use crate::{
    core::ids::IdGenerator,
    domain::{Document, Item, ItemId, MonthKey, Quadrant},
    errors::StorageError,
    storage::BlobStore,
};

/// Blob key used when the configuration does not name one.
pub const DEFAULT_STORAGE_KEY: &str = "wish_matrix_v2";

/// Where a loaded document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored under the key.
    Missing,
    /// The blob could not be read or parsed; an empty document was used.
    Corrupt,
    /// The blob was parsed (possibly with repairs).
    Stored,
}

/// Outcome of a load, including every repair that was applied.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub document: Document,
    pub source: LoadSource,
    pub warnings: Vec<String>,
}

impl LoadReport {
    fn empty(source: LoadSource, warnings: Vec<String>) -> Self {
        Self {
            document: Document::new(),
            source,
            warnings,
        }
    }

    pub fn was_healed(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Reads the document stored under `key`, healing whatever is found.
pub fn load_document(store: &dyn BlobStore, key: &str, ids: &dyn IdGenerator) -> LoadReport {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return LoadReport::empty(LoadSource::Missing, Vec::new()),
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read stored document");
            return LoadReport::empty(LoadSource::Corrupt, vec![format!("read failed: {err}")]);
        }
    };
    if raw.trim().is_empty() {
        return LoadReport::empty(LoadSource::Missing, Vec::new());
    }
    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(key, error = %err, "stored document is not valid JSON");
            return LoadReport::empty(LoadSource::Corrupt, vec![format!("parse failed: {err}")]);
        }
    };
    let (document, warnings) = heal_document(value, ids);
    for warning in &warnings {
        tracing::warn!(key, "{warning}");
    }
    LoadReport {
        document,
        source: LoadSource::Stored,
        warnings,
    }
}

/// Serializes and writes the whole document under `key`.
pub fn save_document(
    store: &dyn BlobStore,
    key: &str,
    document: &Document,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(document)?;
    store.set(key, &json)
}

/// Normalizes an arbitrary JSON value into a valid document.
pub fn heal_document(value: Value, ids: &dyn IdGenerator) -> (Document, Vec<String>) {
    let mut warnings = Vec::new();
    let mut document = Document::new();

    let root = match value {
        Value::Object(map) => map,
        other => {
            warnings.push(format!(
                "document root is {}, not an object",
                json_kind(&other)
            ));
            return (document, warnings);
        }
    };

    match root.get("months") {
        Some(Value::Object(months)) => heal_months(months, &mut document, ids, &mut warnings),
        Some(other) => warnings.push(format!("`months` is {}, reset", json_kind(other))),
        None => {}
    }

    match root.get("budgets") {
        Some(Value::Object(budgets)) => heal_budgets(budgets, &mut document, &mut warnings),
        Some(other) => warnings.push(format!("`budgets` is {}, reset", json_kind(other))),
        None => {}
    }

    (document, warnings)
}

fn heal_months(
    months: &Map<String, Value>,
    document: &mut Document,
    ids: &dyn IdGenerator,
    warnings: &mut Vec<String>,
) {
    // Keys that differ only by whitespace name the same month; ids stay unique per month.
    let mut seen: HashMap<MonthKey, HashSet<ItemId>> = HashMap::new();
    for (raw_key, entries) in months {
        let month = match MonthKey::parse(raw_key) {
            Ok(month) => month,
            Err(err) => {
                warnings.push(format!("dropped month: {err}"));
                continue;
            }
        };
        if seen.contains_key(&month) {
            warnings.push(format!("{month}: items under `{raw_key}` merged"));
        }
        let month_ids = seen.entry(month.clone()).or_default();
        let items = document.items_mut(&month);
        let entries = match entries {
            Value::Array(entries) => entries,
            Value::Null => continue,
            other => {
                warnings.push(format!("{month}: items were {}, reset", json_kind(other)));
                continue;
            }
        };
        for (idx, entry) in entries.iter().enumerate() {
            match heal_item(entry, ids, month_ids) {
                Ok((item, notes)) => {
                    for note in notes {
                        warnings.push(format!("{month}[{idx}]: {note}"));
                    }
                    items.push(item);
                }
                Err(reason) => warnings.push(format!("{month}[{idx}]: dropped, {reason}")),
            }
        }
    }
}

fn heal_item(
    entry: &Value,
    ids: &dyn IdGenerator,
    seen: &mut HashSet<ItemId>,
) -> Result<(Item, Vec<String>), String> {
    let fields = entry
        .as_object()
        .ok_or_else(|| format!("entry is {}", json_kind(entry)))?;
    let mut notes = Vec::new();

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or("missing name")?
        .to_string();

    let price = fields
        .get("price")
        .and_then(whole_non_negative)
        .ok_or("price is not a non-negative integer")?;

    let quad = match fields.get("quad").and_then(Value::as_str) {
        Some(tag) => {
            let quad = Quadrant::from_tag_or_neither(tag);
            if quad.tag() != tag {
                notes.push(format!("unknown quadrant `{tag}` moved to N"));
            }
            quad
        }
        None => {
            notes.push("missing quadrant, moved to N".to_string());
            Quadrant::Neither
        }
    };

    let selected = fields
        .get("selected")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let stored_id = fields
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(ItemId::new);
    let id = match stored_id {
        Some(id) if !seen.contains(&id) => id,
        Some(id) => {
            let fresh = ids.next_id();
            notes.push(format!("duplicate id `{id}` replaced by `{fresh}`"));
            fresh
        }
        None => {
            let fresh = ids.next_id();
            notes.push(format!("missing id replaced by `{fresh}`"));
            fresh
        }
    };
    seen.insert(id.clone());

    Ok((
        Item {
            id,
            name,
            price,
            quad,
            selected,
        },
        notes,
    ))
}

fn heal_budgets(
    budgets: &Map<String, Value>,
    document: &mut Document,
    warnings: &mut Vec<String>,
) {
    let mut seen = HashSet::new();
    for (raw_key, value) in budgets {
        let month = match MonthKey::parse(raw_key) {
            Ok(month) => month,
            Err(err) => {
                warnings.push(format!("dropped budget: {err}"));
                continue;
            }
        };
        if !seen.insert(month.clone()) {
            warnings.push(format!("{month}: budget under `{raw_key}` replaces an earlier one"));
        }
        match value.as_f64().filter(|v| v.is_finite() && *v >= 0.0) {
            Some(amount) => {
                if amount.fract() != 0.0 {
                    warnings.push(format!("{month}: fractional budget {amount} truncated"));
                }
                document.set_budget(&month, Some(amount.trunc() as u64));
            }
            None => warnings.push(format!("{month}: budget {value} removed")),
        }
    }
}

fn whole_non_negative(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 {
        Some(n as u64)
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
