//! Wished-for purchases and the draft records used to create or edit them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::common::*;
use crate::domain::quadrant::Quadrant;
use crate::errors::ValidationError;

/// Opaque item identifier. Stored documents may carry ids that are not UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One candidate purchase inside a month record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: u64,
    pub quad: Quadrant,
    #[serde(default)]
    pub selected: bool,
}

impl Item {
    /// Builds an unselected item from already validated fields.
    pub fn new(id: ItemId, valid: ValidatedItem) -> Self {
        Self {
            id,
            name: valid.name,
            price: valid.price,
            quad: valid.quad,
            selected: false,
        }
    }

    /// Overwrites the editable fields in one step.
    pub fn apply(&mut self, valid: ValidatedItem) {
        self.name = valid.name;
        self.price = valid.price;
        self.quad = valid.quad;
    }
}

impl Identifiable for Item {
    fn id(&self) -> &ItemId {
        &self.id
    }
}

impl Displayable for Item {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.name, self.quad)
    }
}

/// A complete proposed record, as typed by the user, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub price: i64,
    pub quad: String,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, price: i64, quad: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            quad: quad.into(),
        }
    }

    /// Checks name, price and quadrant in that order; nothing is returned half-valid.
    pub fn validate(&self) -> Result<ValidatedItem, ValidationError> {
        let name = validate_name(&self.name)?;
        let price = validate_price(self.price)?;
        let quad = Quadrant::parse_input(&self.quad)?;
        Ok(ValidatedItem { name, price, quad })
    }
}

/// Fields that passed validation and may be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedItem {
    pub name: String,
    pub price: u64,
    pub quad: Quadrant,
}

impl ValidatedItem {
    pub fn new(name: &str, price: i64, quad: Quadrant) -> Result<Self, ValidationError> {
        Ok(Self {
            name: validate_name(name)?,
            price: validate_price(price)?,
            quad,
        })
    }
}

pub(crate) fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(trimmed.to_string())
    }
}

pub(crate) fn validate_price(raw: i64) -> Result<u64, ValidationError> {
    u64::try_from(raw).map_err(|_| ValidationError::InvalidPrice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_validation_trims_name_and_quadrant() {
        let draft = ItemDraft::new("  Camera ", 50_000, " i ");
        let valid = draft.validate().expect("valid draft");
        assert_eq!(valid.name, "Camera");
        assert_eq!(valid.price, 50_000);
        assert_eq!(valid.quad, Quadrant::Important);
    }

    #[test]
    fn draft_validation_reports_first_failure() {
        let draft = ItemDraft::new("   ", -1, "Q");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));

        let draft = ItemDraft::new("Lens", -1, "Q");
        assert_eq!(draft.validate(), Err(ValidationError::InvalidPrice));

        let draft = ItemDraft::new("Lens", 0, "Q");
        assert_eq!(draft.validate(), Err(ValidationError::InvalidQuadrant));
    }

    #[test]
    fn item_serializes_with_wire_field_names() {
        let valid = ValidatedItem::new("Desk", 12_000, Quadrant::Urgent).unwrap();
        let item = Item::new(ItemId::new("abc"), valid);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "abc",
                "name": "Desk",
                "price": 12000,
                "quad": "U",
                "selected": false
            })
        );
    }
}
